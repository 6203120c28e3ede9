use std::path::Path;

/// Importer family an asset belongs to, derived from its file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImporterKind {
    Folder,
    Model,
    Texture,
    Material,
    Sound,
    Script,
    Scene,
    Raw,
}

impl ImporterKind {
    pub const ALL: [ImporterKind; 8] = [
        Self::Folder,
        Self::Model,
        Self::Texture,
        Self::Material,
        Self::Sound,
        Self::Script,
        Self::Scene,
        Self::Raw,
    ];

    pub fn type_name(self) -> &'static str {
        match self {
            Self::Folder => "FolderImporter",
            Self::Model => "ModelImporter",
            Self::Texture => "TextureImporter",
            Self::Material => "MaterialImporter",
            Self::Sound => "AudioImporter",
            Self::Script => "JavascriptImporter",
            Self::Scene => "SceneImporter",
            Self::Raw => "TextImporter",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    /// Classify a file by extension. Directories are classified by the caller.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "gltf" | "glb" => Self::Model,
            "png" | "jpg" | "jpeg" | "bmp" | "tga" | "webp" | "ktx2" | "dds" => Self::Texture,
            "material" => Self::Material,
            "ogg" | "wav" | "flac" | "mp3" => Self::Sound,
            "js" | "ts" | "lua" => Self::Script,
            "scene" | "jsn" | "ron" => Self::Scene,
            _ => Self::Raw,
        }
    }

    /// Whether importing produces a file in the cache directory.
    pub fn requires_cache_file(self) -> bool {
        matches!(self, Self::Model)
    }
}
