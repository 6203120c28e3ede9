use std::{
    fs,
    path::{self, Path, PathBuf},
    time::UNIX_EPOCH,
};

use bevy::{
    platform::collections::{HashMap, HashSet},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{AssetDatabaseConfig, ImporterKind};

/// Extension appended to a resource's file name to form its metadata sidecar.
pub const DOT_ASSET_EXTENSION: &str = "asset";

const META_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum AssetDbError {
    #[error("resource directory '{0}' does not exist")]
    MissingResourceDir(PathBuf),
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid asset metadata '{path}': {source}")]
    Meta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid glTF document '{path}': {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AssetDbError + '_ {
    move |source| AssetDbError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Contents of a `.asset` sidecar.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AssetMeta {
    pub version: u32,
    pub guid: String,
    pub importer: String,
}

/// One tracked file or folder under the resource directory.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectAsset {
    pub guid: String,
    /// File stem, or the folder name.
    pub name: String,
    /// Path relative to the resource directory.
    pub path: PathBuf,
    pub importer: ImporterKind,
    /// Modification time in seconds since the Unix epoch.
    pub timestamp: u64,
    /// GUID of the containing folder, `None` at the resource root.
    pub parent: Option<String>,
    pub dirty: bool,
}

impl ProjectAsset {
    pub fn importer_type_name(&self) -> &'static str {
        self.importer.type_name()
    }

    pub fn is_folder(&self) -> bool {
        self.importer == ImporterKind::Folder
    }

    fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// Outcome of one [`AssetDatabase::scan`].
#[derive(Debug, Default)]
pub struct ScanReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub imported: Vec<String>,
    /// Paths (relative to the resource directory) that could not be read,
    /// registered or imported, with the reason. The scan carries on past them.
    pub failed: Vec<(PathBuf, String)>,
}

/// Bookkeeping for a single scan.
#[derive(Default)]
struct ScanPass {
    seen: HashSet<String>,
    /// Directories whose contents could not be listed. Assets below them are
    /// kept as they were.
    unreadable: Vec<PathBuf>,
    report: ScanReport,
}

impl ScanPass {
    fn fail(&mut self, path: PathBuf, err: &AssetDbError) {
        warn!("{err}");
        self.report.failed.push((path, err.to_string()));
    }
}

/// GUID-addressed index of the project's resource directory.
#[derive(Resource, Debug)]
pub struct AssetDatabase {
    resource_dir: PathBuf,
    cache_dir: PathBuf,
    cache_asset_dir: String,
    assets: HashMap<String, ProjectAsset>,
    paths: HashMap<PathBuf, String>,
    scan_requested: bool,
}

impl AssetDatabase {
    pub fn new(config: &AssetDatabaseConfig) -> Self {
        Self {
            resource_dir: config.asset_root.join(&config.resources),
            cache_dir: config.asset_root.join(&config.cache),
            cache_asset_dir: config.cache.clone(),
            assets: HashMap::default(),
            paths: HashMap::default(),
            scan_requested: false,
        }
    }

    /// The resource directory. Absolute and canonical after the first scan.
    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn request_scan(&mut self) {
        self.scan_requested = true;
    }

    pub fn scan_requested(&self) -> bool {
        self.scan_requested
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get_by_guid(&self, guid: &str) -> Option<&ProjectAsset> {
        self.assets.get(guid)
    }

    /// Look up an asset by a path relative to the resource directory, or by
    /// an absolute path inside it (as delivered by OS file drops).
    pub fn get_by_path(&self, path: impl AsRef<Path>) -> Option<&ProjectAsset> {
        let path = path.as_ref();
        let relative = if path.is_absolute() {
            let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            path.strip_prefix(&self.resource_dir).ok()?.to_path_buf()
        } else {
            path.to_path_buf()
        };
        self.paths
            .get(&relative)
            .and_then(|guid| self.assets.get(guid))
    }

    pub fn assets_by_importer(&self, importer: ImporterKind) -> Vec<&ProjectAsset> {
        let mut assets: Vec<_> = self
            .assets
            .values()
            .filter(|asset| asset.importer == importer)
            .collect();
        assets.sort_by(|a, b| a.path.cmp(&b.path));
        assets
    }

    /// Direct children of a folder, or of the resource root when `folder` is `None`.
    pub fn folder_assets(&self, folder: Option<&str>) -> Vec<&ProjectAsset> {
        let mut assets: Vec<_> = self
            .assets
            .values()
            .filter(|asset| asset.parent.as_deref() == folder)
            .collect();
        assets.sort_by(|a, b| a.path.cmp(&b.path));
        assets
    }

    /// Path of a resource's `.asset` sidecar.
    pub fn dot_asset_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".");
        name.push(DOT_ASSET_EXTENSION);
        path.with_file_name(name)
    }

    /// On-disk location of an asset's cached representation.
    pub fn cache_file_path(&self, asset: &ProjectAsset) -> PathBuf {
        self.cache_dir.join(cache_file_name(asset))
    }

    /// Directory holding the external files a cached glTF refers to.
    pub fn cache_dependency_dir(&self, asset: &ProjectAsset) -> PathBuf {
        self.cache_dir.join(&asset.guid)
    }

    /// Asset-server path of an asset's cached representation.
    pub fn cache_asset_path(&self, asset: &ProjectAsset) -> String {
        format!("{}/{}", self.cache_asset_dir, cache_file_name(asset))
    }

    /// A fresh GUID: 32 lowercase hex digits.
    pub fn generate_guid() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Synchronize with the resource directory.
    ///
    /// Only a missing or unresolvable resource directory fails the scan.
    /// Problems with single files land in [`ScanReport::failed`].
    pub fn scan(&mut self) -> Result<ScanReport, AssetDbError> {
        self.scan_requested = false;
        if !self.resource_dir.is_dir() {
            return Err(AssetDbError::MissingResourceDir(self.resource_dir.clone()));
        }
        let root = fs::canonicalize(&self.resource_dir).map_err(io_error(&self.resource_dir))?;
        self.resource_dir = root.clone();

        let mut pass = ScanPass::default();
        self.scan_dir(&root, None, &mut pass);

        let mut vanished: Vec<String> = self
            .assets
            .values()
            .filter(|asset| {
                !pass.seen.contains(&asset.guid)
                    && !pass.unreadable.iter().any(|dir| asset.path.starts_with(dir))
            })
            .map(|asset| asset.guid.clone())
            .collect();
        vanished.sort();
        for guid in vanished {
            if let Some(asset) = self.assets.remove(&guid) {
                if self.paths.get(&asset.path) == Some(&guid) {
                    self.paths.remove(&asset.path);
                }
                self.discard_files(&asset);
                pass.report.removed.push(guid);
            }
        }

        Ok(pass.report)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.resource_dir)
            .unwrap_or(path)
            .to_path_buf()
    }

    fn scan_dir(&mut self, dir: &Path, parent: Option<&str>, pass: &mut ScanPass) {
        let entries = match fs::read_dir(dir).map_err(io_error(dir)) {
            Ok(entries) => entries,
            Err(err) => {
                let relative = self.relative(dir);
                pass.fail(relative.clone(), &err);
                pass.unreadable.push(relative);
                return;
            }
        };
        let mut entries: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        for path in entries {
            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            if file_name.starts_with('.')
                || path.extension().is_some_and(|ext| ext == DOT_ASSET_EXTENSION)
            {
                continue;
            }

            let is_dir = path.is_dir();
            let guid = self.register_path(&path, is_dir, parent, pass);
            if is_dir {
                self.scan_dir(&path, Some(&guid), pass);
            }
        }
    }

    fn register_path(
        &mut self,
        path: &Path,
        is_dir: bool,
        parent: Option<&str>,
        pass: &mut ScanPass,
    ) -> String {
        let relative = self.relative(path);
        // An unreadable sidecar is treated as missing and rewritten.
        let meta = read_meta(&Self::dot_asset_path(path)).unwrap_or_else(|err| {
            pass.fail(relative.clone(), &err);
            None
        });

        let importer = if is_dir {
            ImporterKind::Folder
        } else {
            meta.as_ref()
                .and_then(|meta| ImporterKind::from_type_name(&meta.importer))
                .unwrap_or_else(|| ImporterKind::from_path(path))
        };

        let guid = match meta {
            Some(meta) if !pass.seen.contains(&meta.guid) => meta.guid,
            Some(meta) => {
                let guid = Self::generate_guid();
                warn!(
                    "Duplicate asset GUID {} at {}; assigned {guid}",
                    meta.guid,
                    relative.display()
                );
                self.write_meta_or_report(path, &guid, importer, pass);
                guid
            }
            None => {
                // Keep the GUID this path had before its sidecar went missing.
                let guid = self
                    .paths
                    .get(&relative)
                    .filter(|guid| !pass.seen.contains(*guid))
                    .cloned()
                    .unwrap_or_else(Self::generate_guid);
                self.write_meta_or_report(path, &guid, importer, pass);
                guid
            }
        };
        pass.seen.insert(guid.clone());

        let timestamp = modified_secs(path);
        let name = if is_dir {
            path.file_name()
        } else {
            path.file_stem()
        }
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

        match self.assets.get_mut(&guid) {
            Some(asset) => {
                if asset.path != relative {
                    self.paths.remove(&asset.path);
                    asset.path = relative.clone();
                    asset.name = name;
                }
                if asset.timestamp != timestamp {
                    asset.timestamp = timestamp;
                    asset.dirty = true;
                }
                asset.importer = importer;
                asset.parent = parent.map(str::to_string);
            }
            None => {
                self.assets.insert(
                    guid.clone(),
                    ProjectAsset {
                        guid: guid.clone(),
                        name,
                        path: relative.clone(),
                        importer,
                        timestamp,
                        parent: parent.map(str::to_string),
                        dirty: true,
                    },
                );
                pass.report.added.push(guid.clone());
            }
        }
        self.paths.insert(relative, guid.clone());

        self.import_if_needed(&guid, pass);
        guid
    }

    fn write_meta_or_report(&self, path: &Path, guid: &str, importer: ImporterKind, pass: &mut ScanPass) {
        if let Err(err) = write_meta(path, guid, importer) {
            pass.fail(self.relative(path), &err);
        }
    }

    fn import_if_needed(&mut self, guid: &str, pass: &mut ScanPass) {
        let Some(asset) = self.assets.get(guid) else {
            return;
        };
        let result = if !asset.importer.requires_cache_file() {
            None
        } else if !asset.dirty && self.cache_file_path(asset).exists() {
            return;
        } else {
            Some((asset.path.clone(), self.import_to_cache(asset)))
        };

        match result {
            Some((path, Err(err))) => pass.fail(path, &err),
            Some((_, Ok(()))) => {
                pass.report.imported.push(guid.to_string());
                if let Some(asset) = self.assets.get_mut(guid) {
                    asset.dirty = false;
                }
            }
            None => {
                if let Some(asset) = self.assets.get_mut(guid) {
                    asset.dirty = false;
                }
            }
        }
    }

    /// Copy a model into the cache. A `.gltf` document has its external
    /// buffers and images copied under [`Self::cache_dependency_dir`] and
    /// their URIs rewritten to point there.
    fn import_to_cache(&self, asset: &ProjectAsset) -> Result<(), AssetDbError> {
        let source = self.resource_dir.join(&asset.path);
        let cache_file = self.cache_file_path(asset);
        let dependency_dir = self.cache_dependency_dir(asset);
        fs::create_dir_all(&self.cache_dir).map_err(io_error(&self.cache_dir))?;
        if dependency_dir.is_dir() {
            fs::remove_dir_all(&dependency_dir).map_err(io_error(&dependency_dir))?;
        }

        if asset.extension().as_deref() != Some("gltf") {
            fs::copy(&source, &cache_file).map_err(io_error(&source))?;
            return Ok(());
        }

        let gltf_error = |source| AssetDbError::Gltf {
            path: asset.path.clone(),
            source,
        };
        let json = fs::read_to_string(&source).map_err(io_error(&source))?;
        let mut document: Value = serde_json::from_str(&json).map_err(gltf_error)?;
        let source_dir = source.parent().unwrap_or(Path::new(""));

        for section in ["buffers", "images"] {
            let Some(items) = document.get_mut(section).and_then(Value::as_array_mut) else {
                continue;
            };
            for item in items {
                let Some(uri) = item.get_mut("uri") else {
                    continue;
                };
                let Some(cached) = uri.as_str().and_then(cached_dependency_path) else {
                    continue;
                };
                let from = source_dir.join(uri.as_str().unwrap_or_default());
                let to = dependency_dir.join(&cached);
                if let Some(dir) = to.parent() {
                    fs::create_dir_all(dir).map_err(io_error(dir))?;
                }
                fs::copy(&from, &to).map_err(io_error(&from))?;
                *uri = Value::String(format!("{}/{cached}", asset.guid));
            }
        }

        let json = serde_json::to_string(&document).map_err(gltf_error)?;
        fs::write(&cache_file, json).map_err(io_error(&cache_file))
    }

    /// Delete what a vanished asset left behind: its cached files and a
    /// sidecar that still names it.
    fn discard_files(&self, asset: &ProjectAsset) {
        let cache_file = self.cache_file_path(asset);
        if cache_file.is_file() {
            if let Err(err) = fs::remove_file(&cache_file) {
                warn!("Failed to remove cached file '{}': {err}", cache_file.display());
            }
        }
        let dependency_dir = self.cache_dependency_dir(asset);
        if dependency_dir.is_dir() {
            if let Err(err) = fs::remove_dir_all(&dependency_dir) {
                warn!("Failed to remove cache directory '{}': {err}", dependency_dir.display());
            }
        }

        let sidecar = Self::dot_asset_path(&self.resource_dir.join(&asset.path));
        let orphaned = matches!(read_meta(&sidecar), Ok(Some(meta)) if meta.guid == asset.guid);
        if orphaned {
            if let Err(err) = fs::remove_file(&sidecar) {
                warn!("Failed to remove sidecar '{}': {err}", sidecar.display());
            }
        }
    }
}

fn cache_file_name(asset: &ProjectAsset) -> String {
    match asset.extension() {
        Some(ext) => format!("{}.{ext}", asset.guid),
        None => asset.guid.clone(),
    }
}

/// Where an external glTF URI lands below the cache dependency directory,
/// or `None` for embedded and remote URIs. Parent-directory steps are dropped.
fn cached_dependency_path(uri: &str) -> Option<String> {
    if uri.starts_with("data:") || uri.contains("://") {
        return None;
    }
    let parts: Vec<String> = Path::new(uri)
        .components()
        .filter_map(|component| match component {
            path::Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn read_meta(dot_asset: &Path) -> Result<Option<AssetMeta>, AssetDbError> {
    if !dot_asset.is_file() {
        return Ok(None);
    }
    let json = fs::read_to_string(dot_asset).map_err(io_error(dot_asset))?;
    match serde_json::from_str(&json) {
        Ok(meta) => Ok(Some(meta)),
        Err(source) => Err(AssetDbError::Meta {
            path: dot_asset.to_path_buf(),
            source,
        }),
    }
}

fn write_meta(path: &Path, guid: &str, importer: ImporterKind) -> Result<(), AssetDbError> {
    let dot_asset = AssetDatabase::dot_asset_path(path);
    let meta = AssetMeta {
        version: META_VERSION,
        guid: guid.to_string(),
        importer: importer.type_name().to_string(),
    };
    let json = serde_json::to_string_pretty(&meta).map_err(|source| AssetDbError::Meta {
        path: dot_asset.clone(),
        source,
    })?;
    fs::write(&dot_asset, json).map_err(io_error(&dot_asset))
}

fn modified_secs(path: &Path) -> u64 {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
