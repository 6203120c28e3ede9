//! Project asset tracking: GUID-addressed resources, `.asset` sidecars, the
//! import cache, and the notifications broadcast when resources come and go.

mod database;
mod importer;

use std::path::PathBuf;

use bevy::prelude::*;

pub use database::{AssetDatabase, AssetDbError, AssetMeta, DOT_ASSET_EXTENSION, ProjectAsset, ScanReport};
pub use importer::ImporterKind;

pub struct AssetDatabasePlugin;

impl Plugin for AssetDatabasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetDatabaseConfig>()
            .add_message::<ResourceAdded>()
            .add_message::<ResourceRemoved>()
            .add_systems(Startup, init_asset_database)
            .add_systems(
                Update,
                scan_asset_database.run_if(resource_exists::<AssetDatabase>),
            );
    }
}

/// Where the project's resources and import cache live on disk.
#[derive(Resource, Clone, Debug)]
pub struct AssetDatabaseConfig {
    /// The Bevy asset root. Cached files are loaded relative to it.
    pub asset_root: PathBuf,
    /// Resource directory, relative to `asset_root`.
    pub resources: String,
    /// Import cache directory, relative to `asset_root`.
    pub cache: String,
}

impl Default for AssetDatabaseConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            resources: "Resources".to_string(),
            cache: "Cache".to_string(),
        }
    }
}

/// A resource was registered with the asset database.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct ResourceAdded {
    pub guid: String,
}

/// A resource disappeared from the asset database.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct ResourceRemoved {
    pub guid: String,
}

fn init_asset_database(mut commands: Commands, config: Res<AssetDatabaseConfig>) {
    let mut db = AssetDatabase::new(&config);
    db.request_scan();
    commands.insert_resource(db);
}

fn scan_asset_database(
    mut db: ResMut<AssetDatabase>,
    mut added: MessageWriter<ResourceAdded>,
    mut removed: MessageWriter<ResourceRemoved>,
) {
    if !db.scan_requested() {
        return;
    }

    let report = match db.scan() {
        Ok(report) => report,
        Err(err) => {
            warn!("Asset scan failed: {err}");
            return;
        }
    };

    if !report.added.is_empty() || !report.removed.is_empty() || !report.failed.is_empty() {
        info!(
            "Asset scan: {} added, {} removed, {} imported, {} failed",
            report.added.len(),
            report.removed.len(),
            report.imported.len(),
            report.failed.len()
        );
    }

    added.write_batch(report.added.into_iter().map(|guid| ResourceAdded { guid }));
    removed.write_batch(report.removed.into_iter().map(|guid| ResourceRemoved { guid }));
}
