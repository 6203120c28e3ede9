use std::path::PathBuf;

use bevy::prelude::*;

/// Broadcast whenever the editor's active (selected) node changes.
/// `None` clears the selection.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveNodeChange {
    pub node: Option<Entity>,
}

/// Broadcast when a scene view binds to a scene.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSceneChange {
    pub scene: Entity,
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// A tracked project asset, by GUID.
    Asset { guid: String },
    /// A file on disk, resolved through the asset database.
    File { path: PathBuf },
}

/// A drag operation entered a scene view.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct DragEnterViewport {
    pub viewport: Entity,
    pub payload: DragPayload,
}

/// A drag operation left a scene view without dropping.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragExitViewport {
    pub viewport: Entity,
}

/// The current drag operation was dropped.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragEnded;
