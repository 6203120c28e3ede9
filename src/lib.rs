pub mod drag_drop;
pub mod events;
pub mod selection;
pub mod viewport;
pub mod viewport_overlays;
pub mod viewport_select;
pub mod viewport_util;

use bevy::prelude::*;
use bevy_infinite_grid::InfiniteGridPlugin;
use scene_view_assets::AssetDatabasePlugin;
use scene_view_camera::FlyCameraPlugin;

pub use scene_view_assets;
pub use scene_view_camera;

/// Editor-owned entity (view cameras, UI, grid). Never picked or saved.
#[derive(Component, Default)]
pub struct EditorEntity;

/// Root of the scene being edited. Dropped assets become its children.
#[derive(Component, Default)]
#[require(Transform, Visibility)]
pub struct EditorScene;

/// Debug drawing of this node stops at the node itself instead of walking
/// its components and children. For nodes with very many children, such as
/// terrain patches.
#[derive(Component, Default)]
pub struct DebugDrawShallow;

pub struct SceneViewPlugin;

impl Plugin for SceneViewPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<InfiniteGridPlugin>() {
            app.add_plugins(InfiniteGridPlugin);
        }
        app.add_plugins((
            FlyCameraPlugin,
            AssetDatabasePlugin,
            selection::SelectionPlugin,
            viewport::ViewportPlugin,
            viewport_overlays::ViewportOverlaysPlugin,
            viewport_select::ViewportSelectPlugin,
            drag_drop::DragDropPlugin,
        ));
    }
}
