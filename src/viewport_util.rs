use bevy::{ecs::system::SystemParam, prelude::*, ui::UiGlobalTransform, window::PrimaryWindow};

use crate::viewport::SceneViewport;

/// Logical-pixel rectangle covered by a UI node.
pub(crate) fn node_rect(computed: &ComputedNode, transform: &UiGlobalTransform) -> Rect {
    // Convert from physical pixels to logical pixels to match cursor_position()
    let scale = computed.inverse_scale_factor();
    // ComputedNode position is the center
    Rect::from_center_size(transform.translation * scale, computed.size() * scale)
}

/// Map a window cursor position into a view's render-target space.
///
/// The camera renders to an off-screen image whose logical size may differ
/// from the UI node's logical size (they diverge on HiDPI/fractional-scaling
/// displays). Returns `None` for a degenerate (zero-sized) view.
pub(crate) fn cursor_to_target(cursor: Vec2, rect: Rect, target_size: Option<Vec2>) -> Option<Vec2> {
    let size = rect.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let local = cursor - rect.min;
    Some(local * target_size.unwrap_or(size) / size)
}

/// Point `distance` units along `ray`, expressed in the local space of `parent`.
pub(crate) fn point_on_ray(ray: Ray3d, distance: f32, parent: Option<&GlobalTransform>) -> Vec3 {
    let world = ray.origin + *ray.direction * distance;
    match parent {
        Some(parent) => parent.affine().inverse().transform_point3(world),
        None => world,
    }
}

/// Cursor and camera-ray access for scene views.
#[derive(SystemParam)]
pub struct ViewportPointer<'w, 's> {
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    nodes: Query<'w, 's, (&'static ComputedNode, &'static UiGlobalTransform), With<SceneViewport>>,
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform)>,
}

impl ViewportPointer<'_, '_> {
    pub fn cursor(&self) -> Option<Vec2> {
        self.windows.single().ok()?.cursor_position()
    }

    pub fn view_rect(&self, view: Entity) -> Option<Rect> {
        let (computed, transform) = self.nodes.get(view).ok()?;
        Some(node_rect(computed, transform))
    }

    pub fn mouse_in_view(&self, view: Entity) -> bool {
        match (self.cursor(), self.view_rect(view)) {
            (Some(cursor), Some(rect)) => rect.contains(cursor),
            _ => false,
        }
    }

    /// Ray from `camera` through the cursor, or `None` when the cursor is
    /// unavailable or the view has no area.
    pub fn camera_ray(&self, view: Entity, camera: Entity) -> Option<Ray3d> {
        let cursor = self.cursor()?;
        let rect = self.view_rect(view)?;
        let (camera, camera_transform) = self.cameras.get(camera).ok()?;
        let target = cursor_to_target(cursor, rect, camera.logical_viewport_size())?;
        camera.viewport_to_world(camera_transform, target).ok()
    }
}
