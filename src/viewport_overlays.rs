use bevy::{
    camera::primitives::Aabb, ecs::system::SystemParam, prelude::*, transform::TransformSystems,
};

use crate::{
    DebugDrawShallow, EditorScene,
    selection::ActiveNode,
    viewport::{SceneView3d, SceneViewSettings},
};

pub struct ViewportOverlaysPlugin;

impl Plugin for ViewportOverlaysPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<SceneViewGizmos>().add_systems(
            PostUpdate,
            draw_active_node.after(TransformSystems::Propagate),
        );
    }
}

/// Gizmo group for scene-view debug geometry.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct SceneViewGizmos;

/// Debug geometry for scene nodes: node axes plus a box per drawable.
#[derive(SystemParam)]
pub struct NodeDebugDraw<'w, 's> {
    gizmos: Gizmos<'w, 's, SceneViewGizmos>,
    transforms: Query<'w, 's, &'static GlobalTransform>,
    aabbs: Query<'w, 's, &'static Aabb>,
    lights: Query<'w, 's, (), Or<(With<PointLight>, With<SpotLight>)>>,
    children: Query<'w, 's, &'static Children>,
    shallow: Query<'w, 's, (), Or<(With<EditorScene>, With<DebugDrawShallow>)>>,
}

impl NodeDebugDraw<'_, '_> {
    /// Draw `node` and, unless it is the scene root or marked
    /// [`DebugDrawShallow`], the drawables of its whole subtree. Only the
    /// top node gets axes.
    pub fn draw_node(&mut self, node: Entity, draw_axes: bool, color: Color) {
        if draw_axes {
            self.draw_axes(node);
        }
        if self.shallow.contains(node) {
            return;
        }

        self.draw_components(node, color);

        let children: Vec<Entity> = self
            .children
            .get(node)
            .map(|children| children.iter().collect())
            .unwrap_or_default();
        for child in children {
            self.draw_node(child, false, color);
        }
    }

    fn draw_axes(&mut self, node: Entity) {
        let Ok(global_tf) = self.transforms.get(node) else {
            return;
        };
        let origin = global_tf.translation();
        self.gizmos
            .line(origin, origin + global_tf.right().as_vec3(), Color::srgb(1.0, 0.2, 0.2));
        self.gizmos
            .line(origin, origin + global_tf.up().as_vec3(), Color::srgb(0.2, 1.0, 0.2));
        self.gizmos
            .line(origin, origin + global_tf.back().as_vec3(), Color::srgb(0.2, 0.4, 1.0));
    }

    fn draw_components(&mut self, node: Entity, color: Color) {
        let Ok(global_tf) = self.transforms.get(node) else {
            return;
        };
        let computed = global_tf.compute_transform();

        let (center, half) = if let Ok(aabb) = self.aabbs.get(node) {
            let half = Vec3::from(aabb.half_extents) * computed.scale;
            let center = computed.translation + computed.rotation * (Vec3::from(aabb.center) * computed.scale);
            (center, half)
        } else if self.lights.contains(node) {
            (computed.translation, Vec3::splat(0.25))
        } else {
            return;
        };

        draw_wireframe_box(&mut self.gizmos, center, half, computed.rotation, color);
    }
}

fn draw_active_node(
    active: Res<ActiveNode>,
    settings: Res<SceneViewSettings>,
    views: Query<&SceneView3d>,
    mut debug: NodeDebugDraw,
) {
    let Some(node) = active.get() else {
        return;
    };
    if !views.iter().any(SceneView3d::is_enabled) {
        return;
    }
    debug.draw_node(node, true, settings.selection_color);
}

/// Draw a wireframe box centered at `center` with given half extents and rotation.
fn draw_wireframe_box(
    gizmos: &mut Gizmos<SceneViewGizmos>,
    center: Vec3,
    half: Vec3,
    rotation: Quat,
    color: Color,
) {
    let corners = [
        center + rotation * Vec3::new(-half.x, -half.y, -half.z),
        center + rotation * Vec3::new(half.x, -half.y, -half.z),
        center + rotation * Vec3::new(half.x, half.y, -half.z),
        center + rotation * Vec3::new(-half.x, half.y, -half.z),
        center + rotation * Vec3::new(-half.x, -half.y, half.z),
        center + rotation * Vec3::new(half.x, -half.y, half.z),
        center + rotation * Vec3::new(half.x, half.y, half.z),
        center + rotation * Vec3::new(-half.x, half.y, half.z),
    ];

    for i in 0..4 {
        gizmos.line(corners[i], corners[(i + 1) % 4], color);
        gizmos.line(corners[i + 4], corners[(i + 1) % 4 + 4], color);
        gizmos.line(corners[i], corners[i + 4], color);
    }
}
