use bevy::{
    ecs::system::SystemParam,
    input::mouse::MouseMotion,
    input_focus::InputFocus,
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility},
    prelude::*,
    transform::TransformSystems,
};

use crate::{
    EditorEntity, EditorScene,
    events::ActiveNodeChange,
    viewport::{SceneView3d, SceneViewSettings},
    viewport_overlays::NodeDebugDraw,
    viewport_util::ViewportPointer,
};

pub struct ViewportSelectPlugin;

impl Plugin for ViewportSelectPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GizmoDragState>().add_systems(
            PostUpdate,
            (update_pointed_node, handle_viewport_click, draw_hovered_node)
                .chain()
                .after(TransformSystems::Propagate),
        );
    }
}

/// Set by a transform gizmo while it owns the mouse; suppresses click picking.
#[derive(Resource, Default, Debug)]
pub struct GizmoDragState {
    pub active: bool,
}

/// Tracks a left-button press so that only a press and release without
/// intervening drag counts as a click.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClickTracker {
    pub left_down: bool,
    pub moved: bool,
    travel: Vec2,
    armed: bool,
}

impl ClickTracker {
    /// Start tracking a press. Presses outside the view never become clicks.
    pub fn press(&mut self, in_view: bool) {
        *self = Self {
            left_down: true,
            armed: in_view,
            ..default()
        };
    }

    /// Accumulate mouse travel while the button is held.
    pub fn hold(&mut self, delta: Vec2, threshold: f32) {
        if !self.left_down {
            return;
        }
        self.travel += delta;
        if self.travel.x.abs() > threshold || self.travel.y.abs() > threshold {
            self.moved = true;
        }
    }

    /// Finish the press; true when it was a click.
    pub fn release(&mut self) -> bool {
        let click = self.left_down && self.armed && !self.moved;
        *self = Self::default();
        click
    }
}

/// Resolve a ray-cast hit to the node that should be selected: the outermost
/// instantiated model containing it, or the hit itself. The walk stops at the
/// scene root.
pub(crate) fn resolve_pick_target(
    hit: Entity,
    parent_of: impl Fn(Entity) -> Option<Entity>,
    is_scene_root: impl Fn(Entity) -> bool,
    is_model_root: impl Fn(Entity) -> bool,
) -> Entity {
    let mut target = hit;
    let mut current = hit;
    loop {
        if is_scene_root(current) {
            break;
        }
        if is_model_root(current) {
            target = current;
        }
        match parent_of(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    target
}

fn far_clip(projection: &Projection) -> f32 {
    match projection {
        Projection::Perspective(perspective) => perspective.far,
        Projection::Orthographic(orthographic) => orthographic.far,
        _ => f32::INFINITY,
    }
}

#[derive(SystemParam)]
pub struct PickTargets<'w, 's> {
    parents: Query<'w, 's, &'static ChildOf>,
    scenes: Query<'w, 's, (), With<EditorScene>>,
    model_roots: Query<'w, 's, (), With<SceneRoot>>,
    editor_entities: Query<'w, 's, (), With<EditorEntity>>,
    projections: Query<'w, 's, &'static Projection>,
}

impl PickTargets<'_, '_> {
    fn resolve(&self, hit: Entity) -> Entity {
        resolve_pick_target(
            hit,
            |entity| self.parents.get(entity).ok().map(ChildOf::parent),
            |entity| self.scenes.contains(entity),
            |entity| self.model_roots.contains(entity),
        )
    }

    /// First drawable under the cursor within the camera's far clip.
    fn pick(
        &self,
        view_entity: Entity,
        view: &SceneView3d,
        pointer: &ViewportPointer,
        ray_cast: &mut MeshRayCast,
    ) -> Option<Entity> {
        let ray = pointer.camera_ray(view_entity, view.camera)?;
        let far = self
            .projections
            .get(view.camera)
            .map(far_clip)
            .unwrap_or(f32::INFINITY);

        let filter = |entity: Entity| !self.editor_entities.contains(entity);
        let settings = MeshRayCastSettings::default()
            .with_visibility(RayCastVisibility::Visible)
            .with_filter(&filter);
        let (hit, data) = ray_cast.cast_ray(ray, &settings).first()?;
        if data.distance > far {
            return None;
        }
        Some(self.resolve(*hit))
    }
}

/// Record what each enabled view's cursor is over.
fn update_pointed_node(
    pointer: ViewportPointer,
    mut views: Query<(Entity, &mut SceneView3d)>,
    targets: PickTargets,
    mut ray_cast: MeshRayCast,
) {
    for (entity, mut view) in &mut views {
        let pointed = if view.is_enabled() && pointer.mouse_in_view(entity) {
            targets.pick(entity, &view, &pointer, &mut ray_cast)
        } else {
            None
        };
        if view.pointed != pointed {
            view.pointed = pointed;
        }
    }
}

fn handle_viewport_click(
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    pointer: ViewportPointer,
    settings: Res<SceneViewSettings>,
    gizmo_drag: Res<GizmoDragState>,
    mut views: Query<(Entity, &mut SceneView3d)>,
    mut input_focus: Option<ResMut<InputFocus>>,
    mut commands: Commands,
) {
    let mut frame_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        frame_delta += motion.delta;
    }

    for (entity, mut view) in &mut views {
        if !view.is_enabled() {
            continue;
        }

        let in_view = pointer.mouse_in_view(entity);
        if mouse.just_pressed(MouseButton::Left) {
            view.click.press(in_view);
        }
        if mouse.pressed(MouseButton::Left) {
            view.click.hold(frame_delta, settings.click_drag_threshold);
        }
        let clicked = mouse.just_released(MouseButton::Left) && view.click.release();
        if !clicked || !in_view {
            continue;
        }

        // Clear input focus so keyboard camera controls work after a viewport click
        if let Some(focus) = input_focus.as_mut() {
            focus.0 = None;
        }
        if gizmo_drag.active {
            continue;
        }
        if let Some(node) = view.pointed {
            commands.trigger(ActiveNodeChange { node: Some(node) });
        }
    }
}

/// Hover feedback while no button is held.
fn draw_hovered_node(
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<SceneViewSettings>,
    views: Query<&SceneView3d>,
    mut debug: NodeDebugDraw,
) {
    if mouse.pressed(MouseButton::Left) || mouse.just_released(MouseButton::Left) {
        return;
    }
    for view in &views {
        if let Some(node) = view.pointed.filter(|_| view.is_enabled()) {
            debug.draw_node(node, true, settings.hover_color);
        }
    }
}
