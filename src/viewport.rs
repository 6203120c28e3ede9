use bevy::{
    camera::RenderTarget,
    image::ImageSampler,
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
    ui::widget::ViewportNode,
};
use bevy_infinite_grid::InfiniteGrid;
use scene_view_camera::{FlyCamera, FlyCameraSystems};

use crate::{
    EditorEntity, EditorScene,
    drag_drop::DragState,
    events::ActiveSceneChange,
    viewport_select::ClickTracker,
    viewport_util::ViewportPointer,
};

/// Marker on the UI node that hosts a 3D scene view. Adding it creates the
/// view's camera and render target.
#[derive(Component)]
pub struct SceneViewport;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneViewSettings>()
            .add_observer(on_scene_viewport_added)
            .add_systems(
                Update,
                (sync_view_enabled, update_camera_focus)
                    .chain()
                    .before(FlyCameraSystems),
            );
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SceneViewSettings {
    /// Where new view cameras start, looking down -Z at the origin.
    pub camera_start: Vec3,
    /// Distance along the camera ray at which dragged assets are placed.
    pub drag_distance: f32,
    /// Mouse travel in pixels (either axis) that turns a click into a drag.
    pub click_drag_threshold: f32,
    pub selection_color: Color,
    pub hover_color: Color,
    pub show_grid: bool,
}

impl Default for SceneViewSettings {
    fn default() -> Self {
        Self {
            camera_start: Vec3::new(0.0, 0.0, 10.0),
            drag_distance: 10.0,
            click_drag_threshold: 3.0,
            selection_color: Color::srgba(1.0, 1.0, 0.0, 0.8),
            hover_color: Color::srgba(0.4, 0.8, 1.0, 0.6),
            show_grid: true,
        }
    }
}

/// Per-view state, stored on the [`SceneViewport`] node.
#[derive(Component, Debug)]
pub struct SceneView3d {
    pub scene: Entity,
    pub camera: Entity,
    enabled: bool,
    /// Pick target under the cursor, refreshed every frame.
    pub(crate) pointed: Option<Entity>,
    pub(crate) click: ClickTracker,
    pub(crate) drag: DragState,
}

impl SceneView3d {
    pub fn new(scene: Entity, camera: Entity) -> Self {
        Self {
            scene,
            camera,
            enabled: true,
            pointed: None,
            click: ClickTracker::default(),
            drag: DragState::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show the view. Returns false if it was already enabled.
    pub fn enable(&mut self) -> bool {
        if self.enabled {
            return false;
        }
        self.enabled = true;
        true
    }

    /// Hide the view. Returns false if it was already disabled.
    pub fn disable(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        true
    }

    /// The provisional node of an in-progress drag, if any.
    pub fn drag_node(&self) -> Option<Entity> {
        self.drag.node
    }

    /// GUID of the asset whose model is still loading for the current drag.
    pub fn drag_asset_guid(&self) -> Option<&str> {
        self.drag.asset_guid.as_deref()
    }

    /// The node the cursor is over, if it is over this view.
    pub fn pointed_node(&self) -> Option<Entity> {
        self.pointed
    }

    pub fn mouse_left_down(&self) -> bool {
        self.click.left_down
    }

    pub fn mouse_moved(&self) -> bool {
        self.click.moved
    }
}

/// UI node bundle for a scene view filling its parent.
pub fn scene_viewport() -> impl Bundle {
    (
        SceneViewport,
        EditorEntity,
        Name::new("Scene View"),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
    )
}

fn on_scene_viewport_added(
    trigger: On<Add, SceneViewport>,
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    scenes: Query<Entity, With<EditorScene>>,
    grids: Query<(), With<InfiniteGrid>>,
    settings: Res<SceneViewSettings>,
) {
    let viewport = trigger.event_target();

    let scene = match scenes.iter().next() {
        Some(scene) => scene,
        None => {
            warn!("Scene view created without an editor scene; creating an empty one");
            commands
                .spawn((
                    EditorScene,
                    Name::new("Scene"),
                    Transform::default(),
                    Visibility::default(),
                ))
                .id()
        }
    };

    // Create render-target image
    let size = Extent3d {
        width: 1280,
        height: 720,
        depth_or_array_layers: 1,
    };
    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Bgra8UnormSrgb,
        default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;
    image.sampler = ImageSampler::linear();
    let image_handle = images.add(image);

    // The view camera is editor-only and never saved with the scene.
    let camera = commands
        .spawn((
            Name::new("Camera"),
            EditorEntity,
            Camera3d::default(),
            Camera {
                order: -1,
                ..default()
            },
            RenderTarget::Image(image_handle.into()),
            Transform::from_translation(settings.camera_start),
            FlyCamera::default(),
        ))
        .id();

    if settings.show_grid && grids.is_empty() {
        commands.spawn((InfiniteGrid, EditorEntity));
    }

    commands
        .entity(viewport)
        .insert((ViewportNode::new(camera), SceneView3d::new(scene, camera)));
    commands.trigger(ActiveSceneChange { scene });
}

/// Mirror the view's enabled flag onto its node visibility and camera.
fn sync_view_enabled(
    views: Query<(Entity, &SceneView3d), Changed<SceneView3d>>,
    mut visibility: Query<&mut Visibility>,
    mut cameras: Query<&mut Camera>,
) {
    for (entity, view) in &views {
        let wanted = if view.is_enabled() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if let Ok(mut vis) = visibility.get_mut(entity) {
            if *vis != wanted {
                *vis = wanted;
            }
        }
        if let Ok(mut camera) = cameras.get_mut(view.camera) {
            if camera.is_active != view.is_enabled() {
                camera.is_active = view.is_enabled();
            }
        }
    }
}

/// Camera controls only respond while the cursor is over an enabled view.
fn update_camera_focus(
    views: Query<(Entity, &SceneView3d)>,
    pointer: ViewportPointer,
    mut cameras: Query<&mut FlyCamera>,
) {
    for (entity, view) in &views {
        let Ok(mut camera) = cameras.get_mut(view.camera) else {
            continue;
        };
        let focused = view.is_enabled() && pointer.mouse_in_view(entity);
        if camera.enabled != focused {
            camera.enabled = focused;
        }
    }
}
