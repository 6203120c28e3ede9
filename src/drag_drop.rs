use bevy::{asset::LoadState, gltf::GltfAssetLabel, prelude::*, window::FileDragAndDrop};
use scene_view_assets::{AssetDatabase, ImporterKind, ResourceRemoved};

use crate::{
    events::{ActiveNodeChange, DragEnded, DragEnterViewport, DragExitViewport, DragPayload},
    viewport::{SceneView3d, SceneViewSettings},
    viewport_util::{ViewportPointer, point_on_ray},
};

pub struct DragDropPlugin;

impl Plugin for DragDropPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_drag_enter)
            .add_observer(on_drag_exit)
            .add_observer(on_drag_ended)
            .add_systems(
                Update,
                (
                    forward_file_drag_events,
                    cancel_drag_of_removed_assets,
                    follow_cursor_with_drag_node,
                    finish_pending_model_loads,
                )
                    .chain(),
            );
    }
}

/// The in-progress drag of one scene view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DragState {
    pub node: Option<Entity>,
    pub asset_guid: Option<String>,
}

/// Asynchronous load of a model's cached scene, attached to the node that
/// receives it once loaded.
#[derive(Component, Debug)]
pub struct PendingModelLoad {
    pub handle: Handle<Scene>,
    pub guid: String,
}

/// What a drag payload imports into the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragImport {
    pub guid: String,
    pub name: String,
    pub cache_path: String,
}

/// Resolve a payload to a model import. Anything that is not a tracked asset
/// with the model importer is rejected.
pub fn model_import_for(payload: &DragPayload, db: &AssetDatabase) -> Option<DragImport> {
    let asset = match payload {
        DragPayload::Asset { guid } => db.get_by_guid(guid),
        DragPayload::File { path } => db.get_by_path(path),
    }?;
    if asset.importer != ImporterKind::Model {
        return None;
    }
    Some(DragImport {
        guid: asset.guid.clone(),
        name: asset.name.clone(),
        cache_path: db.cache_asset_path(asset),
    })
}

fn on_drag_enter(
    event: On<DragEnterViewport>,
    mut views: Query<&mut SceneView3d>,
    db: Option<Res<AssetDatabase>>,
    asset_server: Res<AssetServer>,
    pointer: ViewportPointer,
    settings: Res<SceneViewSettings>,
    globals: Query<&GlobalTransform>,
    mut commands: Commands,
) {
    let Ok(mut view) = views.get_mut(event.viewport) else {
        return;
    };
    // Multi-file OS drags enter once per file; the first model wins.
    if view.drag.node.is_some() {
        return;
    }
    let Some(db) = db else {
        warn!("Drag entered scene view but no asset database is loaded");
        return;
    };
    let Some(import) = model_import_for(&event.payload, &db) else {
        debug!("Ignoring drag of {:?}: not a model asset", event.payload);
        return;
    };

    let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(import.cache_path.clone()));
    let translation = pointer
        .camera_ray(event.viewport, view.camera)
        .map(|ray| point_on_ray(ray, settings.drag_distance, globals.get(view.scene).ok()))
        .unwrap_or_default();

    let node = commands
        .spawn((
            Name::new(import.name.clone()),
            Transform::from_translation(translation),
            Visibility::default(),
            ChildOf(view.scene),
            PendingModelLoad {
                handle,
                guid: import.guid.clone(),
            },
        ))
        .id();

    debug!("Dragging '{}' ({}) into scene view", import.name, import.guid);
    view.drag = DragState {
        node: Some(node),
        asset_guid: Some(import.guid),
    };
}

/// Tear down a view's provisional drag node and clear the selection.
fn cancel_drag(view: &mut SceneView3d, commands: &mut Commands) {
    let drag = std::mem::take(&mut view.drag);
    if let Some(node) = drag.node {
        // Despawning drops the pending load handle, which stops the load.
        if let Ok(mut ec) = commands.get_entity(node) {
            ec.despawn();
        }
        commands.trigger(ActiveNodeChange { node: None });
    }
}

fn on_drag_exit(event: On<DragExitViewport>, mut views: Query<&mut SceneView3d>, mut commands: Commands) {
    let Ok(mut view) = views.get_mut(event.viewport) else {
        return;
    };
    cancel_drag(&mut view, &mut commands);
}

fn on_drag_ended(_event: On<DragEnded>, mut views: Query<&mut SceneView3d>, mut commands: Commands) {
    for mut view in &mut views {
        if view.drag == DragState::default() {
            continue;
        }
        // A load still in flight stays on the node and finishes there.
        let drag = std::mem::take(&mut view.drag);
        if let Some(node) = drag.node {
            info!("Dropped node {node} into scene");
            commands.trigger(ActiveNodeChange { node: Some(node) });
        }
    }
}

/// Translate OS file drags over the window into scene-view drag events.
fn forward_file_drag_events(
    mut file_drags: MessageReader<FileDragAndDrop>,
    views: Query<(Entity, &SceneView3d)>,
    mut commands: Commands,
) {
    let Some(viewport) = views
        .iter()
        .find(|(_, view)| view.is_enabled())
        .map(|(entity, _)| entity)
    else {
        file_drags.read().count();
        return;
    };

    for event in file_drags.read() {
        match event {
            FileDragAndDrop::HoveredFile { path_buf, .. } => {
                commands.trigger(DragEnterViewport {
                    viewport,
                    payload: DragPayload::File {
                        path: path_buf.clone(),
                    },
                });
            }
            FileDragAndDrop::DroppedFile { .. } => commands.trigger(DragEnded),
            FileDragAndDrop::HoveredFileCanceled { .. } => {
                commands.trigger(DragExitViewport { viewport });
            }
        }
    }
}

fn cancel_drag_of_removed_assets(
    mut removed: MessageReader<ResourceRemoved>,
    mut views: Query<&mut SceneView3d>,
    mut commands: Commands,
) {
    for message in removed.read() {
        for mut view in &mut views {
            if view.drag.asset_guid.as_deref() == Some(message.guid.as_str()) {
                warn!("Asset {} was removed while being dragged", message.guid);
                cancel_drag(&mut view, &mut commands);
            }
        }
    }
}

/// Keep drag nodes under the cursor. Polls the window cursor every frame
/// because OS file drags deliver no `CursorMoved` on most platforms.
fn follow_cursor_with_drag_node(
    mouse: Res<ButtonInput<MouseButton>>,
    views: Query<(Entity, &SceneView3d)>,
    pointer: ViewportPointer,
    settings: Res<SceneViewSettings>,
    globals: Query<&GlobalTransform>,
    mut transforms: Query<&mut Transform>,
) {
    // The cursor is captured for mouse-look while the right button is held.
    if mouse.pressed(MouseButton::Right) {
        return;
    }

    for (entity, view) in &views {
        let Some(node) = view.drag.node else {
            continue;
        };
        update_drag_node(entity, view, node, &pointer, &settings, &globals, &mut transforms);
    }
}

fn update_drag_node(
    view_entity: Entity,
    view: &SceneView3d,
    node: Entity,
    pointer: &ViewportPointer,
    settings: &SceneViewSettings,
    globals: &Query<&GlobalTransform>,
    transforms: &mut Query<&mut Transform>,
) {
    let Some(ray) = pointer.camera_ray(view_entity, view.camera) else {
        return;
    };
    let Ok(mut transform) = transforms.get_mut(node) else {
        return;
    };
    let translation = point_on_ray(ray, settings.drag_distance, globals.get(view.scene).ok());
    if transform.translation != translation {
        transform.translation = translation;
    }
}

fn finish_pending_model_loads(
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &PendingModelLoad)>,
    mut views: Query<(Entity, &mut SceneView3d)>,
    pointer: ViewportPointer,
    settings: Res<SceneViewSettings>,
    globals: Query<&GlobalTransform>,
    mut transforms: Query<&mut Transform>,
    mut commands: Commands,
) {
    for (node, load) in &pending {
        let id = load.handle.id();
        if let LoadState::Failed(err) = asset_server.load_state(id) {
            warn!("Failed to load model {}: {err}", load.guid);
        } else if asset_server.is_loaded_with_dependencies(id) {
            commands.entity(node).insert(SceneRoot(load.handle.clone()));
            for (view_entity, view) in &views {
                if view.drag.node == Some(node) {
                    update_drag_node(view_entity, view, node, &pointer, &settings, &globals, &mut transforms);
                }
            }
        } else {
            continue;
        }

        commands.entity(node).remove::<PendingModelLoad>();
        for (_, mut view) in &mut views {
            if view.drag.node == Some(node) {
                view.drag.asset_guid = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
        time::Duration,
    };

    use bevy::{
        asset::{AssetLoader, LoadContext, io::Reader},
        reflect::TypePath,
    };
    use scene_view_assets::AssetDatabaseConfig;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        EditorScene,
        selection::{ActiveNode, SelectionPlugin},
        viewport_util::test_support::{move_cursor, spawn_camera, spawn_view_node, spawn_window},
    };

    fn drag_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(SelectionPlugin)
            .add_observer(on_drag_exit)
            .add_observer(on_drag_ended);
        app
    }

    /// A drag app with an asset server rooted at `root` and a scanned
    /// database of the resources below it.
    fn asset_drag_app(root: &Path) -> App {
        let mut app = drag_app();
        app.add_plugins(AssetPlugin {
            file_path: root.to_string_lossy().into_owned(),
            ..default()
        })
        .init_asset::<Scene>()
        .init_resource::<SceneViewSettings>()
        .add_observer(on_drag_enter);

        let mut db = AssetDatabase::new(&AssetDatabaseConfig {
            asset_root: root.to_path_buf(),
            ..default()
        });
        db.scan().unwrap();
        app.insert_resource(db);
        app
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Resources")).unwrap();
        fs::write(dir.path().join("Resources/Tree.glb"), b"glb").unwrap();
        fs::write(dir.path().join("Resources/Rock.glb"), b"glb").unwrap();
        fs::write(dir.path().join("Resources/bark.png"), b"png").unwrap();
        dir
    }

    fn guid_of(app: &App, path: &str) -> String {
        app.world()
            .resource::<AssetDatabase>()
            .get_by_path(path)
            .map(|asset| asset.guid.clone())
            .unwrap()
    }

    /// An idle view over a fresh scene: returns (view, scene).
    fn spawn_idle_view(app: &mut App) -> (Entity, Entity) {
        let world = app.world_mut();
        let scene = world.spawn(EditorScene).id();
        let camera = world.spawn_empty().id();
        let view = world.spawn(SceneView3d::new(scene, camera)).id();
        (view, scene)
    }

    /// A view mid-drag: returns (view, drag node).
    fn spawn_dragging_view(app: &mut App) -> (Entity, Entity) {
        let world = app.world_mut();
        let scene = world.spawn((EditorScene, Transform::default())).id();
        let camera = world.spawn_empty().id();
        let node = world
            .spawn((
                Name::new("Tree"),
                Transform::default(),
                ChildOf(scene),
                PendingModelLoad {
                    handle: Handle::default(),
                    guid: "tree-guid".to_string(),
                },
            ))
            .id();
        let mut view = SceneView3d::new(scene, camera);
        view.drag = DragState {
            node: Some(node),
            asset_guid: Some("tree-guid".to_string()),
        };
        let view = world.spawn(view).id();
        (view, node)
    }

    fn drag_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&PendingModelLoad>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn drag_enter_spawns_a_provisional_model_node() {
        let dir = project();
        let mut app = asset_drag_app(dir.path());
        let (view, scene) = spawn_idle_view(&mut app);
        let guid = guid_of(&app, "Tree.glb");

        app.world_mut().trigger(DragEnterViewport {
            viewport: view,
            payload: DragPayload::Asset { guid: guid.clone() },
        });
        app.update();

        let state = app.world().get::<SceneView3d>(view).unwrap();
        let node = state.drag_node().unwrap();
        assert_eq!(state.drag_asset_guid(), Some(guid.as_str()));

        let node = app.world().entity(node);
        assert_eq!(node.get::<ChildOf>().map(ChildOf::parent), Some(scene));
        assert_eq!(node.get::<Name>().map(Name::as_str), Some("Tree"));
        assert_eq!(node.get::<PendingModelLoad>().map(|load| &load.guid), Some(&guid));
    }

    #[test]
    fn os_file_drag_resolves_through_the_database() {
        let dir = project();
        let mut app = asset_drag_app(dir.path());
        app.add_message::<FileDragAndDrop>()
            .add_systems(Update, forward_file_drag_events);
        let (view, _) = spawn_idle_view(&mut app);
        let guid = guid_of(&app, "Tree.glb");

        app.world_mut().write_message(FileDragAndDrop::HoveredFile {
            window: Entity::PLACEHOLDER,
            path_buf: dir.path().join("Resources/Tree.glb"),
        });
        app.update();

        let state = app.world().get::<SceneView3d>(view).unwrap();
        assert!(state.drag_node().is_some());
        assert_eq!(state.drag_asset_guid(), Some(guid.as_str()));
    }

    #[test]
    fn drag_enter_ignores_what_it_cannot_place() {
        let dir = project();
        let mut app = asset_drag_app(dir.path());
        let (view, _) = spawn_idle_view(&mut app);
        let bark = guid_of(&app, "bark.png");

        app.world_mut().trigger(DragEnterViewport {
            viewport: view,
            payload: DragPayload::Asset { guid: bark },
        });
        app.world_mut().trigger(DragEnterViewport {
            viewport: view,
            payload: DragPayload::Asset {
                guid: "unknown".to_string(),
            },
        });
        let not_a_view = app.world_mut().spawn_empty().id();
        let tree = guid_of(&app, "Tree.glb");
        app.world_mut().trigger(DragEnterViewport {
            viewport: not_a_view,
            payload: DragPayload::Asset { guid: tree },
        });
        app.update();

        assert_eq!(app.world().get::<SceneView3d>(view).unwrap().drag_node(), None);
        assert_eq!(drag_count(&mut app), 0);
    }

    #[test]
    fn second_drag_enter_keeps_the_first_model() {
        let dir = project();
        let mut app = asset_drag_app(dir.path());
        let (view, _) = spawn_idle_view(&mut app);
        let tree = guid_of(&app, "Tree.glb");
        let rock = guid_of(&app, "Rock.glb");

        app.world_mut().trigger(DragEnterViewport {
            viewport: view,
            payload: DragPayload::Asset { guid: tree.clone() },
        });
        app.update();
        let first = app.world().get::<SceneView3d>(view).unwrap().drag_node();

        app.world_mut().trigger(DragEnterViewport {
            viewport: view,
            payload: DragPayload::Asset { guid: rock },
        });
        app.update();

        let state = app.world().get::<SceneView3d>(view).unwrap();
        assert_eq!(state.drag_node(), first);
        assert_eq!(state.drag_asset_guid(), Some(tree.as_str()));
        assert_eq!(drag_count(&mut app), 1);
    }

    /// Loads any `.glb` as an empty scene under the label of a glTF's first scene.
    #[derive(Default, TypePath)]
    struct EmptyGltfLoader;

    impl AssetLoader for EmptyGltfLoader {
        type Asset = Scene;
        type Settings = ();
        type Error = std::io::Error;

        async fn load(
            &self,
            _reader: &mut dyn Reader,
            _settings: &(),
            load_context: &mut LoadContext<'_>,
        ) -> Result<Scene, Self::Error> {
            load_context.add_labeled_asset(GltfAssetLabel::Scene(0).to_string(), Scene::new(World::new()));
            Ok(Scene::new(World::new()))
        }

        fn extensions(&self) -> &[&str] {
            &["glb"]
        }
    }

    /// A mid-drag view whose node waits on `Cache/<file>`.
    fn loading_app(dir: &TempDir, file: &str) -> (App, Entity, Entity, Handle<Scene>) {
        let mut app = asset_drag_app(dir.path());
        app.register_asset_loader(EmptyGltfLoader)
            .add_systems(Update, finish_pending_model_loads);
        let (view, node) = spawn_dragging_view(&mut app);
        let handle = app
            .world()
            .resource::<AssetServer>()
            .load(GltfAssetLabel::Scene(0).from_asset(format!("Cache/{file}")));
        app.world_mut()
            .get_mut::<PendingModelLoad>(node)
            .unwrap()
            .handle = handle.clone();
        (app, view, node, handle)
    }

    fn update_until(app: &mut App, done: impl Fn(&World) -> bool) {
        for _ in 0..500 {
            app.update();
            if done(app.world()) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("model load did not settle");
    }

    #[test]
    fn loaded_model_becomes_the_node_scene() {
        let dir = project();
        fs::create_dir_all(dir.path().join("Cache")).unwrap();
        fs::write(dir.path().join("Cache/tree.glb"), b"glb").unwrap();
        let (mut app, view, node, handle) = loading_app(&dir, "tree.glb");

        update_until(&mut app, |world| world.get::<PendingModelLoad>(node).is_none());

        let scene_root = app.world().get::<SceneRoot>(node).unwrap();
        assert_eq!(scene_root.0.id(), handle.id());
        let state = app.world().get::<SceneView3d>(view).unwrap();
        assert_eq!(state.drag_node(), Some(node));
        assert_eq!(state.drag_asset_guid(), None);
    }

    #[test]
    fn failed_model_load_clears_the_pending_state() {
        let dir = project();
        let (mut app, view, node, _) = loading_app(&dir, "missing.glb");

        update_until(&mut app, |world| world.get::<PendingModelLoad>(node).is_none());

        assert!(app.world().get::<SceneRoot>(node).is_none());
        let state = app.world().get::<SceneView3d>(view).unwrap();
        assert_eq!(state.drag_node(), Some(node));
        assert_eq!(state.drag_asset_guid(), None);
    }

    #[test]
    fn drag_node_follows_the_cursor() {
        let mut app = drag_app();
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<SceneViewSettings>()
            .add_systems(Update, follow_cursor_with_drag_node);

        let rect = Rect::new(100.0, 100.0, 500.0, 400.0);
        let (old_view, node) = spawn_dragging_view(&mut app);
        let world = app.world_mut();
        spawn_window(world, Some(rect.center()));
        let camera = spawn_camera(world, Vec3::new(0.0, 0.0, 10.0));
        let view = spawn_view_node(world, rect);
        let mut state = world.entity_mut(old_view).take::<SceneView3d>().unwrap();
        state.camera = camera;
        world.entity_mut(view).insert(state);

        app.update();
        let centered = app.world().get::<Transform>(node).unwrap().translation;
        // The ray starts on the near plane, 0.1 in front of the camera.
        assert!((centered - Vec3::new(0.0, 0.0, -0.1)).length() < 1e-3);

        move_cursor(app.world_mut(), Some(Vec2::new(150.0, 150.0)));
        app.update();
        let moved = app.world().get::<Transform>(node).unwrap().translation;
        assert!(moved.x < 0.0 && moved.y > 0.0);

        // Mouse-look holds the node in place.
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Right);
        move_cursor(app.world_mut(), Some(rect.center()));
        app.update();
        assert_eq!(app.world().get::<Transform>(node).unwrap().translation, moved);
    }

    #[test]
    fn drag_exit_removes_the_provisional_node() {
        let mut app = drag_app();
        let (view, node) = spawn_dragging_view(&mut app);
        let other = app.world_mut().spawn_empty().id();
        app.world_mut().trigger(ActiveNodeChange { node: Some(other) });
        app.update();

        app.world_mut().trigger(DragExitViewport { viewport: view });
        app.update();

        assert!(app.world().get_entity(node).is_err());
        let state = app.world().get::<SceneView3d>(view).unwrap();
        assert_eq!(state.drag_node(), None);
        assert_eq!(state.drag_asset_guid(), None);
        assert_eq!(app.world().resource::<ActiveNode>().get(), None);
    }

    #[test]
    fn drag_exit_for_another_view_is_ignored() {
        let mut app = drag_app();
        let (view, node) = spawn_dragging_view(&mut app);
        let elsewhere = app.world_mut().spawn_empty().id();

        app.world_mut().trigger(DragExitViewport { viewport: elsewhere });
        app.update();

        assert!(app.world().get_entity(node).is_ok());
        assert_eq!(app.world().get::<SceneView3d>(view).unwrap().drag_node(), Some(node));
    }

    #[test]
    fn drag_end_selects_the_new_node_and_keeps_its_load() {
        let mut app = drag_app();
        let (view, node) = spawn_dragging_view(&mut app);

        app.world_mut().trigger(DragEnded);
        app.update();

        assert_eq!(app.world().resource::<ActiveNode>().get(), Some(node));
        assert!(app.world().get::<PendingModelLoad>(node).is_some());
        let state = app.world().get::<SceneView3d>(view).unwrap();
        assert_eq!(state.drag_node(), None);
        assert_eq!(state.drag_asset_guid(), None);
    }

    #[test]
    fn drag_end_without_a_drag_changes_nothing() {
        let mut app = drag_app();
        let picked = app.world_mut().spawn_empty().id();
        app.world_mut().trigger(ActiveNodeChange { node: Some(picked) });
        app.update();

        app.world_mut().trigger(DragEnded);
        app.update();
        assert_eq!(app.world().resource::<ActiveNode>().get(), Some(picked));
    }

    #[test]
    fn removing_the_dragged_asset_cancels_the_drag() {
        let mut app = drag_app();
        app.add_message::<ResourceRemoved>()
            .add_systems(Update, cancel_drag_of_removed_assets);
        let (view, node) = spawn_dragging_view(&mut app);

        app.world_mut().write_message(ResourceRemoved {
            guid: "something-else".to_string(),
        });
        app.update();
        assert!(app.world().get_entity(node).is_ok());

        app.world_mut().write_message(ResourceRemoved {
            guid: "tree-guid".to_string(),
        });
        app.update();
        assert!(app.world().get_entity(node).is_err());
        assert_eq!(app.world().get::<SceneView3d>(view).unwrap().drag_node(), None);
    }

    #[test]
    fn cancelled_os_file_drag_exits_the_view() {
        let mut app = drag_app();
        app.add_message::<FileDragAndDrop>()
            .add_systems(Update, forward_file_drag_events);
        let (view, node) = spawn_dragging_view(&mut app);

        app.world_mut().write_message(FileDragAndDrop::HoveredFileCanceled {
            window: Entity::PLACEHOLDER,
        });
        app.update();

        assert!(app.world().get_entity(node).is_err());
        assert_eq!(app.world().get::<SceneView3d>(view).unwrap().drag_node(), None);
    }

    #[test]
    fn dropped_os_file_ends_the_drag() {
        let mut app = drag_app();
        app.add_message::<FileDragAndDrop>()
            .add_systems(Update, forward_file_drag_events);
        let (_, node) = spawn_dragging_view(&mut app);

        app.world_mut().write_message(FileDragAndDrop::DroppedFile {
            window: Entity::PLACEHOLDER,
            path_buf: PathBuf::from("Tree.glb"),
        });
        app.update();

        assert_eq!(app.world().resource::<ActiveNode>().get(), Some(node));
    }

    #[test]
    fn only_model_assets_are_imported() {
        let dir = project();
        let root = dir.path();
        let mut db = AssetDatabase::new(&AssetDatabaseConfig {
            asset_root: root.to_path_buf(),
            ..default()
        });
        db.scan().unwrap();
        let tree = db.get_by_path("Tree.glb").unwrap().clone();
        let bark = db.get_by_path("bark.png").unwrap().clone();

        let by_guid = model_import_for(&DragPayload::Asset { guid: tree.guid.clone() }, &db).unwrap();
        assert_eq!(by_guid.name, "Tree");
        assert_eq!(by_guid.cache_path, format!("Cache/{}.glb", tree.guid));

        let by_path = model_import_for(
            &DragPayload::File {
                path: root.join("Resources/Tree.glb"),
            },
            &db,
        );
        assert_eq!(by_path, Some(by_guid));

        assert_eq!(model_import_for(&DragPayload::Asset { guid: bark.guid }, &db), None);
        assert_eq!(
            model_import_for(
                &DragPayload::File {
                    path: PathBuf::from("/not/in/project.glb")
                },
                &db
            ),
            None
        );
    }
}
