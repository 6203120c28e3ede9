//! A window filled by a single scene view over a small test scene.
//!
//! Put `.glb` files under `assets/Resources/` and drag them from the file
//! manager onto the window to drop them into the scene.

use bevy::prelude::*;
use scene_view3d::{EditorEntity, EditorScene, SceneViewPlugin, viewport::scene_viewport};

fn main() -> AppExit {
    App::new()
        .add_plugins((DefaultPlugins, SceneViewPlugin))
        .add_systems(Startup, (spawn_scene, spawn_layout).chain())
        .run()
}

fn spawn_layout(mut commands: Commands) {
    commands.spawn((Camera2d, EditorEntity));
    commands.spawn((
        EditorEntity,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        children![scene_viewport()],
    ));
}

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Scene"),
        EditorScene,
        children![
            (
                Name::new("Ground"),
                Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(5.0)))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.3, 0.5, 0.3),
                    ..default()
                })),
                Transform::from_xyz(0.0, -1.0, 0.0),
            ),
            (
                Name::new("Blue Cube"),
                Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.3, 0.8),
                    ..default()
                })),
                Transform::from_xyz(-1.5, 0.0, 0.0),
            ),
            (
                Name::new("Red Sphere"),
                Mesh3d(meshes.add(Sphere::new(0.5))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.8, 0.2, 0.2),
                    ..default()
                })),
                Transform::from_xyz(1.5, 0.0, 0.0),
            ),
            (
                Name::new("Sun"),
                DirectionalLight {
                    shadows_enabled: true,
                    illuminance: 10000.0,
                    ..default()
                },
                Transform::from_xyz(10.0, 20.0, 10.0)
                    .with_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.4, 0.0)),
            ),
        ],
    ));
}
