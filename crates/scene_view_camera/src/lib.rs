use bevy::{input::mouse::MouseMotion, prelude::*};

pub struct FlyCameraPlugin;

impl Plugin for FlyCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, fly_camera_system.in_set(FlyCameraSystems));
    }
}

/// System set containing the fly-camera control system. Systems that decide
/// whether the camera is enabled this frame should run before it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlyCameraSystems;

/// Free-fly camera state. Yaw and pitch are stored in degrees and the
/// rotation is rebuilt from them every enabled frame, so roll stays zero.
///
/// Controls:
/// - Right-click + drag: look around (yaw/pitch)
/// - WASD: move forward/back/left/right along the camera's local axes
/// - Shift (held): sprint multiplier
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(FlyCameraSettings, Transform)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
    /// Set to false while the cursor is outside the owning view, during UI focus, etc.
    pub enabled: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            enabled: true,
        }
    }
}

/// Tuning for [`FlyCamera`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FlyCameraSettings {
    /// World units per second.
    pub move_speed: f32,
    /// Speed multiplier while Shift is held.
    pub sprint_multiplier: f32,
    /// Degrees per pixel of mouse motion.
    pub mouse_sensitivity: f32,
}

impl Default for FlyCameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 20.0,
            sprint_multiplier: 3.0,
            mouse_sensitivity: 0.2,
        }
    }
}

impl FlyCamera {
    pub const PITCH_LIMIT: f32 = 90.0;

    /// Accumulate a mouse delta (pixels) into yaw and pitch.
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw += sensitivity * delta.x;
        self.pitch = (self.pitch + sensitivity * delta.y).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Orientation for the current yaw/pitch. Positive yaw turns right and
    /// positive pitch looks down, matching screen-space mouse deltas.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        )
    }
}

/// Movement keys held during one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlyInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl FlyInput {
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        Self {
            forward: keyboard.pressed(KeyCode::KeyW),
            back: keyboard.pressed(KeyCode::KeyS),
            left: keyboard.pressed(KeyCode::KeyA),
            right: keyboard.pressed(KeyCode::KeyD),
            sprint: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        }
    }
}

/// Translate `transform` along its local axes for one frame. Each held key
/// contributes a full step, so diagonal movement is not normalized.
pub fn fly_translate(transform: &mut Transform, input: FlyInput, settings: &FlyCameraSettings, dt: f32) {
    let mut speed = settings.move_speed;
    if input.sprint {
        speed *= settings.sprint_multiplier;
    }
    let step = speed * dt;

    if input.forward {
        transform.translation += transform.forward().as_vec3() * step;
    }
    if input.back {
        transform.translation += transform.back().as_vec3() * step;
    }
    if input.left {
        transform.translation += transform.left().as_vec3() * step;
    }
    if input.right {
        transform.translation += transform.right().as_vec3() * step;
    }
}

fn fly_camera_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    time: Res<Time>,
    mut camera_query: Query<(&mut FlyCamera, &FlyCameraSettings, &mut Transform)>,
) {
    let mut mouse_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        mouse_delta += motion.delta;
    }

    let input = FlyInput::from_keyboard(&keyboard);
    let right_held = mouse.pressed(MouseButton::Right);
    let dt = time.delta_secs();

    for (mut camera, settings, mut transform) in &mut camera_query {
        if !camera.enabled {
            continue;
        }

        if right_held && mouse_delta != Vec2::ZERO {
            camera.look(mouse_delta, settings.mouse_sensitivity);
        }
        transform.rotation = camera.rotation();

        fly_translate(&mut transform, input, settings, dt);
    }
}
