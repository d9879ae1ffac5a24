//! Camera state, the keyboard/mouse controller, and the camera uniform.
//!
//! The camera holds a position and an Euler rotation in degrees (pitch and
//! yaw are used; roll is carried but never written by the controller). Input
//! handling only records intent; [`CameraController::update_camera`] applies
//! the accumulated deltas scaled by the elapsed frame time.

use cgmath::{Matrix4, Vector2, Vector3, Zero};
use instant::Duration;
use winit::keyboard::KeyCode;

use crate::transform;

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vector3<f32>,
    /// Degrees; x = pitch, y = yaw, z = roll (unused).
    pub rotation: Vector3<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
        }
    }

    /// Move relative to the current yaw: `offset_z` walks along the view
    /// direction, `offset_x` strafes, `offset_y` is world-space vertical.
    pub fn move_position(&mut self, offset_x: f32, offset_y: f32, offset_z: f32) {
        let yaw = self.rotation.y.to_radians();
        if offset_z != 0.0 {
            self.position.x += yaw.sin() * -1.0 * offset_z;
            self.position.z += yaw.cos() * offset_z;
        }
        if offset_x != 0.0 {
            let side = (self.rotation.y - 90.0).to_radians();
            self.position.x += side.sin() * -1.0 * offset_x;
            self.position.z += side.cos() * offset_x;
        }
        self.position.y += offset_y;
    }

    pub fn move_rotation(&mut self, offset_x: f32, offset_y: f32, offset_z: f32) {
        self.rotation.x += offset_x;
        self.rotation.y += offset_y;
        self.rotation.z += offset_z;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns WASD/Ctrl/Space key state into per-direction movement amounts and
/// left-drag mouse motion into rotation deltas.
///
/// Each direction is tracked separately so opposing keys held together
/// cancel out, and releasing one of them leaves the other in effect.
#[derive(Debug)]
pub struct CameraController {
    speed: f32,
    sensitivity: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_left: f32,
    amount_right: f32,
    amount_up: f32,
    amount_down: f32,
    rotate_delta: Vector2<f32>,
    left_button_pressed: bool,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_left: 0.0,
            amount_right: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_delta: Vector2::zero(),
            left_button_pressed: false,
        }
    }

    /// Record key state. Returns whether the key was consumed.
    pub fn process_keyboard(&mut self, key: KeyCode, pressed: bool) -> bool {
        let amount = if pressed { 1.0 } else { 0.0 };
        match key {
            KeyCode::KeyW => {
                self.amount_forward = amount;
                true
            }
            KeyCode::KeyS => {
                self.amount_backward = amount;
                true
            }
            KeyCode::KeyA => {
                self.amount_left = amount;
                true
            }
            KeyCode::KeyD => {
                self.amount_right = amount;
                true
            }
            KeyCode::ControlLeft => {
                self.amount_down = amount;
                true
            }
            KeyCode::Space => {
                self.amount_up = amount;
                true
            }
            _ => false,
        }
    }

    pub fn set_left_button(&mut self, pressed: bool) {
        self.left_button_pressed = pressed;
    }

    /// Accumulate raw mouse motion. Only applied while the left button is
    /// held (click-to-look).
    pub fn process_mouse(&mut self, dx: f64, dy: f64) {
        if self.left_button_pressed {
            self.rotate_delta.x += dx as f32;
            self.rotate_delta.y += dy as f32;
        }
    }

    /// Apply accumulated intent to the camera, scaled by elapsed time.
    pub fn update_camera(&mut self, camera: &mut Camera, dt: Duration) {
        let step = self.speed * dt.as_secs_f32();
        camera.move_position(
            (self.amount_right - self.amount_left) * step,
            (self.amount_up - self.amount_down) * step,
            (self.amount_backward - self.amount_forward) * step,
        );
        camera.move_rotation(
            self.rotate_delta.y * self.sensitivity,
            self.rotate_delta.x * self.sensitivity,
            0.0,
        );
        self.rotate_delta = Vector2::zero();
    }
}

/// Per-frame camera data as laid out in the shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    view_pos: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            proj: Matrix4::identity().into(),
            view: Matrix4::identity().into(),
            view_pos: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera, width: u32, height: u32) {
        self.proj = transform::projection_matrix(
            transform::FOV,
            width as f32,
            height as f32,
            transform::Z_NEAR,
            transform::Z_FAR,
        )
        .into();
        self.view = transform::view_matrix(camera).into();
        self.view_pos = [camera.position.x, camera.position.y, camera.position.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_intent_moves_along_negative_z_at_zero_yaw() {
        let mut camera = Camera::new();
        camera.move_position(0.0, 0.0, -1.0);
        assert!((camera.position.z - -1.0).abs() < 1e-6);
        assert!(camera.position.x.abs() < 1e-6);
    }

    #[test]
    fn mouse_motion_is_ignored_without_left_button() {
        let mut controller = CameraController::new(1.0, 0.2);
        let mut camera = Camera::new();
        controller.process_mouse(10.0, 5.0);
        controller.update_camera(&mut camera, Duration::from_millis(16));
        assert_eq!(camera.rotation, Vector3::zero());

        controller.set_left_button(true);
        controller.process_mouse(10.0, 5.0);
        controller.update_camera(&mut camera, Duration::from_millis(16));
        assert!((camera.rotation.y - 2.0).abs() < 1e-6);
        assert!((camera.rotation.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn key_release_clears_intent() {
        let mut controller = CameraController::new(10.0, 0.2);
        let mut camera = Camera::new();
        controller.process_keyboard(KeyCode::KeyW, true);
        controller.process_keyboard(KeyCode::KeyW, false);
        controller.update_camera(&mut camera, Duration::from_millis(100));
        assert_eq!(camera.position, Vector3::zero());
    }

    #[test]
    fn releasing_an_opposing_key_keeps_the_held_key_moving() {
        let mut controller = CameraController::new(10.0, 0.2);
        let mut camera = Camera::new();
        // Tap S while W stays held; the forward movement must survive.
        controller.process_keyboard(KeyCode::KeyW, true);
        controller.process_keyboard(KeyCode::KeyS, true);
        controller.process_keyboard(KeyCode::KeyS, false);
        controller.update_camera(&mut camera, Duration::from_millis(100));
        assert!(camera.position.z < 0.0);
    }

    #[test]
    fn opposing_keys_held_together_cancel_out() {
        let mut controller = CameraController::new(10.0, 0.2);
        let mut camera = Camera::new();
        controller.process_keyboard(KeyCode::KeyA, true);
        controller.process_keyboard(KeyCode::KeyD, true);
        controller.update_camera(&mut camera, Duration::from_millis(100));
        assert_eq!(camera.position, Vector3::zero());
    }
}
