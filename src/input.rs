//! Input handling for first-person movement.
//!
//! Turns key, mouse and scroll events into per-tick movement and look deltas.
//! The controller holds no reference to the walker; callers pass state in.

use glam::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::camera::Camera;
use crate::locomotion::{Orientation, TickInput};

/// Speed constants for input handling.
pub struct InputConfig {
    /// Walking speed (units per second)
    pub movement_speed: f32,
    /// Speed multiplier while sprint is held
    pub sprint_multiplier: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            movement_speed: 15.5,
            sprint_multiplier: 2.5,
        }
    }
}

/// Tracks held keys and cursor state.
#[derive(Default)]
pub struct InputState {
    pub forward_pressed: bool,
    pub backward_pressed: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub jump_pressed: bool,
    pub sprint_pressed: bool,
    /// Last cursor position; `None` until the first sample after capture
    pub last_mouse_pos: Option<(f32, f32)>,
    /// Look delta accumulated since the last tick
    pub look_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit direction in the XZ plane from the held movement keys.
    pub fn move_direction(&self, orientation: &Orientation) -> Vec3 {
        let front = orientation.front();
        let forward = Vec3::new(front.x, 0.0, front.z).normalize_or_zero();
        let right = orientation.right();

        let mut direction = Vec3::ZERO;
        if self.forward_pressed {
            direction += forward;
        }
        if self.backward_pressed {
            direction -= forward;
        }
        if self.right_pressed {
            direction += right;
        }
        if self.left_pressed {
            direction -= right;
        }
        direction.normalize_or_zero()
    }
}

/// Input controller that processes events into tick inputs.
pub struct InputController {
    pub config: InputConfig,
    pub state: InputState,
}

impl InputController {
    pub fn new() -> Self {
        Self {
            config: InputConfig::default(),
            state: InputState::new(),
        }
    }

    /// Handle keyboard key press/release. Returns true if the key is bound.
    pub fn handle_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => self.state.forward_pressed = pressed,
            KeyCode::KeyS => self.state.backward_pressed = pressed,
            KeyCode::KeyA => self.state.left_pressed = pressed,
            KeyCode::KeyD => self.state.right_pressed = pressed,
            KeyCode::Space => self.state.jump_pressed = pressed,
            KeyCode::ShiftLeft => self.state.sprint_pressed = pressed,
            _ => return false,
        }
        true
    }

    /// Handle mouse button press/release.
    pub fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        camera: &mut Camera,
    ) {
        if state != ElementState::Pressed {
            return;
        }
        match button {
            // Cursor released: the next motion sample starts a fresh delta
            MouseButton::Right => self.state.last_mouse_pos = None,
            MouseButton::Middle => camera.reset_zoom(),
            _ => {}
        }
    }

    /// Handle cursor movement, accumulating a look delta.
    ///
    /// Screen y grows downward, so pitch uses `last_y - y`.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.state.last_mouse_pos {
            self.state.look_delta.0 += x - last_x;
            self.state.look_delta.1 += last_y - y;
        }
        self.state.last_mouse_pos = Some((x, y));
    }

    /// Handle mouse scroll for zooming.
    pub fn handle_scroll(&mut self, delta: MouseScrollDelta, camera: &mut Camera) {
        let scroll_amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
        };

        camera.zoom(scroll_amount);
    }

    /// Drain the accumulated look delta.
    pub fn take_look_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.state.look_delta)
    }

    /// Movement for one tick of length `dt`.
    pub fn tick_input(&self, orientation: &Orientation, dt: f32) -> TickInput {
        let mut speed = self.config.movement_speed;
        if self.state.sprint_pressed {
            speed *= self.config.sprint_multiplier;
        }

        TickInput {
            displacement: self.state.move_direction(orientation) * speed * dt,
            jump: self.state.jump_pressed,
            dt,
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let state = InputState::new();
        assert!(!state.forward_pressed);
        assert!(state.last_mouse_pos.is_none());
        assert_eq!(
            state.move_direction(&Orientation::default()),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_keyboard_handling() {
        let mut controller = InputController::new();

        assert!(controller.handle_keyboard(KeyCode::KeyW, ElementState::Pressed));
        assert!(controller.state.forward_pressed);

        assert!(controller.handle_keyboard(KeyCode::KeyW, ElementState::Released));
        assert!(!controller.state.forward_pressed);

        assert!(!controller.handle_keyboard(KeyCode::KeyQ, ElementState::Pressed));
    }

    #[test]
    fn test_forward_follows_yaw() {
        let mut controller = InputController::new();
        controller.handle_keyboard(KeyCode::KeyW, ElementState::Pressed);

        let input = controller.tick_input(&Orientation::default(), 0.5);

        // Default yaw looks down -Z
        assert!((input.displacement - Vec3::new(0.0, 0.0, -7.75)).length() < 1e-4);
        assert!(!input.jump);
        assert_eq!(input.dt, 0.5);
    }

    #[test]
    fn test_forward_ignores_pitch() {
        let mut controller = InputController::new();
        controller.handle_keyboard(KeyCode::KeyW, ElementState::Pressed);

        let looking_down = Orientation::new(0.0, -80.0);
        let input = controller.tick_input(&looking_down, 1.0);

        assert!((input.displacement - Vec3::new(15.5, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut controller = InputController::new();
        controller.handle_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.handle_keyboard(KeyCode::KeyD, ElementState::Pressed);

        let input = controller.tick_input(&Orientation::default(), 1.0);

        assert!((input.displacement.length() - 15.5).abs() < 1e-3);
        assert!(input.displacement.x > 0.0);
        assert!(input.displacement.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controller = InputController::new();
        controller.handle_keyboard(KeyCode::KeyA, ElementState::Pressed);
        controller.handle_keyboard(KeyCode::KeyD, ElementState::Pressed);

        let input = controller.tick_input(&Orientation::default(), 1.0);
        assert_eq!(input.displacement, Vec3::ZERO);
    }

    #[test]
    fn test_sprint_and_jump() {
        let mut controller = InputController::new();
        controller.handle_keyboard(KeyCode::KeyS, ElementState::Pressed);
        controller.handle_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        controller.handle_keyboard(KeyCode::Space, ElementState::Pressed);

        let input = controller.tick_input(&Orientation::default(), 1.0);

        assert!((input.displacement - Vec3::new(0.0, 0.0, 38.75)).length() < 1e-3);
        assert!(input.jump);
    }

    #[test]
    fn test_first_mouse_sample_only_records() {
        let mut controller = InputController::new();

        controller.handle_mouse_move(400.0, 300.0);
        assert_eq!(controller.take_look_delta(), (0.0, 0.0));

        controller.handle_mouse_move(410.0, 290.0);
        controller.handle_mouse_move(415.0, 295.0);
        // Screen y is inverted: moving up raises pitch
        assert_eq!(controller.take_look_delta(), (15.0, 5.0));
        assert_eq!(controller.take_look_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_right_click_resets_capture() {
        let mut controller = InputController::new();
        let mut camera = Camera::new();

        controller.handle_mouse_move(0.0, 0.0);
        controller.handle_mouse_button(MouseButton::Right, ElementState::Pressed, &mut camera);
        controller.handle_mouse_move(500.0, 500.0);

        assert_eq!(controller.take_look_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_scroll_and_middle_click_zoom() {
        let mut controller = InputController::new();
        let mut camera = Camera::new();

        controller.handle_scroll(MouseScrollDelta::LineDelta(0.0, 3.0), &mut camera);
        assert_eq!(camera.fov, 45.0);

        controller.handle_mouse_button(MouseButton::Middle, ElementState::Pressed, &mut camera);
        assert_eq!(camera.fov, 60.0);
    }
}
