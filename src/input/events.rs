//! Host-agnostic input types consumed by the menu and the cursor.

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Pointer and window state polled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub mouse_x: i32,
    pub mouse_y: i32,
    pub left_down: bool,
    pub right_down: bool,
    pub has_focus: bool,
    /// Frames rendered during the last second.
    pub fps: u32,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            mouse_x: 0,
            mouse_y: 0,
            left_down: false,
            right_down: false,
            has_focus: true,
            fps: 60,
        }
    }
}

impl FrameInput {
    pub fn mouse(&self) -> (f32, f32) {
        (self.mouse_x as f32, self.mouse_y as f32)
    }

    pub fn any_button_down(&self) -> bool {
        self.left_down || self.right_down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other,
}

impl PointerButton {
    pub fn from_winit(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Middle => PointerButton::Middle,
            _ => PointerButton::Other,
        }
    }
}

/// Keys the title screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Escape,
    Q,
    P,
    D,
    R,
    Up,
    Down,
    F7,
    F10,
    Other,
}

impl MenuKey {
    pub fn from_keycode(keycode: KeyCode) -> Self {
        match keycode {
            KeyCode::Escape => MenuKey::Escape,
            KeyCode::KeyQ => MenuKey::Q,
            KeyCode::KeyP => MenuKey::P,
            KeyCode::KeyD => MenuKey::D,
            KeyCode::KeyR => MenuKey::R,
            KeyCode::ArrowUp => MenuKey::Up,
            KeyCode::ArrowDown => MenuKey::Down,
            KeyCode::F7 => MenuKey::F7,
            KeyCode::F10 => MenuKey::F10,
            _ => MenuKey::Other,
        }
    }
}

/// Discrete input events, delivered before the frame update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    MousePressed { button: PointerButton, x: i32, y: i32 },
    Wheel(i32),
    Key(MenuKey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_menu_keys() {
        assert_eq!(MenuKey::from_keycode(KeyCode::KeyQ), MenuKey::Q);
        assert_eq!(MenuKey::from_keycode(KeyCode::ArrowDown), MenuKey::Down);
        assert_eq!(MenuKey::from_keycode(KeyCode::KeyZ), MenuKey::Other);
    }
}
