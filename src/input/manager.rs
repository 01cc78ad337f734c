//! Folds window events into per-frame input state and menu events.

use super::events::{FrameInput, MenuEvent, MenuKey, PointerButton};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Pixels of trackpad scrolling counted as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 40.0;

#[derive(Debug, Default)]
pub struct InputManager {
    state: FrameInput,
    pending_scroll: f64,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pointer/focus state, with the given measured frame rate.
    pub fn frame(&self, fps: u32) -> FrameInput {
        FrameInput { fps, ..self.state }
    }

    /// Updates the tracked state and returns a discrete event, if any.
    pub fn process(&mut self, event: &WindowEvent) -> Option<MenuEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.state.mouse_x = position.x as i32;
                self.state.mouse_y = position.y as i32;
                None
            }
            WindowEvent::Focused(focused) => {
                self.state.has_focus = *focused;
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.state.left_down = pressed,
                    MouseButton::Right => self.state.right_down = pressed,
                    _ => {}
                }
                pressed.then(|| MenuEvent::MousePressed {
                    button: PointerButton::from_winit(*button),
                    x: self.state.mouse_x,
                    y: self.state.mouse_y,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => {
                        self.pending_scroll += pos.y;
                        let whole = (self.pending_scroll / PIXELS_PER_NOTCH).trunc();
                        self.pending_scroll -= whole * PIXELS_PER_NOTCH;
                        whole
                    }
                };
                (notches != 0.0).then(|| MenuEvent::Wheel(notches.signum() as i32))
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match MenuKey::from_keycode(*keycode) {
                MenuKey::Other => None,
                key => Some(MenuEvent::Key(key)),
            },
            _ => None,
        }
    }
}
