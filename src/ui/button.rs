//! Hoverable menu buttons.
//!
//! A [`MenuButton`] knows its center, its unscaled size and an optional set
//! of hover effects (expand, fade, rotate). It does not draw anything; the
//! renderer reads [`MenuButton::sprite`] from the frame snapshot.

use super::animation::{AnimatedValue, AnimationEquation};
use crate::shared::snapshot::SpriteState;

/// Default duration of hover effects, in milliseconds.
const DEFAULT_HOVER_DURATION: i32 = 100;

/// Default scale reached by the expand effect.
pub const DEFAULT_HOVER_EXPAND: f32 = 1.1;

/// Direction towards which the expand effect grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expand {
    #[default]
    Center,
    /// Right edge stays fixed.
    Left,
}

/// Hit area used by [`MenuButton::contains_visible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Rect,
    /// Inscribed ellipse of the bounding box (round logos).
    Ellipse,
}

#[derive(Debug, Clone)]
pub struct MenuButton {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    shape: Shape,
    alpha: f32,
    expand_dir: Expand,
    hover_duration: i32,
    hover_equation: AnimationEquation,
    scale: Option<AnimatedValue>,
    fade: Option<AnimatedValue>,
    rotate: Option<AnimatedValue>,
    auto_forward: bool,
}

impl MenuButton {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            shape: Shape::Rect,
            alpha: 1.0,
            expand_dir: Expand::Center,
            hover_duration: DEFAULT_HOVER_DURATION,
            hover_equation: AnimationEquation::Linear,
            scale: None,
            fade: None,
            rotate: None,
            auto_forward: true,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_hover_animation_duration(&mut self, duration: i32) {
        self.hover_duration = duration;
        for effect in self.effects_mut() {
            effect.set_duration(duration);
        }
    }

    pub fn set_hover_animation_equation(&mut self, equation: AnimationEquation) {
        self.hover_equation = equation;
        for effect in self.effects_mut() {
            effect.set_equation(equation);
        }
    }

    pub fn set_hover_expand(&mut self, scale: f32) {
        self.set_hover_expand_towards(scale, Expand::Center);
    }

    pub fn set_hover_expand_towards(&mut self, scale: f32, direction: Expand) {
        self.expand_dir = direction;
        self.scale = Some(self.new_effect(1.0, scale));
    }

    pub fn set_hover_fade(&mut self, lower_alpha: f32) {
        self.fade = Some(self.new_effect(lower_alpha, 1.0));
    }

    pub fn set_hover_rotate(&mut self, angle: f32) {
        self.rotate = Some(self.new_effect(0.0, angle));
    }

    pub fn remove_hover_effects(&mut self) {
        self.scale = None;
        self.fade = None;
        self.rotate = None;
        self.auto_forward = true;
    }

    pub fn has_hover_effects(&self) -> bool {
        self.scale.is_some() || self.fade.is_some() || self.rotate.is_some()
    }

    fn new_effect(&self, start: f32, end: f32) -> AnimatedValue {
        AnimatedValue::new(self.hover_duration, start, end, self.hover_equation)
    }

    fn effects_mut(&mut self) -> impl Iterator<Item = &mut AnimatedValue> {
        self.scale
            .iter_mut()
            .chain(self.fade.iter_mut())
            .chain(self.rotate.iter_mut())
    }

    pub fn current_scale(&self) -> f32 {
        self.scale.as_ref().map_or(1.0, AnimatedValue::value)
    }

    pub fn current_alpha(&self) -> f32 {
        self.alpha * self.fade.as_ref().map_or(1.0, AnimatedValue::value)
    }

    pub fn current_rotation(&self) -> f32 {
        self.rotate.as_ref().map_or(0.0, AnimatedValue::value)
    }

    /// Center of the drawn image, shifted when expanding towards one side.
    fn draw_center_x(&self) -> f32 {
        let grown = self.width * (self.current_scale() - 1.0) / 2.0;
        match self.expand_dir {
            Expand::Center => self.x,
            Expand::Left => self.x - grown,
        }
    }

    /// Returns true if the point lies within the current (scaled) bounding box.
    pub fn contains(&self, cx: f32, cy: f32) -> bool {
        let scale = self.current_scale();
        let half_w = self.width * scale / 2.0;
        let half_h = self.height * scale / 2.0;
        let x = self.draw_center_x();
        cx > x - half_w && cx < x + half_w && cy > self.y - half_h && cy < self.y + half_h
    }

    /// Returns true if the point lies on the visible part of the button.
    pub fn contains_visible(&self, cx: f32, cy: f32) -> bool {
        match self.shape {
            Shape::Rect => self.contains(cx, cy),
            Shape::Ellipse => {
                let scale = self.current_scale();
                let rx = self.width * scale / 2.0;
                let ry = self.height * scale / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (cx - self.draw_center_x()) / rx;
                let dy = (cy - self.y) / ry;
                dx * dx + dy * dy < 1.0
            }
        }
    }

    /// Advances the hover effects towards the hovered or idle end.
    pub fn hover_update(&mut self, delta: i32, hovered: bool) {
        let delta = if hovered { delta } else { -delta };
        for effect in self.effects_mut() {
            effect.update(delta);
        }
    }

    /// Hover update using the bounding box under the pointer.
    pub fn hover_update_at(&mut self, delta: i32, cx: f32, cy: f32) {
        let hovered = self.contains(cx, cy);
        self.hover_update(delta, hovered);
    }

    /// Hover update using the visible shape under the pointer.
    pub fn hover_update_visible(&mut self, delta: i32, cx: f32, cy: f32) {
        let hovered = self.contains_visible(cx, cy);
        self.hover_update(delta, hovered);
    }

    /// Plays the hover effects continuously, without pointer interaction.
    ///
    /// At the end of a cycle the effects either run back down
    /// (`reverse_at_end`) or restart from zero.
    pub fn auto_hover_update(&mut self, delta: i32, reverse_at_end: bool) {
        if !self.has_hover_effects() {
            return;
        }
        let step = if self.auto_forward { delta } else { -delta };
        let mut any_moving = false;
        for effect in self.effects_mut() {
            any_moving |= effect.update(step);
        }
        if any_moving {
            return;
        }
        if self.auto_forward {
            if reverse_at_end {
                self.auto_forward = false;
            } else {
                for effect in self.effects_mut() {
                    effect.set_time(0);
                }
            }
        } else {
            self.auto_forward = true;
        }
    }

    pub fn reset_hover(&mut self) {
        for effect in self.effects_mut() {
            effect.set_time(0);
        }
        self.auto_forward = true;
    }

    pub fn sprite(&self) -> SpriteState {
        SpriteState {
            x: self.draw_center_x(),
            y: self.y,
            scale: self.current_scale(),
            alpha: self.current_alpha(),
            rotation: self.current_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_grows_while_hovered_and_shrinks_back() {
        let mut button = MenuButton::new(100.0, 100.0, 50.0, 50.0);
        button.set_hover_expand(1.5);
        button.hover_update(50, true);
        assert!((button.current_scale() - 1.25).abs() < 1e-5);
        button.hover_update(500, true);
        assert_eq!(button.current_scale(), 1.5);
        button.hover_update(1000, false);
        assert_eq!(button.current_scale(), 1.0);
    }

    #[test]
    fn contains_uses_scaled_bounds() {
        let mut button = MenuButton::new(100.0, 100.0, 40.0, 40.0);
        assert!(button.contains(110.0, 110.0));
        assert!(!button.contains(125.0, 100.0));
        button.set_hover_expand(1.5);
        button.hover_update(1000, true);
        assert!(button.contains(125.0, 100.0));
    }

    #[test]
    fn ellipse_excludes_corners() {
        let logo = MenuButton::new(0.0, 0.0, 100.0, 100.0).with_shape(Shape::Ellipse);
        assert!(logo.contains(45.0, 45.0));
        assert!(!logo.contains_visible(45.0, 45.0));
        assert!(logo.contains_visible(0.0, 45.0));
    }

    #[test]
    fn left_expand_keeps_right_edge() {
        let mut button = MenuButton::new(200.0, 50.0, 100.0, 20.0);
        button.set_hover_expand_towards(1.2, Expand::Left);
        button.hover_update(1000, true);
        let sprite = button.sprite();
        assert!((sprite.x + 100.0 * 1.2 / 2.0 - 250.0).abs() < 1e-4);
    }

    #[test]
    fn fade_multiplies_base_alpha() {
        let mut button = MenuButton::new(0.0, 0.0, 10.0, 10.0);
        button.set_hover_fade(0.6);
        button.set_alpha(0.5);
        assert!((button.current_alpha() - 0.3).abs() < 1e-6);
        button.hover_update(1000, true);
        assert!((button.current_alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn auto_hover_reverses_or_restarts() {
        let mut pulsing = MenuButton::new(0.0, 0.0, 10.0, 10.0);
        pulsing.set_hover_expand(2.0);
        pulsing.auto_hover_update(100, true);
        assert_eq!(pulsing.current_scale(), 2.0);
        pulsing.auto_hover_update(10, true);
        pulsing.auto_hover_update(50, true);
        assert!((pulsing.current_scale() - 1.5).abs() < 1e-5);

        let mut spinning = MenuButton::new(0.0, 0.0, 10.0, 10.0);
        spinning.set_hover_animation_duration(2000);
        spinning.set_hover_rotate(360.0);
        spinning.auto_hover_update(2000, false);
        assert_eq!(spinning.current_rotation(), 360.0);
        spinning.auto_hover_update(16, false);
        assert_eq!(spinning.current_rotation(), 0.0);
        spinning.auto_hover_update(1000, false);
        assert!((spinning.current_rotation() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn reset_hover_returns_to_rest() {
        let mut button = MenuButton::new(0.0, 0.0, 10.0, 10.0);
        button.set_hover_expand(DEFAULT_HOVER_EXPAND);
        button.hover_update(1000, true);
        button.reset_hover();
        assert_eq!(button.current_scale(), 1.0);
    }
}
