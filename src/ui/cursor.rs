//! Cursor glyph and fading trail.
//!
//! The trail is sampled when the cursor is drawn. With the interpolated
//! style, fast movements are filled in with points along the line between
//! the previous and the current position so the trail stays continuous.

use super::animation::AnimationEquation;
use crate::input::FrameInput;
use crate::models::common::colors;
use crate::models::settings::CursorSettings;
use crate::shared::snapshot::{CursorSnapshot, SpriteState, TrailSprite};
use std::collections::VecDeque;

/// Rasterized steps between two interpolated trail points.
pub const SAMPLE_INTERVAL: u32 = 5;

/// Scale added to the glyph while a button is held.
const CURSOR_SCALE_CHANGE: f32 = 0.25;

/// Duration of the press scale animation, in milliseconds.
const CURSOR_SCALE_TIME: f32 = 125.0;

/// Milliseconds per degree of rotation.
const MS_PER_DEGREE: f32 = 40.0;

/// Frame rate the trail constants were tuned for.
const BASE_FPS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailPoint {
    pub x: i32,
    pub y: i32,
}

impl TrailPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailStyle {
    /// Points filled in along fast movements, long trail.
    Interpolated,
    /// One point per frame, short trail.
    Sampled,
}

impl TrailStyle {
    pub fn from_settings(settings: &CursorSettings) -> Self {
        if settings.new_style {
            TrailStyle::Interpolated
        } else {
            TrailStyle::Sampled
        }
    }
}

/// Returns every `every`-th point of the Bresenham line from `from` to `to`.
///
/// The start point is never emitted; the end point is emitted when the line
/// length is a multiple of `every`.
pub fn interpolate(from: TrailPoint, to: TrailPoint, every: u32) -> Vec<TrailPoint> {
    let mut points = Vec::new();
    let (mut x, mut y) = (from.x, from.y);
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let (dx2, dy2) = (dx << 1, dy << 1);
    let ix = if from.x < to.x { 1 } else { -1 };
    let iy = if from.y < to.y { 1 } else { -1 };

    let mut d = 0;
    let mut step = 0;
    loop {
        if step == every {
            points.push(TrailPoint::new(x, y));
            step = 0;
        }
        if dy <= dx {
            if x == to.x {
                break;
            }
            x += ix;
            d += dy2;
            if d > dx {
                y += iy;
                d -= dx2;
            }
        } else {
            if y == to.y {
                break;
            }
            y += iy;
            d += dx2;
            if d > dy {
                x += ix;
                d -= dy2;
            }
        }
        step += 1;
    }
    points
}

/// Opacity increment between consecutive trail points, `0` for an empty trail.
pub fn opacity_step(len: usize) -> f32 {
    if len == 0 { 0.0 } else { 2.0 / len as f32 }
}

#[derive(Debug, Clone)]
pub struct CursorTrail {
    trail: VecDeque<TrailPoint>,
    last_position: Option<TrailPoint>,
    /// Rotation in degrees, `[0, 360)`.
    angle: f32,
    /// Time accumulated from `update`, drives the press animation.
    clock_ms: u64,
    /// Clock value of the last press/release, `None` while settled.
    last_press_time: Option<u64>,
    last_press_state: bool,
    mirrored: bool,
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new(false)
    }
}

impl CursorTrail {
    /// A mirrored cursor is tinted with the mirror colour.
    pub fn new(mirrored: bool) -> Self {
        Self {
            trail: VecDeque::new(),
            last_position: None,
            angle: 0.0,
            clock_ms: 0,
            last_press_time: None,
            last_press_state: false,
            mirrored,
        }
    }

    #[cfg(test)]
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.trail.iter()
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    #[cfg(test)]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Rotates the cursor and advances the internal clock.
    pub fn update(&mut self, delta: i32) {
        self.angle = (self.angle + delta as f32 / MS_PER_DEGREE).rem_euclid(360.0);
        self.clock_ms += delta.max(0) as u64;
    }

    /// Records the pointer at `(x, y)` and prunes the trail.
    ///
    /// When set, `max_len` replaces the style's removal count, so the trail
    /// may grow past the style's own limit.
    /// Returns the number of points removed.
    pub fn sample(
        &mut self,
        x: i32,
        y: i32,
        style: TrailStyle,
        fps: u32,
        max_len: Option<usize>,
    ) -> usize {
        let current = TrailPoint::new(x, y);
        let fps_mod = fps.max(1) as f32 / BASE_FPS;

        let mut remove = match style {
            TrailStyle::Interpolated => {
                let filled = match self.last_position {
                    Some(last) => interpolate(last, current, SAMPLE_INTERVAL),
                    None => Vec::new(),
                };
                if filled.is_empty() {
                    self.trail.push_back(current);
                } else {
                    self.trail.extend(filled);
                }
                self.last_position = Some(current);
                (self.trail.len() as f32 / (6.0 * fps_mod)) as usize + 1
            }
            TrailStyle::Sampled => {
                self.trail.push_back(current);
                let max = (10.0 * fps_mod) as usize;
                self.trail.len().saturating_sub(max)
            }
        };

        if let Some(max) = max_len {
            remove = self.trail.len().saturating_sub(max);
        }

        let remove = remove.min(self.trail.len());
        self.trail.drain(..remove);
        remove
    }

    /// Glyph scale for the current press state.
    ///
    /// The glyph grows by a quarter while pressed and shrinks back when
    /// released, eased over 125 ms from the last state change.
    pub fn press_scale(&mut self, pressed: bool) -> f32 {
        if self.last_press_state != pressed {
            self.last_press_state = pressed;
            self.last_press_time = Some(self.clock_ms);
        }
        let elapsed = match self.last_press_time {
            Some(time) => (self.clock_ms - time) as f32,
            None => CURSOR_SCALE_TIME,
        };
        let progress = elapsed.clamp(0.0, CURSOR_SCALE_TIME) / CURSOR_SCALE_TIME;
        let change = CURSOR_SCALE_CHANGE * AnimationEquation::InOutCubic.calc(progress);
        if pressed {
            1.0 + change
        } else {
            1.0 + CURSOR_SCALE_CHANGE - change
        }
    }

    /// Opacity of each trail point, oldest first.
    pub fn alphas(&self) -> Vec<f32> {
        let step = opacity_step(self.trail.len());
        (1..=self.trail.len())
            .map(|i| (i as f32 * step).min(1.0))
            .collect()
    }

    /// Samples the pointer and produces the sprites to draw this frame.
    pub fn draw(&mut self, input: &FrameInput, settings: &CursorSettings) -> Option<CursorSnapshot> {
        let pressed = input.any_button_down();
        self.draw_at(input.mouse_x, input.mouse_y, pressed, input.fps, settings)
    }

    pub fn draw_at(
        &mut self,
        x: i32,
        y: i32,
        pressed: bool,
        fps: u32,
        settings: &CursorSettings,
    ) -> Option<CursorSnapshot> {
        if !settings.enabled {
            return None;
        }
        let style = TrailStyle::from_settings(settings);

        let animated = if settings.expanded {
            self.press_scale(pressed)
        } else {
            1.0
        };
        let scale = animated * settings.scale;

        self.sample(x, y, style, fps, settings.max_trail_length);

        let mut trail: Vec<TrailSprite> = self
            .trail
            .iter()
            .zip(self.alphas())
            .map(|(p, alpha)| TrailSprite { x: p.x, y: p.y, alpha })
            .collect();
        trail.push(TrailSprite { x, y, alpha: 1.0 });

        let color = if self.mirrored {
            settings.mirror_color
        } else {
            settings.color
        };
        let new_style = style == TrailStyle::Interpolated;

        Some(CursorSnapshot {
            trail,
            trail_rotation: if settings.rotate_trail { self.angle } else { 0.0 },
            trail_color: color,
            glyph: SpriteState {
                x: x as f32,
                y: y as f32,
                scale,
                alpha: 1.0,
                rotation: if new_style && settings.rotate_glyph {
                    self.angle
                } else {
                    0.0
                },
            },
            glyph_color: if settings.only_color_trail {
                colors::WHITE
            } else {
                color
            },
            has_middle: new_style,
        })
    }

    /// Forgets all positions and the rotation.
    pub fn reset(&mut self) {
        self.reset_locations();
        self.angle = 0.0;
    }

    pub fn reset_locations(&mut self) {
        self.last_position = None;
        self.trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_jump_is_filled_every_five_pixels() {
        let points = interpolate(TrailPoint::new(0, 0), TrailPoint::new(500, 0), SAMPLE_INTERVAL);
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], TrailPoint::new(5, 0));
        assert_eq!(points[99], TrailPoint::new(500, 0));
        for pair in points.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 5);
        }
    }

    #[test]
    fn steep_and_reversed_lines_follow_the_major_axis() {
        let points = interpolate(TrailPoint::new(10, 100), TrailPoint::new(0, 0), SAMPLE_INTERVAL);
        assert_eq!(points.len(), 20);
        assert_eq!(points[19], TrailPoint::new(0, 0));
        for pair in points.windows(2) {
            assert_eq!(pair[0].y - pair[1].y, 5);
        }
    }

    #[test]
    fn short_moves_emit_nothing() {
        assert!(interpolate(TrailPoint::new(3, 3), TrailPoint::new(6, 5), SAMPLE_INTERVAL).is_empty());
        assert!(interpolate(TrailPoint::new(3, 3), TrailPoint::new(3, 3), SAMPLE_INTERVAL).is_empty());
    }

    #[test]
    fn large_jump_produces_intermediate_trail_points() {
        let mut cursor = CursorTrail::new(false);
        cursor.sample(0, 0, TrailStyle::Interpolated, 60, None);
        cursor.sample(500, 0, TrailStyle::Interpolated, 60, None);
        assert!(cursor.len() > 2);
        let xs: Vec<i32> = cursor.points().map(|p| p.x).collect();
        for pair in xs.windows(2) {
            assert_eq!(pair[1] - pair[0], 5);
        }
        assert_eq!(*xs.last().unwrap(), 500);
    }

    #[test]
    fn interpolated_prune_scales_with_frame_rate() {
        // 100 points before pruning: 100 / (6 * 2) + 1 = 9 removed at 60 fps.
        let mut cursor = CursorTrail::new(false);
        cursor.sample(0, 0, TrailStyle::Interpolated, 60, None);
        assert_eq!(cursor.len(), 0);
        let removed = cursor.sample(500, 0, TrailStyle::Interpolated, 60, None);
        assert_eq!(removed, 9);
        assert_eq!(cursor.len(), 91);

        let mut fast = CursorTrail::new(false);
        fast.sample(0, 0, TrailStyle::Interpolated, 240, None);
        let removed = fast.sample(500, 0, TrailStyle::Interpolated, 240, None);
        assert_eq!(removed, 100 / 48 + 1);
    }

    #[test]
    fn small_moves_append_the_current_point() {
        let mut cursor = CursorTrail::new(false);
        cursor.sample(100, 100, TrailStyle::Interpolated, 60, Some(10));
        cursor.sample(101, 100, TrailStyle::Interpolated, 60, Some(10));
        cursor.sample(103, 101, TrailStyle::Interpolated, 60, Some(10));
        let points: Vec<TrailPoint> = cursor.points().copied().collect();
        assert_eq!(
            points,
            vec![
                TrailPoint::new(100, 100),
                TrailPoint::new(101, 100),
                TrailPoint::new(103, 101)
            ]
        );

        // Without a cap, slow movement leaves no trail behind the glyph.
        let mut uncapped = CursorTrail::new(false);
        uncapped.sample(100, 100, TrailStyle::Interpolated, 60, None);
        uncapped.sample(101, 100, TrailStyle::Interpolated, 60, None);
        assert!(uncapped.is_empty());
    }

    #[test]
    fn sampled_style_caps_at_frame_scaled_max() {
        let mut cursor = CursorTrail::new(false);
        for i in 0..50 {
            cursor.sample(i, i, TrailStyle::Sampled, 60, None);
        }
        assert_eq!(cursor.len(), 20);
        assert_eq!(cursor.points().next().copied(), Some(TrailPoint::new(30, 30)));
    }

    #[test]
    fn override_replaces_style_removal() {
        let mut cursor = CursorTrail::new(false);
        for i in 0..50 {
            cursor.sample(i, 0, TrailStyle::Sampled, 60, Some(35));
        }
        assert_eq!(cursor.len(), 35);

        let mut short = CursorTrail::new(false);
        for i in 0..50 {
            short.sample(i, 0, TrailStyle::Sampled, 60, Some(5));
        }
        assert_eq!(short.len(), 5);
    }

    #[test]
    fn prune_is_empty_safe() {
        let mut cursor = CursorTrail::new(false);
        let removed = cursor.sample(0, 0, TrailStyle::Sampled, 0, Some(0));
        assert_eq!(removed, 1);
        assert!(cursor.is_empty());
        let removed = cursor.sample(0, 0, TrailStyle::Interpolated, 0, Some(0));
        assert_eq!(removed, 1);
        assert_eq!(cursor.len(), 0);
    }

    #[test]
    fn opacity_ramps_from_two_over_len_to_full() {
        let mut cursor = CursorTrail::new(false);
        for i in 0..8 {
            cursor.sample(i * 2, 0, TrailStyle::Sampled, 60, None);
        }
        let len = cursor.len();
        let alphas = cursor.alphas();
        assert_eq!(alphas.len(), len);
        assert!((alphas[0] - 2.0 / len as f32).abs() < 1e-6);
        assert_eq!(*alphas.last().unwrap(), 1.0);
        assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(opacity_step(0), 0.0);
    }

    #[test]
    fn draw_ends_with_a_full_opacity_point_at_the_pointer() {
        let settings = CursorSettings::default();
        let mut cursor = CursorTrail::new(false);
        let first = cursor.draw_at(10, 10, false, 60, &settings).unwrap();
        assert_eq!(first.trail.last(), Some(&TrailSprite { x: 10, y: 10, alpha: 1.0 }));

        let snapshot = cursor.draw_at(300, 10, false, 60, &settings).unwrap();
        let last = snapshot.trail.last().unwrap();
        assert_eq!((last.x, last.y, last.alpha), (300, 10, 1.0));
        assert!(snapshot.trail.len() > 2);
        assert!(snapshot.has_middle);
    }

    #[test]
    fn disabled_cursor_draws_nothing() {
        let settings = CursorSettings {
            enabled: false,
            ..CursorSettings::default()
        };
        let mut cursor = CursorTrail::new(false);
        assert!(cursor.draw_at(10, 10, false, 60, &settings).is_none());
        assert!(cursor.is_empty());
    }

    #[test]
    fn mirrored_cursor_uses_mirror_color() {
        let settings = CursorSettings {
            color: [1.0, 0.0, 0.0, 1.0],
            mirror_color: [0.0, 0.0, 1.0, 1.0],
            only_color_trail: true,
            ..CursorSettings::default()
        };
        let mut cursor = CursorTrail::new(true);
        let snapshot = cursor.draw_at(0, 0, false, 60, &settings).unwrap();
        assert_eq!(snapshot.trail_color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(snapshot.glyph_color, colors::WHITE);
    }

    #[test]
    fn rotation_wraps_at_360() {
        let mut cursor = CursorTrail::new(false);
        cursor.update(40 * 350);
        assert!((cursor.angle() - 350.0).abs() < 1e-3);
        cursor.update(40 * 20);
        assert!((cursor.angle() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn press_scale_eases_between_steady_states() {
        let mut cursor = CursorTrail::new(false);
        assert_eq!(cursor.press_scale(false), 1.0);
        assert_eq!(cursor.press_scale(true), 1.0);

        cursor.update(62);
        let mid = cursor.press_scale(true);
        assert!(mid > 1.0 && mid < 1.25);
        cursor.update(100);
        assert_eq!(cursor.press_scale(true), 1.25);

        assert_eq!(cursor.press_scale(false), 1.25);
        cursor.update(200);
        assert_eq!(cursor.press_scale(false), 1.0);
    }

    #[test]
    fn reset_forgets_positions_and_angle() {
        let mut cursor = CursorTrail::new(false);
        cursor.update(1000);
        cursor.sample(10, 10, TrailStyle::Sampled, 60, None);
        cursor.reset();
        assert!(cursor.is_empty());
        assert_eq!(cursor.angle(), 0.0);
        // No previous position: the next jump is not interpolated.
        cursor.sample(500, 0, TrailStyle::Interpolated, 60, None);
        assert_eq!(cursor.len(), 0);
    }
}
