//! Clickable music position bar.

use crate::models::settings::SizeConf;
use crate::shared::snapshot::PositionBarState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl MusicBar {
    /// Places the bar under the music buttons at the top right.
    pub fn new(screen_width: f32, icon: SizeConf) -> Self {
        Self {
            x: screen_width - icon.width * 3.5,
            y: icon.height * 1.25,
            width: icon.width * 3.0,
            height: icon.height * 0.11,
        }
    }

    pub fn contains(&self, cx: f32, cy: f32) -> bool {
        cx > self.x && cx < self.x + self.width && cy > self.y && cy < self.y + self.height
    }

    /// Fraction of the track under `cx`, clamped to `[0, 1]`.
    pub fn seek_fraction(&self, cx: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((cx - self.x) / self.width).clamp(0.0, 1.0)
    }

    pub fn seek_position(&self, cx: f32, duration_ms: u64) -> u64 {
        (self.seek_fraction(cx) as f64 * duration_ms as f64) as u64
    }

    pub fn state(&self, hovered: bool, fill: Option<f32>) -> PositionBarState {
        PositionBarState {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            hovered,
            fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> MusicBar {
        MusicBar::new(1280.0, SizeConf::new(30.0, 30.0))
    }

    #[test]
    fn geometry_follows_icon_size() {
        let bar = bar();
        assert_eq!(bar.x, 1175.0);
        assert_eq!(bar.width, 90.0);
        assert_eq!(bar.y, 37.5);
    }

    #[test]
    fn seek_fraction_spans_the_bar() {
        let bar = bar();
        assert_eq!(bar.seek_fraction(bar.x), 0.0);
        assert_eq!(bar.seek_fraction(bar.x + bar.width), 1.0);
        assert_eq!(bar.seek_fraction(bar.x + bar.width / 2.0), 0.5);
        assert_eq!(bar.seek_fraction(bar.x - 40.0), 0.0);
        assert_eq!(bar.seek_fraction(bar.x + bar.width + 40.0), 1.0);
        assert_eq!(bar.seek_position(bar.x + bar.width / 2.0, 200_000), 100_000);
    }

    #[test]
    fn contains_excludes_the_edges() {
        let bar = bar();
        assert!(!bar.contains(bar.x, bar.y + 1.0));
        assert!(bar.contains(bar.x + 1.0, bar.y + 1.0));
        assert!(!bar.contains(bar.x + 1.0, bar.y + bar.height));
    }

    #[test]
    fn zero_width_bar_never_divides() {
        let bar = MusicBar::new(100.0, SizeConf::new(0.0, 0.0));
        assert_eq!(bar.seek_fraction(50.0), 0.0);
    }
}
