//! Render snapshots.
//!
//! Snapshots are immutable captures of the menu and cursor built once per
//! frame. They decouple menu logic from whatever renderer draws them.

use crate::models::common::Color;

/// Placement of one image on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteState {
    /// Center x coordinate.
    pub x: f32,
    /// Center y coordinate.
    pub y: f32,
    pub scale: f32,
    pub alpha: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

/// Beat-synced decoration drawn over the logo while music plays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoPulse {
    /// Progress through the current beat, in `[0, 1)`.
    pub beat_progress: f64,
    /// Scale applied to the logo on top of its hover scale.
    pub scale: f32,
    /// Rotation of the logo piece, in degrees.
    pub piece_rotation: f32,
}

/// Music position bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionBarState {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hovered: bool,
    /// Played fraction, `None` while no track is available.
    pub fill: Option<f32>,
}

/// Which update button is shown, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateButtonKind {
    Download,
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuSnapshot {
    pub background_alpha: f32,
    pub logo: SpriteState,
    pub logo_pulse: Option<LogoPulse>,
    /// Play and Exit are only drawn while the logo is open or closing.
    pub play: Option<SpriteState>,
    pub exit: Option<SpriteState>,
    /// Play or pause glyph, depending on `music_playing`.
    pub music_toggle: SpriteState,
    pub music_playing: bool,
    pub music_next: SpriteState,
    pub music_previous: SpriteState,
    pub position_bar: PositionBarState,
    pub downloads: SpriteState,
    pub repository: Option<SpriteState>,
    pub dance_repository: Option<SpriteState>,
    pub update_button: Option<(UpdateButtonKind, SpriteState)>,
    /// Lines drawn at the top left.
    pub header: Vec<String>,
    /// Lines drawn at the bottom left.
    pub footer: Vec<String>,
}

/// One trail image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSprite {
    pub x: i32,
    pub y: i32,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorSnapshot {
    /// Trail images, oldest first, followed by one at the pointer.
    pub trail: Vec<TrailSprite>,
    pub trail_rotation: f32,
    pub trail_color: Color,
    pub glyph: SpriteState,
    pub glyph_color: Color,
    /// Whether the separate middle glyph is drawn.
    pub has_middle: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub menu: MenuSnapshot,
    pub cursor: Option<CursorSnapshot>,
    pub bar_notification: Option<String>,
    /// Tooltip text and its fade-in alpha.
    pub tooltip: Option<(String, f32)>,
}
