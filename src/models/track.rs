//! Tracks as seen by the title screen.

use std::path::PathBuf;

/// One timing section of a beatmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingPoint {
    pub time_ms: f64,
    pub beat_length_ms: f64,
    /// Inherited points only change slider velocity, never the beat length.
    pub inherited: bool,
}

/// A playable track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Position in the catalog, `None` for the theme track.
    pub index: Option<usize>,
    /// Audio file; two tracks sharing it are the same music.
    pub audio: PathBuf,
    pub artist: String,
    pub title: String,
    pub timing_points: Vec<TimingPoint>,
}

impl Track {
    pub fn theme(audio: PathBuf) -> Self {
        Self {
            index: None,
            audio,
            artist: "opsu!".to_string(),
            title: "Theme".to_string(),
            timing_points: Vec::new(),
        }
    }

    pub fn is_theme(&self) -> bool {
        self.index.is_none()
    }

    pub fn same_audio(&self, other: &Track) -> bool {
        self.audio == other.audio
    }
}
