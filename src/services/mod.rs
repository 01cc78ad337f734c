//! Collaborators the title screen talks to.
//!
//! The menu only sees these traits; the host wires in the audio thread,
//! the song catalog and the desktop integrations.

pub mod browser;
pub mod notifier;
pub mod updater;

#[cfg(test)]
pub mod testing;

use crate::error::BrowseError;
use crate::models::Track;

/// Music playback as seen by the menu.
pub trait Transport {
    fn is_playing(&self) -> bool;
    fn is_loading(&self) -> bool;
    /// True once the current track played to its end.
    fn has_ended(&self) -> bool;
    fn track(&self) -> Option<&Track>;
    fn position_ms(&self) -> u64;
    fn duration_ms(&self) -> u64;

    /// Replaces the current track and starts playing it.
    fn play_track(&mut self, track: Track);
    fn pause(&mut self);
    fn resume(&mut self);
    fn seek_ms(&mut self, position_ms: u64);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);

    fn is_dimmed(&self) -> bool;
    /// Dims to `multiplier` of the volume, or restores it when already dimmed.
    fn toggle_dimmed(&mut self, multiplier: f32);

    fn is_theme_playing(&self) -> bool {
        self.track().is_some_and(Track::is_theme)
    }

    fn track_exists(&self) -> bool {
        self.track().is_some()
    }
}

/// Loaded beatmap sets.
pub trait Catalog {
    /// Number of beatmap sets.
    fn set_count(&self) -> usize;
    /// Number of individual beatmaps.
    fn map_count(&self) -> usize;
    fn random_entry(&mut self) -> Option<Track>;
    fn entry(&self, index: usize) -> Option<Track>;
}

/// Short-lived text surfaces.
pub trait Notifier {
    fn send_bar_notification(&mut self, text: &str);
    /// Shows `text` next to the pointer for this frame.
    fn update_tooltip(&mut self, delta: i32, text: &str, overlap: bool);
    fn update(&mut self, delta: i32);
}

/// Sink for non-fatal failures.
pub trait ErrorReporter {
    fn report(&mut self, message: &str, error: &dyn std::error::Error, report_to_user: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Initial,
    Error,
    NoUpdate,
    UpdateAvailable,
    UpdateDownloading,
    UpdateDownloaded,
}

impl UpdateStatus {
    pub fn description(self) -> &'static str {
        match self {
            UpdateStatus::Initial => "",
            UpdateStatus::Error => "Update checker failed.",
            UpdateStatus::NoUpdate => "No updates available.",
            UpdateStatus::UpdateAvailable => "A new update is available!",
            UpdateStatus::UpdateDownloading => "Downloading update...",
            UpdateStatus::UpdateDownloaded => "Update has finished downloading.",
        }
    }
}

/// Self-update process.
pub trait Updater {
    fn status(&self) -> UpdateStatus;
    fn just_updated(&self) -> bool;
    fn start_download(&mut self);
    /// Stages the downloaded update so it is applied on exit.
    fn prepare_update(&mut self);

    fn show_button(&self) -> bool {
        matches!(
            self.status(),
            UpdateStatus::UpdateAvailable
                | UpdateStatus::UpdateDownloading
                | UpdateStatus::UpdateDownloaded
        )
    }
}

/// Desktop web browser.
pub trait Browser {
    fn is_supported(&self) -> bool;
    fn browse(&self, uri: &str) -> Result<(), BrowseError>;
}
