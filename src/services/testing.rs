//! In-memory collaborators for menu tests.

use super::{Browser, Catalog, ErrorReporter, Notifier, Transport, UpdateStatus, Updater};
use crate::error::BrowseError;
use crate::models::Track;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

pub fn track(index: usize, audio: &str) -> Track {
    Track {
        index: Some(index),
        audio: PathBuf::from(audio),
        artist: format!("Artist {index}"),
        title: format!("Title {index}"),
        timing_points: Vec::new(),
    }
}

#[derive(Debug, Default)]
pub struct FakeTransport {
    pub track: Option<Track>,
    pub playing: bool,
    pub loading: bool,
    pub ended: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub volume: f32,
    pub dimmed: bool,
    pub seeks: Vec<u64>,
    pub played: Vec<Track>,
}

impl FakeTransport {
    pub fn playing(track: Track, duration_ms: u64) -> Self {
        Self {
            track: Some(track),
            playing: true,
            duration_ms,
            volume: 1.0,
            ..Self::default()
        }
    }
}

impl Transport for FakeTransport {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    fn position_ms(&self) -> u64 {
        self.position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn play_track(&mut self, track: Track) {
        self.played.push(track.clone());
        self.track = Some(track);
        self.playing = true;
        self.ended = false;
        self.position_ms = 0;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn resume(&mut self) {
        self.playing = true;
    }

    fn seek_ms(&mut self, position_ms: u64) {
        self.seeks.push(position_ms);
        self.position_ms = position_ms;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.position_ms = 0;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    fn toggle_dimmed(&mut self, _multiplier: f32) {
        self.dimmed = !self.dimmed;
    }
}

/// Catalog whose "random" entries come from a scripted queue.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub tracks: Vec<Track>,
    pub random_queue: VecDeque<usize>,
}

impl FakeCatalog {
    pub fn with_tracks(count: usize) -> Self {
        Self {
            tracks: (0..count)
                .map(|i| track(i, &format!("song{i}.mp3")))
                .collect(),
            random_queue: VecDeque::new(),
        }
    }

    pub fn queue(&mut self, indices: &[usize]) {
        self.random_queue.extend(indices.iter().copied());
    }
}

impl Catalog for FakeCatalog {
    fn set_count(&self) -> usize {
        self.tracks.len()
    }

    fn map_count(&self) -> usize {
        self.tracks.len() * 3
    }

    fn random_entry(&mut self) -> Option<Track> {
        let index = self.random_queue.pop_front()?;
        self.entry(index)
    }

    fn entry(&self, index: usize) -> Option<Track> {
        self.tracks.get(index).cloned()
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub bar: Vec<String>,
    pub tooltips: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn send_bar_notification(&mut self, text: &str) {
        self.bar.push(text.to_string());
    }

    fn update_tooltip(&mut self, _delta: i32, text: &str, _overlap: bool) {
        self.tooltips.push(text.to_string());
    }

    fn update(&mut self, _delta: i32) {}
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<String>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&mut self, message: &str, _error: &dyn std::error::Error, _report_to_user: bool) {
        self.messages.push(message.to_string());
    }
}

#[derive(Debug)]
pub struct FakeUpdater {
    pub status: UpdateStatus,
    pub just_updated: bool,
    pub downloads_started: usize,
    pub prepared: bool,
}

impl Default for FakeUpdater {
    fn default() -> Self {
        Self {
            status: UpdateStatus::NoUpdate,
            just_updated: false,
            downloads_started: 0,
            prepared: false,
        }
    }
}

impl Updater for FakeUpdater {
    fn status(&self) -> UpdateStatus {
        self.status
    }

    fn just_updated(&self) -> bool {
        self.just_updated
    }

    fn start_download(&mut self) {
        self.downloads_started += 1;
        self.status = UpdateStatus::UpdateDownloading;
    }

    fn prepare_update(&mut self) {
        self.prepared = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserOutcome {
    Ok,
    Unsupported,
    IoError,
}

#[derive(Debug)]
pub struct FakeBrowser {
    pub supported: bool,
    pub outcome: BrowserOutcome,
    pub opened: RefCell<Vec<String>>,
}

impl FakeBrowser {
    pub fn new(outcome: BrowserOutcome) -> Self {
        Self {
            supported: true,
            outcome,
            opened: RefCell::new(Vec::new()),
        }
    }
}

impl Browser for FakeBrowser {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn browse(&self, uri: &str) -> Result<(), BrowseError> {
        match self.outcome {
            BrowserOutcome::Ok => {
                self.opened.borrow_mut().push(uri.to_string());
                Ok(())
            }
            BrowserOutcome::Unsupported => Err(BrowseError::Unsupported),
            BrowserOutcome::IoError => Err(BrowseError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "xdg-open not found",
            ))),
        }
    }
}
