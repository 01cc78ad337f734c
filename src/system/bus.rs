//! Channels and shared counters between the menu and the audio thread.
//!
//! The menu never blocks on audio: commands go through an unbounded channel
//! and the audio thread publishes its progress through atomics.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

/// Commands sent to the dedicated audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Load an audio file and start playing it.
    Load { path: PathBuf },
    Play,
    Pause,
    /// Stop and reset playback position.
    Stop,
    Seek { position_ms: u64 },
    SetVolume { volume: f32 },
    Shutdown,
}

/// Playback state published by the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PlaybackStatus {
    Idle = 0,
    Loading = 1,
    Playing = 2,
    Paused = 3,
    Ended = 4,
}

impl PlaybackStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => PlaybackStatus::Loading,
            2 => PlaybackStatus::Playing,
            3 => PlaybackStatus::Paused,
            4 => PlaybackStatus::Ended,
            _ => PlaybackStatus::Idle,
        }
    }
}

/// Playback progress shared with the audio thread.
#[derive(Debug, Clone)]
pub struct PlaybackShared {
    position_ms: Arc<AtomicU64>,
    duration_ms: Arc<AtomicU64>,
    status: Arc<AtomicU8>,
}

impl PlaybackShared {
    fn new() -> Self {
        Self {
            position_ms: Arc::new(AtomicU64::new(0)),
            duration_ms: Arc::new(AtomicU64::new(0)),
            status: Arc::new(AtomicU8::new(PlaybackStatus::Idle as u8)),
        }
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms.load(Ordering::Relaxed)
    }

    pub fn set_position_ms(&self, position: u64) {
        self.position_ms.store(position, Ordering::Relaxed);
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms.load(Ordering::Relaxed)
    }

    pub fn set_duration_ms(&self, duration: u64) {
        self.duration_ms.store(duration, Ordering::Relaxed);
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from_u8(self.status.load(Ordering::Relaxed))
    }

    pub fn set_status(&self, status: PlaybackStatus) {
        self.status.store(status as u8, Ordering::Relaxed);
    }
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Menu → Audio: playback commands.
    pub audio_cmd_tx: Sender<AudioCommand>,
    pub audio_cmd_rx: Receiver<AudioCommand>,

    /// Written by the audio thread, read by the menu.
    pub playback: PlaybackShared,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (audio_cmd_tx, audio_cmd_rx) = unbounded();
        Self {
            audio_cmd_tx,
            audio_cmd_rx,
            playback: PlaybackShared::new(),
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
