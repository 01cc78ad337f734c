//! Music transport that sends commands to the dedicated audio thread.
//!
//! The menu never waits on audio: every call returns immediately and the
//! playback state is read back from the atomics the audio thread publishes.

use crate::models::Track;
use crate::services::Transport;
use crate::system::bus::{AudioCommand, PlaybackShared, PlaybackStatus, SystemBus};
use crossbeam_channel::Sender;

pub struct AudioManager {
    cmd_tx: Sender<AudioCommand>,
    playback: PlaybackShared,
    track: Option<Track>,
    volume: f32,
    /// Volume multiplier while dimmed, `None` at full volume.
    dimmed: Option<f32>,
}

impl AudioManager {
    pub fn new(bus: &SystemBus, volume: f32) -> Self {
        let manager = Self {
            cmd_tx: bus.audio_cmd_tx.clone(),
            playback: bus.playback.clone(),
            track: None,
            volume,
            dimmed: None,
        };
        manager.send_volume();
        manager
    }

    fn send(&self, cmd: AudioCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            log::warn!("AUDIO: Audio thread is gone, command dropped");
        }
    }

    fn effective_volume(&self) -> f32 {
        self.volume * self.dimmed.unwrap_or(1.0)
    }

    fn send_volume(&self) {
        self.send(AudioCommand::SetVolume {
            volume: self.effective_volume(),
        });
    }

    /// Asks the audio thread to exit once it drains its queue.
    pub fn shutdown(&self) {
        self.send(AudioCommand::Shutdown);
    }
}

impl Transport for AudioManager {
    fn is_playing(&self) -> bool {
        self.playback.status() == PlaybackStatus::Playing
    }

    fn is_loading(&self) -> bool {
        self.playback.status() == PlaybackStatus::Loading
    }

    fn has_ended(&self) -> bool {
        self.playback.status() == PlaybackStatus::Ended
    }

    fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    fn position_ms(&self) -> u64 {
        self.playback.position_ms()
    }

    fn duration_ms(&self) -> u64 {
        self.playback.duration_ms()
    }

    fn play_track(&mut self, track: Track) {
        log::info!("AUDIO: Loading {:?}", track.audio);
        self.playback.set_status(PlaybackStatus::Loading);
        self.playback.set_position_ms(0);
        self.send(AudioCommand::Load {
            path: track.audio.clone(),
        });
        self.track = Some(track);
    }

    fn pause(&mut self) {
        if self.is_playing() {
            self.playback.set_status(PlaybackStatus::Paused);
            self.send(AudioCommand::Pause);
        }
    }

    fn resume(&mut self) {
        if matches!(
            self.playback.status(),
            PlaybackStatus::Paused | PlaybackStatus::Ended
        ) {
            self.playback.set_status(PlaybackStatus::Playing);
            self.send(AudioCommand::Play);
        }
    }

    fn seek_ms(&mut self, position_ms: u64) {
        if self.track.is_none() {
            return;
        }
        self.playback.set_position_ms(position_ms);
        self.send(AudioCommand::Seek { position_ms });
    }

    fn stop(&mut self) {
        self.playback.set_status(PlaybackStatus::Idle);
        self.send(AudioCommand::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.send_volume();
    }

    fn is_dimmed(&self) -> bool {
        self.dimmed.is_some()
    }

    fn toggle_dimmed(&mut self, multiplier: f32) {
        self.dimmed = match self.dimmed {
            Some(_) => None,
            None => Some(multiplier),
        };
        self.send_volume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn drain(bus: &SystemBus) -> Vec<AudioCommand> {
        bus.audio_cmd_rx.try_iter().collect()
    }

    #[test]
    fn play_track_marks_loading_and_sends_load() {
        let bus = SystemBus::new();
        let mut audio = AudioManager::new(&bus, 0.5);
        drain(&bus);

        audio.play_track(Track::theme(PathBuf::from("theme.mp3")));
        assert!(audio.is_loading());
        assert!(audio.is_theme_playing());
        assert_eq!(
            drain(&bus),
            vec![AudioCommand::Load {
                path: PathBuf::from("theme.mp3")
            }]
        );
    }

    #[test]
    fn dimming_scales_the_sent_volume() {
        let bus = SystemBus::new();
        let mut audio = AudioManager::new(&bus, 0.6);
        drain(&bus);

        audio.toggle_dimmed(0.5);
        assert!(audio.is_dimmed());
        audio.toggle_dimmed(0.5);
        assert!(!audio.is_dimmed());
        assert_eq!(
            drain(&bus),
            vec![
                AudioCommand::SetVolume { volume: 0.3 },
                AudioCommand::SetVolume { volume: 0.6 },
            ]
        );
    }

    #[test]
    fn pause_and_resume_follow_published_status() {
        let bus = SystemBus::new();
        let mut audio = AudioManager::new(&bus, 1.0);
        audio.pause();
        assert_eq!(audio.playback.status(), PlaybackStatus::Idle);

        bus.playback.set_status(PlaybackStatus::Playing);
        audio.pause();
        assert!(!audio.is_playing());
        audio.resume();
        assert!(audio.is_playing());

        bus.playback.set_status(PlaybackStatus::Ended);
        assert!(audio.has_ended());
        audio.resume();
        assert!(audio.is_playing());
    }

    #[test]
    fn seek_without_track_is_ignored() {
        let bus = SystemBus::new();
        let mut audio = AudioManager::new(&bus, 1.0);
        drain(&bus);
        audio.seek_ms(1000);
        assert!(drain(&bus).is_empty());
    }
}
