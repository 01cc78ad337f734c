//! Dedicated audio thread that handles all audio operations.
//!
//! This keeps decoding and seeking off the window thread. Progress is
//! published through [`PlaybackShared`] after every command and every poll.

use crate::system::bus::{AudioCommand, PlaybackShared, PlaybackStatus, SystemBus};
use crossbeam_channel::RecvTimeoutError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// How often playback progress is published while no command arrives.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

struct AudioWorker {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    volume: f32,
    sample_rate: u32,
    channels: u16,
    /// Samples played so far, counted by [`AudioMonitor`].
    sample_counter: Arc<AtomicU64>,
    playback: PlaybackShared,
    /// True if audio is available, false for silent mode
    has_audio: bool,
}

impl AudioWorker {
    fn new(playback: PlaybackShared) -> Self {
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("AUDIO: Device found, audio enabled");
                (Some(stream), Some(handle))
            }
            Err(e) => {
                log::warn!(
                    "AUDIO: No audio device found ({}), running in silent mode",
                    e
                );
                (None, None)
            }
        };
        Self {
            has_audio: stream_handle.is_some(),
            _stream: stream,
            stream_handle,
            sink: None,
            current_path: None,
            volume: 1.0,
            sample_rate: 44100,
            channels: 2,
            sample_counter: Arc::new(AtomicU64::new(0)),
            playback,
        }
    }

    fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load { path } => {
                self.current_path = Some(path);
                self.load_from_position(0, true);
            }
            AudioCommand::Play => {
                if let Some(sink) = &self.sink {
                    sink.play();
                }
                if self.current_path.is_some() {
                    self.playback.set_status(PlaybackStatus::Playing);
                }
            }
            AudioCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                if self.current_path.is_some() {
                    self.playback.set_status(PlaybackStatus::Paused);
                }
            }
            AudioCommand::Stop => {
                if let Some(sink) = self.sink.take() {
                    sink.stop();
                }
                self.sample_counter.store(0, Ordering::Relaxed);
                self.playback.set_position_ms(0);
                self.playback.set_status(PlaybackStatus::Idle);
            }
            AudioCommand::Seek { position_ms } => self.seek_to(position_ms),
            AudioCommand::SetVolume { volume } => {
                self.volume = volume;
                if let Some(sink) = &self.sink {
                    sink.set_volume(volume);
                }
            }
            AudioCommand::Shutdown => {}
        }
    }

    /// Rebuilds the sink from the current file, skipping to `position_ms`.
    fn load_from_position(&mut self, position_ms: u64, play: bool) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        let Some(path) = self.current_path.clone() else {
            return;
        };

        // Silent mode: pretend the track plays so the menu stays usable.
        if !self.has_audio {
            self.playback.set_position_ms(position_ms);
            self.playback.set_status(if play {
                PlaybackStatus::Playing
            } else {
                PlaybackStatus::Paused
            });
            return;
        }

        match self.build_sink(&path, position_ms) {
            Some(sink) => {
                if play {
                    sink.play();
                }
                self.sink = Some(sink);
                self.playback.set_status(if play {
                    PlaybackStatus::Playing
                } else {
                    PlaybackStatus::Paused
                });
                log::info!("AUDIO: Loaded {:?} from {}ms", path, position_ms);
            }
            None => self.playback.set_status(PlaybackStatus::Idle),
        }
    }

    fn build_sink(&mut self, path: &Path, position_ms: u64) -> Option<Sink> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("AUDIO: Cannot open file {:?}: {}", path, e);
                return None;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(source) => source,
            Err(e) => {
                log::error!("AUDIO: Cannot decode file {:?}: {}", path, e);
                return None;
            }
        };

        self.sample_rate = source.sample_rate();
        self.channels = source.channels();
        // Some decoders cannot tell the length up front.
        let duration_ms = source
            .total_duration()
            .map_or(0, |d| d.as_millis() as u64);
        self.playback.set_duration_ms(duration_ms);

        let skipped_samples =
            position_ms * self.sample_rate as u64 * self.channels as u64 / 1000;
        self.sample_counter.store(skipped_samples, Ordering::Relaxed);
        self.playback.set_position_ms(position_ms);

        let monitor = AudioMonitor {
            inner: source.skip_duration(Duration::from_millis(position_ms)),
            sample_counter: self.sample_counter.clone(),
        };

        let stream_handle = self.stream_handle.as_ref()?;
        let sink = match Sink::try_new(stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::error!("AUDIO: Failed to create sink: {}", e);
                return None;
            }
        };
        sink.set_volume(self.volume);
        sink.pause();
        sink.append(monitor);
        Some(sink)
    }

    fn seek_to(&mut self, position_ms: u64) {
        let was_playing = self.playback.status() == PlaybackStatus::Playing;
        self.load_from_position(position_ms, was_playing);
        log::info!("AUDIO: Seeked to {}ms", position_ms);
    }

    /// Publishes the position and detects the end of the track.
    fn publish(&self) {
        let Some(sink) = &self.sink else {
            return;
        };
        let per_second = (self.sample_rate as u64 * self.channels as u64).max(1);
        let samples = self.sample_counter.load(Ordering::Relaxed);
        self.playback.set_position_ms(samples * 1000 / per_second);

        if sink.empty() && self.playback.status() == PlaybackStatus::Playing {
            log::debug!("AUDIO: Track ended");
            self.playback.set_status(PlaybackStatus::Ended);
        }
    }
}

struct AudioMonitor<I> {
    inner: I,
    sample_counter: Arc<AtomicU64>,
}

impl<I> Iterator for AudioMonitor<I>
where
    I: Iterator,
{
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next();
        if item.is_some() {
            self.sample_counter.fetch_add(1, Ordering::Relaxed);
        }
        item
    }
}

impl<I> Source for AudioMonitor<I>
where
    I: Source,
    I::Item: rodio::Sample,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }
    fn channels(&self) -> u16 {
        self.inner.channels()
    }
    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }
    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

/// Starts the dedicated audio thread.
pub fn start_audio_thread(bus: SystemBus) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("Audio Thread".to_string())
        .spawn(move || {
            log::info!("AUDIO: Thread started");

            let mut worker = AudioWorker::new(bus.playback.clone());

            loop {
                match bus.audio_cmd_rx.recv_timeout(POLL_INTERVAL) {
                    Ok(AudioCommand::Shutdown) => break,
                    Ok(cmd) => worker.handle_command(cmd),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
                worker.publish();
            }

            log::info!("AUDIO: Thread stopped");
        })
}
