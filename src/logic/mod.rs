//! Music playback: the menu-side transport and the audio thread behind it.

pub mod audio;
pub mod audio_thread;

pub use audio::AudioManager;
pub use audio_thread::start_audio_thread;
