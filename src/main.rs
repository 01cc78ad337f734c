//! Application entry point and thread bootstrapper.

mod database;
mod error;
mod input;
mod logic;
mod models;
mod render;
mod services;
mod shared;
mod states;
mod system;
mod ui;

use crate::database::SongCatalog;
use crate::logic::AudioManager;
use crate::models::{Settings, Track};
use crate::render::app::{App, Services};
use crate::services::browser::SystemBrowser;
use crate::services::notifier::{BarNotifier, LogReporter};
use crate::services::updater::LocalUpdater;
use crate::services::{Catalog, Transport};
use crate::system::bus::{AudioCommand, SystemBus};
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting beatmenu...");

    let settings_path = PathBuf::from("settings.toml");
    let settings = Settings::load(&settings_path);

    let bus = SystemBus::new();
    let audio_thread = match logic::start_audio_thread(bus.clone()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("MAIN: Could not start audio thread: {}", e);
            None
        }
    };
    let mut transport = AudioManager::new(&bus, settings.general.master_volume);

    let mut catalog = match SongCatalog::scan(&settings.general.songs_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("MAIN: {}", e);
            SongCatalog::empty()
        }
    };

    // Theme music first, otherwise a random song.
    let first_track = settings
        .general
        .theme_audio
        .clone()
        .map(Track::theme)
        .or_else(|| catalog.random_entry());
    if let Some(track) = first_track {
        transport.play_track(track);
    }

    let services = Services {
        settings,
        settings_path,
        transport,
        catalog,
        notifier: BarNotifier::new(),
        reporter: LogReporter,
        updater: LocalUpdater::default(),
        browser: SystemBrowser,
    };

    if let Err(e) = App::run(services) {
        log::error!("MAIN: Event loop failed: {}", e);
    }

    // No-op when the host already stopped the audio thread.
    let _ = bus.audio_cmd_tx.send(AudioCommand::Shutdown);
    if let Some(handle) = audio_thread
        && handle.join().is_err()
    {
        log::error!("MAIN: Audio thread panicked");
    }
    log::info!("MAIN: Bye");
}
