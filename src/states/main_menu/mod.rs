//! Title screen.
//!
//! Clicking the logo slides it to the left and fades in the Play and Exit
//! buttons; after a while without interaction it slides back. The screen
//! also hosts the music controls, the downloads and repository links and
//! the update button.

mod beat;
mod history;
mod layout;
mod music_bar;

use super::{GameState, Screen, StateContext, StateTransition};
use crate::input::{FrameInput, MenuEvent, MenuKey, PointerButton};
use crate::models::settings::LayoutSettings;
use crate::services::{Catalog, Transport, UpdateStatus, Updater};
use crate::shared::snapshot::{LogoPulse, MenuSnapshot, UpdateButtonKind};
use crate::error::BrowseError;
use crate::ui::{AnimatedValue, AnimationEquation};
use history::PreviousTracks;
use layout::MenuButtons;

/// Idle time, in milliseconds, before returning the logo to its original position.
const LOGO_IDLE_DELAY: i32 = 10_000;

/// Max alpha level of the menu background.
const BG_MAX_ALPHA: f32 = 0.9;

const LOGO_OPEN_TIME: i32 = 100;
const LOGO_CLOSE_TIME: i32 = 2200;
const LOGO_BUTTON_FADE_TIME: i32 = 200;
const BG_FADE_TIME: i32 = 1100;

/// Volume multiplier of the theme track while the window is unfocused.
const THEME_DIM_VOLUME: f32 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoState {
    Default,
    Opening,
    Open,
    Closing,
}

pub struct MainMenu {
    width: f32,
    layout: LayoutSettings,
    with_links: bool,
    buttons: MenuButtons,

    logo_state: LogoState,
    /// Time the logo has been idle while open, in milliseconds.
    logo_timer: i32,
    logo_open: AnimatedValue,
    logo_close: AnimatedValue,
    logo_button_alpha: AnimatedValue,
    bg_alpha: AnimatedValue,

    previous: PreviousTracks,
    enter_notification: bool,
    running_ms: u64,
    pointer: (f32, f32),
}

impl MainMenu {
    pub fn new(width: u32, height: u32, layout: LayoutSettings, with_links: bool) -> Self {
        let (w, h) = (width as f32, height as f32);
        let center_offset = w / 6.5;
        let mut menu = Self {
            width: w,
            buttons: MenuButtons::new(w, h, &layout, with_links),
            layout,
            with_links,
            logo_state: LogoState::Default,
            logo_timer: 0,
            logo_open: AnimatedValue::new(LOGO_OPEN_TIME, 0.0, center_offset, AnimationEquation::OutQuad),
            logo_close: AnimatedValue::new(LOGO_CLOSE_TIME, center_offset, 0.0, AnimationEquation::OutQuad),
            logo_button_alpha: AnimatedValue::new(LOGO_BUTTON_FADE_TIME, 0.0, 1.0, AnimationEquation::Linear),
            bg_alpha: AnimatedValue::new(BG_FADE_TIME, 0.0, BG_MAX_ALPHA, AnimationEquation::Linear),
            previous: PreviousTracks::new(),
            enter_notification: false,
            running_ms: 0,
            pointer: (0.0, 0.0),
        };
        menu.reset();
        menu
    }

    pub fn logo_state(&self) -> LogoState {
        self.logo_state
    }

    pub fn logo_x(&self) -> f32 {
        self.buttons.logo.x()
    }

    /// Horizontal distance of the logo from the screen center.
    pub fn logo_offset(&self) -> f32 {
        self.width / 2.0 - self.buttons.logo.x()
    }

    pub fn logo_timer(&self) -> i32 {
        self.logo_timer
    }

    pub fn previous_len(&self) -> usize {
        self.previous.len()
    }

    /// Returns the logo to the center and every animation to its start.
    pub fn reset(&mut self) {
        self.buttons.logo.set_x(self.width / 2.0);
        self.logo_open.set_time(0);
        self.logo_close.set_time(0);
        self.logo_button_alpha.set_time(0);
        self.logo_timer = 0;
        self.logo_state = LogoState::Default;
        for button in self.buttons.all_mut() {
            button.reset_hover();
        }
    }

    fn open_logo(&mut self) {
        log::debug!("MENU: Logo {:?} -> Opening", self.logo_state);
        self.logo_state = LogoState::Opening;
        self.logo_open.set_time(0);
        self.logo_timer = 0;
        self.buttons.play.set_alpha(0.0);
        self.buttons.exit.set_alpha(0.0);
    }

    fn close_logo(&mut self) {
        log::debug!("MENU: Logo {:?} -> Closing", self.logo_state);
        self.logo_state = LogoState::Closing;
        self.logo_close.set_time(0);
        self.logo_timer = 0;
    }

    fn set_logo_button_alpha(&mut self) {
        let alpha = self.logo_button_alpha.value();
        self.buttons.play.set_alpha(alpha);
        self.buttons.exit.set_alpha(alpha);
    }

    fn update_logo(&mut self, delta: i32) {
        let center_x = self.width / 2.0;
        match self.logo_state {
            LogoState::Default => {}
            LogoState::Opening => {
                if self.logo_open.update(delta) {
                    self.buttons.logo.set_x(center_x - self.logo_open.value());
                }
                if self.logo_open.is_finished() {
                    log::debug!("MENU: Logo Opening -> Open");
                    self.logo_state = LogoState::Open;
                    self.logo_timer = 0;
                    self.logo_button_alpha.set_time(0);
                }
            }
            LogoState::Open => {
                if !self.logo_button_alpha.is_finished() {
                    self.logo_button_alpha.update(delta);
                    self.set_logo_button_alpha();
                } else {
                    self.logo_timer = self.logo_timer.saturating_add(delta);
                    if self.logo_timer >= LOGO_IDLE_DELAY {
                        self.close_logo();
                    }
                }
            }
            LogoState::Closing => {
                if self.logo_button_alpha.update(-delta) {
                    self.set_logo_button_alpha();
                }
                if self.logo_close.update(delta) {
                    self.buttons.logo.set_x(center_x - self.logo_close.value());
                }
            }
        }
    }

    fn update_hover(&mut self, delta: i32, input: &FrameInput, updater: &dyn Updater) {
        let (mx, my) = input.mouse();
        let b = &mut self.buttons;
        b.logo.hover_update_visible(delta, mx, my);
        b.play.hover_update_visible(delta, mx, my);
        b.exit.hover_update_visible(delta, mx, my);
        if let Some(repo) = b.repository.as_mut() {
            repo.hover_update_at(delta, mx, my);
        }
        if let Some(repo) = b.dance_repository.as_mut() {
            repo.hover_update_at(delta, mx, my);
        }
        if updater.show_button() {
            b.update.auto_hover_update(delta, true);
            b.restart.auto_hover_update(delta, false);
        }
        b.downloads.hover_update_at(delta, mx, my);

        // Only one music control is hovered at a time.
        let mut blocked = b.music_bar.contains(mx, my);
        let on_toggle = b.music_play.contains(mx, my);
        b.music_play.hover_update(delta, !blocked && on_toggle);
        b.music_pause.hover_update(delta, !blocked && on_toggle);
        blocked |= on_toggle;
        let on_next = !blocked && b.music_next.contains(mx, my);
        b.music_next.hover_update(delta, on_next);
        let on_previous = !blocked && b.music_previous.contains(mx, my);
        b.music_previous.hover_update(delta, on_previous);
    }

    fn update_tooltips(&self, delta: i32, ctx: &mut StateContext) {
        let (mx, my) = self.pointer;
        let b = &self.buttons;
        if b.music_bar.contains(mx, my) {
            ctx.notifier
                .update_tooltip(delta, "Click to seek to a specific point in the song.", false);
        } else if b.music_play.contains(mx, my) {
            let text = if ctx.transport.is_playing() { "Pause" } else { "Play" };
            ctx.notifier.update_tooltip(delta, text, false);
        } else if b.music_next.contains(mx, my) {
            ctx.notifier.update_tooltip(delta, "Next track", false);
        } else if b.music_previous.contains(mx, my) {
            ctx.notifier.update_tooltip(delta, "Previous track", false);
        } else if ctx.updater.show_button() {
            let status = ctx.updater.status();
            let on_download = matches!(
                status,
                UpdateStatus::UpdateAvailable | UpdateStatus::UpdateDownloading
            ) && b.update.contains(mx, my);
            let on_restart =
                status == UpdateStatus::UpdateDownloaded && b.restart.contains(mx, my);
            if on_download || on_restart {
                ctx.notifier.update_tooltip(delta, status.description(), true);
            }
        }
    }

    /// Plays a random track, remembering the one being left.
    pub fn next_track(&mut self, ctx: &mut StateContext) {
        let was_theme = ctx.transport.is_theme_playing();
        let Some(next) = ctx.catalog.random_entry() else {
            return;
        };
        let current = ctx.transport.track().cloned();
        if current.as_ref().is_some_and(|track| track.same_audio(&next)) {
            if ctx.transport.has_ended() {
                ctx.transport.seek_ms(0);
                ctx.transport.resume();
            }
            return;
        }
        if !was_theme && let Some(index) = current.and_then(|track| track.index) {
            self.previous.push(index);
        }
        log::info!("MENU: Now playing {} - {}", next.artist, next.title);
        ctx.transport.play_track(next);
        if ctx.settings.general.dynamic_background {
            self.bg_alpha.set_time(0);
        }
    }

    /// Returns to the last track left with "next", or rewinds the current one.
    pub fn previous_track(&mut self, ctx: &mut StateContext) {
        let track = self.previous.pop().and_then(|index| ctx.catalog.entry(index));
        match track {
            Some(track) => {
                log::info!("MENU: Back to {} - {}", track.artist, track.title);
                ctx.transport.play_track(track);
                if ctx.settings.general.dynamic_background {
                    self.bg_alpha.set_time(0);
                }
            }
            None => ctx.transport.seek_ms(0),
        }
    }

    fn toggle_playback(&mut self, ctx: &mut StateContext) {
        if ctx.transport.is_playing() {
            ctx.transport.pause();
            ctx.notifier.send_bar_notification("Pause");
        } else if !ctx.transport.is_loading() {
            ctx.transport.resume();
            ctx.notifier.send_bar_notification("Play");
        }
    }

    fn change_volume(&mut self, direction: i32, ctx: &mut StateContext) {
        let volume = ctx.settings.general.step_volume(direction);
        ctx.transport.set_volume(volume);
        log::debug!("MENU: Volume {:.0}%", volume * 100.0);
    }

    /// Song menu, or the downloads menu when nothing is loaded yet.
    fn enter_song_menu(&self, catalog: &dyn Catalog) -> StateTransition {
        if catalog.set_count() == 0 {
            return StateTransition::Enter {
                screen: Screen::DownloadsMenu,
                fade: true,
                notice: Some("Download some beatmaps to get started!".to_string()),
            };
        }
        StateTransition::Enter {
            screen: Screen::SongMenu,
            fade: true,
            notice: None,
        }
    }

    fn enter_downloads() -> StateTransition {
        StateTransition::Enter {
            screen: Screen::DownloadsMenu,
            fade: true,
            notice: None,
        }
    }

    fn open_link(uri: &str, ctx: &mut StateContext) {
        match ctx.browser.browse(uri) {
            Ok(()) => {}
            Err(BrowseError::Unsupported) => {
                ctx.notifier
                    .send_bar_notification("The repository web page could not be opened.");
            }
            Err(e) => ctx
                .reporter
                .report("Could not browse to repository URI.", &e, false),
        }
    }

    pub fn mouse_pressed(
        &mut self,
        button: PointerButton,
        x: i32,
        y: i32,
        ctx: &mut StateContext,
    ) -> StateTransition {
        if button == PointerButton::Middle {
            return StateTransition::None;
        }
        let (x, y) = (x as f32, y as f32);

        if ctx.transport.is_playing() && self.buttons.music_bar.contains(x, y) {
            let position = self
                .buttons
                .music_bar
                .seek_position(x, ctx.transport.duration_ms());
            ctx.transport.seek_ms(position);
            return StateTransition::None;
        }

        if self.buttons.music_play.contains(x, y) {
            self.toggle_playback(ctx);
            return StateTransition::None;
        } else if self.buttons.music_next.contains(x, y) {
            self.next_track(ctx);
            ctx.notifier.send_bar_notification(">> Next");
            return StateTransition::None;
        } else if self.buttons.music_previous.contains(x, y) {
            self.previous_track(ctx);
            ctx.notifier.send_bar_notification("<< Previous");
            return StateTransition::None;
        }

        if self.buttons.downloads.contains(x, y) {
            return Self::enter_downloads();
        }

        if self.buttons.repository.as_ref().is_some_and(|b| b.contains(x, y)) {
            let uri = ctx.settings.links.repository.clone();
            Self::open_link(&uri, ctx);
            return StateTransition::None;
        }
        if self
            .buttons
            .dance_repository
            .as_ref()
            .is_some_and(|b| b.contains(x, y))
        {
            let uri = ctx.settings.links.dance_repository.clone();
            Self::open_link(&uri, ctx);
            return StateTransition::None;
        }

        if ctx.updater.show_button() {
            let status = ctx.updater.status();
            if self.buttons.update.contains(x, y) && status == UpdateStatus::UpdateAvailable {
                ctx.updater.start_download();
                let update = &mut self.buttons.update;
                update.remove_hover_effects();
                update.set_hover_animation_duration(800);
                update.set_hover_animation_equation(AnimationEquation::InOutQuad);
                update.set_hover_fade(0.6);
                return StateTransition::None;
            } else if self.buttons.restart.contains(x, y)
                && status == UpdateStatus::UpdateDownloaded
            {
                ctx.updater.prepare_update();
                return StateTransition::Exit;
            }
        }

        match self.logo_state {
            LogoState::Default | LogoState::Closing => {
                if self.buttons.logo.contains_visible(x, y) {
                    self.open_logo();
                }
            }
            LogoState::Opening | LogoState::Open => {
                if self.buttons.logo.contains_visible(x, y)
                    || self.buttons.play.contains_visible(x, y)
                {
                    return self.enter_song_menu(ctx.catalog);
                } else if self.buttons.exit.contains_visible(x, y) {
                    log::info!("MENU: Exit requested");
                    return StateTransition::Exit;
                }
            }
        }
        StateTransition::None
    }

    pub fn mouse_wheel(&mut self, delta: i32, ctx: &mut StateContext) {
        self.change_volume(if delta < 0 { -1 } else { 1 }, ctx);
    }

    pub fn key_pressed(&mut self, key: MenuKey, ctx: &mut StateContext) -> StateTransition {
        match key {
            MenuKey::Escape | MenuKey::Q => {
                if self.logo_timer > 0 {
                    self.close_logo();
                } else {
                    return StateTransition::Enter {
                        screen: Screen::ExitPrompt,
                        fade: false,
                        notice: None,
                    };
                }
            }
            MenuKey::P => match self.logo_state {
                LogoState::Default | LogoState::Closing => self.open_logo(),
                LogoState::Opening | LogoState::Open => return self.enter_song_menu(ctx.catalog),
            },
            MenuKey::D => return Self::enter_downloads(),
            MenuKey::R => self.next_track(ctx),
            MenuKey::Up => self.change_volume(1, ctx),
            MenuKey::Down => self.change_volume(-1, ctx),
            MenuKey::F7 => {
                let fps = ctx.settings.general.cycle_target_fps();
                ctx.notifier
                    .send_bar_notification(&format!("Frame limiter: {} fps", fps));
            }
            MenuKey::F10 => {
                let general = &mut ctx.settings.general;
                general.mouse_disabled = !general.mouse_disabled;
                let text = if general.mouse_disabled {
                    "Mouse buttons are disabled."
                } else {
                    "Mouse buttons are enabled."
                };
                ctx.notifier.send_bar_notification(text);
            }
            MenuKey::Other => {}
        }
        StateTransition::None
    }

    /// Builds the frame snapshot for the renderer.
    pub fn snapshot(&self, transport: &dyn Transport, catalog: &dyn Catalog, updater: &dyn Updater) -> MenuSnapshot {
        let b = &self.buttons;
        let (mx, my) = self.pointer;

        let logo_pulse = transport
            .is_playing()
            .then(|| transport.track())
            .flatten()
            .and_then(|track| beat::beat_progress(&track.timing_points, transport.position_ms() as f64))
            .map(|progress| LogoPulse {
                beat_progress: progress,
                scale: 1.0 + progress as f32 * 0.05,
                piece_rotation: progress as f32 * 360.0,
            });
        let mut logo = b.logo.sprite();
        if let Some(pulse) = logo_pulse {
            logo.scale *= pulse.scale;
        }

        let buttons_visible = matches!(self.logo_state, LogoState::Open | LogoState::Closing);
        let playing = transport.is_playing();

        let fill = (!transport.is_loading() && transport.track_exists()).then(|| {
            let duration = transport.duration_ms();
            if duration == 0 {
                0.0
            } else {
                (transport.position_ms() as f32 / duration as f32).min(1.0)
            }
        });

        let update_button = if updater.show_button() {
            match updater.status() {
                UpdateStatus::UpdateAvailable | UpdateStatus::UpdateDownloading => {
                    Some((UpdateButtonKind::Download, b.update.sprite()))
                }
                UpdateStatus::UpdateDownloaded => Some((UpdateButtonKind::Restart, b.restart.sprite())),
                _ => None,
            }
        } else {
            None
        };

        let mut header = vec![format!(
            "Loaded {} songs and {} beatmaps.",
            catalog.set_count(),
            catalog.map_count()
        )];
        if transport.is_loading() {
            header.push("Track loading...".to_string());
        } else if let Some(track) = transport.track() {
            let label = if playing { "Now Playing:" } else { "Paused:" };
            header.push(label.to_string());
            header.push(format!("{}: {}", track.artist, track.title));
        }
        let footer = vec![format!(
            "Running for {}.",
            time_string(self.running_ms / 1000)
        )];

        MenuSnapshot {
            background_alpha: self.bg_alpha.value(),
            logo,
            logo_pulse,
            play: buttons_visible.then(|| b.play.sprite()),
            exit: buttons_visible.then(|| b.exit.sprite()),
            music_toggle: if playing {
                b.music_pause.sprite()
            } else {
                b.music_play.sprite()
            },
            music_playing: playing,
            music_next: b.music_next.sprite(),
            music_previous: b.music_previous.sprite(),
            position_bar: b.music_bar.state(b.music_bar.contains(mx, my), fill),
            downloads: b.downloads.sprite(),
            repository: b.repository.as_ref().map(|r| r.sprite()),
            dance_repository: b.dance_repository.as_ref().map(|r| r.sprite()),
            update_button,
            header,
            footer,
        }
    }
}

impl GameState for MainMenu {
    fn on_enter(&mut self, input: &FrameInput, ctx: &mut StateContext) {
        if !self.enter_notification {
            if ctx.updater.status() == UpdateStatus::UpdateAvailable {
                ctx.notifier.send_bar_notification("An update is available.");
                self.enter_notification = true;
            } else if ctx.updater.just_updated() {
                ctx.notifier.send_bar_notification("opsu! is now up to date!");
                self.enter_notification = true;
            }
        }

        // Keep the hover state of whatever is under the pointer.
        let (mx, my) = input.mouse();
        self.pointer = (mx, my);
        let b = &mut self.buttons;
        for button in [&mut b.logo, &mut b.play, &mut b.exit] {
            if !button.contains_visible(mx, my) {
                button.reset_hover();
            }
        }
        for button in [
            &mut b.music_play,
            &mut b.music_pause,
            &mut b.music_next,
            &mut b.music_previous,
            &mut b.downloads,
        ]
        .into_iter()
        .chain(b.repository.as_mut())
        .chain(b.dance_repository.as_mut())
        {
            if !button.contains(mx, my) {
                button.reset_hover();
            }
        }
        b.update.reset_hover();
        b.restart.reset_hover();
    }

    fn on_exit(&mut self, ctx: &mut StateContext) {
        if ctx.transport.is_dimmed() {
            ctx.transport.toggle_dimmed(1.0);
        }
    }

    fn handle_event(&mut self, event: MenuEvent, ctx: &mut StateContext) -> StateTransition {
        match event {
            MenuEvent::MousePressed { button, x, y } => self.mouse_pressed(button, x, y, ctx),
            MenuEvent::Wheel(delta) => {
                self.mouse_wheel(delta, ctx);
                StateTransition::None
            }
            MenuEvent::Key(key) => self.key_pressed(key, ctx),
        }
    }

    fn update(&mut self, delta: i32, input: &FrameInput, ctx: &mut StateContext) {
        ctx.notifier.update(delta);
        self.running_ms += delta.max(0) as u64;
        self.pointer = input.mouse();

        if ctx.transport.has_ended() {
            self.next_track(ctx);
        }

        self.update_hover(delta, input, &*ctx.updater);

        // Quieter theme music while the window is in the background.
        let want_dimmed = ctx.transport.is_theme_playing() && !input.has_focus;
        if ctx.transport.is_dimmed() != want_dimmed {
            ctx.transport.toggle_dimmed(THEME_DIM_VOLUME);
        }

        self.bg_alpha.update(delta);
        self.update_logo(delta);
        self.update_tooltips(delta, ctx);
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width as f32, height as f32);
        log::debug!("MENU: Resize to {}x{}", width, height);
        self.width = w;
        self.buttons = MenuButtons::new(w, h, &self.layout, self.with_links);
        let center_offset = w / 6.5;
        self.logo_open.set_values(0.0, center_offset);
        self.logo_close.set_values(center_offset, 0.0);
        let offset = match self.logo_state {
            LogoState::Default => 0.0,
            LogoState::Opening | LogoState::Open => self.logo_open.value(),
            LogoState::Closing => self.logo_close.value(),
        };
        self.buttons.logo.set_x(w / 2.0 - offset);
        if self.logo_state != LogoState::Default {
            self.set_logo_button_alpha();
        }
    }
}

/// Formats a duration like "42 seconds", "03:15" or "01:02:03".
fn time_string(seconds: u64) -> String {
    if seconds < 60 {
        if seconds == 1 {
            "1 second".to_string()
        } else {
            format!("{} seconds", seconds)
        }
    } else if seconds < 3600 {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    } else {
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }
}
