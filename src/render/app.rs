//! Application window and event loop handler.
//!
//! This module owns the window and bridges winit events to the title
//! screen: window events become `FrameInput` and menu events, and every
//! redraw ticks the menu and the cursor and assembles a [`FrameSnapshot`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::database::SongCatalog;
use crate::input::{FrameInput, InputManager};
use crate::logic::AudioManager;
use crate::models::Settings;
use crate::services::browser::SystemBrowser;
use crate::services::notifier::{BarNotifier, LogReporter};
use crate::services::updater::LocalUpdater;
use crate::services::{Browser, Notifier, Transport};
use crate::shared::snapshot::FrameSnapshot;
use crate::states::{GameState, MainMenu, Screen, StateContext, StateTransition};
use crate::ui::CursorTrail;

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

/// Longest frame step fed to the animations, in milliseconds.
const MAX_FRAME_DELTA: i32 = 100;

/// Window in which a second exit request confirms the first.
const EXIT_CONFIRM_WINDOW: Duration = Duration::from_millis(2000);

/// Collaborators lent to the menu on every call.
pub struct Services {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub transport: AudioManager,
    pub catalog: SongCatalog,
    pub notifier: BarNotifier,
    pub reporter: LogReporter,
    pub updater: LocalUpdater,
    pub browser: SystemBrowser,
}

impl Services {
    fn ctx(&mut self) -> StateContext<'_> {
        StateContext {
            settings: &mut self.settings,
            transport: &mut self.transport,
            catalog: &mut self.catalog,
            notifier: &mut self.notifier,
            reporter: &mut self.reporter,
            updater: &mut self.updater,
            browser: &self.browser,
        }
    }
}

/// Frames counted over one-second windows.
#[derive(Debug)]
struct FpsCounter {
    frames: u32,
    window_start: Instant,
    fps: u32,
}

impl FpsCounter {
    fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            window_start: now,
            fps: 0,
        }
    }

    fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }
}

/// Stand-in for the exit prompt: quitting needs a second request in time.
#[derive(Debug, Default)]
struct ExitPrompt {
    armed_at: Option<Instant>,
}

impl ExitPrompt {
    /// Returns true when this request confirms an earlier one.
    fn request(&mut self, now: Instant) -> bool {
        match self.armed_at.take() {
            Some(armed) if now.duration_since(armed) <= EXIT_CONFIRM_WINDOW => true,
            _ => {
                self.armed_at = Some(now);
                false
            }
        }
    }
}

/// Main application struct handling window events.
pub struct App {
    services: Services,
    menu: MainMenu,
    cursor: CursorTrail,
    input: InputManager,
    window: Option<Arc<Window>>,
    last_frame: Instant,
    next_frame: Instant,
    fps: FpsCounter,
    exit_prompt: ExitPrompt,
}

impl App {
    pub fn new(services: Services) -> Self {
        let now = Instant::now();
        let with_links = services.browser.is_supported();
        let menu = MainMenu::new(
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            services.settings.layout.clone(),
            with_links,
        );
        Self {
            services,
            menu,
            cursor: CursorTrail::new(false),
            input: InputManager::new(),
            window: None,
            last_frame: now,
            next_frame: now,
            fps: FpsCounter::new(now),
            exit_prompt: ExitPrompt::default(),
        }
    }

    /// Runs the application event loop (blocking).
    pub fn run(services: Services) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(services);
        event_loop.run_app(&mut app)
    }

    fn apply(&mut self, transition: StateTransition, event_loop: &ActiveEventLoop) {
        match transition {
            StateTransition::None => {}
            StateTransition::Exit => self.quit(event_loop),
            StateTransition::Enter {
                screen: Screen::ExitPrompt,
                ..
            } => {
                if self.exit_prompt.request(Instant::now()) {
                    self.quit(event_loop);
                } else {
                    self.services
                        .notifier
                        .send_bar_notification("Press Escape again to exit");
                }
            }
            StateTransition::Enter { screen, notice, .. } => {
                log::info!("HOST: {:?} is not available, staying on the title screen", screen);
                if let Some(notice) = notice {
                    self.services.notifier.send_bar_notification(&notice);
                }
            }
        }
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("HOST: Shutting down");
        self.menu.on_exit(&mut self.services.ctx());
        self.services.transport.stop();
        self.services.transport.shutdown();
        if let Err(e) = self.services.settings.save(&self.services.settings_path) {
            log::error!("HOST: Could not save settings: {}", e);
        }
        if self.services.updater.is_staged() {
            log::info!("HOST: Update will be applied on next launch");
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta = now
            .duration_since(self.last_frame)
            .as_millis()
            .min(MAX_FRAME_DELTA as u128) as i32;
        self.last_frame = now;
        let fps = self.fps.tick(now);

        let frame_input: FrameInput = self.input.frame(fps);
        self.menu.update(delta, &frame_input, &mut self.services.ctx());
        self.cursor.update(delta);
        let cursor = self.cursor.draw(&frame_input, &self.services.settings.cursor);

        let s = &self.services;
        let tooltip = s
            .notifier
            .tooltip()
            .map(|text| (text.to_string(), s.notifier.tooltip_alpha()));
        let frame = FrameSnapshot {
            menu: self.menu.snapshot(&s.transport, &s.catalog, &s.updater),
            cursor,
            bar_notification: s.notifier.bar_notification().map(str::to_string),
            tooltip,
        };
        // No drawing backend: the frame is only traced.
        log::trace!("HOST: {:?}", frame);

        let target = s.settings.general.target_fps().max(1);
        self.next_frame = now + Duration::from_secs(1) / target;
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        log::info!("HOST: Creating window...");
        let win_attr = Window::default_attributes()
            .with_title("opsu!")
            .with_inner_size(winit::dpi::LogicalSize::new(
                DEFAULT_WIDTH as f64,
                DEFAULT_HEIGHT as f64,
            ));

        let window = match event_loop.create_window(win_attr) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("HOST: Could not create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        // The cursor is drawn by the menu.
        window.set_cursor_visible(!self.services.settings.cursor.enabled);

        let size = window.inner_size();
        self.menu.resize(size.width, size.height);
        let frame_input = self.input.frame(0);
        self.menu.on_enter(&frame_input, &mut self.services.ctx());

        self.last_frame = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(menu_event) = self.input.process(&event) {
            let transition = self
                .menu
                .handle_event(menu_event, &mut self.services.ctx());
            self.apply(transition, event_loop);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("HOST: Close requested");
                self.quit(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.menu.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::CursorLeft { .. } => self.cursor.reset_locations(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if Instant::now() >= self.next_frame
            && let Some(window) = self.window.as_ref()
        {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_once_per_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for i in 1..60 {
            assert_eq!(counter.tick(start + Duration::from_millis(i * 16)), 0);
        }
        assert_eq!(counter.tick(start + Duration::from_secs(1)), 60);
        assert_eq!(counter.tick(start + Duration::from_millis(1016)), 60);
    }

    #[test]
    fn exit_needs_a_second_request_in_time() {
        let start = Instant::now();
        let mut prompt = ExitPrompt::default();
        assert!(!prompt.request(start));
        assert!(prompt.request(start + Duration::from_millis(500)));

        assert!(!prompt.request(start + Duration::from_secs(10)));
        assert!(!prompt.request(start + Duration::from_secs(13)));
        assert!(prompt.request(start + Duration::from_millis(14_000)));
    }
}
