mod main_menu;

use crate::input::{FrameInput, MenuEvent};
use crate::models::Settings;
use crate::services::{Browser, Catalog, ErrorReporter, Notifier, Transport, Updater};

pub use main_menu::MainMenu;

/// Screens the title screen can hand over to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SongMenu,
    DownloadsMenu,
    /// Button menu asking whether to quit.
    ExitPrompt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateTransition {
    None,
    Enter {
        screen: Screen,
        /// Fade out this screen and fade in the next one.
        fade: bool,
        /// Message the next screen shows once loaded.
        notice: Option<String>,
    },
    Exit,
}

/// Collaborators lent to a state for one call.
pub struct StateContext<'a> {
    pub settings: &'a mut Settings,
    pub transport: &'a mut dyn Transport,
    pub catalog: &'a mut dyn Catalog,
    pub notifier: &'a mut dyn Notifier,
    pub reporter: &'a mut dyn ErrorReporter,
    pub updater: &'a mut dyn Updater,
    pub browser: &'a dyn Browser,
}

pub trait GameState {
    fn on_enter(&mut self, _input: &FrameInput, _ctx: &mut StateContext) {}
    fn on_exit(&mut self, _ctx: &mut StateContext) {}

    fn handle_event(&mut self, _event: MenuEvent, _ctx: &mut StateContext) -> StateTransition {
        StateTransition::None
    }

    fn update(&mut self, _delta: i32, _input: &FrameInput, _ctx: &mut StateContext) {}

    fn resize(&mut self, _width: u32, _height: u32) {}
}
