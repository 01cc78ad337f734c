//! Button placement for a given window size.

use super::music_bar::MusicBar;
use crate::models::settings::LayoutSettings;
use crate::ui::{AnimationEquation, Expand, MenuButton, Shape};

/// Hover animation shared by the logo, Play and Exit.
const LOGO_HOVER_DURATION: i32 = 350;
const LOGO_HOVER_SCALE: f32 = 1.08;
const MUSIC_HOVER_SCALE: f32 = 1.5;

#[derive(Debug, Clone)]
pub struct MenuButtons {
    pub logo: MenuButton,
    pub play: MenuButton,
    pub exit: MenuButton,
    pub music_play: MenuButton,
    pub music_pause: MenuButton,
    pub music_next: MenuButton,
    pub music_previous: MenuButton,
    pub music_bar: MusicBar,
    pub downloads: MenuButton,
    pub repository: Option<MenuButton>,
    pub dance_repository: Option<MenuButton>,
    pub update: MenuButton,
    pub restart: MenuButton,
}

impl MenuButtons {
    /// Lays out every button. Repository links are only created when a
    /// browser is available to open them.
    pub fn new(width: f32, height: f32, layout: &LayoutSettings, with_links: bool) -> Self {
        let (logo_size, play_size, exit_size) = (layout.logo, layout.play, layout.exit);
        let exit_offset = (play_size.width - exit_size.width) / 3.0;

        let mut logo = MenuButton::new(width / 2.0, height / 2.0, logo_size.width, logo_size.height)
            .with_shape(Shape::Ellipse);
        let mut play = MenuButton::new(
            width * 0.75,
            height / 2.0 - logo_size.height / 5.0,
            play_size.width,
            play_size.height,
        );
        let mut exit = MenuButton::new(
            width * 0.75 - exit_offset,
            height / 2.0 + exit_size.height / 2.0,
            exit_size.width,
            exit_size.height,
        );
        for button in [&mut logo, &mut play, &mut exit] {
            button.set_hover_animation_duration(LOGO_HOVER_DURATION);
            button.set_hover_animation_equation(AnimationEquation::InOutBack);
            button.set_hover_expand(LOGO_HOVER_SCALE);
        }

        let icon = layout.music_icon;
        let music_y = icon.height / 1.5;
        let music_button = |x: f32| {
            let mut button = MenuButton::new(x, music_y, icon.width, icon.height);
            button.set_hover_expand(MUSIC_HOVER_SCALE);
            button
        };
        let music_play = music_button(width - 2.0 * icon.width);
        let music_pause = music_button(width - 2.0 * icon.width);
        let music_next = music_button(width - icon.width);
        let music_previous = music_button(width - 3.0 * icon.width);

        let mut downloads = MenuButton::new(
            width - layout.downloads.width / 2.0,
            height / 2.0,
            layout.downloads.width,
            layout.downloads.height,
        );
        downloads.set_hover_animation_duration(350);
        downloads.set_hover_animation_equation(AnimationEquation::InOutBack);
        downloads.set_hover_expand_towards(1.03, Expand::Left);

        let (start_x, start_y) = (width * 0.997, height * 0.997);
        let repo = layout.repository;
        let repo_button = |x: f32| {
            let mut button = MenuButton::new(x, start_y - repo.height, repo.width, repo.height);
            button.set_hover_animation_duration(350);
            button.set_hover_animation_equation(AnimationEquation::InOutBack);
            button.set_hover_expand(crate::ui::button::DEFAULT_HOVER_EXPAND);
            button
        };
        let repository = with_links.then(|| repo_button(start_x - repo.width * 2.5));
        let dance_repository = with_links.then(|| repo_button(start_x - repo.width));

        let (update_x, update_y) = (width / 2.0, height * 17.0 / 18.0);
        let mut update = MenuButton::new(update_x, update_y, layout.update.width, layout.update.height);
        update.set_hover_animation_duration(400);
        update.set_hover_animation_equation(AnimationEquation::InOutQuad);
        update.set_hover_expand(1.1);
        let mut restart = MenuButton::new(update_x, update_y, layout.update.width, layout.update.height);
        restart.set_hover_animation_duration(2000);
        restart.set_hover_animation_equation(AnimationEquation::Linear);
        restart.set_hover_rotate(360.0);

        Self {
            logo,
            play,
            exit,
            music_play,
            music_pause,
            music_next,
            music_previous,
            music_bar: MusicBar::new(width, icon),
            downloads,
            repository,
            dance_repository,
            update,
            restart,
        }
    }

    /// Buttons whose hover state is reset when the menu is (re)entered.
    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut MenuButton> {
        [
            &mut self.logo,
            &mut self.play,
            &mut self.exit,
            &mut self.music_play,
            &mut self.music_pause,
            &mut self.music_next,
            &mut self.music_previous,
            &mut self.downloads,
            &mut self.update,
            &mut self.restart,
        ]
        .into_iter()
        .chain(self.repository.as_mut())
        .chain(self.dance_repository.as_mut())
    }
}
