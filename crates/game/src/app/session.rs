use std::path::PathBuf;

use tank_engine::{Graphics, InputState, Scene, SceneCommand, SceneError};
use tracing::{error, info, warn};

use super::assets::Assets;
use super::capacity::CapacityExceeded;
use super::gameplay::{Level, Player};
use super::menu::{Menu, MenuAction, MenuScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameState {
    MenuFullscreen,
    MenuOverlay,
    Playing,
    // Entered only through `end_game`; nothing in play triggers it yet.
    #[allow(dead_code)]
    Failure,
    #[allow(dead_code)]
    Success,
}

/// Owns everything the game has on screen and drives it through the engine's
/// `Scene` hooks. Menu actions are applied after the render pass that produced
/// them.
pub(crate) struct Session {
    levels_dir: PathBuf,
    level_index: u32,
    first_menu: MenuScreen,
    state: GameState,
    menu: Option<Menu>,
    stashed_menu: Option<Menu>,
    pending_level_load: bool,
    level: Option<Level>,
    player: Option<Player>,
    assets: Assets,
}

fn required<'a, T>(slot: &'a mut Option<T>, what: &str, state: GameState) -> &'a mut T {
    match slot {
        Some(value) => value,
        None => panic!("game state {state:?} requires a {what}, but none is loaded"),
    }
}

impl Session {
    pub(crate) fn new(levels_dir: PathBuf, level_index: u32, first_menu: MenuScreen) -> Self {
        Self {
            levels_dir,
            level_index,
            first_menu,
            state: GameState::MenuFullscreen,
            menu: None,
            stashed_menu: None,
            pending_level_load: false,
            level: None,
            player: None,
            assets: Assets::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    fn set_state(&mut self, to: GameState) {
        if self.state != to {
            info!(from = ?self.state, to = ?to, "state_changed");
            self.state = to;
        }
    }

    /// Lays `screen` over the running level. Only valid while playing.
    #[allow(dead_code)]
    pub(crate) fn open_overlay(
        &mut self,
        screen: MenuScreen,
        gfx: &mut dyn Graphics,
    ) -> Result<(), CapacityExceeded> {
        if self.state != GameState::Playing {
            warn!(state = ?self.state, menu = screen.name(), "overlay_ignored");
            return Ok(());
        }
        let menu = screen.build(gfx, &mut self.assets)?;
        if let Some(previous) = self.menu.replace(menu) {
            previous.destroy(gfx);
        }
        self.set_state(GameState::MenuOverlay);
        Ok(())
    }

    #[allow(dead_code)]
    pub(crate) fn end_game(&mut self, outcome: GameState, gfx: &mut dyn Graphics) {
        assert!(
            matches!(outcome, GameState::Failure | GameState::Success),
            "end_game expects Failure or Success, got {outcome:?}"
        );
        if let Some(menu) = self.menu.take() {
            menu.destroy(gfx);
        }
        self.set_state(outcome);
    }

    fn apply(&mut self, action: MenuAction, gfx: &mut dyn Graphics) -> SceneCommand {
        match action {
            MenuAction::StartGame => self.begin_level_load(gfx),
            MenuAction::OpenTestMenu => self.switch_menu(MenuScreen::Test, gfx),
            MenuAction::OpenMainMenu => self.switch_menu(MenuScreen::Main, gfx),
            MenuAction::Quit => {
                info!(reason = "menu_quit", "shutdown_requested");
                return SceneCommand::Quit;
            }
        }
        SceneCommand::None
    }

    fn switch_menu(&mut self, screen: MenuScreen, gfx: &mut dyn Graphics) {
        match screen.build(gfx, &mut self.assets) {
            Ok(menu) => {
                info!(menu = screen.name(), widgets = menu.widget_count(), "menu_opened");
                if let Some(previous) = self.menu.replace(menu) {
                    previous.destroy(gfx);
                }
            }
            Err(error) => warn!(menu = screen.name(), error = %error, "menu_build_failed"),
        }
    }

    /// Shows the loading screen for one frame; the level itself is loaded
    /// after that frame is drawn.
    fn begin_level_load(&mut self, gfx: &mut dyn Graphics) {
        if self.pending_level_load {
            return;
        }
        match MenuScreen::Loading.build(gfx, &mut self.assets) {
            Ok(loading) => self.stashed_menu = self.menu.replace(loading),
            Err(error) => warn!(error = %error, "loading_screen_unavailable"),
        }
        self.pending_level_load = true;
    }

    fn finish_level_load(&mut self, gfx: &mut dyn Graphics) {
        self.pending_level_load = false;
        match Level::load(&self.levels_dir, self.level_index, gfx, &mut self.assets) {
            Ok(level) => {
                for menu in [self.menu.take(), self.stashed_menu.take()].into_iter().flatten() {
                    menu.destroy(gfx);
                }
                let start = level.start();
                info!(
                    level_id = level.id(),
                    path = %level.source().display(),
                    start_x = start.x,
                    start_y = start.y,
                    "level_started"
                );
                let mut player = Player::create(gfx, &mut self.assets);
                player.move_to(start);
                if let Some(previous) = self.level.replace(level) {
                    previous.destroy(gfx);
                }
                if let Some(previous) = self.player.replace(player) {
                    previous.destroy(gfx);
                }
                self.set_state(GameState::Playing);
            }
            Err(load_error) => {
                error!(level_id = self.level_index, error = %load_error, "level_load_failed");
                if let Some(stashed) = self.stashed_menu.take() {
                    if let Some(loading) = self.menu.replace(stashed) {
                        loading.destroy(gfx);
                    }
                }
            }
        }
    }
}

impl Scene for Session {
    fn load(&mut self, gfx: &mut dyn Graphics) -> Result<(), SceneError> {
        let menu = self
            .first_menu
            .build(gfx, &mut self.assets)
            .map_err(SceneError::new)?;
        self.menu = Some(menu);
        info!(
            menu = self.first_menu.name(),
            level_id = self.level_index,
            "session_ready"
        );
        Ok(())
    }

    fn update(&mut self, input: &InputState) -> SceneCommand {
        let state = self.state;
        match state {
            GameState::MenuFullscreen => required(&mut self.menu, "menu", state).tick(),
            GameState::MenuOverlay => {
                required(&mut self.menu, "menu", state).tick();
                required(&mut self.level, "level", state).tick();
                required(&mut self.player, "player", state).tick(input);
            }
            GameState::Playing => {
                required(&mut self.level, "level", state).tick();
                required(&mut self.player, "player", state).tick(input);
            }
            GameState::Failure | GameState::Success => {}
        }
        SceneCommand::None
    }

    fn render(&mut self, input: &InputState, gfx: &mut dyn Graphics) -> SceneCommand {
        let state = self.state;
        let actions = match state {
            GameState::MenuFullscreen => required(&mut self.menu, "menu", state).render(input, gfx),
            GameState::MenuOverlay => {
                required(&mut self.level, "level", state).render(input, gfx);
                required(&mut self.player, "player", state).render(gfx);
                required(&mut self.menu, "menu", state).render(input, gfx)
            }
            GameState::Playing => {
                required(&mut self.level, "level", state).render(input, gfx);
                required(&mut self.player, "player", state).render(gfx);
                Vec::new()
            }
            GameState::Failure | GameState::Success => Vec::new(),
        };

        if self.pending_level_load {
            self.finish_level_load(gfx);
        }
        for action in actions {
            if self.apply(action, gfx) == SceneCommand::Quit {
                return SceneCommand::Quit;
            }
        }
        SceneCommand::None
    }

    fn unload(&mut self, gfx: &mut dyn Graphics) {
        for menu in [self.menu.take(), self.stashed_menu.take()].into_iter().flatten() {
            menu.destroy(gfx);
        }
        if let Some(level) = self.level.take() {
            level.destroy(gfx);
        }
        if let Some(player) = self.player.take() {
            player.destroy(gfx);
        }
        self.pending_level_load = false;
    }

    fn debug_title(&self) -> Option<String> {
        let mut title = format!("Tank Game | {:?} | level {}", self.state, self.level_index);
        if let Some(level) = &self.level {
            let nodes = level.nodes();
            title.push_str(&format!(
                " | entities {} | nodes {}/{}",
                level.entities().live_count(),
                nodes.len(),
                nodes.capacity()
            ));
        }
        if let Some(player) = &self.player {
            let position = player.position();
            title.push_str(&format!(
                " | hp {} | ({}, {})",
                player.health(),
                position.x,
                position.y
            ));
        }
        Some(title)
    }
}
