//! The game loop: state machine, click dispatch and per-frame updates.
//!
//! Hosts own a [`Game`] and call [`Game::step`] once per frame with freshly
//! sampled input, then paint [`crate::render::render`]. Nothing here blocks
//! or keeps global state; a test harness can drive it with a fake clock.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{validate_config, GameConfig};
use crate::error::ConfigError;
use crate::geometry::Point;
use crate::input::{FrameInput, InputTracker};
use crate::lifecycle::{self, AddGuestOutcome, AddRoomOutcome, CheckOutOutcome};
use crate::ui::{Action, UiLayout};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Playing,
    Paused,
}

/// What the host should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The player chose Exit; terminate with status 0.
    Exit,
}

pub struct Game {
    config: GameConfig,
    ui: UiLayout,
    world: World,
    state: GameState,
    input: InputTracker,
    rng: StdRng,
    /// Playing time accumulated towards the next day rollover.
    day_clock: Duration,
    last_frame: Option<Duration>,
}

impl Game {
    /// New game on the main menu. Uses `config.seed` when set.
    /// Fails with [`ConfigError::Invalid`] listing every problem in `config`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// New game with a fixed RNG seed, for reproducible runs.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        let issues = validate_config(&config);
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }
        Ok(Self {
            world: World::new(&config),
            config,
            ui: UiLayout::new(),
            state: GameState::MainMenu,
            input: InputTracker::new(),
            rng,
            day_clock: Duration::ZERO,
            last_frame: None,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ui(&self) -> &UiLayout {
        &self.ui
    }

    /// Advance one frame: edge-detect input, dispatch, then age guests and
    /// tick the day clock while playing.
    pub fn step(&mut self, input: &FrameInput) -> StepOutcome {
        let now = input.now;
        let was_playing = self.state == GameState::Playing;
        let events = self.input.update(input);

        if events.escape_pressed {
            self.toggle_pause();
        }

        if let Some(p) = events.click {
            if self.handle_click(p, now) == StepOutcome::Exit {
                return StepOutcome::Exit;
            }
        }

        if self.state == GameState::Playing {
            lifecycle::age_guests(&mut self.world, now);
            if was_playing {
                let delta = self
                    .last_frame
                    .map(|last| now.saturating_sub(last))
                    .unwrap_or_default();
                self.tick_day_clock(delta);
            }
        }

        self.last_frame = Some(now);
        StepOutcome::Continue
    }

    /// Buy a room (the "New Room" button).
    pub fn add_room(&mut self) -> AddRoomOutcome {
        lifecycle::add_room(&mut self.world, &self.config)
    }

    /// Check in a guest (the "Receive Guest" button).
    pub fn add_guest(&mut self, now: Duration) -> AddGuestOutcome {
        lifecycle::add_guest(&mut self.world, &self.config, &mut self.rng, now)
    }

    /// Manual checkout of the guest in `room_id`.
    pub fn check_out(&mut self, room_id: u32, now: Duration) -> CheckOutOutcome {
        lifecycle::check_out(&mut self.world, &self.config, room_id, now)
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::MainMenu => return,
        };
        log::debug!("state -> {:?}", self.state);
    }

    fn handle_click(&mut self, p: Point, now: Duration) -> StepOutcome {
        match self.state {
            GameState::MainMenu => {
                let action = self.ui.main_menu.button_at(p).map(|b| b.action);
                if let Some(action) = action {
                    return self.perform(action, now);
                }
            }
            GameState::Playing => self.handle_playing_click(p, now),
            // Only Escape leaves the pause overlay.
            GameState::Paused => {}
        }
        StepOutcome::Continue
    }

    fn handle_playing_click(&mut self, p: Point, now: Duration) {
        let action = self.ui.menu.button_at(p).map(|b| b.action);
        if let Some(action) = action {
            self.perform(action, now);
            return;
        }

        let hit = self
            .world
            .rooms
            .iter()
            .find(|r| r.bounds.to_pixels().contains(p))
            .map(|r| (r.id, r.occupied));
        match hit {
            Some((room_id, true)) => {
                self.check_out(room_id, now);
            }
            Some((_, false)) => {
                self.add_guest(now);
            }
            None => {}
        }
    }

    fn perform(&mut self, action: Action, now: Duration) -> StepOutcome {
        match action {
            Action::NewGame => self.start_new_game(),
            Action::Exit => {
                log::info!("Exit requested");
                return StepOutcome::Exit;
            }
            Action::NewRoom => {
                self.add_room();
            }
            Action::ReceiveGuest => {
                self.add_guest(now);
            }
            Action::MainMenu => {
                self.state = GameState::MainMenu;
                log::debug!("state -> MainMenu");
            }
            Action::LoadGame | Action::Save => {
                log::info!("{:?}: saving and loading are not available", action);
            }
            Action::Settings | Action::Cleaning | Action::Services | Action::Finances => {
                log::debug!("{:?} has no effect yet", action);
            }
        }
        StepOutcome::Continue
    }

    fn start_new_game(&mut self) {
        self.world = World::new(&self.config);
        self.day_clock = Duration::ZERO;
        self.state = GameState::Playing;
        log::info!(
            "New game: {} with ${}",
            self.world.data.hotel_name,
            self.world.data.money
        );
    }

    fn tick_day_clock(&mut self, delta: Duration) {
        let day = Duration::from_secs(self.config.seconds_per_day.max(1));
        self.day_clock += delta;
        while self.day_clock >= day {
            self.day_clock -= day;
            lifecycle::advance_day(&mut self.world, &self.config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DailyExpenses;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn playing_game() -> Game {
        playing_game_with(GameConfig::default())
    }

    fn playing_game_with(config: GameConfig) -> Game {
        let mut game = Game::with_seed(config, 1).unwrap();
        game.step(&FrameInput::click_at(Duration::ZERO, 640.0, 325.0));
        game.step(&FrameInput::idle(Duration::ZERO));
        assert_eq!(game.state(), GameState::Playing);
        game
    }

    /// Press and release the left button at `(x, y)`.
    fn click(game: &mut Game, now: Duration, x: f32, y: f32) -> StepOutcome {
        let outcome = game.step(&FrameInput::click_at(now, x, y));
        game.step(&FrameInput::idle(now));
        outcome
    }

    #[test]
    fn test_starts_on_main_menu() {
        let game = Game::with_seed(GameConfig::default(), 1).unwrap();
        assert_eq!(game.state(), GameState::MainMenu);
    }

    #[test]
    fn test_escape_toggles_pause_only_while_playing() {
        let mut menu = Game::with_seed(GameConfig::default(), 1).unwrap();
        menu.step(&FrameInput::escape(secs(0)));
        assert_eq!(menu.state(), GameState::MainMenu);

        let mut game = playing_game();
        let money = game.world().data.money;
        game.step(&FrameInput::escape(secs(1)));
        assert_eq!(game.state(), GameState::Paused);
        // Held key does not toggle again.
        game.step(&FrameInput::escape(secs(1)));
        assert_eq!(game.state(), GameState::Paused);
        game.step(&FrameInput::idle(secs(1)));
        game.step(&FrameInput::escape(secs(2)));
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.world().data.money, money);
        assert_eq!(game.world().rooms.len(), 3);
    }

    #[test]
    fn test_held_click_on_new_room_fires_once() {
        let mut game = playing_game();
        for _ in 0..10 {
            game.step(&FrameInput::click_at(secs(1), 1100.0, 300.0));
        }
        assert_eq!(game.world().rooms.len(), 4);
        assert_eq!(game.world().data.money, 9_000);
    }

    #[test]
    fn test_clicks_ignored_while_paused() {
        let mut game = playing_game();
        game.step(&FrameInput::escape(secs(0)));
        game.step(&FrameInput::idle(secs(0)));
        click(&mut game, secs(0), 1100.0, 300.0);
        click(&mut game, secs(0), 100.0, 100.0);
        assert_eq!(game.world().rooms.len(), 3);
        assert!(game.world().guests.is_empty());
    }

    #[test]
    fn test_room_click_checks_in_then_out() {
        let mut game = playing_game();
        // Room 2 spans x 256..384, y 64..160; a free room admits into the first free room.
        click(&mut game, secs(0), 300.0, 100.0);
        assert_eq!(game.world().guests.len(), 1);
        assert_eq!(game.world().guests[0].room_id, 1);

        let money = game.world().data.money;
        click(&mut game, secs(25), 100.0, 100.0);
        assert!(game.world().guests.is_empty());
        assert_eq!(game.world().data.money, money + 100);
    }

    #[test]
    fn test_main_menu_button_returns_and_new_game_resets() {
        let mut game = playing_game();
        click(&mut game, secs(0), 1100.0, 300.0);
        assert_eq!(game.world().rooms.len(), 4);
        click(&mut game, secs(0), 1100.0, 585.0);
        assert_eq!(game.state(), GameState::MainMenu);
        click(&mut game, secs(0), 640.0, 325.0);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.world().rooms.len(), 3);
        assert_eq!(game.world().data.money, 10_000);
    }

    #[test]
    fn test_exit_button() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        assert_eq!(click(&mut game, secs(0), 640.0, 535.0), StepOutcome::Exit);
    }

    #[test]
    fn test_placeholder_buttons_do_nothing() {
        let mut game = Game::with_seed(GameConfig::default(), 1).unwrap();
        click(&mut game, secs(0), 640.0, 395.0);
        click(&mut game, secs(0), 640.0, 465.0);
        assert_eq!(game.state(), GameState::MainMenu);

        let mut game = playing_game();
        // Save (y 530..560) and disabled Finances (y 450..480).
        click(&mut game, secs(0), 1100.0, 545.0);
        click(&mut game, secs(0), 1100.0, 465.0);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.world().data.money, 10_000);
    }

    #[test]
    fn test_guests_age_only_while_playing() {
        let mut game = playing_game();
        game.add_guest(secs(0));
        let stay = game.world().guests[0].stay_secs;

        game.step(&FrameInput::escape(secs(1)));
        game.step(&FrameInput::idle(secs(stay + 1)));
        assert_eq!(game.world().guests.len(), 1, "paused game must not age guests");

        game.step(&FrameInput::escape(secs(stay + 2)));
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.world().guests.is_empty());
        assert!(!game.world().rooms[0].occupied);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = GameConfig {
            min_satisfaction: 99,
            max_satisfaction: 75,
            ..Default::default()
        };
        match Game::with_seed(config, 1) {
            Err(ConfigError::Invalid(issues)) => assert_eq!(issues.len(), 1),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("inverted satisfaction range accepted"),
        }
    }

    #[test]
    fn test_idle_play_keeps_money_by_default() {
        let mut game = playing_game();
        for t in 1..=60 {
            game.step(&FrameInput::idle(secs(t)));
        }
        assert_eq!(game.world().data.day, 7);
        assert_eq!(game.world().data.money, 10_000);
    }

    #[test]
    fn test_day_advances_with_playing_time() {
        let mut game = playing_game_with(GameConfig {
            daily_expenses: DailyExpenses::classic(),
            ..Default::default()
        });
        for t in 1..=25 {
            game.step(&FrameInput::idle(secs(t)));
        }
        assert_eq!(game.world().data.day, 3);
        assert_eq!(game.world().data.money, 10_000 - 2 * 225);
    }

    #[test]
    fn test_day_clock_stops_while_paused() {
        let mut game = playing_game();
        game.step(&FrameInput::escape(secs(0)));
        for t in 1..=50 {
            game.step(&FrameInput::idle(secs(t)));
        }
        assert_eq!(game.world().data.day, 1);
    }
}
