//! Pure game logic for Hotel Manager.
//!
//! This crate contains everything the game does that is independent of any
//! window, renderer or input device. The host engine samples input into a
//! [`input::FrameInput`], calls [`game::Game::step`] once per frame and then
//! paints whatever [`render::render`] returns. A headless harness can drive
//! the exact same entry points with a scripted clock.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Economic tuning, JSON loading and validation |
//! | [`constants`] | Screen, tile, map and price constants |
//! | [`economy`] | Billing, satisfaction, reputation, daily expenses |
//! | [`error`] | Typed configuration errors |
//! | [`game`] | Three-state game loop and click dispatch |
//! | [`geometry`] | Pixel/tile rectangles and hit-testing |
//! | [`input`] | Press-edge detection for mouse and Escape |
//! | [`lifecycle`] | Room purchase, check-in, checkout, guest aging |
//! | [`render`] | Draw-command generation with asset fallbacks |
//! | [`ui`] | Static panel and button layout |
//! | [`world`] | Hotel map, rooms, guests and economic counters |
//!
//! ```
//! use std::time::Duration;
//! use hotel_logic::config::GameConfig;
//! use hotel_logic::game::{Game, GameState};
//! use hotel_logic::input::FrameInput;
//!
//! let mut game = Game::with_seed(GameConfig::default(), 7).unwrap();
//! // Click "New Game" on the main menu.
//! game.step(&FrameInput::click_at(Duration::ZERO, 640.0, 325.0));
//! assert_eq!(game.state(), GameState::Playing);
//! ```

pub mod config;
pub mod constants;
pub mod economy;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod render;
pub mod ui;
pub mod world;
