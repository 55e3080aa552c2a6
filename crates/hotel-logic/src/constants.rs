//! Game constants: screen size, tile grid, prices and guest tuning.
//!
//! Values that a player might want to rebalance are mirrored as defaults in
//! [`crate::config::GameConfig`]; the rest are fixed layout facts.

pub mod screen {
    /// Logical window width in pixels.
    pub const WIDTH: f32 = 1280.0;
    /// Logical window height in pixels.
    pub const HEIGHT: f32 = 720.0;
    pub const TITLE: &str = "Hotel Manager - Business Simulation Game";
}

pub mod map {
    /// Edge length of one map tile in pixels.
    pub const TILE_SIZE: i32 = 32;
    pub const COLS: usize = 20;
    pub const ROWS: usize = 15;
}

pub mod rooms {
    /// Rooms that exist before the player buys any.
    pub const INITIAL_COUNT: usize = 3;
    pub const WIDTH_TILES: i32 = 4;
    pub const HEIGHT_TILES: i32 = 3;
    /// Purchased rooms tile left-to-right in columns of this many.
    pub const GRID_COLUMNS: usize = 3;
    pub const GRID_ORIGIN_X: i32 = 2;
    pub const GRID_ORIGIN_Y: i32 = 6;
    pub const GRID_STEP_X: i32 = 6;
    pub const GRID_STEP_Y: i32 = 4;
    pub const SINGLE_PRICE: i64 = 50;
    pub const DOUBLE_PRICE: i64 = 80;
}

pub mod economy {
    pub const STARTING_MONEY: i64 = 10_000;
    pub const BASE_MAX_GUESTS: u32 = 5;
    pub const ROOM_COST: i64 = 1_000;
    pub const CHECK_IN_FEE: i64 = 50;
    /// Real seconds that make one abstract billing day.
    pub const SECONDS_PER_DAY: u64 = 10;
    /// Classic daily running costs, charged only when configured.
    pub const UTILITIES: i64 = 100;
    pub const CLEANING: i64 = 50;
    pub const MAINTENANCE: i64 = 75;
    pub const STARTING_REPUTATION: f32 = 50.0;
    /// Goal thresholds; both must hold at once.
    pub const WIN_REPUTATION: f32 = 95.0;
    pub const WIN_MONEY: i64 = 100_000;
}

pub mod guests {
    pub const MIN_STAY_SECS: u64 = 30;
    pub const MAX_STAY_SECS: u64 = 89;
    pub const MIN_SATISFACTION: u32 = 75;
    pub const MAX_SATISFACTION: u32 = 99;
    /// Number of premade character sprites.
    pub const CHARACTER_SPRITES: u32 = 20;
    pub const NAMES: [&str; 10] = [
        "John", "Mary", "David", "Sarah", "Michael", "Emma", "James", "Lisa", "Robert", "Anna",
    ];
}

pub mod assets {
    pub const INTERIORS: &str = "1_Interiors/32x32/Interiors_32x32.png";
    pub const UI: &str = "4_User_Interface_Elements/UI_32x32.png";

    /// Relative path of premade character sprite `id` (1-based).
    pub fn character(id: u32) -> String {
        format!(
            "2_Characters/Character_Generator/0_Premade_Characters/32x32/Premade_Character_32x32_{:02}.png",
            id
        )
    }
}
