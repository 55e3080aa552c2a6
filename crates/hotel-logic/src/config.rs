//! Economic tuning for a game session.
//!
//! Every field has a default equal to the classic balance in
//! [`crate::constants`], so a config file only needs the values it changes:
//!
//! ```
//! use hotel_logic::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "starting_money": 2500 }"#).unwrap();
//! assert_eq!(config.starting_money, 2500);
//! assert_eq!(config.room_cost, 1000);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{economy, guests, rooms};
use crate::error::ConfigError;

/// Player-tunable game balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub hotel_name: String,
    pub starting_money: i64,
    /// Guest capacity before any room is bought.
    pub base_max_guests: u32,
    /// Price of the "New Room" action.
    pub room_cost: i64,
    /// Nightly price of purchased rooms.
    pub new_room_price: i64,
    pub check_in_fee: i64,
    /// Real seconds per abstract day, for billing and the day counter.
    pub seconds_per_day: u64,
    pub min_stay_secs: u64,
    pub max_stay_secs: u64,
    pub min_satisfaction: u32,
    pub max_satisfaction: u32,
    pub daily_expenses: DailyExpenses,
    pub services: Services,
    /// Fixed RNG seed (None = seeded from entropy).
    pub seed: Option<u64>,
}

/// Costs charged at every day rollover. All zero unless configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyExpenses {
    pub utilities: i64,
    pub cleaning: i64,
    pub maintenance: i64,
}

impl DailyExpenses {
    /// Running costs of a staffed hotel: utilities, cleaning and maintenance.
    pub fn classic() -> Self {
        Self {
            utilities: economy::UTILITIES,
            cleaning: economy::CLEANING,
            maintenance: economy::MAINTENANCE,
        }
    }

    pub fn total(&self) -> i64 {
        self.utilities + self.cleaning + self.maintenance
    }
}


/// Hotel amenities; each one adds to the daily reputation bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub cafe: bool,
    pub gym: bool,
    pub wifi: bool,
    pub cleaning: bool,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            cafe: false,
            gym: false,
            wifi: true,
            cleaning: true,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hotel_name: "New Hotel".to_string(),
            starting_money: economy::STARTING_MONEY,
            base_max_guests: economy::BASE_MAX_GUESTS,
            room_cost: economy::ROOM_COST,
            new_room_price: rooms::SINGLE_PRICE,
            check_in_fee: economy::CHECK_IN_FEE,
            seconds_per_day: economy::SECONDS_PER_DAY,
            min_stay_secs: guests::MIN_STAY_SECS,
            max_stay_secs: guests::MAX_STAY_SECS,
            min_satisfaction: guests::MIN_SATISFACTION,
            max_satisfaction: guests::MAX_SATISFACTION,
            daily_expenses: DailyExpenses::default(),
            services: Services::default(),
            seed: None,
        }
    }
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    EmptyHotelName,
    NegativeStartingMoney(i64),
    NonPositiveRoomCost(i64),
    NegativePrice(i64),
    NegativeFee(i64),
    /// A zero-length day would bill infinitely many days.
    ZeroSecondsPerDay,
    StayRangeInverted { min: u64, max: u64 },
    ZeroStay,
    SatisfactionRangeInverted { min: u32, max: u32 },
    SatisfactionOutOfRange(u32),
    NegativeExpense(i64),
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::EmptyHotelName => write!(f, "hotel name is empty"),
            ConfigIssue::NegativeStartingMoney(v) => write!(f, "starting money {} is negative", v),
            ConfigIssue::NonPositiveRoomCost(v) => write!(f, "room cost {} must be positive", v),
            ConfigIssue::NegativePrice(v) => write!(f, "room price {} is negative", v),
            ConfigIssue::NegativeFee(v) => write!(f, "check-in fee {} is negative", v),
            ConfigIssue::ZeroSecondsPerDay => write!(f, "seconds per day must be non-zero"),
            ConfigIssue::StayRangeInverted { min, max } => {
                write!(f, "stay range {}..={} is inverted", min, max)
            }
            ConfigIssue::ZeroStay => write!(f, "minimum stay must be at least one second"),
            ConfigIssue::SatisfactionRangeInverted { min, max } => {
                write!(f, "satisfaction range {}..={} is inverted", min, max)
            }
            ConfigIssue::SatisfactionOutOfRange(v) => {
                write!(f, "satisfaction {} is above 100", v)
            }
            ConfigIssue::NegativeExpense(v) => write!(f, "daily expense {} is negative", v),
        }
    }
}

/// Validate a game configuration, returning all issues found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if config.hotel_name.trim().is_empty() {
        issues.push(ConfigIssue::EmptyHotelName);
    }
    if config.starting_money < 0 {
        issues.push(ConfigIssue::NegativeStartingMoney(config.starting_money));
    }
    if config.room_cost <= 0 {
        issues.push(ConfigIssue::NonPositiveRoomCost(config.room_cost));
    }
    if config.new_room_price < 0 {
        issues.push(ConfigIssue::NegativePrice(config.new_room_price));
    }
    if config.check_in_fee < 0 {
        issues.push(ConfigIssue::NegativeFee(config.check_in_fee));
    }
    if config.seconds_per_day == 0 {
        issues.push(ConfigIssue::ZeroSecondsPerDay);
    }
    if config.min_stay_secs > config.max_stay_secs {
        issues.push(ConfigIssue::StayRangeInverted {
            min: config.min_stay_secs,
            max: config.max_stay_secs,
        });
    }
    if config.min_stay_secs == 0 {
        issues.push(ConfigIssue::ZeroStay);
    }
    if config.min_satisfaction > config.max_satisfaction {
        issues.push(ConfigIssue::SatisfactionRangeInverted {
            min: config.min_satisfaction,
            max: config.max_satisfaction,
        });
    }
    if config.max_satisfaction > 100 {
        issues.push(ConfigIssue::SatisfactionOutOfRange(config.max_satisfaction));
    }
    let expenses = config.daily_expenses;
    for v in [expenses.utilities, expenses.cleaning, expenses.maintenance] {
        if v < 0 {
            issues.push(ConfigIssue::NegativeExpense(v));
        }
    }

    issues
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        let issues = validate_config(&config);
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GameConfig::default()).is_empty());
    }

    #[test]
    fn test_defaults_match_classic_balance() {
        let config = GameConfig::default();
        assert_eq!(config.starting_money, 10_000);
        assert_eq!(config.room_cost, 1_000);
        assert_eq!(config.check_in_fee, 50);
        assert_eq!(config.seconds_per_day, 10);
        assert_eq!(config.daily_expenses.total(), 0);
        assert_eq!(DailyExpenses::classic().total(), 225);
    }

    #[test]
    fn test_expenses_opt_in_from_json() {
        let config = GameConfig::from_json_str(
            r#"{ "daily_expenses": { "utilities": 100, "cleaning": 50, "maintenance": 75 } }"#,
        )
        .unwrap();
        assert_eq!(config.daily_expenses, DailyExpenses::classic());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "hotel_name": "Grand", "services": { "gym": true } }"#)
                .unwrap();
        assert_eq!(config.hotel_name, "Grand");
        assert!(config.services.gym);
        assert!(config.services.wifi);
        assert_eq!(config.base_max_guests, 5);
    }

    #[test]
    fn test_zero_day_rejected() {
        let err = GameConfig::from_json_str(r#"{ "seconds_per_day": 0 }"#).unwrap_err();
        match err {
            ConfigError::Invalid(issues) => {
                assert_eq!(issues, vec![ConfigIssue::ZeroSecondsPerDay]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inverted_ranges_collect_all_issues() {
        let config = GameConfig {
            min_stay_secs: 90,
            max_stay_secs: 30,
            min_satisfaction: 99,
            max_satisfaction: 75,
            ..Default::default()
        };
        let issues = validate_config(&config);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here/hotel_config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("hotel_config.json"));
    }
}
