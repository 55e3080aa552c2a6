//! Pure economy logic: billing, satisfaction and reputation.

use crate::config::Services;
use crate::world::Guest;

/// Abstract days billed for a stay: whole days elapsed, at least one.
pub fn nights_billed(elapsed_secs: u64, seconds_per_day: u64) -> i64 {
    let days = elapsed_secs / seconds_per_day.max(1);
    days.max(1) as i64
}

/// Money credited when a guest checks out manually.
pub fn checkout_credit(price: i64, elapsed_secs: u64, seconds_per_day: u64) -> i64 {
    price * nights_billed(elapsed_secs, seconds_per_day)
}

/// Rounded mean satisfaction of the given guests, 0 when there are none.
pub fn average_satisfaction(guests: &[Guest]) -> u32 {
    if guests.is_empty() {
        return 0;
    }
    let total: u32 = guests.iter().map(|g| g.satisfaction).sum();
    (total as f32 / guests.len() as f32).round() as u32
}

/// Daily reputation bonus from amenities.
pub fn service_bonus(services: &Services) -> f32 {
    let mut bonus = 0.0;
    if services.cafe {
        bonus += 5.0;
    }
    if services.gym {
        bonus += 5.0;
    }
    if services.wifi {
        bonus += 2.0;
    }
    if services.cleaning {
        bonus += 3.0;
    }
    bonus
}

/// Reputation after one day, clamped to 0–100.
/// Satisfaction above 50 raises it, below 50 lowers it.
pub fn next_reputation(reputation: f32, satisfaction: u32, services: &Services) -> f32 {
    let satisfaction_bonus = (satisfaction as f32 - 50.0) * 0.1;
    (reputation + satisfaction_bonus + service_bonus(services)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::time::Duration;

    fn guest(satisfaction: u32) -> Guest {
        Guest {
            id: 1,
            name: "Emma".into(),
            position: Point::default(),
            satisfaction,
            stay_secs: 60,
            room_id: 1,
            character_id: 3,
            checked_in_at: Duration::ZERO,
        }
    }

    #[test]
    fn test_nights_billed_minimum_one() {
        assert_eq!(nights_billed(0, 10), 1);
        assert_eq!(nights_billed(9, 10), 1);
        assert_eq!(nights_billed(10, 10), 1);
        assert_eq!(nights_billed(25, 10), 2);
        assert_eq!(nights_billed(89, 10), 8);
    }

    #[test]
    fn test_checkout_credit_example() {
        assert_eq!(checkout_credit(50, 25, 10), 100);
        assert_eq!(checkout_credit(80, 3, 10), 80);
    }

    #[test]
    fn test_average_satisfaction() {
        assert_eq!(average_satisfaction(&[]), 0);
        assert_eq!(average_satisfaction(&[guest(80)]), 80);
        assert_eq!(average_satisfaction(&[guest(75), guest(76)]), 76);
        assert_eq!(average_satisfaction(&[guest(75), guest(99), guest(90)]), 88);
    }

    #[test]
    fn test_service_bonus_defaults() {
        assert_eq!(service_bonus(&Services::default()), 5.0);
        let all = Services {
            cafe: true,
            gym: true,
            wifi: true,
            cleaning: true,
        };
        assert_eq!(service_bonus(&all), 15.0);
    }

    #[test]
    fn test_reputation_clamped() {
        let services = Services::default();
        assert!((next_reputation(50.0, 90, &services) - 59.0).abs() < 0.001);
        assert_eq!(next_reputation(98.0, 99, &services), 100.0);
        let none = Services {
            cafe: false,
            gym: false,
            wifi: false,
            cleaning: false,
        };
        assert_eq!(next_reputation(2.0, 0, &none), 0.0);
    }
}
