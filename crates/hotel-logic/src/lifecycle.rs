//! Room and guest lifecycle: purchase, check-in, checkout, aging, day rollover.
//!
//! Every operation leaves the world consistent: a room is occupied iff one
//! guest references it, `guest_count` equals the live guest list and
//! `max_guests` grows by one per purchased room. Rejections are returned as
//! outcome variants; the player never sees an error.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{guests, rooms};
use crate::economy;
use crate::geometry::TileRect;
use crate::world::{Guest, Room, RoomKind, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRoomOutcome {
    Built { room_id: u32 },
    InsufficientFunds { money: i64, cost: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddGuestOutcome {
    CheckedIn { guest_id: u32, room_id: u32 },
    AtCapacity,
    NoFreeRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutOutcome {
    CheckedOut {
        guest_id: u32,
        room_id: u32,
        credited: i64,
    },
    RoomVacant,
    UnknownRoom,
}

/// A guest whose stay ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub guest_id: u32,
    pub room_id: u32,
    pub name: String,
}

/// Result of one abstract day passing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReport {
    pub day: u32,
    /// Expenses actually paid (0 when unaffordable).
    pub expenses_paid: i64,
    pub reputation: f32,
}

/// Tile position of the `n`-th room when purchased rooms tile the lower map.
pub fn purchased_room_bounds(n: usize) -> TileRect {
    let col = (n % rooms::GRID_COLUMNS) as i32;
    let row = (n / rooms::GRID_COLUMNS) as i32;
    TileRect::new(
        rooms::GRID_ORIGIN_X + col * rooms::GRID_STEP_X,
        rooms::GRID_ORIGIN_Y + row * rooms::GRID_STEP_Y,
        rooms::WIDTH_TILES,
        rooms::HEIGHT_TILES,
    )
}

/// Buy a single room. Debits the room cost and raises capacity by one.
pub fn add_room(world: &mut World, config: &GameConfig) -> AddRoomOutcome {
    if !world.data.spend(config.room_cost) {
        log::debug!(
            "room purchase refused: money {} < cost {}",
            world.data.money,
            config.room_cost
        );
        return AddRoomOutcome::InsufficientFunds {
            money: world.data.money,
            cost: config.room_cost,
        };
    }

    let id = world.allocate_room_id();
    let bounds = purchased_room_bounds(world.rooms.len());
    world
        .rooms
        .push(Room::new(id, bounds, RoomKind::Single, config.new_room_price));
    world.data.max_guests += 1;

    log::info!(
        "Room {} built at ({}, {}), money now {}",
        id,
        bounds.x,
        bounds.y,
        world.data.money
    );
    AddRoomOutcome::Built { room_id: id }
}

/// Check a random guest into the first free room, crediting the check-in fee.
pub fn add_guest<R: Rng>(
    world: &mut World,
    config: &GameConfig,
    rng: &mut R,
    now: Duration,
) -> AddGuestOutcome {
    if world.data.guest_count >= world.data.max_guests {
        log::debug!(
            "check-in refused: {}/{} guests",
            world.data.guest_count,
            world.data.max_guests
        );
        return AddGuestOutcome::AtCapacity;
    }

    let Some(room_idx) = world.rooms.iter().position(|r| !r.occupied) else {
        log::debug!("check-in refused: no free room");
        return AddGuestOutcome::NoFreeRoom;
    };

    let id = world.allocate_guest_id();
    let room = &mut world.rooms[room_idx];
    let guest = Guest {
        id,
        name: guests::NAMES[rng.gen_range(0..guests::NAMES.len())].to_string(),
        position: room.bounds.anchor_center(),
        // Inverted ranges collapse to their minimum.
        satisfaction: rng.gen_range(
            config.min_satisfaction..=config.max_satisfaction.max(config.min_satisfaction),
        ),
        stay_secs: rng
            .gen_range(config.min_stay_secs..=config.max_stay_secs.max(config.min_stay_secs)),
        room_id: room.id,
        character_id: rng.gen_range(1..=guests::CHARACTER_SPRITES),
        checked_in_at: now,
    };
    room.occupied = true;
    room.guest_id = Some(id);
    let room_id = room.id;

    log::info!(
        "{} checked into room {} for {}s",
        guest.name,
        room_id,
        guest.stay_secs
    );
    world.guests.push(guest);
    world.data.credit(config.check_in_fee);
    world.data.total_guests += 1;
    refresh_guest_stats(world);

    AddGuestOutcome::CheckedIn {
        guest_id: id,
        room_id,
    }
}

/// Check out the guest in `room_id`, billing every elapsed abstract day.
pub fn check_out(
    world: &mut World,
    config: &GameConfig,
    room_id: u32,
    now: Duration,
) -> CheckOutOutcome {
    let Some(room) = world.room(room_id) else {
        return CheckOutOutcome::UnknownRoom;
    };
    let price = room.price;
    let Some(idx) = world.guests.iter().position(|g| g.room_id == room_id) else {
        return CheckOutOutcome::RoomVacant;
    };

    let guest = world.guests.remove(idx);
    let credited = economy::checkout_credit(price, guest.elapsed_secs(now), config.seconds_per_day);
    world.data.credit(credited);
    free_room(world, room_id);
    refresh_guest_stats(world);

    log::info!(
        "{} checked out of room {}, credited {}",
        guest.name,
        room_id,
        credited
    );
    CheckOutOutcome::CheckedOut {
        guest_id: guest.id,
        room_id,
        credited,
    }
}

/// Remove every guest whose stay has elapsed and free their rooms.
/// Departing guests pay nothing beyond the check-in fee.
pub fn age_guests(world: &mut World, now: Duration) -> Vec<Departure> {
    let (expired, staying): (Vec<Guest>, Vec<Guest>) = std::mem::take(&mut world.guests)
        .into_iter()
        .partition(|g| g.has_expired(now));
    world.guests = staying;

    if expired.is_empty() {
        return Vec::new();
    }

    let departures: Vec<Departure> = expired
        .into_iter()
        .map(|g| {
            free_room(world, g.room_id);
            log::info!("{} left room {}", g.name, g.room_id);
            Departure {
                guest_id: g.id,
                room_id: g.room_id,
                name: g.name,
            }
        })
        .collect();
    refresh_guest_stats(world);
    departures
}

/// Advance the day counter, pay daily expenses if affordable and update reputation.
pub fn advance_day(world: &mut World, config: &GameConfig) -> DayReport {
    world.data.day += 1;

    let expenses = config.daily_expenses.total();
    let expenses_paid = if world.data.spend(expenses) {
        expenses
    } else {
        log::debug!("day {}: expenses {} unaffordable", world.data.day, expenses);
        0
    };

    refresh_guest_stats(world);
    world.data.reputation = economy::next_reputation(
        world.data.reputation,
        world.data.satisfaction,
        &config.services,
    );

    log::info!(
        "Day {} begins: paid {}, reputation {:.1}",
        world.data.day,
        expenses_paid,
        world.data.reputation
    );
    DayReport {
        day: world.data.day,
        expenses_paid,
        reputation: world.data.reputation,
    }
}

fn free_room(world: &mut World, room_id: u32) {
    if let Some(room) = world.room_mut(room_id) {
        room.occupied = false;
        room.guest_id = None;
    }
}

fn refresh_guest_stats(world: &mut World) {
    world.data.guest_count = world.guests.len() as u32;
    world.data.satisfaction = economy::average_satisfaction(&world.guests);
}
