//! World state: hotel map, rooms, guests and the economic counters.
//!
//! These are plain records. All mutation goes through [`crate::lifecycle`]
//! so the occupancy and capacity invariants hold after every operation.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::constants::{economy, map, rooms};
use crate::geometry::{Point, TileRect};

/// One cell of the hotel floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapTile {
    Floor,
    Wall,
}

/// Fixed 20×15 floor plan, walls on the border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelMap {
    tiles: [[MapTile; map::COLS]; map::ROWS],
}

impl HotelMap {
    pub fn new() -> Self {
        let mut tiles = [[MapTile::Floor; map::COLS]; map::ROWS];
        for (y, row) in tiles.iter_mut().enumerate() {
            for (x, tile) in row.iter_mut().enumerate() {
                if y == 0 || y == map::ROWS - 1 || x == 0 || x == map::COLS - 1 {
                    *tile = MapTile::Wall;
                }
            }
        }
        Self { tiles }
    }

    /// Tile at `(x, y)`, or None off the map.
    pub fn get(&self, x: usize, y: usize) -> Option<MapTile> {
        self.tiles.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Iterate `(x, y, tile)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, MapTile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, tile)| (x, y, *tile))
        })
    }
}

impl Default for HotelMap {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    Single,
    Double,
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKind::Single => write!(f, "single"),
            RoomKind::Double => write!(f, "double"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub bounds: TileRect,
    pub kind: RoomKind,
    pub occupied: bool,
    /// Nightly price.
    pub price: i64,
    pub guest_id: Option<u32>,
}

impl Room {
    pub fn new(id: u32, bounds: TileRect, kind: RoomKind, price: i64) -> Self {
        Self {
            id,
            bounds,
            kind,
            occupied: false,
            price,
            guest_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: u32,
    pub name: String,
    /// Marker position in pixels.
    pub position: Point,
    pub satisfaction: u32,
    /// Whole seconds the guest intends to stay.
    pub stay_secs: u64,
    pub room_id: u32,
    /// Premade sprite number, 1-based.
    pub character_id: u32,
    /// Game clock at check-in.
    pub checked_in_at: Duration,
}

impl Guest {
    /// Whole seconds since check-in.
    pub fn elapsed_secs(&self, now: Duration) -> u64 {
        now.saturating_sub(self.checked_in_at).as_secs()
    }

    pub fn remaining_secs(&self, now: Duration) -> u64 {
        self.stay_secs.saturating_sub(self.elapsed_secs(now))
    }

    pub fn has_expired(&self, now: Duration) -> bool {
        self.elapsed_secs(now) >= self.stay_secs
    }
}

/// Aggregate economic counters shown in the info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub money: i64,
    pub hotel_level: u32,
    pub guest_count: u32,
    pub max_guests: u32,
    /// Mean satisfaction of current guests, 0 when empty.
    pub satisfaction: u32,
    pub day: u32,
    pub hotel_name: String,
    pub reputation: f32,
    pub total_guests: u32,
    pub total_earnings: i64,
}

impl GameData {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            money: config.starting_money,
            hotel_level: 1,
            guest_count: 0,
            max_guests: config.base_max_guests,
            satisfaction: 0,
            day: 1,
            hotel_name: config.hotel_name.clone(),
            reputation: economy::STARTING_REPUTATION,
            total_guests: 0,
            total_earnings: 0,
        }
    }

    /// Add income, tracking lifetime earnings.
    pub fn credit(&mut self, amount: i64) {
        self.money += amount;
        self.total_earnings += amount.max(0);
    }

    /// Spend only if affordable; returns whether the money was taken.
    pub fn spend(&mut self, amount: i64) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }

    /// Goal reached: a top reputation and a large bank balance. Play continues.
    pub fn is_won(&self) -> bool {
        self.reputation >= economy::WIN_REPUTATION && self.money >= economy::WIN_MONEY
    }
}

/// Everything the game mutates.
#[derive(Debug, Clone)]
pub struct World {
    pub map: HotelMap,
    pub rooms: Vec<Room>,
    pub guests: Vec<Guest>,
    pub data: GameData,
    next_room_id: u32,
    next_guest_id: u32,
}

impl World {
    /// Fresh hotel with the three starter rooms.
    pub fn new(config: &GameConfig) -> Self {
        let rooms = vec![
            Room::new(1, starter_bounds(2), RoomKind::Single, rooms::SINGLE_PRICE),
            Room::new(2, starter_bounds(8), RoomKind::Single, rooms::SINGLE_PRICE),
            Room::new(3, starter_bounds(14), RoomKind::Double, rooms::DOUBLE_PRICE),
        ];
        Self {
            map: HotelMap::new(),
            next_room_id: rooms.len() as u32 + 1,
            rooms,
            guests: Vec::new(),
            data: GameData::new(config),
            next_guest_id: 1,
        }
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: u32) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn guest(&self, id: u32) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    pub fn occupied_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.occupied).count()
    }

    /// Rooms bought on top of the starter set.
    pub fn purchased_rooms(&self) -> usize {
        self.rooms.len().saturating_sub(rooms::INITIAL_COUNT)
    }

    pub(crate) fn allocate_room_id(&mut self) -> u32 {
        let id = self.next_room_id;
        self.next_room_id += 1;
        id
    }

    pub(crate) fn allocate_guest_id(&mut self) -> u32 {
        let id = self.next_guest_id;
        self.next_guest_id += 1;
        id
    }
}

fn starter_bounds(x: i32) -> TileRect {
    TileRect::new(x, 2, rooms::WIDTH_TILES, rooms::HEIGHT_TILES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_has_wall_border() {
        let m = HotelMap::new();
        assert_eq!(m.get(0, 0), Some(MapTile::Wall));
        assert_eq!(m.get(19, 7), Some(MapTile::Wall));
        assert_eq!(m.get(5, 14), Some(MapTile::Wall));
        assert_eq!(m.get(1, 1), Some(MapTile::Floor));
        assert_eq!(m.get(20, 0), None);
        let walls = m.iter().filter(|(_, _, t)| *t == MapTile::Wall).count();
        assert_eq!(walls, 2 * 20 + 2 * 13);
    }

    #[test]
    fn test_new_world_starter_rooms() {
        let world = World::new(&GameConfig::default());
        assert_eq!(world.rooms.len(), 3);
        assert_eq!(world.rooms[2].kind, RoomKind::Double);
        assert_eq!(world.rooms[2].price, 80);
        assert_eq!(world.rooms[1].bounds, TileRect::new(8, 2, 4, 3));
        assert!(world.rooms.iter().all(|r| !r.occupied && r.guest_id.is_none()));
        assert_eq!(world.data.money, 10_000);
        assert_eq!(world.data.max_guests, 5);
        assert_eq!(world.data.day, 1);
        assert_eq!(world.purchased_rooms(), 0);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut world = World::new(&GameConfig::default());
        assert_eq!(world.allocate_room_id(), 4);
        assert_eq!(world.allocate_room_id(), 5);
        assert_eq!(world.allocate_guest_id(), 1);
        assert_eq!(world.allocate_guest_id(), 2);
    }

    #[test]
    fn test_guest_timing() {
        let guest = Guest {
            id: 1,
            name: "Anna".into(),
            position: Point::default(),
            satisfaction: 80,
            stay_secs: 30,
            room_id: 1,
            character_id: 1,
            checked_in_at: Duration::from_secs(5),
        };
        assert_eq!(guest.elapsed_secs(Duration::from_millis(34_900)), 29);
        assert_eq!(guest.remaining_secs(Duration::from_secs(20)), 15);
        assert!(!guest.has_expired(Duration::from_millis(34_999)));
        assert!(guest.has_expired(Duration::from_secs(35)));
        // Clock before check-in never underflows.
        assert_eq!(guest.elapsed_secs(Duration::ZERO), 0);
    }

    #[test]
    fn test_spend_only_when_affordable() {
        let mut data = GameData::new(&GameConfig::default());
        assert!(!data.spend(20_000));
        assert_eq!(data.money, 10_000);
        assert!(data.spend(10_000));
        assert_eq!(data.money, 0);
    }

    #[test]
    fn test_credit_tracks_earnings() {
        let mut data = GameData::new(&GameConfig::default());
        data.credit(150);
        data.credit(-20);
        assert_eq!(data.money, 10_130);
        assert_eq!(data.total_earnings, 150);
    }

    #[test]
    fn test_win_needs_reputation_and_money() {
        let mut data = GameData::new(&GameConfig::default());
        assert!(!data.is_won());
        data.money = 100_000;
        assert!(!data.is_won());
        data.reputation = 95.0;
        assert!(data.is_won());
        data.money = 99_999;
        assert!(!data.is_won());
    }
}
