//! Draw-command generation.
//!
//! [`render`] is a pure function of the game snapshot: it reads the world and
//! UI layout and returns a flat list of [`DrawCommand`]s in painter's order.
//! Hosts translate the commands into their own primitives. Which assets the
//! host managed to load is a capability passed in as an [`AssetCatalog`];
//! every sprite has a procedural fallback.

use std::collections::HashSet;
use std::time::Duration;

use crate::constants::{map, screen};
use crate::game::{Game, GameState};
use crate::geometry::{PixelRect, Point};
use crate::ui::{Panel, UiLayout};
use crate::world::{GameData, Guest, MapTile, Room, World};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(44, 62, 80);
    pub const WALL: Color = Color::rgb(52, 73, 94);
    pub const FLOOR: Color = Color::rgb(236, 240, 241);
    pub const ROOM_FREE: Color = Color::rgb(46, 204, 113);
    pub const ROOM_OCCUPIED: Color = Color::rgb(231, 76, 60);
    pub const ROOM_BORDER: Color = Color::rgb(44, 62, 80);
    pub const GUEST: Color = Color::rgb(243, 156, 18);
    pub const BUTTON: Color = Color::rgb(52, 152, 219);
    pub const BUTTON_DISABLED: Color = Color::rgb(128, 128, 128);
    pub const PANEL: Color = Color::rgb(52, 73, 94);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const TITLE: Color = Color::rgb(236, 240, 241);
    pub const TIMER: Color = Color::rgb(255, 255, 0);
    pub const MONEY: Color = Color::rgb(46, 204, 113);
    pub const GUESTS: Color = Color::rgb(52, 152, 219);
    pub const SATISFACTION: Color = Color::rgb(243, 156, 18);
    pub const DAY: Color = Color::rgb(155, 89, 182);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 128);
}

/// Images the host may have loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// 32×32 interior tile sheet.
    Interiors,
    /// Premade character sheet, 1-based; the first cell is drawn.
    Character(u32),
    /// 32×32 UI element sheet.
    Ui,
}

/// Which assets are available to draw.
pub trait AssetCatalog {
    fn has(&self, key: AssetKey) -> bool;
}

/// Catalog for hosts without any images; everything uses fallbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn has(&self, _key: AssetKey) -> bool {
        false
    }
}

impl AssetCatalog for HashSet<AssetKey> {
    fn has(&self, key: AssetKey) -> bool {
        self.contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One primitive in painter's order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: PixelRect,
        color: Color,
    },
    /// Blit `src` of an asset (whole image when None) stretched over `dest`.
    Image {
        asset: AssetKey,
        src: Option<PixelRect>,
        dest: PixelRect,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// `pos` is the vertical centre of the line; `align` is horizontal.
    Text {
        text: String,
        pos: Point,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

// Interior sheet cells, each one tile wide.
const SHEET_WALL: f32 = 0.0;
const SHEET_FLOOR: f32 = 32.0;
const SHEET_ROOM_FREE: f32 = 64.0;
const SHEET_ROOM_OCCUPIED: f32 = 96.0;

const BORDER: f32 = 2.0;

/// Build the frame for the current state.
pub fn render(game: &Game, now: Duration, assets: &dyn AssetCatalog) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    match game.state() {
        GameState::MainMenu => draw_main_menu(&mut out, game.ui(), assets),
        GameState::Playing => draw_game(&mut out, game.world(), game.ui(), now, assets),
        GameState::Paused => {
            draw_game(&mut out, game.world(), game.ui(), now, assets);
            draw_pause(&mut out);
        }
    }
    out
}

fn text(
    out: &mut Vec<DrawCommand>,
    s: impl Into<String>,
    pos: Point,
    size: f32,
    color: Color,
    align: TextAlign,
) {
    out.push(DrawCommand::Text {
        text: s.into(),
        pos,
        size,
        color,
        align,
    });
}

/// Interior sheet cell when loaded, flat colour otherwise.
fn interior_tile(
    assets: &dyn AssetCatalog,
    sheet_x: f32,
    dest: PixelRect,
    fallback: Color,
) -> DrawCommand {
    if assets.has(AssetKey::Interiors) {
        let tile = map::TILE_SIZE as f32;
        DrawCommand::Image {
            asset: AssetKey::Interiors,
            src: Some(PixelRect::new(sheet_x, 0.0, tile, tile)),
            dest,
        }
    } else {
        DrawCommand::FillRect {
            rect: dest,
            color: fallback,
        }
    }
}

fn draw_main_menu(out: &mut Vec<DrawCommand>, ui: &UiLayout, assets: &dyn AssetCatalog) {
    out.push(DrawCommand::Clear(palette::BACKGROUND));
    text(
        out,
        ui.main_menu.title,
        Point::new(screen::WIDTH / 2.0, 150.0),
        48.0,
        palette::TITLE,
        TextAlign::Center,
    );
    draw_buttons(out, &ui.main_menu, 18.0, assets);
}

fn draw_game(
    out: &mut Vec<DrawCommand>,
    world: &World,
    ui: &UiLayout,
    now: Duration,
    assets: &dyn AssetCatalog,
) {
    out.push(DrawCommand::Clear(palette::BACKGROUND));
    draw_map(out, world, assets);
    for room in &world.rooms {
        draw_room(out, room, assets);
    }
    for guest in &world.guests {
        draw_guest(out, guest, now, assets);
    }
    draw_info_panel(out, &ui.info, &world.data);
    draw_panel_background(out, &ui.menu);
    draw_buttons(out, &ui.menu, 14.0, assets);
}

fn draw_map(out: &mut Vec<DrawCommand>, world: &World, assets: &dyn AssetCatalog) {
    let tile = map::TILE_SIZE as f32;
    for (x, y, kind) in world.map.iter() {
        let dest = PixelRect::new(x as f32 * tile, y as f32 * tile, tile, tile);
        let cmd = match kind {
            MapTile::Wall => interior_tile(assets, SHEET_WALL, dest, palette::WALL),
            MapTile::Floor => interior_tile(assets, SHEET_FLOOR, dest, palette::FLOOR),
        };
        out.push(cmd);
    }
}

fn draw_room(out: &mut Vec<DrawCommand>, room: &Room, assets: &dyn AssetCatalog) {
    let rect = room.bounds.to_pixels();

    if assets.has(AssetKey::Interiors) {
        let sheet_x = if room.occupied {
            SHEET_ROOM_OCCUPIED
        } else {
            SHEET_ROOM_FREE
        };
        let tile = map::TILE_SIZE as f32;
        for (tx, ty) in room.bounds.tiles() {
            let dest = PixelRect::new(tx as f32 * tile, ty as f32 * tile, tile, tile);
            out.push(interior_tile(assets, sheet_x, dest, palette::ROOM_FREE));
        }
    } else {
        let color = if room.occupied {
            palette::ROOM_OCCUPIED
        } else {
            palette::ROOM_FREE
        };
        out.push(DrawCommand::FillRect { rect, color });
    }

    for edge in [
        PixelRect::new(rect.x, rect.y, rect.width, BORDER),
        PixelRect::new(rect.x, rect.y, BORDER, rect.height),
        PixelRect::new(rect.x + rect.width - BORDER, rect.y, BORDER, rect.height),
        PixelRect::new(rect.x, rect.y + rect.height - BORDER, rect.width, BORDER),
    ] {
        out.push(DrawCommand::FillRect {
            rect: edge,
            color: palette::ROOM_BORDER,
        });
    }

    text(
        out,
        format!("Room {}", room.id),
        rect.center(),
        12.0,
        palette::TEXT,
        TextAlign::Center,
    );
}

fn draw_guest(
    out: &mut Vec<DrawCommand>,
    guest: &Guest,
    now: Duration,
    assets: &dyn AssetCatalog,
) {
    let pos = guest.position;
    let sprite = AssetKey::Character(guest.character_id);
    if assets.has(sprite) {
        out.push(DrawCommand::Image {
            asset: sprite,
            src: Some(PixelRect::new(0.0, 0.0, 32.0, 32.0)),
            dest: PixelRect::new(pos.x - 16.0, pos.y - 16.0, 32.0, 32.0),
        });
    } else {
        out.push(DrawCommand::Circle {
            center: pos,
            radius: 8.0,
            color: palette::GUEST,
        });
    }

    text(
        out,
        guest.name.clone(),
        Point::new(pos.x, pos.y - 25.0),
        12.0,
        palette::TEXT,
        TextAlign::Center,
    );

    let remaining = guest.remaining_secs(now);
    if remaining > 0 {
        text(
            out,
            format!("{}s", remaining),
            Point::new(pos.x, pos.y + 20.0),
            12.0,
            palette::TIMER,
            TextAlign::Center,
        );
    }
}

fn draw_panel_background(out: &mut Vec<DrawCommand>, panel: &Panel) {
    out.push(DrawCommand::FillRect {
        rect: panel.bounds,
        color: palette::PANEL,
    });
}

fn draw_info_panel(out: &mut Vec<DrawCommand>, panel: &Panel, data: &GameData) {
    draw_panel_background(out, panel);
    let x = panel.bounds.x + 10.0;
    let y = panel.bounds.y;
    let lines = [
        (panel.title.to_string(), 20.0, palette::TITLE),
        (format!("Money: ${}", data.money), 50.0, palette::MONEY),
        (
            format!("Guests: {}/{}", data.guest_count, data.max_guests),
            70.0,
            palette::GUESTS,
        ),
        (
            format!("Satisfaction: {}%", data.satisfaction),
            90.0,
            palette::SATISFACTION,
        ),
        (format!("Day: {}", data.day), 110.0, palette::DAY),
        (
            format!("Reputation: {:.0}", data.reputation),
            130.0,
            palette::TITLE,
        ),
        (
            format!("Served: {}  Earned: ${}", data.total_guests, data.total_earnings),
            150.0,
            palette::TITLE,
        ),
    ];
    for (line, dy, color) in lines {
        text(out, line, Point::new(x, y + dy), 14.0, color, TextAlign::Left);
    }
    if data.is_won() {
        text(
            out,
            "Goal reached!",
            Point::new(x, y + 175.0),
            14.0,
            palette::MONEY,
            TextAlign::Left,
        );
    }
}

fn draw_buttons(
    out: &mut Vec<DrawCommand>,
    panel: &Panel,
    size: f32,
    assets: &dyn AssetCatalog,
) {
    for button in &panel.buttons {
        let rect = panel.button_rect(button);
        if button.enabled && assets.has(AssetKey::Ui) {
            out.push(DrawCommand::Image {
                asset: AssetKey::Ui,
                src: Some(PixelRect::new(0.0, 0.0, 32.0, 32.0)),
                dest: rect,
            });
        } else {
            let color = if button.enabled {
                palette::BUTTON
            } else {
                palette::BUTTON_DISABLED
            };
            out.push(DrawCommand::FillRect { rect, color });
        }
        text(
            out,
            button.label,
            rect.center(),
            size,
            palette::TEXT,
            TextAlign::Center,
        );
    }
}

fn draw_pause(out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::FillRect {
        rect: PixelRect::new(0.0, 0.0, screen::WIDTH, screen::HEIGHT),
        color: palette::OVERLAY,
    });
    let cx = screen::WIDTH / 2.0;
    text(
        out,
        "GAME PAUSED",
        Point::new(cx, 300.0),
        32.0,
        palette::TEXT,
        TextAlign::Center,
    );
    text(
        out,
        "ESC - Continue",
        Point::new(cx, 350.0),
        18.0,
        palette::TEXT,
        TextAlign::Center,
    );
}
