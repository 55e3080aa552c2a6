//! Hotel Manager Viewer - Bevy window hosting the game loop
//!
//! Each frame samples mouse and keyboard into a `FrameInput`, steps the
//! game, then repaints the draw commands as throwaway entities.

mod sprites;

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::sprite::Anchor;
use bevy::window::PrimaryWindow;
use hotel_logic::config::GameConfig;
use hotel_logic::constants::screen;
use hotel_logic::game::{Game, StepOutcome};
use hotel_logic::geometry::Point;
use hotel_logic::input::FrameInput;
use hotel_logic::render::{self, DrawCommand, TextAlign};

use sprites::{load_sprite_sheets, SpriteSheets};

const CONFIG_PATH: &str = "hotel_config.json";

// Painter's order spacing along z.
const Z_STEP: f32 = 0.01;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: screen::TITLE.to_string(),
                resolution: (screen::WIDTH, screen::HEIGHT).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<ShapeCache>()
        .add_systems(Startup, (setup, load_sprite_sheets))
        .add_systems(Update, (step_game, draw_frame).chain())
        .run();
}

#[derive(Resource)]
struct GameWrapper(Game);

/// Shared unit-circle mesh and one material per colour.
#[derive(Resource, Default)]
struct ShapeCache {
    circle: Option<Handle<Mesh>>,
    materials: HashMap<render::Color, Handle<ColorMaterial>>,
}

// Marker for entities that live for a single frame.
#[derive(Component)]
struct FrameItem;

fn load_config() -> GameConfig {
    if !Path::new(CONFIG_PATH).exists() {
        info!("No {} found, using default balance", CONFIG_PATH);
        return GameConfig::default();
    }
    match GameConfig::load(CONFIG_PATH) {
        Ok(config) => {
            info!("Loaded {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("{}; using default balance", e);
            GameConfig::default()
        }
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut shapes: ResMut<ShapeCache>,
    mut exit: EventWriter<AppExit>,
) {
    // Fixed logical resolution, letterboxed on resize
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: screen::WIDTH,
                height: screen::HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
    ));

    shapes.circle = Some(meshes.add(Circle::new(1.0)));

    let game = match Game::new(load_config()) {
        Ok(game) => game,
        Err(e) => {
            warn!("{}; using default balance", e);
            match Game::new(GameConfig::default()) {
                Ok(game) => game,
                Err(e) => {
                    error!("Default balance rejected: {}", e);
                    exit.send(AppExit::error());
                    return;
                }
            }
        }
    };
    info!("Opening {}", game.config().hotel_name);
    commands.insert_resource(GameWrapper(game));
}

/// Cursor in game pixels (origin top-left, y down).
fn cursor_in_game(
    window_query: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Point> {
    let window = window_query.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.get_single().ok()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;
    Some(Point::new(
        world.x + screen::WIDTH / 2.0,
        screen::HEIGHT / 2.0 - world.y,
    ))
}

fn step_game(
    time: Res<Time>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    game: Option<ResMut<GameWrapper>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut game) = game else {
        return;
    };
    let input = FrameInput {
        now: time.elapsed(),
        cursor: cursor_in_game(&window_query, &camera_query),
        left_down: mouse.pressed(MouseButton::Left),
        escape_down: keyboard.pressed(KeyCode::Escape),
    };

    if game.0.step(&input) == StepOutcome::Exit {
        info!("Goodbye");
        exit.send(AppExit::Success);
    }
}

fn to_bevy_color(c: render::Color) -> Color {
    Color::srgba_u8(c.r, c.g, c.b, c.a)
}

/// Game pixels to world space.
fn point_to_world(p: Point) -> Vec2 {
    Vec2::new(p.x - screen::WIDTH / 2.0, screen::HEIGHT / 2.0 - p.y)
}

fn draw_frame(
    mut commands: Commands,
    time: Res<Time>,
    game: Option<Res<GameWrapper>>,
    sheets: Res<SpriteSheets>,
    mut shapes: ResMut<ShapeCache>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut clear: ResMut<ClearColor>,
    previous: Query<Entity, With<FrameItem>>,
) {
    let Some(game) = game else {
        return;
    };
    for entity in &previous {
        commands.entity(entity).despawn();
    }

    let frame = render::render(&game.0, time.elapsed(), &*sheets);
    for (i, cmd) in frame.into_iter().enumerate() {
        let z = i as f32 * Z_STEP;
        match cmd {
            DrawCommand::Clear(color) => {
                clear.0 = to_bevy_color(color);
            }
            DrawCommand::FillRect { rect, color } => {
                commands.spawn((
                    Sprite::from_color(to_bevy_color(color), Vec2::new(rect.width, rect.height)),
                    Transform::from_translation(point_to_world(rect.center()).extend(z)),
                    FrameItem,
                ));
            }
            DrawCommand::Image { asset, src, dest } => {
                let Some(image) = sheets.handle(asset) else {
                    continue;
                };
                commands.spawn((
                    Sprite {
                        image: image.clone(),
                        rect: src.map(|s| Rect::new(s.x, s.y, s.x + s.width, s.y + s.height)),
                        custom_size: Some(Vec2::new(dest.width, dest.height)),
                        ..default()
                    },
                    Transform::from_translation(point_to_world(dest.center()).extend(z)),
                    FrameItem,
                ));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                let Some(mesh) = shapes.circle.clone() else {
                    continue;
                };
                let material = shapes
                    .materials
                    .entry(color)
                    .or_insert_with(|| materials.add(ColorMaterial::from(to_bevy_color(color))))
                    .clone();
                commands.spawn((
                    Mesh2d(mesh),
                    MeshMaterial2d(material),
                    Transform::from_translation(point_to_world(center).extend(z))
                        .with_scale(Vec3::new(radius, radius, 1.0)),
                    FrameItem,
                ));
            }
            DrawCommand::Text {
                text,
                pos,
                size,
                color,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => Anchor::CenterLeft,
                    TextAlign::Center => Anchor::Center,
                };
                commands.spawn((
                    Text2d::new(text),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(to_bevy_color(color)),
                    anchor,
                    Transform::from_translation(point_to_world(pos).extend(z)),
                    FrameItem,
                ));
            }
        }
    }
}
