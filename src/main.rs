// Tile Runner - movement and tile collision demo

use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::TickClock;
use engine::input::InputManager;
use engine::physics::{MapId, MapRegistry, Tilemap};
use engine::renderer::{Camera, LogSink};
use game::characters::{Player, PlayerStats};

const WINDOW_WIDTH: u32 = 960;
const WINDOW_HEIGHT: u32 = 540;

const TILE_SIZE: u32 = 32;

/// Starting level; the gap in the bottom row drops the player out of the world
const LEVEL: &[&str] = &[
    "##############################",
    "#............................#",
    "#............................#",
    "#..........#####.............#",
    "#............................#",
    "#.....###..........###.......#",
    "#............................#",
    "#######.......################",
];

const SPAWN: Vec2 = Vec2::new(64.0, 32.0);

/// Falling past this depth sends the player back to spawn
const KILL_PLANE_Y: f32 = 2000.0;

fn main() -> Result<()> {
    // Initialize logger, RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Tile Runner...");

    let main_map = MapId::from("main");
    let mut maps = MapRegistry::new();
    maps.insert(main_map.clone(), Tilemap::from_rows(TILE_SIZE, LEVEL)?)?;
    info!("Loaded {} map(s)", maps.count());

    let stats = PlayerStats::default();
    let scale = stats.render_scale as f32;
    let mut player = Player::spawn(main_map, SPAWN, stats);
    let mut input = InputManager::new();
    let mut clock = TickClock::new();
    let mut camera = Camera::new(
        Vec2::ZERO,
        WINDOW_WIDTH as f32 / scale,
        WINDOW_HEIGHT as f32 / scale,
    );
    let mut sink = LogSink::new();
    // Distance fallen since last standing on the ground
    let mut fall_distance = 0.0_f32;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Tile Runner")
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} ticks and {} sprite draws, shutting down...",
                    clock.tick_count(),
                    sink.draw_count()
                );
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                info!("Window resized to {:?}", physical_size);
                camera.resize(
                    physical_size.width as f32 / scale,
                    physical_size.height as f32 / scale,
                );
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Key releases are not delivered while unfocused
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::KeyP) => clock.toggle_pause(),
                        PhysicalKey::Code(KeyCode::KeyR) => player.respawn(),
                        _ => {}
                    }
                }
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let tick = clock.begin_tick();
                let collision = maps.source_for(player.map());
                let report = player.update(tick, &input, &collision);

                if report.landed {
                    debug!("Player landed after falling {:.1}px", fall_distance);
                }
                if report.grounded {
                    fall_distance = 0.0;
                } else {
                    fall_distance += report.displacement.y;
                }

                if player.position().y > KILL_PLANE_Y {
                    player.respawn();
                    fall_distance = 0.0;
                }

                camera.center_on(player.center());
                player.render(&mut sink, &camera, tick.now);
                window.request_redraw();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
