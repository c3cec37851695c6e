// Player entity: movement, tile collision and sprite selection

use glam::{UVec2, Vec2};
use log::{debug, info, trace};

use super::animation::SpriteSheet;
use super::state::{Direction, WalkState};
use super::stats::PlayerStats;
use crate::engine::game_loop::Tick;
use crate::engine::input::{Action, InputManager};
use crate::engine::physics::{clear_distance, touching, CollisionSource, Edge, MapId};
use crate::engine::renderer::{Camera, ImageId, RenderSink, SpriteDraw};

/// Sprite sheet the player is drawn from
pub const PLAYER_IMAGE: ImageId = ImageId("player");

/// Outcome of a single movement tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Standing on solid ground at the start of the tick
    pub grounded: bool,
    /// First grounded tick after being airborne (or after spawning)
    pub landed: bool,
    /// How far the player moved this tick
    pub displacement: Vec2,
}

/// The controllable actor
///
/// Only `update` changes movement state, once per tick.
#[derive(Debug)]
pub struct Player {
    /// Top-left corner of the bounding box
    position: Vec2,
    /// Where the player started
    spawn: Vec2,
    /// Direction the player is facing
    direction: Direction,
    /// Downward speed (pixels/second)
    fall_velocity: f32,
    /// Horizontal speed (pixels/second)
    walk_velocity: f32,
    walk: WalkState,
    /// Level the player is in
    map: MapId,
    image: ImageId,
    stats: PlayerStats,
    sheet: SpriteSheet,
    /// Grounded state of the previous tick
    was_grounded: bool,
}

impl Player {
    /// Create the player at a spawn point
    pub fn spawn(map: MapId, position: Vec2, stats: PlayerStats) -> Self {
        debug!("Spawning player on '{}' at ({}, {})", map, position.x, position.y);

        Self {
            position,
            spawn: position,
            direction: Direction::default(),
            fall_velocity: stats.base_fall_velocity,
            walk_velocity: 0.0,
            walk: WalkState::Idle,
            map,
            image: PLAYER_IMAGE,
            sheet: SpriteSheet::for_stats(&stats),
            stats,
            was_grounded: false,
        }
    }

    /// Advance the player by one tick
    ///
    /// Both axes are resolved against the position at the start of the tick.
    /// Horizontal intent is only read while grounded, so a player who walks off
    /// a ledge keeps drifting in the same direction at reduced speed.
    pub fn update<C>(&mut self, tick: Tick, input: &InputManager, collision: &C) -> TickReport
    where
        C: CollisionSource + ?Sized,
    {
        let dt = tick.delta_ms();
        let start = self.position;
        let (width, height) = (self.stats.width, self.stats.height);

        let grounded = touching(collision, Edge::Bottom, start, width, height);
        if grounded {
            self.apply_intent(input.movement(), tick.now);
        }

        let mut displacement = Vec2::ZERO;

        // Horizontal: only the facing side is probed; a blocked side stops at step 0
        let edge = match self.direction {
            Direction::Left => Edge::Left,
            Direction::Right => Edge::Right,
        };
        let nominal = dt * self.walk_velocity / 1000.0;
        let clear = clear_distance(collision, nominal, edge.sub_pixel_gap(start), |offset| {
            edge.probe(start, width, height, offset)
        });
        let control = if grounded { 1.0 } else { self.stats.air_control };
        displacement.x = match self.direction {
            Direction::Left => -clear * control,
            Direction::Right => clear * control,
        };

        // Vertical
        if grounded {
            self.fall_velocity = self.stats.base_fall_velocity;
        } else {
            self.fall_velocity = (self.fall_velocity + dt * self.stats.fall_acceleration / 1000.0)
                .min(self.stats.max_fall_velocity);

            let nominal = dt * self.fall_velocity / 1000.0;
            let gap = Edge::Bottom.sub_pixel_gap(start);
            displacement.y = clear_distance(collision, nominal, gap, |offset| {
                Edge::Bottom.probe(start, width, height, offset)
            });
        }

        self.position += displacement;

        let landed = grounded && !self.was_grounded;
        if !grounded && self.was_grounded {
            debug!("Player left the ground at ({:.1}, {:.1})", start.x, start.y);
        }
        self.was_grounded = grounded;

        trace!(
            "tick dt={:.2}ms grounded={} pos=({:.2}, {:.2}) fall={:.1} walk={:.1}",
            dt,
            grounded,
            self.position.x,
            self.position.y,
            self.fall_velocity,
            self.walk_velocity
        );

        TickReport {
            grounded,
            landed,
            displacement,
        }
    }

    /// Apply held movement input while standing on the ground
    fn apply_intent(&mut self, movement: Option<Action>, now: f64) {
        match movement {
            None => {
                self.walk_velocity = 0.0;
                if self.walk.stop() {
                    debug!("Player stopped walking");
                }
            }
            Some(action) => {
                self.direction = action.into();
                self.walk_velocity = self.stats.walk_velocity;
                if self.walk.start(now) {
                    debug!("Player started walking {:?}", self.direction);
                }
            }
        }
    }

    /// Queue the current animation frame on a render sink
    pub fn render(&self, sink: &mut dyn RenderSink, camera: &Camera, now: f64) {
        sink.draw_sprite(&SpriteDraw {
            image: self.image,
            source: self.sheet.frame_offset(self.direction, self.walk, now),
            size: UVec2::new(self.stats.width, self.stats.height),
            destination: camera.world_to_screen(self.position),
            scale: self.stats.render_scale,
        });
    }

    /// Put the player back at the spawn point with movement state reset
    pub fn respawn(&mut self) {
        info!("Respawning player at ({}, {})", self.spawn.x, self.spawn.y);
        self.position = self.spawn;
        self.direction = Direction::default();
        self.fall_velocity = self.stats.base_fall_velocity;
        self.walk_velocity = 0.0;
        self.walk = WalkState::Idle;
        self.was_grounded = false;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.stats.width as f32, self.stats.height as f32) / 2.0
    }

    pub fn map(&self) -> &MapId {
        &self.map
    }
}

#[cfg(test)]
impl Player {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn fall_velocity(&self) -> f32 {
        self.fall_velocity
    }

    fn walk_velocity(&self) -> f32 {
        self.walk_velocity
    }

    fn walk(&self) -> WalkState {
        self.walk
    }

    fn is_on_map(&self, map: &MapId) -> bool {
        &self.map == map
    }

    fn stats(&self) -> &PlayerStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{MapRegistry, OpenWorld, PixelRect, Tilemap};
    use crate::engine::renderer::RecordingSink;
    use approx::assert_relative_eq;
    use winit::keyboard::KeyCode;

    /// Endless flat floor whose top surface is at `y`
    struct Floor {
        y: i32,
    }

    impl CollisionSource for Floor {
        fn has_collision_in_rect(&self, rect: PixelRect) -> bool {
            rect.bottom() >= self.y
        }
    }

    fn player_at(x: f32, y: f32, stats: PlayerStats) -> Player {
        Player::spawn(MapId::from("main"), Vec2::new(x, y), stats)
    }

    fn holding(keys: &[KeyCode]) -> InputManager {
        let mut input = InputManager::new();
        for key in keys {
            input.press(*key);
        }
        input
    }

    /// 16px tiles: floor top at y = 32, left wall face at x = 16, right wall face at x = 80
    fn walled_room() -> Tilemap {
        Tilemap::from_rows(16, &["#....#", "#....#", "######"]).unwrap()
    }

    #[test]
    fn test_spawn_defaults() {
        let stats = PlayerStats::default();
        let player = player_at(0.0, -32.0, stats.clone());

        assert_eq!(player.position(), Vec2::new(0.0, -32.0));
        assert_eq!(player.direction(), Direction::Right);
        assert_eq!(player.fall_velocity(), stats.base_fall_velocity);
        assert_eq!(player.walk_velocity(), 0.0);
        assert_eq!(player.walk(), WalkState::Idle);
        assert!(player.is_on_map(&MapId::from("main")));
        assert!(!player.is_on_map(&MapId::from("cave")));
    }

    #[test]
    fn test_grounded_walk_moves_full_distance() {
        let stats = PlayerStats::default().with_walk_velocity(120.0);
        let mut player = player_at(0.0, 68.0, stats);
        let floor = Floor { y: 100 };
        let input = holding(&[KeyCode::KeyD]);

        let report = player.update(Tick::new(0.0, 16.0), &input, &floor);

        assert!(report.grounded);
        assert_relative_eq!(report.displacement.x, 16.0 * 120.0 / 1000.0);
        assert_relative_eq!(player.position().x, 1.92);
        assert_eq!(player.position().y, 68.0);
    }

    #[test]
    fn test_airborne_horizontal_is_halved() {
        let mut player = player_at(0.0, 0.0, PlayerStats::default().with_walk_velocity(120.0));
        player.walk_velocity = 120.0;
        player.direction = Direction::Left;

        let report = player.update(Tick::new(0.0, 100.0), &InputManager::new(), &OpenWorld);

        assert!(!report.grounded);
        assert_relative_eq!(report.displacement.x, -6.0);
    }

    #[test]
    fn test_open_world_without_walk_never_moves_sideways() {
        let mut player = player_at(10.0, 10.0, PlayerStats::default());
        let input = holding(&[KeyCode::KeyD]);

        let report = player.update(Tick::new(0.0, 50.0), &input, &OpenWorld);

        // Input is ignored in the air
        assert_eq!(report.displacement.x, 0.0);
        assert_eq!(player.walk(), WalkState::Idle);
    }

    #[test]
    fn test_stops_flush_against_wall_on_right() {
        // Right edge at 75, wall face at 80
        let stats = PlayerStats::default().with_walk_velocity(200.0);
        let mut player = player_at(43.0, 0.0, stats);
        let map = walled_room();
        let input = holding(&[KeyCode::ArrowRight]);

        // Nominal 20px, only 5px free
        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert!(report.grounded);
        assert_eq!(report.displacement.x, 5.0);
        assert_eq!(player.position().x, 48.0);

        // Blocked from now on
        let report = player.update(Tick::new(100.0, 200.0), &input, &map);
        assert_eq!(report.displacement.x, 0.0);
        assert_eq!(player.position().x, 48.0);
    }

    #[test]
    fn test_stops_flush_against_wall_on_left() {
        // Left edge at 21, wall face at 16
        let stats = PlayerStats::default().with_walk_velocity(200.0);
        let mut player = player_at(21.0, 0.0, stats.with_size(16, 32));
        let map = walled_room();
        let input = holding(&[KeyCode::KeyA]);

        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert_eq!(report.displacement.x, -5.0);
        assert_eq!(player.position().x, 16.0);
        assert_eq!(player.direction(), Direction::Left);
    }

    #[test]
    fn test_never_walks_into_wall_with_uneven_ticks() {
        let mut player = player_at(16.0, 0.0, PlayerStats::default().with_size(8, 32));
        let map = walled_room();
        let input = holding(&[KeyCode::KeyD]);

        let mut now = 0.0;
        for step in 0..200 {
            let dt = [7.0, 16.0, 33.0, 50.0][step % 4];
            player.update(Tick::new(now, now + dt), &input, &map);
            now += dt;
            assert!(player.position().x + 8.0 <= 80.0);
        }
        assert_relative_eq!(player.position().x + 8.0, 80.0);
    }

    #[test]
    fn test_stops_flush_from_sub_pixel_x() {
        // Right edge at 75.4, wall face at 80
        let stats = PlayerStats::default().with_walk_velocity(200.0);
        let mut player = player_at(43.4, 0.0, stats);
        let map = walled_room();
        let input = holding(&[KeyCode::KeyD]);

        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert_relative_eq!(report.displacement.x, 4.6, epsilon = 1e-5);
        assert!(player.position().x + 32.0 <= 80.0);
        assert_relative_eq!(player.position().x, 48.0);

        // Left edge at 21.4, wall face at 16
        let stats = PlayerStats::default().with_walk_velocity(200.0);
        let mut player = player_at(21.4, 0.0, stats.with_size(16, 32));
        let input = holding(&[KeyCode::KeyA]);

        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert_relative_eq!(report.displacement.x, -5.4, epsilon = 1e-5);
        assert!(player.position().x >= 16.0);
        assert_relative_eq!(player.position().x, 16.0);
    }

    #[test]
    fn test_closes_sub_pixel_gap_to_wall() {
        // Right edge at 79.75 rounds onto the wall face at 80
        let mut player = player_at(47.75, 0.0, PlayerStats::default());
        let map = walled_room();
        let input = holding(&[KeyCode::KeyD]);

        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert_eq!(report.displacement.x, 0.25);
        assert_eq!(player.position().x, 48.0);
    }

    #[test]
    fn test_lands_flush_from_sub_pixel_y() {
        // Bottom edge at 90.4, floor top at 96, nominal fall 6px
        let map = Tilemap::from_rows(32, &["...", "...", "...", "###"]).unwrap();
        let stats = PlayerStats::default().with_fall(60.0, 0.0, 480.0);
        let mut player = player_at(32.0, 58.4, stats);
        let input = InputManager::new();

        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert!(!report.grounded);
        assert_relative_eq!(report.displacement.y, 5.6, epsilon = 1e-5);
        assert!(player.position().y + 32.0 <= 96.0);
        assert_relative_eq!(player.position().y, 64.0);

        let report = player.update(Tick::new(100.0, 200.0), &input, &map);
        assert!(report.landed);
    }

    #[test]
    fn test_airborne_stops_against_wall() {
        // 8x8 player in mid-air, right edge at 68, wall face at 80
        let mut player = player_at(60.0, 0.0, PlayerStats::default().with_size(8, 8));
        player.walk_velocity = 200.0;
        let map = walled_room();
        let input = InputManager::new();

        // Nominal 20px, 12px clear, halved in the air
        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert!(!report.grounded);
        assert_eq!(report.displacement.x, 6.0);

        // Touching the wall: no sideways movement at all
        let mut player = player_at(72.0, 0.0, PlayerStats::default().with_size(8, 8));
        player.walk_velocity = 200.0;
        let report = player.update(Tick::new(0.0, 100.0), &input, &map);
        assert!(!report.grounded);
        assert_eq!(report.displacement.x, 0.0);
        assert_eq!(player.position().x, 72.0);
    }

    #[test]
    fn test_fall_checked_from_pre_tick_position() {
        // Ledge tile spans x 64..80, y 32..48
        let map = Tilemap::from_rows(16, &["......", "......", "....#."]).unwrap();
        let stats = PlayerStats::default()
            .with_size(16, 16)
            .with_fall(60.0, 600.0, 480.0);
        let mut player = player_at(47.0, 10.0, stats);
        player.walk_velocity = 200.0;

        let report = player.update(Tick::new(0.0, 100.0), &InputManager::new(), &map);

        // Moved 10px right, over the ledge
        assert_eq!(report.displacement.x, 10.0);
        assert_eq!(player.position().x, 57.0);
        // The fall is checked below x = 47, which misses the ledge, so the full
        // 12px are taken instead of the 6px allowed below x = 57
        assert_eq!(report.displacement.y, 12.0);
        assert!(touching(&map, Edge::Bottom, player.position(), 16, 16));
    }

    #[test]
    fn test_fall_scenario() {
        let stats = PlayerStats::default().with_fall(60.0, 50.0, 300.0);
        let mut player = player_at(100.0, 100.0, stats);

        let report = player.update(Tick::new(0.0, 1000.0), &InputManager::new(), &OpenWorld);

        assert!(!report.grounded);
        assert_relative_eq!(player.fall_velocity(), 110.0);
        assert_relative_eq!(report.displacement.y, 110.0);
        assert_relative_eq!(player.position().y, 210.0);
    }

    #[test]
    fn test_fall_velocity_capped() {
        let stats = PlayerStats::default().with_fall(60.0, 600.0, 480.0);
        let mut player = player_at(0.0, 0.0, stats);
        let input = InputManager::new();

        let mut previous = player.fall_velocity();
        for i in 0..60 {
            let now = i as f64 * 50.0;
            player.update(Tick::new(now, now + 50.0), &input, &OpenWorld);
            assert!(player.fall_velocity() <= 480.0);
            assert!(player.fall_velocity() >= previous);
            previous = player.fall_velocity();
        }
        assert_eq!(player.fall_velocity(), 480.0);
    }

    #[test]
    fn test_lands_on_floor_and_resets_fall_velocity() {
        // 32px tiles, floor top at y = 96
        let map = Tilemap::from_rows(32, &["...", "...", "...", "###"]).unwrap();
        let mut player = player_at(32.0, 0.0, PlayerStats::default().with_fall(60.0, 600.0, 480.0));
        let input = InputManager::new();

        let mut now = 0.0;
        let mut landing = None;
        for _ in 0..50 {
            let report = player.update(Tick::new(now, now + 100.0), &input, &map);
            now += 100.0;
            if report.grounded {
                landing = Some(report);
                break;
            }
            assert!(player.position().y + 32.0 <= 96.0);
            assert!(player.fall_velocity() > 60.0);
        }

        let report = landing.expect("player should land");
        assert!(report.landed);
        assert_eq!(report.displacement.y, 0.0);
        assert_relative_eq!(player.position().y, 64.0);
        assert_eq!(player.fall_velocity(), 60.0);

        // Stays put and does not report landing again
        let report = player.update(Tick::new(now, now + 100.0), &input, &map);
        assert!(report.grounded);
        assert!(!report.landed);
        assert_relative_eq!(player.position().y, 64.0);
    }

    #[test]
    fn test_walk_starts_once_and_keeps_start_time() {
        let mut player = player_at(0.0, 68.0, PlayerStats::default());
        let floor = Floor { y: 100 };
        let input = holding(&[KeyCode::KeyD]);

        player.update(Tick::new(0.0, 16.0), &input, &floor);
        assert_eq!(player.walk(), WalkState::Walking { since: 16.0 });

        player.update(Tick::new(16.0, 32.0), &input, &floor);
        player.update(Tick::new(32.0, 48.0), &input, &floor);
        assert_eq!(player.walk(), WalkState::Walking { since: 16.0 });
        assert_eq!(player.walk_velocity(), player.stats().walk_velocity);
    }

    #[test]
    fn test_walk_cleared_when_grounded_without_movement_keys() {
        let mut player = player_at(0.0, 68.0, PlayerStats::default());
        let floor = Floor { y: 100 };
        let mut input = holding(&[KeyCode::KeyA]);

        player.update(Tick::new(0.0, 16.0), &input, &floor);
        assert!(player.walk().is_walking());

        input.release(KeyCode::KeyA);
        input.press(KeyCode::Space);
        let report = player.update(Tick::new(16.0, 32.0), &input, &floor);

        assert_eq!(player.walk(), WalkState::Idle);
        assert_eq!(player.walk_velocity(), 0.0);
        assert_eq!(report.displacement.x, 0.0);
        // Facing is kept
        assert_eq!(player.direction(), Direction::Left);
    }

    #[test]
    fn test_walk_kept_while_airborne() {
        let mut player = player_at(0.0, 0.0, PlayerStats::default());
        player.walk = WalkState::Walking { since: 5.0 };
        player.walk_velocity = 120.0;

        player.update(Tick::new(10.0, 26.0), &InputManager::new(), &OpenWorld);

        assert_eq!(player.walk(), WalkState::Walking { since: 5.0 });
        assert_eq!(player.walk_velocity(), 120.0);
    }

    #[test]
    fn test_most_recent_key_decides_direction() {
        let mut player = player_at(0.0, 68.0, PlayerStats::default());
        let floor = Floor { y: 100 };
        let mut input = holding(&[KeyCode::KeyD, KeyCode::ArrowLeft]);

        let report = player.update(Tick::new(0.0, 100.0), &input, &floor);
        assert_eq!(player.direction(), Direction::Left);
        assert!(report.displacement.x < 0.0);

        input.release(KeyCode::ArrowLeft);
        let report = player.update(Tick::new(100.0, 200.0), &input, &floor);
        assert_eq!(player.direction(), Direction::Right);
        assert!(report.displacement.x > 0.0);
        // Still one continuous walk
        assert_eq!(player.walk(), WalkState::Walking { since: 100.0 });
    }

    #[test]
    fn test_unregistered_map_free_falls() {
        let registry = MapRegistry::new();
        let mut player = player_at(0.0, 0.0, PlayerStats::default());

        let source = registry.source_for(player.map());
        let report = player.update(Tick::new(0.0, 100.0), &InputManager::new(), &source);

        assert!(!report.grounded);
        assert!(report.displacement.y > 0.0);
    }

    #[test]
    fn test_registered_map_is_used() {
        let mut registry = MapRegistry::new();
        registry.insert(MapId::from("main"), walled_room()).unwrap();
        let mut player = player_at(20.0, 0.0, PlayerStats::default().with_size(16, 32));

        let source = registry.source_for(player.map());
        let report = player.update(Tick::new(0.0, 100.0), &InputManager::new(), &source);

        assert!(report.grounded);
        assert_eq!(report.displacement, Vec2::ZERO);
    }

    #[test]
    fn test_backwards_tick_does_nothing() {
        let mut player = player_at(0.0, 0.0, PlayerStats::default());
        player.walk_velocity = 120.0;

        let report = player.update(Tick::new(100.0, 50.0), &InputManager::new(), &OpenWorld);

        assert_eq!(report.displacement, Vec2::ZERO);
        assert_eq!(player.fall_velocity(), player.stats().base_fall_velocity);
    }

    #[test]
    fn test_render_idle_frame() {
        let player = player_at(100.0, 50.0, PlayerStats::default());
        let camera = Camera::new(Vec2::new(20.0, 10.0), 640.0, 360.0);
        let mut sink = RecordingSink::default();

        player.render(&mut sink, &camera, 0.0);

        assert_eq!(
            sink.draws,
            vec![SpriteDraw {
                image: PLAYER_IMAGE,
                source: UVec2::new(0, 0),
                size: UVec2::new(32, 32),
                destination: Vec2::new(80.0, 40.0),
                scale: 3,
            }]
        );
    }

    #[test]
    fn test_render_walking_left_frame() {
        let mut player = player_at(0.0, 68.0, PlayerStats::default().with_walk_frame_ms(100.0));
        let floor = Floor { y: 100 };
        let input = holding(&[KeyCode::KeyA]);
        player.update(Tick::new(0.0, 16.0), &input, &floor);

        let mut sink = RecordingSink::default();
        player.render(&mut sink, &Camera::new(Vec2::ZERO, 640.0, 360.0), 16.0 + 230.0);

        assert_eq!(sink.draws[0].source, UVec2::new(64, 160));
    }

    #[test]
    fn test_respawn_resets_movement() {
        let mut player = player_at(5.0, 5.0, PlayerStats::default());
        player.update(Tick::new(0.0, 500.0), &InputManager::new(), &OpenWorld);
        assert_ne!(player.position(), Vec2::new(5.0, 5.0));

        player.respawn();

        assert_eq!(player.position(), Vec2::new(5.0, 5.0));
        assert_eq!(player.fall_velocity(), player.stats().base_fall_velocity);
        assert_eq!(player.walk(), WalkState::Idle);
    }

    #[test]
    fn test_center() {
        let player = player_at(10.0, 20.0, PlayerStats::default());
        assert_eq!(player.center(), Vec2::new(26.0, 36.0));
    }
}
