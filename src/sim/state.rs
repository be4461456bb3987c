//! Runner state and core simulation types
//!
//! All mutable game state lives in [`RunnerState`]. Nothing here knows about
//! rendering or the browser.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::Tuning;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Idle, waiting for the first jump
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Frozen after a crash, waiting for input
    GameOver,
}

impl Lifecycle {
    /// Hint line shown above the canvas
    pub fn prompt(&self) -> &'static str {
        match self {
            Lifecycle::Start => "Press SPACE or TAP to start!",
            Lifecycle::Playing => "Jump over obstacles!",
            Lifecycle::GameOver => "Game Over! Press SPACE or TAP to restart",
        }
    }
}

/// Play field dimensions derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
    /// y coordinate of the ground line
    pub ground_y: f32,
}

impl PlayField {
    /// Fit the field into a viewport.
    ///
    /// Degenerate or non-finite viewports clamp to the minimum field.
    pub fn from_viewport(viewport_width: f32, viewport_height: f32) -> Self {
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        let viewport_width = finite_or_zero(viewport_width);
        let viewport_height = finite_or_zero(viewport_height);

        let width = (viewport_width - VIEWPORT_MARGIN)
            .min(MAX_FIELD_WIDTH)
            .max(MIN_FIELD_WIDTH);
        let height = viewport_height.min(FIELD_HEIGHT).max(MIN_FIELD_HEIGHT);
        Self {
            width,
            height,
            ground_y: height - GROUND_DEPTH,
        }
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::from_viewport(MAX_FIELD_WIDTH + VIEWPORT_MARGIN, FIELD_HEIGHT)
    }
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub vel_y: f32,
    pub is_jumping: bool,
    /// Spin while airborne (radians, visual only)
    pub rotation: f32,
}

impl Player {
    /// A player resting on the ground line
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, ground_y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            is_jumping: false,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Bottom-center point
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// y coordinate of the top edge when standing on `ground_y`
    #[inline]
    pub fn resting_y(&self, ground_y: f32) -> f32 {
        ground_y - self.size.y
    }

    /// Put the player back on the ground, motionless and upright
    pub fn reset_pose(&mut self, ground_y: f32) {
        self.pos.y = self.resting_y(ground_y);
        self.vel_y = 0.0;
        self.is_jumping = false;
        self.rotation = 0.0;
    }

    /// Apply gravity for one tick and resolve contact with the ground.
    ///
    /// Returns true if the player touched down this tick after being airborne.
    pub fn integrate(&mut self, gravity: f32, air_spin: f32, ground_y: f32) -> bool {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        let rest = self.resting_y(ground_y);
        if self.pos.y >= rest {
            let landed = self.is_jumping;
            self.pos.y = rest;
            self.vel_y = 0.0;
            self.is_jumping = false;
            self.rotation = 0.0;
            landed
        } else {
            self.rotation += air_spin;
            false
        }
    }
}

/// Obstacle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Box,
    Spike,
    Tall,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Box, ObstacleKind::Spike, ObstacleKind::Tall];

    /// Fixed (width, height) for this shape
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Box => Vec2::new(40.0, 40.0),
            ObstacleKind::Spike => Vec2::new(30.0, 50.0),
            ObstacleKind::Tall => Vec2::new(35.0, 80.0),
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle just beyond the right edge, standing on the ground
    pub fn spawn(id: u32, kind: ObstacleKind, field: &PlayField) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            pos: Vec2::new(field.width, field.ground_y - size.y),
            size,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Fully past the left edge of the field
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Jump dust
    Emerald,
    Amber,
    Red,
    Pink,
    Violet,
}

impl ParticleColor {
    /// Colors a crash burst picks from
    pub const CRASH: [ParticleColor; 4] = [
        ParticleColor::Amber,
        ParticleColor::Red,
        ParticleColor::Pink,
        ParticleColor::Violet,
    ];
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    /// Ticks at creation (for fading)
    pub max_life: u32,
    pub color: ParticleColor,
}

impl Particle {
    /// Remaining life in 0..=1
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Complete runner state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerState {
    pub lifecycle: Lifecycle,
    pub score: u64,
    pub high_score: u64,
    /// Horizontal scroll per tick
    pub game_speed: f32,
    /// Ticks between obstacle spawns
    pub spawn_interval: u32,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    pub field: PlayField,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Background animation counter, advances every tick in every phase
    pub frame: u64,
    next_id: u32,
}

impl RunnerState {
    pub fn new(field: PlayField, tuning: &Tuning, high_score: u64) -> Self {
        Self {
            lifecycle: Lifecycle::Start,
            score: 0,
            high_score,
            game_speed: tuning.initial_game_speed,
            spawn_interval: tuning.initial_spawn_interval,
            spawn_timer: 0,
            field,
            player: Player::new(field.ground_y),
            obstacles: Vec::new(),
            particles: Vec::new(),
            frame: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear everything a fresh run must not inherit
    pub fn reset_session(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.obstacles.clear();
        self.particles.clear();
        self.game_speed = tuning.initial_game_speed;
        self.spawn_interval = tuning.initial_spawn_interval;
        self.spawn_timer = 0;
        self.player = Player::new(self.field.ground_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field() {
        let field = PlayField::default();
        assert_eq!(field.width, 800.0);
        assert_eq!(field.height, 500.0);
        assert_eq!(field.ground_y, 400.0);
    }

    #[test]
    fn test_field_narrow_viewport() {
        let field = PlayField::from_viewport(640.0, 900.0);
        assert_eq!(field.width, 600.0);
        assert_eq!(field.height, 500.0);
        assert_eq!(field.ground_y, 400.0);
    }

    #[test]
    fn test_field_clamps_degenerate_viewport() {
        for (w, h) in [(0.0, 0.0), (-50.0, -10.0), (f32::NAN, f32::NAN)] {
            let field = PlayField::from_viewport(w, h);
            assert_eq!(field.width, MIN_FIELD_WIDTH);
            assert_eq!(field.height, MIN_FIELD_HEIGHT);
            assert!(field.ground_y >= PLAYER_SIZE);
        }
    }

    #[test]
    fn test_player_rests_on_ground() {
        let player = Player::new(400.0);
        assert_eq!(player.pos, Vec2::new(100.0, 360.0));
        assert_eq!(player.feet(), Vec2::new(120.0, 400.0));
        assert_eq!(player.center(), Vec2::new(120.0, 380.0));
    }

    #[test]
    fn test_player_jump_arc_lands() {
        let mut player = Player::new(400.0);
        player.vel_y = JUMP_STRENGTH;
        player.is_jumping = true;

        let mut landed_after = None;
        for i in 1..200 {
            if player.integrate(GRAVITY, AIR_SPIN, 400.0) {
                landed_after = Some(i);
                break;
            }
            assert!(player.pos.y + player.size.y <= 400.0);
            assert!(player.rotation > 0.0);
        }

        assert!(landed_after.is_some());
        assert_eq!(player.pos.y, 360.0);
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.is_jumping);
        assert_eq!(player.rotation, 0.0);
    }

    #[test]
    fn test_obstacle_shapes() {
        let field = PlayField::default();
        let spike = Obstacle::spawn(1, ObstacleKind::Spike, &field);
        assert_eq!(spike.size, Vec2::new(30.0, 50.0));
        assert_eq!(spike.pos, Vec2::new(800.0, 350.0));

        let tall = Obstacle::spawn(2, ObstacleKind::Tall, &field);
        assert_eq!(tall.pos.y + tall.size.y, field.ground_y);
    }

    #[test]
    fn test_obstacle_off_screen_is_strict() {
        let field = PlayField::default();
        let mut obstacle = Obstacle::spawn(1, ObstacleKind::Box, &field);
        obstacle.pos.x = -40.0;
        assert!(!obstacle.is_off_screen());
        obstacle.pos.x = -40.5;
        assert!(obstacle.is_off_screen());
    }

    #[test]
    fn test_particle_alpha() {
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 15,
            max_life: 60,
            color: ParticleColor::Red,
        };
        assert!((particle.alpha() - 0.25).abs() < 1e-6);
    }
}
