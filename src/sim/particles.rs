//! Particle bursts
//!
//! Particles are cosmetic: they never touch gameplay state, but they draw
//! from the same seeded RNG so replays stay identical.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleColor};
use crate::consts::*;

fn push_capped(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Small puff kicked up from the player's feet on takeoff
pub fn emit_jump_dust<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, feet: Vec2) {
    for _ in 0..JUMP_DUST_COUNT {
        let vx = (rng.random::<f32>() - 0.5) * 4.0;
        let vy = -rng.random::<f32>() * 2.0;
        push_capped(
            particles,
            Particle {
                pos: feet,
                vel: Vec2::new(vx, vy),
                life: JUMP_DUST_LIFE,
                max_life: JUMP_DUST_LIFE,
                color: ParticleColor::Emerald,
            },
        );
    }
}

/// Radial explosion from the player's center on impact
pub fn emit_crash_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, center: Vec2) {
    for _ in 0..CRASH_BURST_COUNT {
        let vx = (rng.random::<f32>() - 0.5) * 10.0;
        // Biased upward so the debris arcs before falling
        let vy = (rng.random::<f32>() - 0.5) * 10.0 - 3.0;
        let color = ParticleColor::CRASH[rng.random_range(0..ParticleColor::CRASH.len())];
        push_capped(
            particles,
            Particle {
                pos: center,
                vel: Vec2::new(vx, vy),
                life: CRASH_BURST_LIFE,
                max_life: CRASH_BURST_LIFE,
                color,
            },
        );
    }
}

/// Advance every particle one tick and drop the expired ones
pub fn update(particles: &mut Vec<Particle>, gravity: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += gravity;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}
