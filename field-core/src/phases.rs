//! Per-frame update phases for the particle field.
//!
//! Every particle goes through the same sequence each frame:
//! 1. [`repulsion_phase`] — push away from the pointer when it is close.
//! 2. [`restoring_phase`] — spring back toward the particle's origin.
//! 3. [`damping_phase`] — bleed off velocity.
//! 4. [`integration_phase`] — move by the velocity.
//! 5. [`wrap_phase`] — re-enter on the opposite edge when leaving the viewport.
//!
//! Particles do not interact, so [`step_all`] runs the full sequence on
//! one particle before moving on to the next.
//!
//! `dt` is measured in 60 Hz frames. With `dt == 1.0` the phases apply the
//! configured constants exactly once.

use glam::Vec2;

use crate::{
    config::Config,
    particle::{Particle, ParticleSet},
    types::Viewport,
};

/// Pushes `p` away from `pointer` when it lies inside the repulsion radius.
///
/// The impulse points from the pointer to the particle and falls off
/// linearly from `repulsion_strength` at the pointer to zero at
/// `repulsion_radius`. A particle sitting exactly under the pointer is
/// pushed toward negative x.
pub fn repulsion_phase(p: &mut Particle, pointer: Vec2, cfg: &Config, dt: f32) {
    let to_pointer = pointer - p.pos;
    let d = to_pointer.length();
    if d >= cfg.repulsion_radius {
        return;
    }

    let force = (cfg.repulsion_radius - d) / cfg.repulsion_radius;
    let axis = to_pointer.try_normalize().unwrap_or(Vec2::X);
    p.vel -= axis * force * cfg.repulsion_strength * dt;
}

/// Adds a fraction of the offset back to the origin to the velocity.
pub fn restoring_phase(p: &mut Particle, cfg: &Config, dt: f32) {
    p.vel += (p.origin - p.pos) * cfg.return_force * dt;
}

pub fn damping_phase(p: &mut Particle, cfg: &Config, dt: f32) {
    p.vel *= cfg.damping.powf(dt);
}

pub fn integration_phase(p: &mut Particle, dt: f32) {
    p.pos += p.vel * dt;
}

/// Folds the position back into `[0, width) × [0, height)`.
pub fn wrap_phase(p: &mut Particle, viewport: Viewport) {
    p.pos.x = wrap_axis(p.pos.x, viewport.width);
    p.pos.y = wrap_axis(p.pos.y, viewport.height);
}

fn wrap_axis(v: f32, extent: f32) -> f32 {
    if (0.0..extent).contains(&v) {
        return v;
    }
    let w = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if w >= extent { 0.0 } else { w }
}

/// Advances a single particle by one frame.
pub fn step_particle(
    p: &mut Particle,
    pointer: Option<Vec2>,
    viewport: Viewport,
    cfg: &Config,
    dt: f32,
) {
    if let Some(pointer) = pointer {
        repulsion_phase(p, pointer, cfg, dt);
    }
    restoring_phase(p, cfg, dt);
    damping_phase(p, cfg, dt);
    integration_phase(p, dt);
    wrap_phase(p, viewport);
}

/// Advances every particle of the set by one frame.
///
/// ### Parameters
/// - `set` - The particles to update in place.
/// - `pointer` - Last known pointer position, or `None` if the pointer has
///   never been seen (no repulsion is applied).
/// - `viewport` - Bounds used for wrapping.
/// - `cfg` - Force constants.
/// - `dt` - Frame delta in 60 Hz frames, already clamped by the caller.
pub fn step_all(
    set: &mut ParticleSet,
    pointer: Option<Vec2>,
    viewport: Viewport,
    cfg: &Config,
    dt: f32,
) {
    for p in &mut set.points {
        step_particle(p, pointer, viewport, cfg, dt);
    }
}
