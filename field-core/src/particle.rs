use glam::Vec2;
use rand::Rng;

use crate::{config::Config, types::Viewport};

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Anchor the particle is spring-pulled toward. Never changes.
    pub origin: Vec2,
    pub size: f32,
    pub opacity: f32,
}

impl Particle {
    /// A particle at rest on its own origin.
    pub fn at_rest(pos: Vec2, size: f32, opacity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            origin: pos,
            size,
            opacity,
        }
    }
}

#[derive(Debug, Default)]
pub struct ParticleSet {
    pub points: Vec<Particle>,
}

impl ParticleSet {
    /// Number of particles a viewport of the given width holds.
    pub fn count_for(viewport: Viewport, cfg: &Config) -> usize {
        (viewport.width / cfg.particle_spacing).floor() as usize
    }

    pub fn from_particles(points: Vec<Particle>) -> Self {
        Self { points }
    }

    /// Scatters `floor(width / spacing)` particles uniformly over the viewport.
    ///
    /// Each particle starts on its origin with a small random drift, and a
    /// size and opacity drawn from the configured half-open ranges.
    pub fn spawn_random(viewport: Viewport, cfg: &Config, rng: &mut impl Rng) -> Self {
        let count = Self::count_for(viewport, cfg);
        let half_speed = cfg.initial_speed * 0.5;

        let points = (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    rng.random_range(0.0..viewport.width),
                    rng.random_range(0.0..viewport.height),
                );
                let vel = if half_speed > 0.0 {
                    Vec2::new(
                        rng.random_range(-half_speed..half_speed),
                        rng.random_range(-half_speed..half_speed),
                    )
                } else {
                    Vec2::ZERO
                };
                Particle {
                    pos,
                    vel,
                    origin: pos,
                    size: rng.random_range(cfg.size_range[0]..cfg.size_range[1]),
                    opacity: rng.random_range(cfg.opacity_range[0]..cfg.opacity_range[1]),
                }
            })
            .collect();

        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
