//! The particle field: state, lifecycle and per-frame entry points.
//!
//! [`ParticleField`] owns everything the animation needs between frames
//! (the particle set, the last known pointer position and the viewport)
//! and exposes the host-facing operations:
//!
//! - [`ParticleField::init`] / [`ParticleField::resize`] — (re)build the set.
//! - [`ParticleField::step`] — advance one frame.
//! - [`ParticleField::render`] — draw onto a [`Surface`].
//! - [`ParticleField::frame`] — the per-frame callback a host schedules.
//! - [`ParticleField::dispose`] — tear down; later calls do nothing.
//!
//! No host scheduling or timer is involved, so all of it is testable
//! against a [`crate::surface::Recorder`].

use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::Config,
    error::Result,
    links::links,
    particle::{Particle, ParticleSet},
    phases,
    surface::Surface,
    types::{Rgba, Viewport},
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Lifecycle {
    /// No usable surface yet (or the last one was degenerate).
    Unmounted,
    Mounted(Viewport),
    /// Torn down. Terminal.
    Disposed,
}

/// What a call to [`ParticleField::render`] drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub particles: usize,
    pub links: usize,
}

#[derive(Debug)]
pub struct ParticleField {
    cfg: Config,
    particles: ParticleSet,
    pointer: Option<Vec2>,
    state: Lifecycle,
    rng: StdRng,
}

impl ParticleField {
    /// Creates an unmounted field seeded from the thread RNG.
    pub fn new(cfg: Config) -> Result<Self> {
        Self::with_rng(cfg, StdRng::from_rng(&mut rand::rng()))
    }

    /// Creates an unmounted field whose layouts are reproducible.
    pub fn with_seed(cfg: Config, seed: u64) -> Result<Self> {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: Config, rng: StdRng) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            particles: ParticleSet::default(),
            pointer: None,
            state: Lifecycle::Unmounted,
            rng,
        })
    }

    /// Discards the current particles and scatters a fresh set over a
    /// `width × height` surface.
    ///
    /// A degenerate size means there is no surface to draw on: the field
    /// is left empty and unmounted, and [`crate::error::FieldError::SurfaceUnavailable`]
    /// is returned. Does nothing once the field is disposed.
    pub fn init(&mut self, width: f32, height: f32) -> Result<()> {
        if self.is_disposed() {
            log::debug!("init({width}, {height}) ignored on a disposed field");
            return Ok(());
        }

        self.particles.clear();
        let viewport = match Viewport::new(width, height) {
            Ok(v) => v,
            Err(e) => {
                self.state = Lifecycle::Unmounted;
                log::warn!("particle field not mounted: {e}");
                return Err(e);
            }
        };

        self.particles = ParticleSet::spawn_random(viewport, &self.cfg, &mut self.rng);
        self.state = Lifecycle::Mounted(viewport);
        log::debug!(
            "particle field mounted at {width}x{height} with {} particles",
            self.particles.len()
        );
        Ok(())
    }

    /// Re-initializes the field when the surface size changed.
    ///
    /// Old particles are dropped, not rescaled into the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        if let Lifecycle::Mounted(vp) = self.state
            && vp.width == width
            && vp.height == height
        {
            return Ok(());
        }
        self.init(width, height)
    }

    /// Scatters a new layout over the current viewport.
    pub fn reset(&mut self) -> Result<()> {
        match self.state {
            Lifecycle::Mounted(vp) => self.init(vp.width, vp.height),
            _ => Ok(()),
        }
    }

    /// Replaces the configuration.
    ///
    /// Changes to spawn parameters (spacing, initial speed, size and
    /// opacity ranges) only make sense for new particles, so they trigger a
    /// re-initialization. Force and colour changes apply from the next frame.
    pub fn set_config(&mut self, cfg: Config) -> Result<()> {
        cfg.validate()?;
        let respawn = cfg.particle_spacing != self.cfg.particle_spacing
            || cfg.initial_speed != self.cfg.initial_speed
            || cfg.size_range != self.cfg.size_range
            || cfg.opacity_range != self.cfg.opacity_range;
        self.cfg = cfg;
        if respawn {
            self.reset()?;
        }
        Ok(())
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advances every particle by `dt` frames (60 Hz units).
    ///
    /// `pointer`, when given, becomes the last known pointer position before
    /// the step; `None` keeps whatever was last recorded. Non-positive or
    /// non-finite `dt` is treated as "no time passed"; large values are
    /// clamped to [`Config::max_frame_dt`].
    pub fn step(&mut self, dt: f32, pointer: Option<Vec2>) {
        let Lifecycle::Mounted(viewport) = self.state else {
            return;
        };
        if let Some(p) = pointer {
            self.pointer = Some(p);
        }
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let dt = dt.min(self.cfg.max_frame_dt);
        phases::step_all(&mut self.particles, self.pointer, viewport, &self.cfg, dt);
    }

    /// Draws the current state: clear, one circle per particle, then one
    /// line per linked pair.
    ///
    /// An unmounted or disposed field issues no calls at all.
    pub fn render(&self, surface: &mut impl Surface) -> RenderStats {
        if !self.is_mounted() {
            return RenderStats::default();
        }

        surface.clear();
        for p in &self.particles.points {
            surface.fill_circle(p.pos, p.size, Rgba::from_rgb(self.cfg.color, p.opacity));
        }

        let mut n_links = 0;
        for link in links(&self.particles.points, &self.cfg) {
            surface.stroke_line(
                link.from,
                link.to,
                self.cfg.link_width,
                Rgba::from_rgb(self.cfg.color, link.alpha),
            );
            n_links += 1;
        }

        RenderStats {
            particles: self.particles.len(),
            links: n_links,
        }
    }

    /// One host frame: [`step`](Self::step) then [`render`](Self::render).
    ///
    /// Returns `Some(stats)` while the host should keep scheduling frames,
    /// and `None` once there is nothing left to animate (no surface, or
    /// disposed).
    pub fn frame(&mut self, dt: f32, surface: &mut impl Surface) -> Option<RenderStats> {
        if !self.is_mounted() {
            return None;
        }
        self.step(dt, None);
        Some(self.render(surface))
    }

    /// Tears the field down. The particle set and pointer are dropped and
    /// every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.particles.clear();
        self.pointer = None;
        self.state = Lifecycle::Disposed;
        log::debug!("particle field disposed");
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, Lifecycle::Mounted(_))
    }

    pub fn is_disposed(&self) -> bool {
        self.state == Lifecycle::Disposed
    }

    pub fn viewport(&self) -> Option<Viewport> {
        match self.state {
            Lifecycle::Mounted(vp) => Some(vp),
            _ => None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FieldError, surface::Recorder};

    fn mounted(width: f32, height: f32) -> ParticleField {
        let mut field = ParticleField::with_seed(Config::default(), 11).unwrap();
        field.init(width, height).unwrap();
        field
    }

    #[test]
    fn init_spawns_one_particle_per_spacing() {
        let field = mounted(1200.0, 700.0);

        assert!(field.is_mounted());
        assert_eq!(field.particles().len(), 80);
        assert_eq!(field.viewport(), Some(Viewport::new(1200.0, 700.0).unwrap()));
    }

    #[test]
    fn resize_replaces_particles() {
        let mut field = mounted(600.0, 400.0);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.origin).collect();
        assert_eq!(before.len(), 40);

        field.resize(1000.0, 400.0).unwrap();

        assert_eq!(field.particles().len(), 66);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.origin).collect();
        assert_ne!(before[..], after[..40]);
        assert!(field.particles().iter().all(|p| p.pos == p.origin));
    }

    #[test]
    fn resize_to_same_size_keeps_state() {
        let mut field = mounted(600.0, 400.0);
        field.step(1.0, None);
        let before = field.particles().to_vec();

        field.resize(600.0, 400.0).unwrap();

        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn degenerate_surface_renders_nothing() {
        let mut field = ParticleField::with_seed(Config::default(), 1).unwrap();

        let err = field.init(0.0, 500.0).unwrap_err();
        assert!(matches!(err, FieldError::SurfaceUnavailable { .. }));
        assert!(!field.is_mounted());

        let mut surface = Recorder::default();
        field.step(1.0, Some(Vec2::new(10.0, 10.0)));
        assert_eq!(field.render(&mut surface), RenderStats::default());
        assert_eq!(field.frame(1.0, &mut surface), None);
        assert_eq!(surface.calls, 0);
    }

    #[test]
    fn pointer_nearby_pushes_particle_away() {
        let mut field = ParticleField::with_seed(Config::default(), 5).unwrap();
        field.init(300.0, 300.0).unwrap();
        // Park every particle so the only force is the pointer.
        for p in &mut field.particles.points {
            *p = Particle::at_rest(Vec2::new(150.0, 150.0), 1.0, 0.5);
        }

        field.step(1.0, Some(Vec2::new(150.0, 100.0)));

        // Pointer is straight above (smaller y): velocity must point down.
        for p in field.particles() {
            assert!(p.vel.y > 0.0, "vel = {:?}", p.vel);
            assert!(p.vel.x.abs() < 1e-6);
        }
        assert_eq!(field.pointer(), Some(Vec2::new(150.0, 100.0)));
    }

    #[test]
    fn step_keeps_last_pointer_when_none_given() {
        let mut field = mounted(300.0, 300.0);
        field.set_pointer(Vec2::new(1.0, 2.0));

        field.step(1.0, None);

        assert_eq!(field.pointer(), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn zero_or_invalid_dt_does_not_move_particles() {
        let mut field = mounted(450.0, 300.0);
        let before = field.particles().to_vec();

        field.step(0.0, None);
        field.step(-1.0, None);
        field.step(f32::NAN, None);

        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn render_draws_particles_then_links() {
        let mut field = mounted(300.0, 300.0);
        field.particles = ParticleSet::from_particles(vec![
            Particle::at_rest(Vec2::new(10.0, 10.0), 2.0, 0.4),
            Particle::at_rest(Vec2::new(40.0, 50.0), 1.5, 0.6),
            Particle::at_rest(Vec2::new(250.0, 250.0), 1.0, 0.3),
        ]);
        let mut surface = Recorder::default();

        let stats = field.render(&mut surface);

        assert_eq!(stats, RenderStats { particles: 3, links: 1 });
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 3);
        assert_eq!(surface.circles[0].1, 2.0);
        assert_eq!(surface.circles[0].2, Rgba::from_rgb([88, 166, 255], 0.4));

        let (a, b, width, color) = surface.lines[0];
        assert_eq!((a, b), (Vec2::new(10.0, 10.0), Vec2::new(40.0, 50.0)));
        assert_eq!(width, 0.5);
        // Distance 50 -> alpha 0.1 * (1 - 0.5).
        assert!((color.a - 0.05).abs() < 1e-6);
    }

    #[test]
    fn dispose_stops_the_frame_loop() {
        let mut field = mounted(600.0, 400.0);
        let mut surface = Recorder::default();

        for _ in 0..3 {
            assert!(field.frame(1.0, &mut surface).is_some());
        }
        assert_eq!(surface.clears, 3);
        let calls = surface.calls;

        field.dispose();

        assert!(field.frame(1.0, &mut surface).is_none());
        field.step(1.0, Some(Vec2::ZERO));
        assert_eq!(field.render(&mut surface), RenderStats::default());
        field.init(600.0, 400.0).unwrap();
        assert!(field.frame(1.0, &mut surface).is_none());

        assert_eq!(surface.calls, calls);
        assert!(field.particles().is_empty());
        assert_eq!(field.pointer(), None);
    }

    #[test]
    fn set_config_respawns_only_for_spawn_changes() {
        let mut field = mounted(600.0, 400.0);
        let before = field.particles().to_vec();

        let mut cfg = *field.config();
        cfg.damping = 0.95;
        cfg.color = [255, 255, 255];
        field.set_config(cfg).unwrap();
        assert_eq!(field.particles(), &before[..]);

        cfg.particle_spacing = 30.0;
        field.set_config(cfg).unwrap();
        assert_eq!(field.particles().len(), 20);
    }

    #[test]
    fn set_config_rejects_invalid_and_keeps_old() {
        let mut field = mounted(600.0, 400.0);
        let mut cfg = *field.config();
        cfg.link_distance = -5.0;

        assert!(field.set_config(cfg).is_err());
        assert_eq!(field.config().link_distance, 100.0);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = mounted(500.0, 500.0);
        let b = mounted(500.0, 500.0);
        assert_eq!(a.particles(), b.particles());
    }
}
