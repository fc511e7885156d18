use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// Tunable constants of the particle field.
///
/// Defaults reproduce the portfolio background: one particle per 15 px of
/// width, a 150 px pointer repulsion radius and 100 px proximity links in
/// `rgb(88, 166, 255)`.
///
/// Every force constant is expressed per 60 Hz frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixels of viewport width per particle.
    pub particle_spacing: f32,
    /// Span of the initial velocity range, centred on zero.
    pub initial_speed: f32,
    /// Half-open `[min, max)` range of particle radii.
    pub size_range: [f32; 2],
    /// Half-open `[min, max)` range of particle opacities.
    pub opacity_range: [f32; 2],

    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    /// Fraction of the origin offset added to the velocity each frame.
    pub return_force: f32,
    /// Velocity multiplier applied each frame.
    pub damping: f32,

    pub link_distance: f32,
    /// Opacity of a link between two coincident particles.
    pub link_max_alpha: f32,
    pub link_width: f32,

    pub color: [u8; 3],

    /// Upper bound on the frame delta passed to a step, in frames.
    pub max_frame_dt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_spacing: 15.0,
            initial_speed: 0.5,
            size_range: [1.0, 3.0],
            opacity_range: [0.2, 0.7],
            repulsion_radius: 150.0,
            repulsion_strength: 0.02,
            return_force: 0.005,
            damping: 0.99,
            link_distance: 100.0,
            link_max_alpha: 0.1,
            link_width: 0.5,
            color: [88, 166, 255],
            max_frame_dt: 4.0,
        }
    }
}

impl Config {
    /// Parses a TOML document; omitted keys keep their default value.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| FieldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&src)?;
        log::info!("loaded particle field config from {}", path.display());
        Ok(cfg)
    }

    /// Checks that every value keeps the simulation well defined.
    pub fn validate(&self) -> Result<()> {
        positive("particle_spacing", self.particle_spacing)?;
        non_negative("initial_speed", self.initial_speed)?;
        range("size_range", self.size_range)?;
        non_negative("size_range", self.size_range[0])?;
        range("opacity_range", self.opacity_range)?;
        unit("opacity_range", self.opacity_range[0])?;
        unit("opacity_range", self.opacity_range[1])?;
        positive("repulsion_radius", self.repulsion_radius)?;
        non_negative("repulsion_strength", self.repulsion_strength)?;
        non_negative("return_force", self.return_force)?;
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(invalid("damping", "must be in (0, 1]"));
        }
        positive("link_distance", self.link_distance)?;
        unit("link_max_alpha", self.link_max_alpha)?;
        non_negative("link_width", self.link_width)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> FieldError {
    FieldError::InvalidConfig { field, reason }
}

fn positive(field: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and positive"))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}

fn unit(field: &'static str, v: f32) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(field, "must be in [0, 1]"))
    }
}

fn range(field: &'static str, r: [f32; 2]) -> Result<()> {
    if r[0].is_finite() && r[1].is_finite() && r[0] < r[1] {
        Ok(())
    } else {
        Err(invalid(field, "must be a non-empty [min, max) range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("repulsion_radius = 80.0\ncolor = [255, 0, 0]\n").unwrap();

        assert_eq!(cfg.repulsion_radius, 80.0);
        assert_eq!(cfg.color, [255, 0, 0]);
        assert_eq!(cfg.particle_spacing, Config::default().particle_spacing);
        assert_eq!(cfg.link_distance, Config::default().link_distance);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.damping = 1.5;
        assert!(matches!(
            cfg.validate(),
            Err(FieldError::InvalidConfig { field: "damping", .. })
        ));

        let mut cfg = Config::default();
        cfg.particle_spacing = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.size_range = [3.0, 1.0];
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.opacity_range = [0.2, 1.5];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml_str("damping = \"lots\""),
            Err(FieldError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, FieldError::Io { .. }));
    }
}
