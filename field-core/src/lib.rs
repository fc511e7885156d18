//! Core 2-D particle field simulation library.
//!
//! Main components:
//! - [`particle`] — particles and the particle set spawned for a viewport.
//! - [`phases`] — per-frame forces, integration and toroidal wrapping.
//! - [`links`] — proximity lines between nearby particles.
//! - [`surface`] — the abstract 2-D drawing target.
//! - [`field`] — the [`field::ParticleField`] object tying it all together.
//! - [`config`] — tunable constants of the simulation.
//! - [`error`] — error type returned by the library.
//! - [`types`] — shared small value types.

pub mod config;
pub mod error;
pub mod field;
pub mod links;
pub mod particle;
pub mod phases;
pub mod surface;
pub mod types;
