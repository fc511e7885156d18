//! Application entry point for the particle field viewer.
//!
//! This binary sets up logging and eframe/egui, loads an optional TOML
//! config named by the first command-line argument, and delegates all
//! interactive logic and rendering to [`Viewer`].

mod surface;
mod viewer;

use field_core::{config::Config, field::ParticleField};
use viewer::Viewer;

/// Starts the native eframe application.
///
/// A config file that cannot be read or does not validate is logged and
/// replaced by [`Config::default`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the field cannot be created, or eframe fails to create the
///   native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args_os().nth(1) {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            log::error!("{e}; falling back to the default config");
            Config::default()
        }),
        None => Config::default(),
    };

    let field = ParticleField::new(cfg).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(field)))),
    )
}
