//! flakefall simulation runner
//!
//! Loads a simulation config from JSON (or a built-in preset) and drives it
//! headless with a simulated 60 Hz refresh clock, logging statistics once
//! per simulated second.
//!
//! Usage: `flakefall-runner <config.json | preset> [frames]`
//!
//! Set `RUST_LOG=debug` for per-reset output.

use flakefall::prelude::*;
use std::env;
use std::process::ExitCode;

const REFRESH_HZ: f64 = 60.0;

/// Aggregate numbers over one reporting window.
#[derive(Default)]
struct WindowStats {
    frames: u32,
    respawned: usize,
    non_finite: usize,
}

fn load_config(arg: Option<&str>) -> SimConfig {
    let Some(arg) = arg else {
        log::warn!("no config given, using defaults");
        return SimConfig::default();
    };

    if SimConfig::preset_names().iter().any(|name| *name == arg) {
        return SimConfig::preset(arg).unwrap_or_default();
    }

    match SimConfig::load(arg) {
        Ok(config) => config,
        Err(e) => {
            log::error!("failed to load config from {:?}: {}", arg, e);
            log::warn!("using default configuration");
            SimConfig::default()
        }
    }
}

fn report(second: u64, sim: &Simulation, env: &EnvironmentParams, window: &WindowStats) {
    let n = sim.len().max(1) as f32;
    let mean_brightness: f32 = sim.render_attributes(env).map(|a| a.brightness).sum::<f32>() / n;
    let mean_altitude: f32 = sim.flakes().iter().map(|f| f.position.y).sum::<f32>() / n;
    let mean_speed: f32 = sim.flakes().iter().map(|f| f.velocity.length()).sum::<f32>() / n;

    log::info!(
        "t={:>3}s frames={} respawned={} non_finite={} altitude={:.2}m speed={:.2}m/s brightness={:.3}",
        second,
        window.frames,
        window.respawned,
        window.non_finite,
        mean_altitude,
        mean_speed,
        mean_brightness,
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = load_config(args.get(1).map(String::as_str));
    let frames: u64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10 * REFRESH_HZ as u64);

    if let Err(e) = config.validate() {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    match serde_json::to_string(&config.environment) {
        Ok(json) => log::debug!("environment: {}", json),
        Err(e) => log::debug!("environment not serializable: {}", e),
    }
    log::info!(
        "running '{}' with {} flakes for {} frames",
        config.name,
        config.init.num_flakes,
        frames
    );

    let mut sim = Simulation::from_config(&config);
    let mut clock = FrameClock::new();
    clock.start(0.0);

    let mut window = WindowStats::default();
    for frame in 1..=frames {
        let now = frame as f64 / REFRESH_HZ;
        if let Some(dt) = clock.tick(now) {
            let stats = sim.advance(dt, &config.init, &config.environment);
            window.frames += 1;
            window.respawned += stats.respawned;
            window.non_finite = stats.non_finite;
        }

        if frame % REFRESH_HZ as u64 == 0 {
            report(frame / REFRESH_HZ as u64, &sim, &config.environment, &window);
            window = WindowStats::default();
        }
    }

    log::info!("done after {} frames ({:.1} fps host rate)", clock.frame(), clock.fps());
    ExitCode::SUCCESS
}
