use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::DVec2;
use serde::Serialize;

// Import from the library crate
use hangbadge::{logging, config::WindConfig, controller::InputEvent, BadgeController, PendulumConfig};

/// Headless run of the hanging badge: prints the render parameters frame by frame.
#[derive(Parser, Debug)]
#[command(name = "hangbadge", version, about)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frame rate of the simulated display
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Wind seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable wind and gusts
    #[arg(long)]
    calm: bool,

    /// Hold the badge with the pointer at DX,DY from the pivot before letting go
    #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
    grab: Option<DVec2>,

    /// Frames to hold the grab before release
    #[arg(long, default_value_t = 30)]
    hold: u32,

    /// Scroll by this many px on the first free frame
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    scroll: f64,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct FrameRecord {
    frame: u32,
    time_ms: f64,
    dragging: bool,
    angle: f64,
    angular_velocity: f64,
    rope_length: f64,
    rotation_degrees: f64,
    string_stretch: f64,
    card_tilt_x: f64,
    card_tilt_y: f64,
    shadow_sway: f64,
    shadow_offset: f64,
    shadow_scale: f64,
    shadow_opacity: f64,
}

fn parse_offset(s: &str) -> Result<DVec2, String> {
    let (x, y) = s.split_once(',').ok_or("expected DX,DY")?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(DVec2::new(x, y))
}

fn load_config(args: &Args) -> Result<PendulumConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PendulumConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => PendulumConfig::default(),
    };
    if args.calm {
        config.wind = WindConfig::calm();
    }
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive");

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    tracing::info!(frames = args.frames, fps = args.fps, seed, "simulating hanging badge");
    tracing::info!(config = %serde_json::to_string(&config)?, "effective config");

    // Badge top-centre sits one rope length below a pivot at the origin
    let anchor = DVec2::new(0.0, config.rope_length);
    let frame_ms = 1000.0 / args.fps;
    let mut badge = BadgeController::new(config, 0.0, 0.0, seed);

    if let Some(offset) = args.grab {
        let pointer = badge.pivot(anchor) + offset;
        badge.handle(&InputEvent::DragStart { x: pointer.x, y: pointer.y });
        badge.handle(&InputEvent::DragMove { x: pointer.x, y: pointer.y });
    }
    let release_frame = args.grab.map(|_| args.hold);
    let scroll_frame = release_frame.unwrap_or(0) + 1;

    for frame in 1..=args.frames {
        if Some(frame) == release_frame.map(|f| f + 1) {
            badge.handle(&InputEvent::DragEnd);
        }
        if frame == scroll_frame && args.scroll != 0.0 {
            badge.handle(&InputEvent::Scroll { y: args.scroll });
        }

        let now = frame as f64 * frame_ms;
        let params = badge.frame(now, anchor);
        let state = badge.state();
        let record = FrameRecord {
            frame,
            time_ms: now,
            dragging: state.is_dragging(),
            angle: state.angle,
            angular_velocity: state.angular_velocity,
            rope_length: params.rope_length,
            rotation_degrees: params.rotation_degrees,
            string_stretch: params.string_stretch,
            card_tilt_x: params.card_tilt_x,
            card_tilt_y: params.card_tilt_y,
            shadow_sway: params.shadow_sway,
            shadow_offset: params.shadow_offset,
            shadow_scale: params.shadow_scale,
            shadow_opacity: params.shadow_opacity,
        };

        match args.format {
            Format::Json => println!("{}", serde_json::to_string(&record)?),
            Format::Text => println!(
                "{:>5} {:>9.1}ms {} angle={:+.4} vel={:+.4} rope={:.1} stretch={:.3} tilt=({:+.2},{:+.2}) shadow=({:+.1},{:.1},{:.3},{:.2})",
                record.frame,
                record.time_ms,
                if record.dragging { "D" } else { "S" },
                record.angle,
                record.angular_velocity,
                record.rope_length,
                record.string_stretch,
                record.card_tilt_x,
                record.card_tilt_y,
                record.shadow_sway,
                record.shadow_offset,
                record.shadow_scale,
                record.shadow_opacity,
            ),
        }
    }

    let state = badge.state();
    tracing::info!(angle = state.angle, velocity = state.angular_velocity, "simulation finished");
    Ok(())
}
