mod session;

use std::path::{Path, PathBuf};

use anyhow::Context;
use bridgewalk_input::Action;
use bridgewalk_kernel::{GameConfig, World};
use bridgewalk_tools::{DebugOverlay, SimInspector};
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use session::Session;

#[derive(Parser)]
#[command(name = "bridgewalk", about = "Headless driver for the bridgewalk simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file with `sim:` and `layout:` sections; defaults otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the frame loop against the debug backend
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "300")]
        frames: u64,
        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Walk target as `x,y` in world units
        #[arg(short, long, value_parser = parse_pair)]
        target: Option<Vec2>,
        /// Pointer press as `px,py` in viewport pixels, cast to the ground
        #[arg(long, value_parser = parse_pair)]
        click: Option<Vec2>,
        /// Slow the tick rate to 0.5^n of its base, like pressing digit n
        #[arg(long)]
        tick_scale_exp: Option<u8>,
        /// Toggle physics when this frame is reached
        #[arg(long)]
        pause_at: Option<u64>,
        /// Zoom steps applied before the first frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        zoom: i32,
        /// Viewport size as `w,h` in pixels
        #[arg(long, value_parser = parse_pair, default_value = "800,600")]
        viewport: Vec2,
        /// Dump the draw list of the last frame
        #[arg(long)]
        show_draws: bool,
    },
    /// Cast a viewport pixel to the ground using the initial camera
    Cast {
        /// Pixel as `px,py`
        #[arg(value_parser = parse_pair)]
        pixel: Vec2,
        /// Viewport size as `w,h` in pixels
        #[arg(long, value_parser = parse_pair, default_value = "800,600")]
        viewport: Vec2,
        /// Zoom steps applied before casting
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        zoom: i32,
    },
    /// Summarize the world built from the configuration
    Inspect {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("bridgewalk v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", bridgewalk_render::crate_info());
            println!("tools: {}", bridgewalk_tools::crate_info());
            println!(
                "sim: {} ticks/s, step {}, catch-up {} ticks",
                config.sim.base_tick_rate, config.sim.step_distance, config.sim.max_catch_up_ticks
            );
        }
        Commands::Run {
            frames,
            fps,
            target,
            click,
            tick_scale_exp,
            pause_at,
            zoom,
            viewport,
            show_draws,
        } => {
            let mut session = Session::new(&config, fps, viewport)?;
            session.apply(Action::Zoom(zoom))?;
            if let Some(n) = tick_scale_exp {
                let key = char::from_digit(u32::from(n), 10)
                    .with_context(|| format!("tick scale exponent {n} is not a digit"))?;
                session.apply(Action::from_key(key))?;
            }
            if let Some(pixel) = click {
                let hit = session.click(pixel)?;
                println!("click ({}, {}) -> ground ({:.2}, {:.2})", pixel.x, pixel.y, hit.x, hit.y);
            }
            if let Some(t) = target {
                session.apply(Action::SetTarget(t))?;
            }

            let _span = tracing::info_span!("run", frames, fps).entered();
            for frame in 1..=frames {
                if pause_at == Some(frame) {
                    session.apply(Action::TogglePhysics)?;
                }
                session.step_frame();
            }

            let world = session.world();
            let pos = world.interpolated_position(session.now()).truncate();
            println!(
                "{} frames, {:.3}s simulated",
                session.frames(),
                session.now().as_secs_f64()
            );
            println!("{}", DebugOverlay::text(pos, session.camera().zoom()));
            println!("{}", SimInspector::summary(world));
            if show_draws {
                print!("{}", session.backend().render_text());
            }
        }
        Commands::Cast {
            pixel,
            viewport,
            zoom,
        } => {
            let mut session = Session::new(&config, 60, viewport)?;
            session.apply(Action::Zoom(zoom))?;
            let camera = session.camera();
            let eye = camera.position();
            println!("camera eye=({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
            let hit = session.click(pixel)?;
            println!("ground ({:.4}, {:.4})", hit.x, hit.y);
        }
        Commands::Inspect { json } => {
            let world = World::from_layout(&config.layout, config.sim, Default::default())?;
            let summary = SimInspector::summary(&world);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = GameConfig::from_yaml_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

fn parse_pair(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("`{v}`: {e}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_parses_with_spaces_and_signs() {
        assert_eq!(parse_pair("3,-2.5").unwrap(), Vec2::new(3.0, -2.5));
        assert_eq!(parse_pair(" 1 , 2 ").unwrap(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn malformed_pair_is_rejected() {
        assert!(parse_pair("3").is_err());
        assert!(parse_pair("a,b").is_err());
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "bridgewalk",
            "run",
            "--frames",
            "10",
            "--target",
            "1,2",
            "--tick-scale-exp",
            "3",
            "--zoom",
            "-2",
        ])
        .unwrap();
        let Commands::Run {
            frames,
            target,
            tick_scale_exp,
            zoom,
            ..
        } = cli.command
        else {
            panic!("expected run");
        };
        assert_eq!(frames, 10);
        assert_eq!(target, Some(Vec2::new(1.0, 2.0)));
        assert_eq!(tick_scale_exp, Some(3));
        assert_eq!(zoom, -2);
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
