use anyhow::Context;
use clap::{Parser, Subcommand};
use flightsim_kernel::{FlightConfig, FlightScript, FrameDriver};
use flightsim_render::{DebugTextRenderer, FrameView, Renderer, ThrustMeter};
use flightsim_tools::FlightRecorder;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flightsim-cli", about = "Headless flight simulator")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, flight constants and key bindings
    Info,
    /// Fly a scripted session and print a summary
    Fly {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "1000")]
        frames: u64,
        /// Seconds per frame (overrides the config)
        #[arg(short, long)]
        delta: Option<f32>,
        /// YAML flight config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// YAML key script
        #[arg(short, long)]
        script: Option<PathBuf>,
        /// Key codes held for the whole flight, e.g. --hold KeyC
        #[arg(long)]
        hold: Vec<String>,
        /// Print a rendered frame every N frames
        #[arg(long)]
        every: Option<u64>,
        /// Print per-frame telemetry as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Validate a YAML flight config
    CheckConfig {
        /// Path to the config file
        path: PathBuf,
    },
    /// Print the default config as YAML
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let config = FlightConfig::default();
            let c = &config.constants;
            println!("flightsim-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "constants: gravity={} air_density={} frame_area={} drag_coefficient={} lift_coefficient={}",
                c.gravity, c.air_density, c.frame_area, c.drag_coefficient, c.lift_coefficient
            );
            println!(
                "thrust: max={} step={} roll_speed={}",
                c.max_thrust,
                c.acceleration_constant(),
                c.roll_speed
            );
            println!("frame delta: {}", config.frame.delta);
            println!("bindings:");
            for (code, axis) in config.bindings.iter() {
                println!("  {code:<8} {axis}");
            }
        }
        Commands::Fly {
            frames,
            delta,
            config,
            script,
            hold,
            every,
            json,
        } => {
            let mut config = match config {
                Some(path) => FlightConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => FlightConfig::default(),
            };
            if let Some(delta) = delta {
                config.frame.delta = delta;
            }

            let mut script = match script {
                Some(path) => FlightScript::load(&path)
                    .with_context(|| format!("loading script {}", path.display()))?,
                None => FlightScript::new(),
            };
            for code in &hold {
                if config.bindings.axis_for(code).is_none() {
                    tracing::warn!(%code, "held key is not bound to any axis");
                }
                script = script.press(0, code.as_str());
            }

            let meter = Rc::new(RefCell::new(ThrustMeter::new()));
            let mut driver = FrameDriver::new(&config)?.with_script(script);
            driver.controller_mut().set_hud(Box::new(Rc::clone(&meter)));

            let renderer = DebugTextRenderer::new();
            let mut recorder = FlightRecorder::new();
            driver.run(frames, |frame, body, report| {
                recorder.record(frame, body, report);
                if every.is_some_and(|n| n > 0 && frame % n == 0) {
                    print!(
                        "{}",
                        renderer.render(&FrameView::chase(frame, *body, report.reading))
                    );
                }
            })?;

            if json {
                recorder.write_json(std::io::stdout().lock())?;
                println!();
            } else {
                println!("{}", recorder.summary());
                println!("{}", meter.borrow().text());
            }
        }
        Commands::CheckConfig { path } => {
            let config = FlightConfig::load(&path)
                .with_context(|| format!("checking config {}", path.display()))?;
            println!(
                "{}: OK (max_thrust={}, delta={}, {} bindings)",
                path.display(),
                config.constants.max_thrust,
                config.frame.delta,
                config.bindings.len()
            );
        }
        Commands::DefaultConfig => {
            print!("{}", FlightConfig::default().to_yaml_string()?);
        }
    }

    Ok(())
}
