use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use orbital_sim::initialize::{create_demo_system, DemoParams};
use orbital_sim::runner::{self, RunOptions};
use orbital_sim::scene::SceneConfig;
use orbital_sim::warp::TimeWarp;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Orbital mechanics simulation with RK4 integration
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Scene file to load; a generated demo system is used when omitted
  #[arg(short, long)]
  scene: Option<PathBuf>,
  /// Number of ticks to run (0 runs until interrupted)
  #[arg(short, long, default_value_t = 600)]
  ticks: u64,
  /// Real seconds per tick
  #[arg(long, default_value_t = 1.0 / 60.0)]
  tick_seconds: f64,
  /// Initial time warp factor
  #[arg(short, long, default_value_t = 1.0)]
  warp: f64,
  /// Log a state report every N ticks (0 disables)
  #[arg(long, default_value_t = 60)]
  report_every: u64,
  /// Pace ticks against the wall clock
  #[arg(long, default_value_t = false)]
  realtime: bool,
  /// Number of satellites in the generated demo system
  #[arg(long, default_value_t = 6)]
  satellites: u32,
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Generate shell completion scripts
  Completions {
    /// The shell to generate the script for
    #[arg(value_enum)]
    shell: Shell,
  },
}

fn main() -> Result<()> {
  env_logger::init();
  let args = Args::parse();

  if let Some(Commands::Completions { shell }) = args.command {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    return Ok(());
  }

  let mut system = match &args.scene {
    Some(path) => SceneConfig::from_path(path)
      .with_context(|| format!("loading scene {}", path.display()))?
      .build(),
    None => create_demo_system(&DemoParams {
      satellites: args.satellites,
      ..Default::default()
    })
    .context("generating demo system")?,
  };

  let stop = Arc::new(AtomicBool::new(false));
  let handler_flag = stop.clone();
  ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)).context("installing Ctrl-C handler")?;

  let options = RunOptions {
    ticks: (args.ticks > 0).then_some(args.ticks),
    tick_seconds: args.tick_seconds,
    warp: TimeWarp::new(args.warp),
    report_every: args.report_every,
    realtime: args.realtime,
  };
  let ticks = runner::run(&mut system, &options, &stop).context("running simulation")?;

  println!("{ticks} ticks");
  println!("{}", runner::report(&system));
  Ok(())
}
