// main.rs - Terminal front end: generate a maze, race both solvers, report

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_race_renderer::text_renderer::CLEAR_SCREEN;
use maze_race_renderer::{
    spawn_stdin_commands, PngRenderer, RaceConfig, RaceConfigBuilder, RaceRunner, RaceStats,
    RunEvent, TextRenderer,
};
use maze_race_solver::{Grid, Race};
use tokio::sync::mpsc;

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Side length of the generated maze (odd, at least 5)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Milliseconds between ticks
    #[arg(short, long)]
    pub tick_ms: Option<u64>,

    /// Seed for maze carving and the classic solver's shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON race configuration; flags override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Race on a hand-made text maze instead of a generated one
    #[arg(short, long)]
    pub maze: Option<PathBuf>,

    /// Read s/p/r/q commands from stdin instead of starting right away
    #[arg(short, long)]
    pub interactive: bool,

    /// Do not draw frames
    #[arg(short, long)]
    pub quiet: bool,

    /// Draw frames without ANSI colours
    #[arg(long)]
    pub plain: bool,

    /// Write the last frame as PNG; use "-" for stdout
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Print the final statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Give up after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,
}

async fn load_config(args: &Args) -> Result<RaceConfig> {
    let base = match &args.config {
        Some(path) => RaceConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RaceConfig::default(),
    };

    let mut builder = RaceConfigBuilder::from_config(base);
    if let Some(size) = args.size {
        builder = builder.maze_size(size);
    }
    if let Some(ms) = args.tick_ms {
        builder = builder.tick_interval_ms(ms);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(ticks) = args.max_ticks {
        builder = builder.max_ticks(ticks);
    }
    builder.build().context("Invalid race configuration")
}

async fn load_maze(path: &Path) -> Result<Grid> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Grid::from_ascii(&text).with_context(|| format!("Failed to parse maze {}", path.display()))
}

async fn build_race(args: &Args, config: &RaceConfig) -> Result<Race> {
    let builder = config.race_builder();
    let builder = match &args.maze {
        Some(path) => builder.grid(load_maze(path).await?),
        None => builder,
    };
    builder.build().context("Failed to set up race")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let config = load_config(&args).await?;
    let race = build_race(&args, &config).await?;
    let mut runner = RaceRunner::new(race, &config);

    // stdout belongs to the PNG when it is written there
    let png_to_stdout = args.png.as_deref() == Some(Path::new("-"));
    let draw = !args.quiet && !args.json && !png_to_stdout;
    let renderer = if args.plain {
        TextRenderer::plain()
    } else {
        TextRenderer::ansi()
    };
    let observer = |race: &Race, event: RunEvent| {
        if draw && !matches!(event, RunEvent::Tick(report) if report.is_noop()) {
            print!("{CLEAR_SCREEN}{}", renderer.render_race(race));
        }
    };

    if draw {
        print!("{CLEAR_SCREEN}{}", renderer.render_race(runner.race()));
    }

    if args.interactive {
        eprintln!("Commands: s(tart)  p(ause)  r(eset)  q(uit)");
        let (tx, rx) = mpsc::channel(16);
        // left detached: a pending terminal read must not keep the process alive
        spawn_stdin_commands(tx).context("Failed to start command input")?;
        runner.run(rx, observer).await.context("Race aborted")?;
    } else {
        runner.run_to_finish(observer).await.context("Race aborted")?;
    }

    let race = runner.into_race();
    let stats = RaceStats::collect(&race);
    let report = if args.json {
        stats.to_json_pretty()?
    } else {
        stats.to_string()
    };
    if png_to_stdout {
        eprintln!("{report}");
    } else {
        println!("{report}");
    }

    if let Some(path) = &args.png {
        PngRenderer::from_config(&config)
            .save(&race, path)
            .await
            .with_context(|| format!("Failed writing PNG {}", path.display()))?;
    }

    Ok(())
}
