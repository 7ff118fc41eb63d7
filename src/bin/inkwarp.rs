use std::{
    fs::File,
    io::{BufRead, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inkwarp", version, about = "Hand-drawn style distortion for still images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the distorted image once and save it as a PNG.
    Still(StillArgs),
    /// Render a strength ramp as an MP4 (requires `ffmpeg` on PATH) or a raw RGBA stream.
    Sweep(SweepArgs),
    /// Tune the strength with line commands on stdin, then save.
    Tune(TuneArgs),
}

/// Flags shared by every subcommand; each one overrides the config file.
#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of concentric rings in the displacement field.
    #[arg(long)]
    period: Option<u32>,

    /// Render rows in parallel.
    #[arg(long)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Input image.
    input: PathBuf,

    /// Distortion strength in percent.
    #[arg(long)]
    strength: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Input image.
    input: PathBuf,

    /// Output video path (`-` with `--raw` writes to stdout).
    output: PathBuf,

    /// Sweep length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Strength the ramp approaches, in percent.
    #[arg(long)]
    strength: Option<f64>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Write raw RGBA8 frames instead of spawning ffmpeg.
    #[arg(long)]
    raw: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct TuneArgs {
    /// Input image.
    input: PathBuf,

    /// Starting strength in percent.
    #[arg(long)]
    strength: Option<f64>,

    /// Default save path.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Tune(args) => cmd_tune(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<inkwarp::WarpConfig> {
    let mut cfg = match &common.config {
        Some(path) => inkwarp::WarpConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => inkwarp::WarpConfig::default(),
    };
    if let Some(period) = common.period {
        cfg.period = period;
    }
    if common.parallel {
        cfg.parallel = true;
    }
    Ok(cfg)
}

fn load_input(path: &Path) -> anyhow::Result<inkwarp::Raster> {
    let image =
        inkwarp::load_image(path).with_context(|| format!("load image '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if let Some(strength) = args.strength {
        cfg.strength_percent = strength;
    }
    if let Some(out) = args.out {
        cfg.output_path = out;
    }
    cfg.validate()?;

    let image = load_input(&args.input)?;
    let session = inkwarp::InteractiveSession::new(
        image,
        cfg.period,
        cfg.strength()?,
        cfg.compositor_opts(),
        cfg.output_path.clone(),
    )?;
    let path = session.save()?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    cfg.output_path = args.output;
    if let Some(duration) = args.duration {
        cfg.duration_secs = Some(duration);
    }
    if let Some(strength) = args.strength {
        cfg.target_strength_percent = Some(strength);
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    let plan = cfg.sweep_plan()?;

    let image = load_input(&args.input)?;
    let opts = cfg.compositor_opts();

    let stats = if args.raw {
        if cfg.output_path.as_os_str() == "-" {
            let mut sink = inkwarp::RawStreamSink::new(BufWriter::new(std::io::stdout()));
            inkwarp::sweep(&image, &plan, opts, &mut sink, None)?
        } else {
            if let Some(parent) = cfg.output_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(&cfg.output_path)
                .with_context(|| format!("create '{}'", cfg.output_path.display()))?;
            let mut sink = inkwarp::RawStreamSink::new(BufWriter::new(f));
            inkwarp::sweep(&image, &plan, opts, &mut sink, None)?
        }
    } else {
        let mut sink_opts = inkwarp::FfmpegSinkOpts::new(&cfg.output_path);
        sink_opts.bg_rgba = cfg.background_rgba;
        let mut sink = inkwarp::FfmpegSink::new(sink_opts);
        inkwarp::sweep(&image, &plan, opts, &mut sink, None)?
    };

    eprintln!(
        "wrote {} ({} frames)",
        cfg.output_path.display(),
        stats.frames_written
    );
    Ok(())
}

fn cmd_tune(args: TuneArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if let Some(strength) = args.strength {
        cfg.strength_percent = strength;
    }
    if let Some(out) = args.out {
        cfg.output_path = out;
    }
    cfg.validate()?;

    let image = load_input(&args.input)?;
    let mut session = inkwarp::InteractiveSession::new(
        image,
        cfg.period,
        cfg.strength()?,
        cfg.compositor_opts(),
        cfg.output_path.clone(),
    )?
    .with_wheel(cfg.wheel()?);

    eprintln!(
        "commands: scroll <delta>, strength <pct>, period <n>, resize <w> <h>, save [path], show, quit"
    );
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read command from stdin")?;
        match run_tune_command(&mut session, line.trim()) {
            Ok(TuneFlow::Continue) => {}
            Ok(TuneFlow::Quit) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }
    Ok(())
}

enum TuneFlow {
    Continue,
    Quit,
}

fn run_tune_command(
    session: &mut inkwarp::InteractiveSession,
    line: &str,
) -> anyhow::Result<TuneFlow> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(TuneFlow::Continue);
    };
    match cmd {
        "scroll" => {
            let delta: f64 = next_arg(&mut words, cmd, "delta")?
                .parse()
                .context("parse scroll delta")?;
            let strength = session.scroll(delta)?;
            println!("strength {:.4}%", strength.percent());
        }
        "strength" => {
            let pct: f64 = next_arg(&mut words, cmd, "pct")?
                .parse()
                .context("parse strength")?;
            session.set_strength(inkwarp::Strength::from_percent(pct)?);
            println!("strength {:.4}%", session.strength().percent());
        }
        "period" => {
            let period: u32 = next_arg(&mut words, cmd, "n")?
                .parse()
                .context("parse period")?;
            session.set_period(period)?;
            println!("period {period}");
        }
        "resize" => {
            let w: u32 = next_arg(&mut words, cmd, "w")?
                .parse()
                .context("parse width")?;
            let h: u32 = next_arg(&mut words, cmd, "h")?
                .parse()
                .context("parse height")?;
            session.resize(inkwarp::Viewport::new(w, h)?)?;
            session.render_preview()?;
            println!("viewport {w}x{h}");
        }
        "save" => {
            let path = match words.next() {
                Some(p) => {
                    let p = PathBuf::from(p);
                    session.save_to(&p)?;
                    p
                }
                None => session.save()?,
            };
            println!("saved {}", path.display());
        }
        "show" => {
            let state = session.state();
            let viewport = state.viewport();
            println!(
                "strength {:.4}% period {} viewport {}x{} out {}",
                state.strength().percent(),
                state.period(),
                viewport.width,
                viewport.height,
                session.output_path().display()
            );
        }
        "quit" | "exit" => return Ok(TuneFlow::Quit),
        other => anyhow::bail!("unknown command '{other}'"),
    }
    Ok(TuneFlow::Continue)
}

fn next_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    cmd: &str,
    name: &str,
) -> anyhow::Result<&'a str> {
    words
        .next()
        .with_context(|| format!("'{cmd}' expects <{name}>"))
}
