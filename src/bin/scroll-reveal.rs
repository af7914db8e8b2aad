use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scroll_reveal::{
    FrameReport, Rect, RevealHandle, RevealSpec, ScrollScene, StaticLayout, TriggerEvent,
    TriggerPhase, UnitStyle, Viewport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scroll-reveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a reveal spec.
    Validate(ValidateArgs),
    /// Sweep the scroll offset and print per-frame progress and unit styles as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input reveal spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input reveal spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    viewport_height: f64,

    /// Document offset of the trigger element's top edge.
    #[arg(long, default_value_t = 1200.0)]
    trigger_top: f64,

    /// Height of the trigger element.
    #[arg(long, default_value_t = 800.0)]
    trigger_height: f64,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (may be below `--from` to scroll upward).
    #[arg(long, default_value_t = 2000.0)]
    to: f64,

    /// Scroll distance per frame.
    #[arg(long, default_value_t = 50.0)]
    step: f64,

    /// Frames per second; sets the smoothing time step.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Keep emitting frames after the sweep until smoothing settles.
    #[arg(long, default_value_t = false)]
    settle: bool,

    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct FrameLine<'a> {
    frame: u64,
    offset: f64,
    progress: f64,
    smoothed_progress: f64,
    phase: TriggerPhase,
    events: &'a [TriggerEvent],
    units: Vec<UnitLine<'a>>,
}

#[derive(serde::Serialize)]
struct UnitLine<'a> {
    content: &'a str,
    #[serde(flatten)]
    style: UnitStyle,
}

// Settling from a full jump at scrub 10 takes about 92s of frames.
const MAX_SETTLE_FRAMES: u64 = 100_000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let spec = RevealSpec::from_path(&args.in_path)?;
    let units = scroll_reveal::segment(&spec.text, spec.granularity).len();
    eprintln!(
        "ok: {} ({} {} units, trigger '{}')",
        args.in_path.display(),
        units,
        spec.granularity,
        spec.scroll_trigger.trigger
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be a positive number");
    }
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number");
    }
    if !args.to.is_finite() {
        anyhow::bail!("--to must be a finite number");
    }
    let spec = RevealSpec::from_path(&args.in_path)?;

    let bounds = Rect::new(
        0.0,
        args.trigger_top,
        1.0,
        args.trigger_top + args.trigger_height,
    );
    let mut layout = StaticLayout::new()
        .with_element(spec.scroll_trigger.trigger.clone(), bounds)
        .with_element(spec.target.clone(), bounds);
    layout.set_scroll_offset(args.from);
    let viewport = Viewport::new(args.from, args.viewport_height)?;

    let mut scene = ScrollScene::new();
    let handle = scene
        .reveal(&spec, &spec.granularity, &layout, viewport)
        .with_context(|| format!("bind reveal '{}'", spec.target))?;

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let dt = 1.0 / args.fps;
    let direction = if args.to >= args.from { 1.0 } else { -1.0 };
    let steps = ((args.to - args.from).abs() / args.step).floor() as u64;
    let mut frame = 0u64;

    for i in 0..=steps {
        let offset = args.from + direction * args.step * i as f64;
        scene.notify_scroll(offset);
        let report = scene.frame(dt);
        write_frame(&mut out, &scene, handle, frame, offset, &report)?;
        frame += 1;
    }

    if args.settle {
        let offset = scene.scroll_offset().unwrap_or(args.from);
        for _ in 0..MAX_SETTLE_FRAMES {
            let report = scene.frame(dt);
            if report.is_idle() {
                break;
            }
            write_frame(&mut out, &scene, handle, frame, offset, &report)?;
            frame += 1;
        }
    }

    out.flush().context("flush simulation output")?;
    if let Some(path) = &args.out {
        eprintln!("wrote {} ({} frames)", path.display(), frame);
    }
    Ok(())
}

fn write_frame(
    out: &mut dyn Write,
    scene: &ScrollScene,
    handle: RevealHandle,
    frame: u64,
    offset: f64,
    report: &FrameReport,
) -> anyhow::Result<()> {
    let state = scene
        .state(handle.subscription)
        .context("subscription released during simulation")?;
    let anim = scene
        .animation(handle.animation)
        .context("animation dropped during simulation")?;
    let events = report
        .updates
        .iter()
        .find(|u| u.id == handle.subscription)
        .map(|u| u.events.as_slice())
        .unwrap_or(&[]);
    let units = anim
        .units()
        .iter()
        .zip(anim.styles())
        .map(|(unit, style)| UnitLine {
            content: &unit.content,
            style,
        })
        .collect();

    let line = FrameLine {
        frame,
        offset,
        progress: state.progress,
        smoothed_progress: state.smoothed_progress,
        phase: state.phase,
        events,
        units,
    };
    serde_json::to_writer(&mut *out, &line).context("serialize frame")?;
    out.write_all(b"\n").context("write frame")?;
    Ok(())
}
