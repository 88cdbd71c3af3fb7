use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stardrift", version)]
struct Cli {
    /// Log engine lifecycle events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a backdrop and write the composite as a PNG.
    Frame(FrameArgs),
    /// Print the section binding table as JSON.
    Sections,
    /// Print the default backdrop configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backdrop configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force the visuals of this section instead of following the scroll position.
    #[arg(long)]
    section: Option<String>,

    /// Scroll offset in CSS px.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Display refreshes to simulate before capturing.
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Viewport width in CSS px.
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in CSS px.
    #[arg(long)]
    height: Option<f64>,

    /// Device pixel ratio (capped at 2 for backing stores).
    #[arg(long)]
    dpr: Option<f64>,

    /// Use the mobile tables regardless of the viewport width.
    #[arg(long, default_value_t = false)]
    mobile: bool,

    /// Honor a reduced-motion preference (static visuals only).
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,

    /// Seed of every random choice.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sections => cmd_sections(),
        Command::Config => cmd_config(),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => stardrift::BackdropConfig::from_path(path)?,
        None => stardrift::BackdropConfig::default(),
    };
    if let Some(width) = args.width {
        config.viewport_width = width;
    }
    if let Some(height) = args.height {
        config.viewport_height = height;
    }
    if let Some(dpr) = args.dpr {
        config.device_pixel_ratio = dpr;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.mobile {
        config.mobile_breakpoint = config.mobile_breakpoint.max(config.viewport_width + 1.0);
    }
    config.reduced_motion |= args.reduced_motion;
    if let Some(section) = &args.section
        && !stardrift::is_known_section(section)
    {
        anyhow::bail!(
            "unknown section '{section}' (known: {})",
            stardrift::section_ids().collect::<Vec<_>>().join(", ")
        );
    }

    let mut backdrop = stardrift::Backdrop::new(config, stardrift::CpuSurface::new)?;
    let mut host = stardrift::ManualFrameHost::new();
    backdrop.mount(&mut host);
    backdrop.scroll_to(&mut host, args.scroll);
    // One refresh settles any deferred section change before a forced section applies.
    let interval = stardrift::TARGET_FRAME_INTERVAL_MS;
    let mut rendered = backdrop.pump(&mut host, 1, interval);
    if let Some(section) = &args.section {
        backdrop.apply_section(section);
    }
    rendered += backdrop.pump(&mut host, args.frames.saturating_sub(1), interval);
    let mut frame = backdrop.render_composite()?;
    backdrop.unmount(&mut host);
    stardrift::unpremultiply_in_place(&mut frame.data);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} layer frames, section {})",
        args.out.display(),
        frame.width,
        frame.height,
        rendered,
        backdrop.active_section().id
    );
    Ok(())
}

fn cmd_sections() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(stardrift::sections())
        .context("serialize section table")?;
    println!("{json}");
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", stardrift::BackdropConfig::default().to_json_pretty()?);
    Ok(())
}
