use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "flyerpress", version, about = "Render show flyers as PNGs or month-partitioned zip archives")]
struct Cli {
    /// Flyer config JSON (raster options, template, logo, font dirs).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one show as a PNG.
    Single(SingleArgs),
    /// Render every show into one zip archive, one folder per month.
    Batch(BatchArgs),
    /// Write the flyer layout of one show as SVG.
    Svg(SvgArgs),
}

#[derive(Args, Debug)]
struct ShowsArg {
    /// Shows file: `.csv` (spreadsheet export) or a JSON array of shows.
    #[arg(long)]
    shows: PathBuf,
}

#[derive(Args, Debug)]
struct SingleArgs {
    #[command(flatten)]
    input: ShowsArg,

    /// Which show to render (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    #[arg(long, default_value_t = flyerpress::Platform::Instagram)]
    platform: flyerpress::Platform,

    /// Output width in pixels (defaults to the platform size).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height in pixels (defaults to the platform size).
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct BatchArgs {
    #[command(flatten)]
    input: ShowsArg,

    #[arg(long, default_value_t = flyerpress::Platform::Instagram)]
    platform: flyerpress::Platform,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Render shows concurrently.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    input: ShowsArg,

    /// Which show to lay out (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flyerpress=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Single(args) => cmd_single(&config, args),
        Command::Batch(args) => cmd_batch(&config, args),
        Command::Svg(args) => cmd_svg(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<flyerpress::FlyerConfig> {
    match path {
        Some(p) => Ok(flyerpress::FlyerConfig::load(p)?),
        None => Ok(flyerpress::FlyerConfig::default()),
    }
}

fn read_shows(path: &Path) -> anyhow::Result<Vec<flyerpress::ShowRecord>> {
    let f = File::open(path).with_context(|| format!("open shows '{}'", path.display()))?;
    let r = BufReader::new(f);
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let shows = if is_csv {
        flyerpress::load_csv_shows(r)?
    } else {
        flyerpress::load_api_shows(r)?
    };
    Ok(shows)
}

fn pick_show(shows: &[flyerpress::ShowRecord], index: usize) -> anyhow::Result<flyerpress::FlyerContent> {
    let show = shows
        .get(index)
        .with_context(|| format!("show index {index} out of range ({} shows)", shows.len()))?;
    Ok(flyerpress::FlyerContent::from_record(show))
}

fn cmd_single(config: &flyerpress::FlyerConfig, args: SingleArgs) -> anyhow::Result<()> {
    let shows = read_shows(&args.input.shows)?;
    let content = pick_show(&shows, args.index)?;

    let spec = match (args.width, args.height) {
        (Some(w), Some(h)) => flyerpress::ExportSpec::new(w, h, args.platform),
        _ => flyerpress::ExportSpec::for_platform(args.platform),
    };

    let rasterizer = flyerpress::Rasterizer::new(config)?;
    let mut sink = flyerpress::DirSink::new(&args.out);
    let name = flyerpress::export_single_flyer(
        &rasterizer,
        &content,
        &spec,
        &flyerpress::SystemClock,
        &mut sink,
    )?;

    eprintln!("wrote {}", args.out.join(name).display());
    Ok(())
}

fn cmd_batch(config: &flyerpress::FlyerConfig, args: BatchArgs) -> anyhow::Result<()> {
    let shows = read_shows(&args.input.shows)?;
    let rasterizer = flyerpress::Rasterizer::new(config)?;
    let opts = flyerpress::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    };

    let mut sink = flyerpress::DirSink::new(&args.out);
    let report = flyerpress::export_all_flyers(
        &rasterizer,
        &shows,
        args.platform,
        &opts,
        &flyerpress::SystemClock,
        &mut sink,
    )?;

    eprintln!(
        "wrote {} ({} flyers, {} undated, {} duplicates skipped)",
        args.out.join(&report.archive_name).display(),
        report.entries.len(),
        report.skipped_undated,
        report.skipped_duplicate
    );
    Ok(())
}

fn cmd_svg(config: &flyerpress::FlyerConfig, args: SvgArgs) -> anyhow::Result<()> {
    config.validate()?;
    let shows = read_shows(&args.input.shows)?;
    let content = pick_show(&shows, args.index)?;

    let renderer =
        flyerpress::LayoutRenderer::new(config.template.clone(), config.raster.logical_size as f32);
    let svg = renderer.to_svg(&content);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, svg).with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
