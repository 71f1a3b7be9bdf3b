use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "songcard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a preview card as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input preview request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file used for title and metadata text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Abort the render after this many seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
    }
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let request = songcard::PreviewRequest::from_path(&args.in_path)?;
    request.validate()?;

    if let Some(font) = &args.font {
        songcard::FontRegistry::register_file(font)
            .with_context(|| format!("register font '{}'", font.display()))?;
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    let request_dir = args
        .in_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));
    let source = songcard::DefaultArtworkSource::new(timeout)?.with_file_root(request_dir);
    let png = tokio::time::timeout(timeout, songcard::render_preview(&request, &source))
        .await
        .with_context(|| format!("render timed out after {}s", args.timeout_secs))??;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
