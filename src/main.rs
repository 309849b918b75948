use clap::{Parser, ValueEnum};
use replica::{Backend, InputFormat, LayoutConfig, PipelineError, RasterFont, StatementPipeline};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Vector,
    Raster,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

/// Render a bank statement's transaction table as a paginated PDF or PNG pages.
#[derive(Debug, Parser)]
#[command(name = "replica", version)]
struct Cli {
    /// CSV or JSON file with the statement records
    input: PathBuf,

    /// Output file; a `.png` name writes one numbered image per page
    output: PathBuf,

    /// JSON layout configuration (camelCase keys, all optional)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "vector")]
    backend: BackendArg,

    /// TrueType font for raster text; an installed sans-serif face is used when omitted
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold TrueType font for raster header labels
    #[arg(long)]
    bold_font: Option<PathBuf>,

    /// Raster resolution in dots per inch
    #[arg(long, default_value_t = replica_render_raster::DEFAULT_DPI)]
    dpi: f32,

    /// Input format; inferred from the input extension when omitted
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

fn load_font(path: &Path) -> Result<RasterFont, PipelineError> {
    let data = fs::read(path)?;
    Ok(RasterFont::from_bytes(data)?)
}

fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    let config = match &cli.config {
        Some(path) => StatementPipeline::load_config(path)?,
        None => LayoutConfig::default(),
    };

    let backend = match cli.backend {
        BackendArg::Vector => Backend::Vector,
        BackendArg::Raster => Backend::Raster,
    };
    let mut pipeline = StatementPipeline::new(config)?
        .with_backend(backend)
        .with_dpi(cli.dpi);
    if let Some(path) = &cli.font {
        pipeline = pipeline.with_font(load_font(path)?);
    }
    if let Some(path) = &cli.bold_font {
        pipeline = pipeline.with_bold_font(load_font(path)?);
    }

    let format = cli.format.map(|f| match f {
        FormatArg::Csv => InputFormat::Csv,
        FormatArg::Json => InputFormat::Json,
    });
    let written = pipeline.generate_to_file(&cli.input, format, &cli.output)?;

    for path in &written {
        log::info!("Wrote {}", path.display());
    }
    log::info!("Finished in {:.2?}", start.elapsed());
    Ok(())
}
