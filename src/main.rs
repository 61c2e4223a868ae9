use anyhow::{bail, Context, Result};
use attrakdiff::{
    analyze,
    export::write_all,
    process::{is_input_error, load_datasets, DatasetSource},
    schema::attrakdiff as schema_tables,
    AnalysisConfig, Datasets,
};
use clap::Parser;
use glob::glob;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Summarize AttrakDiff survey exports: dimension averages, word pairs and portfolio"
)]
struct Args {
    /// Named export, `NAME=PATH`. Repeat to compare runs; order is kept.
    #[arg(short, long = "dataset", value_parser = parse_dataset)]
    datasets: Vec<DatasetSource>,
    /// Add every file matching the pattern, named by file stem.
    #[arg(short, long = "glob")]
    globs: Vec<String>,
    /// YAML file with analysis settings.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Label language: en, fr or de.
    #[arg(short, long)]
    lang: Option<String>,
    /// Interval mass for the portfolio, e.g. 0.95.
    #[arg(long)]
    confidence: Option<f64>,
    /// `tab` or a single character.
    #[arg(long)]
    delimiter: Option<String>,
    /// Encoding used when an export has no byte-order mark.
    #[arg(long)]
    encoding: Option<String>,
    #[arg(short, long, default_value = "./output")]
    out: PathBuf,
    /// Fail when any dataset cannot be loaded instead of skipping it.
    #[arg(long)]
    strict: bool,
}

fn parse_dataset(raw: &str) -> std::result::Result<DatasetSource, String> {
    let (name, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got `{raw}`"));
    }
    Ok(DatasetSource {
        name: name.to_string(),
        path: PathBuf::from(path),
    })
}

fn resolve_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(lang) = &args.lang {
        config.locale = lang.clone();
    }
    if let Some(confidence) = args.confidence {
        config.confidence = confidence;
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = delimiter.clone();
    }
    if let Some(encoding) = &args.encoding {
        config.encoding = encoding.clone();
    }
    config.strict |= args.strict;
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn collect_sources(args: &Args) -> Result<Vec<DatasetSource>> {
    let mut sources = args.datasets.clone();
    for pattern in &args.globs {
        let paths: Vec<PathBuf> = glob(pattern)
            .with_context(|| format!("invalid glob pattern: {pattern}"))?
            .filter_map(|p| p.ok())
            .filter(|p| p.is_file())
            .collect();
        if paths.is_empty() {
            warn!(pattern = %pattern, "glob matched no files");
        }
        for path in paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .with_context(|| format!("no file name in {}", path.display()))?;
            sources.push(DatasetSource { name, path });
        }
    }
    Ok(sources)
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) settings and inputs ──────────────────────────────────────
    let args = Args::parse();
    let config = resolve_config(&args)?;
    let sources = collect_sources(&args)?;
    if sources.is_empty() {
        bail!("no datasets given; use --dataset NAME=PATH or --glob PATTERN");
    }
    info!(datasets = sources.len(), locale = %config.locale, "startup");

    // ─── 3) load and normalize in parallel ───────────────────────────
    let tables = schema_tables::tables();
    let opts = config.ingest_options()?;
    let mut datasets = Datasets::new();
    let mut skipped = Vec::new();
    for (name, loaded) in load_datasets(&sources, &opts, tables, &config.scale) {
        match loaded {
            Ok(table) => datasets
                .insert(name.as_str(), table)
                .with_context(|| format!("dataset {name}"))?,
            Err(e) if config.strict => {
                return Err(e).with_context(|| format!("loading dataset {name}"));
            }
            Err(e) => {
                let kind = if is_input_error(&e) { "bad export" } else { "unreadable" };
                error!(dataset = %name, error = %e, "{kind}; skipped");
                skipped.push(name);
            }
        }
    }
    if datasets.is_empty() {
        bail!("every dataset failed to load: {}", skipped.join(", "));
    }

    // ─── 4) aggregate ────────────────────────────────────────────────
    let report = analyze(&datasets, tables, &config).context("analysis failed")?;

    // ─── 5) write summaries ──────────────────────────────────────────
    let written = write_all(&report, &args.out)
        .with_context(|| format!("writing to {}", args.out.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    for (name, entry) in report.portfolio.iter() {
        println!(
            "{name}: {} ({:.2}, {:.2})",
            entry.region_name.unwrap_or("-"),
            entry.point.x.mean,
            entry.point.y.mean
        );
    }
    if !skipped.is_empty() {
        warn!(skipped = ?skipped, "some datasets were skipped");
    }
    info!("done");
    Ok(())
}
