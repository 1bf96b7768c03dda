mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::Parser;
use config::{ConfigMerger, MergedConfig};
use costflow_domain::{FlowPlanner, LabelMap, PlannerConfig};
use costflow_ingest::{OverrideWarning, load_cost_rows, load_label_overrides};
use costflow_render::{formatted_file_name, render_flows, splice_template};
use fs_err as fs;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "costflow",
    version,
    about = "Turns a cloud cost export into SankeyMATIC flow data."
)]
struct Cli {
    /// Cost export CSV (`MeterCategory`, `PricingModel`, `Environment`, `Monthy Cost`).
    #[arg(long, alias = "csvFile")]
    csv_file: Utf8PathBuf,

    /// Middle-column node count, `Others` included (default: 9).
    #[arg(long, alias = "TopCategories")]
    top_categories: Option<usize>,

    /// JSON object of raw name → display label entries.
    #[arg(long, alias = "OverwriteJsonFile")]
    overwrite_json_file: Option<Utf8PathBuf>,

    /// Write a timestamped file built from the SankeyMATIC template.
    #[arg(long, alias = "Formatted", default_value_t = false)]
    formatted: bool,

    /// Print the flows to stdout.
    #[arg(long, alias = "Screen", default_value_t = false)]
    screen: bool,

    /// Output format for --screen (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Template used by --formatted (default: ./sankeymatic_template.txt).
    #[arg(long)]
    template: Option<Utf8PathBuf>,

    /// Directory receiving the formatted file (default: current directory).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Config file (default: ./costflow.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // stdout carries flow text only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    cmd_generate(cli)
}

fn cmd_generate(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load costflow.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge_args(
        cli.top_categories,
        cli.template.as_deref(),
        cli.out_dir.as_deref(),
    );
    debug!(
        top_categories = merged.top_categories,
        template = %merged.template,
        out_dir = %merged.out_dir,
        "merged configuration"
    );

    let rows = load_cost_rows(&cli.csv_file)
        .with_context(|| format!("load cost export {}", cli.csv_file))?;
    info!(path = %cli.csv_file, rows = rows.len(), "loaded cost export");

    let labels = build_labels(&merged, cli.overwrite_json_file.as_deref());
    let planner = FlowPlanner::new(PlannerConfig {
        top_categories: merged.top_categories,
        labels,
    });
    let diagram = planner.plan(&rows).context("build flow diagram")?;
    info!(
        edges = diagram.edge_count(),
        total_cost = diagram.summary.total_cost,
        kept = diagram.summary.categories_kept.len(),
        "built flow diagram"
    );

    let flows = render_flows(&diagram);

    if cli.screen {
        match cli.format {
            OutputFormat::Text => println!("{flows}"),
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&diagram).context("serialize flow diagram")?;
                println!("{json}");
            }
        }
    }

    if cli.formatted {
        write_formatted(&merged, &flows)?;
    }

    Ok(())
}

/// Built-in labels, then `[labels]` from the config, then the override file.
fn build_labels(merged: &MergedConfig, override_file: Option<&Utf8Path>) -> LabelMap {
    let labels = LabelMap::with_defaults().with_overrides(merged.labels.clone());
    let Some(path) = override_file else {
        return labels;
    };

    let loaded = load_label_overrides(path);
    match loaded.overrides {
        Ok(map) => {
            info!(path = %loaded.path, entries = map.len(), "loaded label overrides");
            labels.with_overrides(map)
        }
        Err(OverrideWarning::NotFound) => {
            warn!(path = %loaded.path, "label override file not found, ignoring it");
            labels
        }
        Err(warning) => {
            warn!(path = %loaded.path, %warning, "label override file unusable, ignoring it");
            labels
        }
    }
}

/// A missing template or marker skips the file with a warning; write failures are fatal.
fn write_formatted(merged: &MergedConfig, flows: &str) -> anyhow::Result<()> {
    let template_path = &merged.template;
    if !template_path.exists() {
        warn!(template = %template_path, "template file not found, formatted file not written");
        return Ok(());
    }
    let template = match fs::read_to_string(template_path) {
        Ok(t) => t,
        Err(e) => {
            warn!(template = %template_path, error = %e, "template unreadable, formatted file not written");
            return Ok(());
        }
    };

    let now = Local::now().naive_local();
    let content = match splice_template(&template, flows, now) {
        Ok(c) => c,
        Err(e) => {
            warn!(template = %template_path, error = %e, "formatted file not written");
            return Ok(());
        }
    };

    fs::create_dir_all(&merged.out_dir)
        .with_context(|| format!("create {}", merged.out_dir))?;
    let out_path = merged.out_dir.join(formatted_file_name(now));
    fs::write(&out_path, content).with_context(|| format!("write {}", out_path))?;
    info!(path = %out_path, "created formatted file");
    Ok(())
}
