use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use generator::profile::{build_survey, SynthConfig};
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use gui_bridge::model::HeatmapModel;
use log::{info, warn};
use rssicore::processing::{ingest, ValueColumn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::{Runner, SurveyFiles};

mod generator;
mod gui_bridge;
mod io;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "RSSI site-survey heatmap builder")]
struct Cli {
    /// Load calibration and smoothing settings from YAML
    #[arg(long, global = true)]
    workflow: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calibrate a raw RSSI log and write the calibrated log
    Calibrate {
        #[arg(long)]
        log: PathBuf,
        #[arg(long, default_value = "rssi_log_calibrated.csv")]
        out: PathBuf,
    },
    /// Build the heatmap grid and classified points for a survey
    Build(BuildArgs),
    /// Write a synthetic survey log and coordinate list
    Synth {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 12)]
        locations: usize,
        #[arg(long, default_value_t = 5)]
        samples: usize,
        #[arg(long, default_value_t = 640)]
        width: usize,
        #[arg(long, default_value_t = 480)]
        height: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Args)]
struct BuildArgs {
    #[arg(long, default_value = "rssi_log_calibrated.csv")]
    log: PathBuf,
    /// The log already holds a `calibrated_rssi` column
    #[arg(long, default_value_t = false)]
    calibrated: bool,
    #[arg(long, default_value = "locations.csv")]
    coordinates: PathBuf,
    /// Floorplan image supplying the grid size
    #[arg(long)]
    floorplan: Option<PathBuf>,
    #[arg(long, requires = "height")]
    width: Option<usize>,
    #[arg(long, requires = "width")]
    height: Option<usize>,
    #[arg(long)]
    sigma: Option<f64>,
    /// Abort when coordinate and group counts differ by more than this
    #[arg(long)]
    max_mismatch: Option<usize>,
    #[arg(long, default_value = "heatmap")]
    out_dir: PathBuf,
    /// Keep the HTTP bridge alive for the renderer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<WorkflowConfig> {
    match path {
        Some(path) => WorkflowConfig::load(path),
        None => Ok(WorkflowConfig::default()),
    }
}

fn calibrate(config: &WorkflowConfig, log: PathBuf, out: PathBuf) -> anyhow::Result<()> {
    let rows = io::input::read_log(&log, ValueColumn::Raw)?;
    let report = ingest(rows, ValueColumn::Raw, &config.calibration());
    for skipped in &report.skipped {
        warn!("skipping line {}: {}", skipped.line, skipped.reason);
    }
    io::output::write_calibrated_log(&out, &report.readings)?;
    println!(
        "Calibrated {} readings ({} skipped) -> {}",
        report.readings.len(),
        report.skipped.len(),
        out.display()
    );
    Ok(())
}

fn build(mut config: WorkflowConfig, args: BuildArgs) -> anyhow::Result<()> {
    if let Some(sigma) = args.sigma {
        config.sigma = sigma;
    }
    if args.max_mismatch.is_some() {
        config.max_count_mismatch = args.max_mismatch;
    }

    let files = SurveyFiles {
        log: args.log,
        column: if args.calibrated {
            ValueColumn::Calibrated
        } else {
            ValueColumn::Raw
        },
        coordinates: args.coordinates,
        floorplan: args.floorplan,
        shape: args.height.zip(args.width),
    };

    let runner = Runner::new(config);
    let input = runner.load(&files)?;
    let output = runner.execute(input)?;
    let model = HeatmapModel::from_output(&output, runner.config().sigma);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;
    io::output::write_grid(&args.out_dir.join("heatmap_grid.csv"), &output.grid)?;
    io::output::write_points(&args.out_dir.join("points.csv"), &output.samples)?;
    io::output::write_json(&args.out_dir.join("summary.json"), &model)?;

    println!(
        "Heatmap {}x{} -> {} groups, {} points, {} rows skipped, {} off-plan",
        model.width,
        model.height,
        model.groups,
        model.points.len(),
        model.rows_skipped,
        model.out_of_bounds
    );
    info!("results written to {}", args.out_dir.display());

    if args.serve {
        let gui_bridge = GuiBridge::new();
        gui_bridge.publish(model);
        gui_bridge.spawn(Arc::new(runner), gui_bind_address());
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }
    Ok(())
}

fn synth(config: SynthConfig, out_dir: PathBuf) -> anyhow::Result<()> {
    let survey = build_survey(&config)?;
    let log = out_dir.join("rssi_log.csv");
    let locations = out_dir.join("locations.csv");
    io::output::write_raw_log(&log, &survey.readings)?;
    io::output::write_coordinates(&locations, &survey.coordinates)?;
    println!(
        "Synthetic survey: {} readings at {} locations -> {}, {}",
        survey.readings.len(),
        survey.coordinates.len(),
        log.display(),
        locations.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.workflow.as_ref())?;

    match cli.command {
        Command::Calibrate { log, out } => calibrate(&config, log, out),
        Command::Build(args) => build(config, args),
        Command::Synth {
            out_dir,
            locations,
            samples,
            width,
            height,
            seed,
        } => synth(
            SynthConfig {
                locations,
                samples_per_location: samples,
                width,
                height,
                seed,
                ..Default::default()
            },
            out_dir,
        ),
    }
}
