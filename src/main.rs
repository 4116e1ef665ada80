// nerfctl - nerfstudio training and export automation
// Main entry point

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use nerfctl::config::load_config;
use nerfctl::errors;
use nerfctl::export::{export_gaussian_splat, export_pointcloud};
use nerfctl::runner::ProcessRunner;
use nerfctl::toolchain::{self, ToolchainError};
use nerfctl::train::{run_training, TrainOptions};

#[derive(Parser, Debug)]
#[command(name = "nerfctl")]
#[command(about = "Automation wrapper for nerfstudio training and geometry export", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Skip the conda environment check (when ns-train/ns-export are on PATH)
    #[arg(long, global = true)]
    skip_env_check: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a model, then export geometry if the method supports it
    Train {
        /// nerfstudio method (e.g. splatfacto, nerfacto)
        method: String,

        /// Base directory containing the nerf/nerf_data layout
        #[arg(long)]
        base_dir: PathBuf,

        /// Experiment name
        #[arg(long)]
        experiment: String,

        /// Config override, e.g. "--pipeline.model.camera-optimizer.mode off" (repeatable)
        #[arg(long = "override", value_name = "FLAG VALUE")]
        overrides: Vec<String>,

        /// Dataparser selector token (default from config)
        #[arg(long)]
        dataparser: Option<String>,

        /// Skip the geometry export after training
        #[arg(long)]
        no_export: bool,

        /// Close the viewer when training completes
        #[arg(long)]
        quit_viewer: bool,
    },
    /// Export geometry from an already-trained model
    Export {
        #[command(subcommand)]
        export_command: ExportCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Export a gaussian splat from a trained splatfacto model
    GaussianSplat {
        /// Trained-model config.yml
        #[arg(long)]
        load_config: PathBuf,

        /// Directory for the exported files
        #[arg(long)]
        output_dir: PathBuf,
    },
    /// Export a pointcloud from a trained nerfacto model
    Pointcloud {
        /// Trained-model config.yml
        #[arg(long)]
        load_config: PathBuf,

        /// Directory for the exported files
        #[arg(long)]
        output_dir: PathBuf,

        /// Number of points to sample (default: 1000000)
        #[arg(long)]
        num_points: Option<u64>,

        /// Remove statistical outliers (default: true)
        #[arg(long, action = ArgAction::Set)]
        remove_outliers: Option<bool>,

        /// Surface-normal estimation strategy (default: open3d)
        #[arg(long)]
        normal_method: Option<String>,

        /// Keep world-frame coordinates (default: false)
        #[arg(long, action = ArgAction::Set)]
        save_world_frame: Option<bool>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = load_config()?;

    if !args.skip_env_check {
        let active = toolchain::active_environment();
        if let Err(ToolchainError::EnvironmentMismatch { expected, active }) =
            toolchain::verify_environment(&config.conda_env, active.as_deref())
        {
            bail!(errors::environment_mismatch_error(&expected, &active));
        }
    }

    let runner = ProcessRunner::new();

    let success = match args.command {
        Command::Train {
            method,
            base_dir,
            experiment,
            overrides,
            dataparser,
            no_export,
            quit_viewer,
        } => {
            let options = TrainOptions {
                method,
                base_dir,
                experiment_name: experiment,
                overrides,
                dataparser: dataparser.unwrap_or_else(|| config.dataparser.clone()),
                export_geometry: !no_export,
                quit_viewer,
                steps_per_log: config.steps_per_log,
                max_log_size: config.max_log_size,
                pointcloud: config.pointcloud.clone(),
                environment_label: config.conda_env.clone(),
            };
            run_training(&runner, &options)
        }
        Command::Export { export_command } => match export_command {
            ExportCommand::GaussianSplat {
                load_config,
                output_dir,
            } => export_gaussian_splat(&runner, &load_config, &output_dir, &config.conda_env),
            ExportCommand::Pointcloud {
                load_config,
                output_dir,
                num_points,
                remove_outliers,
                normal_method,
                save_world_frame,
            } => {
                let mut params = config.pointcloud.clone();
                if let Some(value) = num_points {
                    params.num_points = value;
                }
                if let Some(value) = remove_outliers {
                    params.remove_outliers = value;
                }
                if let Some(value) = normal_method {
                    params.normal_method = value;
                }
                if let Some(value) = save_world_frame {
                    params.save_world_frame = value;
                }
                export_pointcloud(&runner, &load_config, &output_dir, &params, &config.conda_env)
            }
        },
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    // Default: INFO level, overridable with RUST_LOG
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
