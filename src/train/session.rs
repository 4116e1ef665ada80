// Training session orchestration
//
// Assembles the ns-train command, persists the parameter snapshot around
// execution, and on success dispatches the geometry export that matches
// the training method.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::errors;
use crate::export::{export_gaussian_splat, export_pointcloud, PointcloudParams};
use crate::runner::{run_stamp, CommandRunner, Invocation};
use crate::toolchain::{bool_flag, TRAIN_BIN};

use super::ParameterSnapshot;

/// Overrides with this prefix are sub-parameters of the dataparser selector
/// and must come after it on the command line; ns-train parses everything
/// trailing the selector token as belonging to it.
pub const DEFERRED_OVERRIDE_PREFIX: &str = "--downscale-factor";

/// Everything one training run needs, export tunables included. No ambient
/// defaults: the nerfacto export path sees exactly what the caller passed.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub method: String,
    pub base_dir: PathBuf,
    pub experiment_name: String,
    /// Raw override strings, e.g. `"--pipeline.model.camera-optimizer.mode off"`
    pub overrides: Vec<String>,
    /// Dataparser selector token, e.g. `"nerfstudio-data"`
    pub dataparser: String,
    pub export_geometry: bool,
    pub quit_viewer: bool,
    pub steps_per_log: u32,
    pub max_log_size: u32,
    pub pointcloud: PointcloudParams,
    pub environment_label: String,
}

/// Outcome of the post-training export dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDispatch {
    Exported { success: bool },
    /// The method has no export rule (only splatfacto and nerfacto do).
    NoRule,
    /// `run/config.yml` was absent, nothing was spawned.
    MissingDescriptor,
}

/// Partition override strings into general overrides and dataparser
/// sub-parameters, tokenizing each string on whitespace.
pub fn split_overrides(overrides: &[String]) -> (Vec<String>, Vec<String>) {
    let mut general = Vec::new();
    let mut deferred = Vec::new();
    for entry in overrides {
        let tokens = entry.split_whitespace().map(str::to_string);
        if entry.starts_with(DEFERRED_OVERRIDE_PREFIX) {
            deferred.extend(tokens);
        } else {
            general.extend(tokens);
        }
    }
    (general, deferred)
}

/// Full ns-train argument list: fixed flags, general overrides, the
/// dataparser selector, then the deferred overrides. The order is part of
/// the wire contract with ns-train.
pub fn build_train_args(options: &TrainOptions, data_path: &Path) -> Vec<String> {
    let (general, deferred) = split_overrides(&options.overrides);
    let data = data_path.display().to_string();

    let mut args = vec![
        options.method.clone(),
        "--data".to_string(),
        data.clone(),
        "--method-name".to_string(),
        options.method.clone(),
        "--experiment_name".to_string(),
        options.experiment_name.clone(),
        "--output-dir".to_string(),
        data,
        "--viewer.quit-on-train-completion".to_string(),
        bool_flag(options.quit_viewer).to_string(),
        "--logging.steps-per-log".to_string(),
        options.steps_per_log.to_string(),
        "--logging.local-writer.max-log-size".to_string(),
        options.max_log_size.to_string(),
    ];
    args.extend(general);
    args.push(options.dataparser.clone());
    args.extend(deferred);
    args
}

/// Run one training session and, on success, the matching geometry export.
///
/// The returned boolean is the training outcome alone; export results are
/// logged but never change it.
pub fn run_training(runner: &dyn CommandRunner, options: &TrainOptions) -> bool {
    let data_path = options.base_dir.join("nerf/nerf_data");
    let run_dir = data_path
        .join(&options.experiment_name)
        .join(&options.method);
    if let Err(err) = fs::create_dir_all(&run_dir) {
        error!("Failed to create run directory {}: {err}", run_dir.display());
        return false;
    }

    let stamp = fresh_run_stamp(&run_dir);
    let log_path = run_dir.join(format!("training_{stamp}.log"));
    let params_path = run_dir.join(format!("params_{stamp}.json"));

    let invocation = Invocation::new(
        "TRAINING",
        TRAIN_BIN,
        build_train_args(options, &data_path),
        &log_path,
    )
    .with_env_label(&options.environment_label);

    let mut snapshot = ParameterSnapshot::new(&stamp, options, invocation.command_line());
    if let Err(err) = snapshot.write(&params_path) {
        error!("Failed to write parameter snapshot: {err:#}");
        return false;
    }

    info!("Starting training: {}", options.method);
    info!("Command: {}", invocation.command_line());
    info!("Logs will be saved to: {}", run_dir.display());

    let record = runner.run(&invocation);

    snapshot.finalize(&record);
    if let Err(err) = snapshot.write(&params_path) {
        warn!("Failed to update parameter snapshot: {err:#}");
    }

    info!("Completed in {:.2}s", record.duration_seconds());
    info!("Logs saved to: {}", run_dir.display());

    let success = record.succeeded();
    if success && options.export_geometry {
        info!("Training completed successfully! Starting geometry export...");
        match dispatch_export(runner, options, &run_dir) {
            ExportDispatch::Exported { success: true } => {
                info!("Geometry export completed successfully!");
            }
            ExportDispatch::Exported { success: false } => {
                error!("Geometry export failed. Check the export logs.");
            }
            ExportDispatch::NoRule | ExportDispatch::MissingDescriptor => {}
        }
    }
    success
}

/// Pick the export matching the training method and run it.
///
/// The trained-model descriptor is expected at `<run_dir>/run/config.yml`
/// (training is invoked with `--timestamp run` by convention). Absent
/// descriptor means nothing is spawned.
pub fn dispatch_export(
    runner: &dyn CommandRunner,
    options: &TrainOptions,
    run_dir: &Path,
) -> ExportDispatch {
    let descriptor = run_dir.join("run").join("config.yml");
    if !descriptor.exists() {
        error!("{}", errors::descriptor_missing_error(&descriptor));
        return ExportDispatch::MissingDescriptor;
    }

    match options.method.as_str() {
        "splatfacto" => {
            info!("Exporting gaussian splat for splatfacto model...");
            ExportDispatch::Exported {
                success: export_gaussian_splat(
                    runner,
                    &descriptor,
                    run_dir,
                    &options.environment_label,
                ),
            }
        }
        "nerfacto" => {
            info!("Exporting pointcloud for nerfacto model...");
            ExportDispatch::Exported {
                success: export_pointcloud(
                    runner,
                    &descriptor,
                    run_dir,
                    &options.pointcloud,
                    &options.environment_label,
                ),
            }
        }
        other => {
            info!("No automatic export configured for method: {other}");
            info!("Supported methods for automatic export: splatfacto, nerfacto");
            ExportDispatch::NoRule
        }
    }
}

/// Stamp for this run's log/snapshot pair, suffixed if a run in the same
/// second already claimed either filename.
fn fresh_run_stamp(run_dir: &Path) -> String {
    let base = run_stamp();
    let mut stamp = base.clone();
    let mut n = 1;
    while run_dir.join(format!("training_{stamp}.log")).exists()
        || run_dir.join(format!("params_{stamp}.json")).exists()
    {
        stamp = format!("{base}_{n}");
        n += 1;
    }
    stamp
}
