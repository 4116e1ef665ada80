// ns-export invocation builders
//
// Two supported geometry exports, keyed by training method: gaussian splats
// for splatfacto models and pointclouds for nerfacto models. Both validate
// the model config before spawning anything and report a plain boolean.

use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::errors;
use crate::runner::{fresh_log_path, CommandRunner, Invocation};
use crate::toolchain::{bool_flag, EXPORT_BIN};

use super::PointcloudParams;

/// Argument list for `ns-export gaussian-splat` (flag order is part of the
/// wire contract with the nerfstudio CLI).
pub fn gaussian_splat_args(config: &Path, output_dir: &Path) -> Vec<String> {
    vec![
        "gaussian-splat".to_string(),
        "--load-config".to_string(),
        config.display().to_string(),
        "--output-dir".to_string(),
        output_dir.display().to_string(),
    ]
}

/// Argument list for `ns-export pointcloud`.
pub fn pointcloud_args(config: &Path, output_dir: &Path, params: &PointcloudParams) -> Vec<String> {
    vec![
        "pointcloud".to_string(),
        "--load-config".to_string(),
        config.display().to_string(),
        "--output-dir".to_string(),
        output_dir.display().to_string(),
        "--num-points".to_string(),
        params.num_points.to_string(),
        "--remove-outliers".to_string(),
        bool_flag(params.remove_outliers).to_string(),
        "--normal-method".to_string(),
        params.normal_method.clone(),
        "--save-world-frame".to_string(),
        bool_flag(params.save_world_frame).to_string(),
    ]
}

/// Export a gaussian splat from a trained splatfacto model.
pub fn export_gaussian_splat(
    runner: &dyn CommandRunner,
    config: &Path,
    output_dir: &Path,
    env_label: &str,
) -> bool {
    if !config.exists() {
        error!("{}", errors::config_not_found_error(config));
        return false;
    }
    if let Err(err) = fs::create_dir_all(output_dir) {
        error!(
            "Failed to create output directory {}: {err}",
            output_dir.display()
        );
        return false;
    }

    let log_path = fresh_log_path(output_dir, "gaussian_export");
    let invocation = Invocation::new(
        "GAUSSIAN SPLAT EXPORT",
        EXPORT_BIN,
        gaussian_splat_args(config, output_dir),
        &log_path,
    )
    .with_detail("Config", config.display().to_string())
    .with_detail("Output Directory", output_dir.display().to_string())
    .with_env_label(env_label);

    info!("Starting gaussian splat export...");
    info!("Config: {}", config.display());
    info!("Output directory: {}", output_dir.display());
    info!("Command: {}", invocation.command_line());

    let record = runner.run(&invocation);

    info!(
        "Gaussian splat export completed in {:.2}s",
        record.duration_seconds()
    );
    info!("Export logs saved to: {}", log_path.display());

    if record.succeeded() {
        info!(
            "Gaussian splat successfully exported to: {}",
            output_dir.display()
        );
        report_ply_files(output_dir);
    }
    record.succeeded()
}

/// Export a pointcloud from a trained nerfacto model.
pub fn export_pointcloud(
    runner: &dyn CommandRunner,
    config: &Path,
    output_dir: &Path,
    params: &PointcloudParams,
    env_label: &str,
) -> bool {
    if !config.exists() {
        error!("{}", errors::config_not_found_error(config));
        return false;
    }
    if let Err(err) = fs::create_dir_all(output_dir) {
        error!(
            "Failed to create output directory {}: {err}",
            output_dir.display()
        );
        return false;
    }

    let log_path = fresh_log_path(output_dir, "pointcloud_export");
    let invocation = Invocation::new(
        "POINTCLOUD EXPORT",
        EXPORT_BIN,
        pointcloud_args(config, output_dir, params),
        &log_path,
    )
    .with_detail("Config", config.display().to_string())
    .with_detail("Output Directory", output_dir.display().to_string())
    .with_detail("Number of points", params.num_points.to_string())
    .with_detail("Remove outliers", bool_flag(params.remove_outliers).to_string())
    .with_detail("Normal method", params.normal_method.clone())
    .with_detail("Save world frame", bool_flag(params.save_world_frame).to_string())
    .with_env_label(env_label);

    info!("Starting pointcloud export...");
    info!("Config: {}", config.display());
    info!("Output directory: {}", output_dir.display());
    info!("Number of points: {}", params.num_points);
    info!("Remove outliers: {}", params.remove_outliers);
    info!("Normal method: {}", params.normal_method);
    info!("Save world frame: {}", params.save_world_frame);
    info!("Command: {}", invocation.command_line());

    let record = runner.run(&invocation);

    info!(
        "Pointcloud export completed in {:.2}s",
        record.duration_seconds()
    );
    info!("Export logs saved to: {}", log_path.display());

    if record.succeeded() {
        info!(
            "Pointcloud successfully exported to: {}",
            output_dir.display()
        );
        report_ply_files(output_dir);
    }
    record.succeeded()
}

/// List any point-data files the export produced. Informational only.
fn report_ply_files(output_dir: &Path) {
    let pattern = output_dir.join("*.ply");
    let paths = match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => paths,
        Err(err) => {
            warn!("Failed to scan {} for PLY files: {err}", output_dir.display());
            return;
        }
    };
    let names: Vec<String> = paths
        .filter_map(|entry| entry.ok())
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    if !names.is_empty() {
        info!("Generated PLY files: {:?}", names);
    }
}
