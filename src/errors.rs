// User-friendly error messages
//
// Converts failure conditions into actionable console messages that point
// at the usual fixes.

use std::path::Path;

/// Format a conda environment mismatch with activation suggestions
pub fn environment_mismatch_error(expected: &str, active: &str) -> String {
    let active_desc = if active.is_empty() {
        "no environment is active".to_string()
    } else {
        format!("active environment is '{}'", active)
    };
    format!(
        "Wrong conda environment: expected '{}', {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Activate the toolchain environment:\n\
           \x1b[36mconda activate {}\x1b[0m\n\n\
        2. Or skip the check if ns-train/ns-export are already on PATH:\n\
           \x1b[36mnerfctl --skip-env-check ...\x1b[0m",
        expected, active_desc, expected
    )
}

/// Format a missing model config error for export commands
pub fn config_not_found_error(path: &Path) -> String {
    format!(
        "Config file not found: {}\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Training has not produced a model yet\n\
        • Wrong --load-config path\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        \x1b[36mfind <base_dir>/nerf/nerf_data -name config.yml\x1b[0m",
        path.display()
    )
}

/// Format a missing trained-model descriptor error for post-training export
pub fn descriptor_missing_error(path: &Path) -> String {
    format!(
        "Config file not found at: {}\n\
        Cannot proceed with geometry export.\n\n\
        \x1b[1;33mPossible causes:\x1b[0m\n\
        • Training used a --timestamp other than 'run'\n\
        • The run directory was moved or cleaned",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_environment_mismatch_suggests_activation() {
        let msg = environment_mismatch_error("nerfstudio", "base");
        assert!(msg.contains("conda activate nerfstudio"));
        assert!(msg.contains("'base'"));
        assert!(msg.contains("--skip-env-check"));
    }

    #[test]
    fn test_environment_mismatch_handles_no_active_env() {
        let msg = environment_mismatch_error("nerfstudio", "");
        assert!(msg.contains("no environment is active"));
    }

    #[test]
    fn test_config_not_found_names_the_path() {
        let path = PathBuf::from("/tmp/run/config.yml");
        let msg = config_not_found_error(&path);
        assert!(msg.contains("/tmp/run/config.yml"));
        assert!(msg.contains("find <base_dir>"));
    }

    #[test]
    fn test_descriptor_missing_mentions_timestamp_convention() {
        let path = PathBuf::from("/tmp/exp/splatfacto/run/config.yml");
        let msg = descriptor_missing_error(&path);
        assert!(msg.contains("Cannot proceed with geometry export"));
        assert!(msg.contains("--timestamp"));
    }
}
