// Pointcloud export tunables

use serde::{Deserialize, Serialize};

/// Tunables for `ns-export pointcloud`, threaded explicitly through every
/// call site rather than living in process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointcloudParams {
    /// Number of points to sample (default: 1,000,000)
    #[serde(default = "default_num_points")]
    pub num_points: u64,

    /// Remove statistical outliers from the cloud (default: true)
    #[serde(default = "default_remove_outliers")]
    pub remove_outliers: bool,

    /// Surface-normal estimation strategy (default: "open3d")
    #[serde(default = "default_normal_method")]
    pub normal_method: String,

    /// Keep the cloud in world-frame coordinates (default: false)
    #[serde(default)]
    pub save_world_frame: bool,
}

fn default_num_points() -> u64 {
    1_000_000
}

fn default_remove_outliers() -> bool {
    true
}

fn default_normal_method() -> String {
    "open3d".to_string()
}

impl Default for PointcloudParams {
    fn default() -> Self {
        Self {
            num_points: default_num_points(),
            remove_outliers: default_remove_outliers(),
            normal_method: default_normal_method(),
            save_world_frame: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = PointcloudParams::default();
        assert_eq!(params.num_points, 1_000_000);
        assert!(params.remove_outliers);
        assert_eq!(params.normal_method, "open3d");
        assert!(!params.save_world_frame);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let params: PointcloudParams = toml::from_str("num_points = 500").unwrap();
        assert_eq!(params.num_points, 500);
        assert!(params.remove_outliers);
        assert_eq!(params.normal_method, "open3d");
    }
}
