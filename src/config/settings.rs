// Configuration structs

use crate::export::PointcloudParams;

#[derive(Debug, Clone)]
pub struct Config {
    /// Conda environment the toolchain lives in
    pub conda_env: String,

    /// Default dataparser selector for training
    pub dataparser: String,

    /// Value for ns-train's --logging.steps-per-log flag
    pub steps_per_log: u32,

    /// Value for ns-train's --logging.local-writer.max-log-size flag
    pub max_log_size: u32,

    /// Defaults for the nerfacto pointcloud export
    pub pointcloud: PointcloudParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conda_env: "nerfstudio".to_string(),
            dataparser: "nerfstudio-data".to_string(),
            steps_per_log: 100,
            max_log_size: 0,
            pointcloud: PointcloudParams::default(),
        }
    }
}
