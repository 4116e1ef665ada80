// nerfctl - nerfstudio training and export automation
// Library exports

pub mod config;
pub mod errors;
pub mod export;
pub mod runner;
pub mod toolchain;
pub mod train;
