// Configuration module

mod loader;
mod settings;

pub use loader::load_config;
pub use settings::Config;
