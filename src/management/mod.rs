mod config;

pub use config::ConfigManager;
pub use config::ConfigWriter;
