pub mod aws;
pub mod config;
pub mod logging;

pub use aws::load_sdk_config;
pub use self::config::{Config, Environment, InstanceConfig};
pub use logging::init_logging;
