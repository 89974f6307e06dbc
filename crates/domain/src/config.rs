pub mod debounce;
pub mod duration;
pub mod errors;
pub mod logging;
pub mod privileges;
pub mod root;
pub mod server;
pub mod store;
pub mod upstream;

pub use debounce::DebounceConfig;
pub use duration::parse_duration;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use privileges::PrivilegeConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use store::StoreConfig;
pub use upstream::{UpstreamConfig, DEFAULT_UPSTREAM};
