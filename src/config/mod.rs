//! Configuration module

mod routes;

pub use routes::ConfigError;
pub use routes::HeadConfig;
pub use routes::RouteOptions;
pub use routes::RoutesConfig;
pub use routes::CONFIG_FILE;
