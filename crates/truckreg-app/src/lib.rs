//! Application service layer - config, session, registry use cases

pub mod config;
pub mod logging;
pub mod registry;
pub mod repository;
pub mod session;

pub use config::Config;
pub use registry::Registry;
pub use session::Session;
