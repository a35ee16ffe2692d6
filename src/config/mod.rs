//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::PayplanPaths;
pub use settings::Settings;
