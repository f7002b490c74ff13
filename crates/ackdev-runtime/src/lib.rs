pub mod config;
pub mod error;
pub mod generator;
pub mod model;

pub use config::{KeyBindings, SessionSettings, Settings, resolve_settings_path};
pub use error::{Error, Result};
pub use generator::{generator_path, initial_generator, load_generator, write_generator};
pub use model::{ManifestModelProvider, ModelProvider, list_services};
