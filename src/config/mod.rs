//! Configuration — optional user settings file.

pub mod settings;

pub use settings::Settings;
