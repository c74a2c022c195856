pub mod cli;
pub mod config;
pub mod errors;
pub mod kubectl;
pub mod prompt;
pub mod secret;
