pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod moves;
pub mod play;
pub mod predictor;
pub mod random;
pub mod resolver;
pub mod results;
pub mod session;
pub mod simulate;
