pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod payoff;
pub mod storage;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use model::Amount;
