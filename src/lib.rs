#[cfg(feature = "cli")]
pub mod cli;
pub mod errors;
pub mod export;
pub mod io;
pub mod models;
pub mod terminal;
pub mod utils;
