// Library exports for the Battlesnake move selector
// This allows the replay tool and integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod evaluation;
pub mod grid;
pub mod pathfinder;
pub mod replay;
pub mod safety;
pub mod types;
