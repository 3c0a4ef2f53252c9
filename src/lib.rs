// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all build on these

#[macro_use]
extern crate rocket;

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod food;
pub mod handler;
pub mod move_set;
pub mod replay;
pub mod safety;
pub mod space;
pub mod types;
