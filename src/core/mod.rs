//! Core engine module
//!
//! Contains the engine facade, frame clock, command queue, and worker threads.

mod commands;
mod debug;
mod engine;
mod time;
mod worker;

pub use commands::{CommandQueue, EngineCommand};
pub use debug::FrameStats;
pub use engine::{Engine, EngineConfig};
pub use time::Time;
pub use worker::Worker;
