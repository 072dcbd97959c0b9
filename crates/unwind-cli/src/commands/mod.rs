pub mod config;
pub mod dump;
pub mod ground;
pub mod reframe;
pub mod timed;
pub mod tools;
