pub mod config;
pub mod core;
pub mod feedback;
pub mod game_formatter;
pub mod input;
pub mod letters;
pub mod session;
pub mod share;
