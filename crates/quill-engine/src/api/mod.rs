pub mod game;
pub mod sound;
pub mod types;
