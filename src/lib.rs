pub mod cards;
pub mod classify;
pub mod cli;
pub mod clock;
pub mod display;
pub mod error;
pub mod player;
pub mod rollout;
pub mod scoring;
pub mod select;
pub mod state;
pub mod table;
pub mod tuner;
