//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped, clamped delta only
//! - Seeded RNG only
//! - No rendering, DOM, audio or storage dependencies
//!
//! Side effects are represented as [`state::GameEvent`]s the shell drains
//! after each tick.

pub mod quiz;
pub mod state;
pub mod tick;
pub mod world;

pub use quiz::{Op, Quiz};
pub use state::{
    Cloud, GameEvent, Phase, Platform, Player, QuizMode, SimState, Star, Stick,
};
pub use tick::{TickInput, submit_answer, tick};
