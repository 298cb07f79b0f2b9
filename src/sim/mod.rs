//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per scheduler tick
//! - No clocks, threads or randomness
//! - Hardware reached only through the `platform` traits passed in

pub mod collision;
pub mod paddle;
pub mod state;
pub mod tick;

pub use collision::{StepOutcome, advance, step_due};
pub use paddle::Paddle;
pub use state::{Ball, GamePhase, GameState, PlayerSlot, Speed};
pub use tick::{LOSE_TEXT, TITLE_TEXT, TickInput, WIN_TEXT, start, tick};
