//! Game state and core simulation types
//!
//! One `GameState` per device, owned by the state machine in `tick`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use crate::consts::*;
use crate::link::Trajectory;

/// Current phase of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen and player selection
    Menu,
    /// This device owns the ball
    Playing,
    /// Peer owns the ball; listening on the link
    Waiting,
    /// Ball got past our paddle
    Lost,
    /// Peer reported a loss
    Won,
}

/// Which side the local player picked in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// Serves first
    One,
    /// Waits for the first serve
    Two,
}

impl PlayerSlot {
    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            PlayerSlot::One => "P1",
            PlayerSlot::Two => "P2",
        }
    }
}

/// The ball, simulated only while Playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    /// x = column (5 and -1 are exit sentinels), y = row
    pub pos: IVec2,
    /// Each component is -1 or +1
    pub vel: IVec2,
    /// Ticks since the last grid step
    pub tick_counter: u32,
}

impl Ball {
    /// Fresh ball at the serve edge heading towards the paddle
    pub fn serve(trajectory: Trajectory) -> Self {
        Self {
            pos: IVec2::new(SERVE_COLUMN, trajectory.row),
            vel: IVec2::new(1, trajectory.row_step),
            tick_counter: 0,
        }
    }

    /// Trajectory as seen at the serve edge
    pub fn trajectory(&self) -> Trajectory {
        Trajectory::new(self.pos.y, self.vel.y)
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::serve(Trajectory::new(SERVE_ROW, SERVE_ROW_STEP))
    }
}

/// Ball speed, as ticks per grid step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speed {
    pub tick_limit: u32,
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            tick_limit: TICK_LIMIT_START,
        }
    }
}

impl Speed {
    pub fn reset(&mut self) {
        self.tick_limit = TICK_LIMIT_START;
    }

    /// Speed up after a completed rally; never drops below the floor
    pub fn rally_completed(&mut self) {
        if self.tick_limit > TICK_LIMIT_FLOOR {
            self.tick_limit = (self.tick_limit - TICK_LIMIT_STEP).max(TICK_LIMIT_FLOOR);
        }
    }
}

/// Complete device state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Ball speed, shared by every rally of a match
    pub speed: Speed,
    /// Ball of the current rally
    pub ball: Ball,
    /// Local paddle
    pub paddle: Paddle,
    /// Menu selection, cleared when a match starts
    pub selection: Option<PlayerSlot>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Handoffs sent since the last menu
    pub rallies: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Power-up state: Menu, full-speed limit of 100, paddle centred at 4
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            speed: Speed::default(),
            ball: Ball::default(),
            paddle: Paddle::default(),
            selection: None,
            time_ticks: 0,
            rallies: 0,
        }
    }
}
