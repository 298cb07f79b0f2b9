//! IR Pong - two-device Pong on a 5x7 LED grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, paddle, game state machine)
//! - `link`: Single-byte trajectory codec shared by both devices
//! - `platform`: Display/input/pacer/serial collaborator traits and host backends
//! - `device`: One device's scheduler iteration
//! - `settings`: Host configuration

pub mod device;
pub mod link;
pub mod platform;
pub mod settings;
pub mod sim;

pub use device::Device;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Pacer rate (ticks per second)
    pub const PACER_RATE: u32 = 500;
    /// Scrolling text speed handed to the display
    pub const MESSAGE_RATE: u32 = 20;

    /// Grid dimensions: columns 0..=4, rows 0..=6
    pub const GRID_COLUMNS: i32 = 5;
    pub const GRID_ROWS: i32 = 7;
    pub const TOP_ROW: i32 = 0;
    pub const BOTTOM_ROW: i32 = GRID_ROWS - 1;

    /// Column a freshly seeded ball enters at
    pub const SERVE_COLUMN: i32 = 0;
    /// Row and vertical direction of the first serve from the menu
    pub const SERVE_ROW: i32 = 3;
    pub const SERVE_ROW_STEP: i32 = 1;

    /// The paddle lives in the last playfield column
    pub const PADDLE_COLUMN: i32 = 4;
    /// Ball reaching this column has passed the paddle
    pub const LOSS_COLUMN: i32 = 5;
    /// Paddle centre bounds; paddle covers rows centre-1 and centre
    pub const PADDLE_MIN_CENTRE: i32 = 1;
    pub const PADDLE_MAX_CENTRE: i32 = 6;
    pub const PADDLE_START_CENTRE: i32 = 4;

    /// Ticks per grid step at the start of a match
    pub const TICK_LIMIT_START: u32 = 100;
    /// Fastest ball speed
    pub const TICK_LIMIT_FLOOR: u32 = 10;
    /// Speed-up applied after every handoff
    pub const TICK_LIMIT_STEP: u32 = 5;
}

/// True if the cell is on the 5x7 grid
#[inline]
pub fn on_grid(pos: IVec2) -> bool {
    (0..consts::GRID_COLUMNS).contains(&pos.x) && (0..consts::GRID_ROWS).contains(&pos.y)
}
