//! Platform abstraction layer
//!
//! The core only talks to hardware through these traits:
//! - `Display`: LED grid pixels and message text
//! - `NavSwitch`: edge-triggered five-way switch
//! - `Pacer`: fixed-rate scheduling tick
//! - `SerialLink`: one-directional byte link to the peer device
//!
//! Backends: `memory` (in-process, for tests), `terminal` (crossterm),
//! `udp` (datagram link), `pacer` (sleep-based).

pub mod memory;
pub mod pacer;
pub mod terminal;
pub mod udp;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// How the display presents a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextMode {
    /// Scroll continuously across the grid
    Scroll,
    /// Show one character at a time
    Step,
}

/// LED grid
pub trait Display {
    /// Turn one pixel on or off. Off-grid cells are ignored.
    fn set_pixel(&mut self, pos: IVec2, on: bool);

    /// Turn every pixel off and drop any message text.
    fn clear(&mut self);

    /// Set every pixel on the straight line from `from` to `to` (inclusive, Bresenham).
    fn draw_line(&mut self, from: IVec2, to: IVec2, on: bool) {
        let delta = to - from;
        let step = delta.signum();
        let (dx, dy) = (delta.x.abs(), -delta.y.abs());
        let mut err = dx + dy;
        let mut p = from;
        loop {
            self.set_pixel(p, on);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += step.x;
            }
            if e2 <= dx {
                err += dx;
                p.y += step.y;
            }
        }
    }

    /// Show a message in place of the pixel grid.
    fn text(&mut self, message: &str, mode: TextMode);

    /// Push the current frame out to the hardware.
    fn refresh(&mut self);
}

/// Switch directions, plus the centre push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavDirection {
    North,
    South,
    East,
    West,
    Push,
}

/// Five-way navigation switch
pub trait NavSwitch {
    /// Sample the switch; edges are reported by `pushed` until the next poll.
    fn poll_events(&mut self);

    /// True if `direction` went down since the previous poll.
    fn pushed(&self, direction: NavDirection) -> bool;
}

/// Fixed-rate scheduler
pub trait Pacer {
    /// Block until the next tick.
    fn wait_for_tick(&mut self);
}

/// Unbuffered byte link, one byte per message
pub trait SerialLink {
    fn byte_available(&mut self) -> bool;

    /// Only meaningful after `byte_available` returned true.
    fn read_byte(&mut self) -> u8;

    fn write_byte(&mut self, byte: u8);
}
