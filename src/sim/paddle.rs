//! Paddle controller
//!
//! The paddle is two pixels tall in `PADDLE_COLUMN`, covering rows
//! `centre - 1` and `centre`. Moves past either end are dropped silently.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    centre: i32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            centre: PADDLE_START_CENTRE,
        }
    }
}

impl Paddle {
    /// Paddle at `centre`, clamped into range
    pub fn at(centre: i32) -> Self {
        Self {
            centre: centre.clamp(PADDLE_MIN_CENTRE, PADDLE_MAX_CENTRE),
        }
    }

    pub fn centre(&self) -> i32 {
        self.centre
    }

    /// Lower-numbered cell (`centre - 1`)
    pub fn top(&self) -> IVec2 {
        IVec2::new(PADDLE_COLUMN, self.centre - 1)
    }

    /// `centre` cell
    pub fn bottom(&self) -> IVec2 {
        IVec2::new(PADDLE_COLUMN, self.centre)
    }

    pub fn draw<D: Display>(&self, display: &mut D) {
        display.draw_line(self.bottom(), self.top(), true);
    }

    pub fn erase<D: Display>(&self, display: &mut D) {
        display.draw_line(self.bottom(), self.top(), false);
    }

    /// Move one row towards row 0. Returns false at the top bound.
    pub fn move_up<D: Display>(&mut self, display: &mut D) -> bool {
        self.shift(-1, display)
    }

    /// Move one row towards row 6. Returns false at the bottom bound.
    pub fn move_down<D: Display>(&mut self, display: &mut D) -> bool {
        self.shift(1, display)
    }

    fn shift<D: Display>(&mut self, delta: i32, display: &mut D) -> bool {
        let next = self.centre + delta;
        if !(PADDLE_MIN_CENTRE..=PADDLE_MAX_CENTRE).contains(&next) {
            return false;
        }
        self.erase(display);
        self.centre = next;
        self.draw(display);
        true
    }
}
