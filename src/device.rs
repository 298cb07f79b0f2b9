//! One device: game state plus the peripherals it drives
//!
//! Each scheduler iteration samples the switch, runs one game tick and
//! refreshes the display, in that order.

use crate::platform::{Display, NavSwitch, Pacer, SerialLink};
use crate::sim::{self, GamePhase, GameState, TickInput};

pub struct Device<D: Display, N: NavSwitch, L: SerialLink> {
    state: GameState,
    display: D,
    nav: N,
    link: L,
}

impl<D: Display, N: NavSwitch, L: SerialLink> Device<D, N, L> {
    /// Power up into the menu
    pub fn new(mut display: D, nav: N, mut link: L) -> Self {
        let mut state = GameState::new();
        sim::start(&mut state, &mut display, &mut link);
        Self {
            state,
            display,
            nav,
            link,
        }
    }

    /// One scheduler iteration, after the pacer tick
    pub fn update(&mut self) {
        self.nav.poll_events();
        let input = TickInput::sample(&self.nav);
        sim::tick(&mut self.state, &input, &mut self.display, &mut self.link);
        self.display.refresh();
    }

    /// Tick at the pacer's rate while `keep_running` says so
    pub fn run<P: Pacer>(&mut self, pacer: &mut P, mut keep_running: impl FnMut(&Self) -> bool) {
        while keep_running(self) {
            pacer.wait_for_tick();
            self.update();
        }
        log::info!("Stopped in {:?} after {} ticks", self.state.phase, self.state.time_ticks);
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut N {
        &mut self.nav
    }

    pub fn link(&self) -> &L {
        &self.link
    }
}
