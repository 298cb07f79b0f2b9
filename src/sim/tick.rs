//! Fixed-rate game tick
//!
//! One call per scheduler tick. Each phase has a handler that returns the
//! next phase; entry actions for the new phase run in the same tick.

use serde::{Deserialize, Serialize};

use super::collision::{StepOutcome, advance, step_due};
use super::state::{Ball, GamePhase, GameState, PlayerSlot};
use crate::link::{LinkSymbol, WIN_BYTE, decode, encode};
use crate::platform::{Display, NavDirection, NavSwitch, SerialLink, TextMode};

pub const TITLE_TEXT: &str = "PONG!! ";
pub const LOSE_TEXT: &str = "YOU LOSE";
pub const WIN_TEXT: &str = "YOU WIN";

/// Switch edges seen this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Paddle up
    pub north: bool,
    /// Paddle down
    pub south: bool,
    /// Select player 2
    pub east: bool,
    /// Select player 1
    pub west: bool,
    /// Confirm
    pub push: bool,
}

impl TickInput {
    /// Read the edges of an already-polled switch
    pub fn sample<N: NavSwitch>(nav: &N) -> Self {
        Self {
            north: nav.pushed(NavDirection::North),
            south: nav.pushed(NavDirection::South),
            east: nav.pushed(NavDirection::East),
            west: nav.pushed(NavDirection::West),
            push: nav.pushed(NavDirection::Push),
        }
    }

    /// Input with a single direction pushed
    pub fn pushed(direction: NavDirection) -> Self {
        let mut input = Self::default();
        match direction {
            NavDirection::North => input.north = true,
            NavDirection::South => input.south = true,
            NavDirection::East => input.east = true,
            NavDirection::West => input.west = true,
            NavDirection::Push => input.push = true,
        }
        input
    }
}

/// Run the power-up entry actions for the initial phase
pub fn start<D: Display, L: SerialLink>(state: &mut GameState, display: &mut D, link: &mut L) {
    log::info!("Starting in {:?}", state.phase);
    enter(state, display, link);
}

/// Advance the device by one scheduler tick
pub fn tick<D: Display, L: SerialLink>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
    link: &mut L,
) {
    state.time_ticks += 1;

    let next = match state.phase {
        GamePhase::Menu => menu(state, input, display),
        GamePhase::Playing => play(state, input, display, link),
        GamePhase::Waiting => wait(state, input, display, link),
        GamePhase::Lost | GamePhase::Won => {
            if input.push {
                GamePhase::Menu
            } else {
                state.phase
            }
        }
    };

    if next != state.phase {
        transition(state, next, display, link);
    }
}

fn transition<D: Display, L: SerialLink>(
    state: &mut GameState,
    next: GamePhase,
    display: &mut D,
    link: &mut L,
) {
    log::info!(
        "{:?} -> {:?} at tick {}",
        state.phase,
        next,
        state.time_ticks
    );
    if state.phase == GamePhase::Playing {
        display.set_pixel(state.ball.pos, false);
    }
    state.phase = next;
    enter(state, display, link);
}

/// Entry actions of the current phase
fn enter<D: Display, L: SerialLink>(state: &mut GameState, display: &mut D, link: &mut L) {
    display.clear();
    match state.phase {
        GamePhase::Menu => {
            state.speed.reset();
            state.selection = None;
            state.rallies = 0;
            display.text(TITLE_TEXT, TextMode::Scroll);
        }
        GamePhase::Playing => {
            display.set_pixel(state.ball.pos, true);
        }
        GamePhase::Waiting => {}
        GamePhase::Lost => {
            link.write_byte(WIN_BYTE);
            log::info!("Lost after {} rallies", state.rallies);
            display.text(LOSE_TEXT, TextMode::Scroll);
        }
        GamePhase::Won => {
            display.text(WIN_TEXT, TextMode::Scroll);
        }
    }
}

fn menu<D: Display>(state: &mut GameState, input: &TickInput, display: &mut D) -> GamePhase {
    if input.west {
        select(state, PlayerSlot::One, display);
    }
    if input.east {
        select(state, PlayerSlot::Two, display);
    }
    if !input.push {
        return GamePhase::Menu;
    }

    match state.selection {
        Some(PlayerSlot::One) => {
            state.ball = Ball::default();
            GamePhase::Playing
        }
        Some(PlayerSlot::Two) => GamePhase::Waiting,
        None => GamePhase::Menu,
    }
}

fn select<D: Display>(state: &mut GameState, slot: PlayerSlot, display: &mut D) {
    state.selection = Some(slot);
    display.text(slot.label(), TextMode::Step);
}

/// Redraw the paddle and apply this tick's moves
fn paddle_controls<D: Display>(state: &mut GameState, input: &TickInput, display: &mut D) {
    state.paddle.draw(display);
    if input.north {
        state.paddle.move_up(display);
    }
    if input.south {
        state.paddle.move_down(display);
    }
}

fn play<D: Display, L: SerialLink>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
    link: &mut L,
) -> GamePhase {
    paddle_controls(state, input, display);

    if !step_due(&mut state.ball, &state.speed) {
        return GamePhase::Playing;
    }

    display.set_pixel(state.ball.pos, false);
    match advance(&mut state.ball, &state.paddle) {
        StepOutcome::Moved => {
            display.set_pixel(state.ball.pos, true);
            GamePhase::Playing
        }
        StepOutcome::Lost => GamePhase::Lost,
        StepOutcome::Handoff(trajectory) => {
            match encode(trajectory) {
                Ok(byte) => {
                    log::debug!("Handoff {:?} as '{}'", trajectory, byte as char);
                    link.write_byte(byte);
                }
                Err(e) => log::error!("Handoff not sent: {e}"),
            }
            state.speed.rally_completed();
            state.rallies += 1;
            GamePhase::Waiting
        }
    }
}

/// The only handler that reads the link
fn wait<D: Display, L: SerialLink>(
    state: &mut GameState,
    input: &TickInput,
    display: &mut D,
    link: &mut L,
) -> GamePhase {
    paddle_controls(state, input, display);

    if !link.byte_available() {
        return GamePhase::Waiting;
    }

    let byte = link.read_byte();
    match decode(byte) {
        Ok(LinkSymbol::Trajectory(trajectory)) => {
            log::debug!("Received '{}' {:?}", byte as char, trajectory);
            state.ball = Ball::serve(trajectory);
            GamePhase::Playing
        }
        Ok(LinkSymbol::Win) => GamePhase::Won,
        Err(e) => {
            log::warn!("Discarding {e}");
            GamePhase::Waiting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::memory::{FrameBuffer, MemoryLink};
    use glam::IVec2;

    struct Rig {
        state: GameState,
        fb: FrameBuffer,
        link: MemoryLink,
    }

    impl Rig {
        fn new() -> Self {
            let mut rig = Self {
                state: GameState::new(),
                fb: FrameBuffer::new(),
                link: MemoryLink::new(),
            };
            start(&mut rig.state, &mut rig.fb, &mut rig.link);
            rig
        }

        fn tick(&mut self, input: TickInput) {
            tick(&mut self.state, &input, &mut self.fb, &mut self.link);
        }

        fn press(&mut self, direction: NavDirection) {
            self.tick(TickInput::pushed(direction));
        }

        fn idle(&mut self) {
            self.tick(TickInput::default());
        }

        /// Put the ball one tick away from its next step
        fn ball_due(&mut self, column: i32, row: i32, column_step: i32, row_step: i32) {
            self.state.phase = GamePhase::Playing;
            self.state.ball = Ball {
                pos: IVec2::new(column, row),
                vel: IVec2::new(column_step, row_step),
                tick_counter: self.state.speed.tick_limit - 1,
            };
        }
    }

    #[test]
    fn test_menu_shows_title() {
        let rig = Rig::new();
        assert_eq!(rig.fb.message(), Some((TITLE_TEXT, TextMode::Scroll)));
    }

    #[test]
    fn test_menu_push_without_selection_stays() {
        let mut rig = Rig::new();
        rig.press(NavDirection::Push);
        assert_eq!(rig.state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_player_one_serves() {
        let mut rig = Rig::new();
        rig.press(NavDirection::West);
        assert_eq!(rig.fb.message(), Some(("P1", TextMode::Step)));
        rig.press(NavDirection::Push);

        assert_eq!(rig.state.phase, GamePhase::Playing);
        assert_eq!(rig.state.ball.pos, IVec2::new(SERVE_COLUMN, SERVE_ROW));
        assert!(rig.fb.pixel(IVec2::new(0, 3)));
        assert_eq!(rig.fb.message(), None);
    }

    #[test]
    fn test_menu_player_two_waits() {
        let mut rig = Rig::new();
        rig.press(NavDirection::West);
        rig.press(NavDirection::East);
        rig.press(NavDirection::Push);
        assert_eq!(rig.state.phase, GamePhase::Waiting);
    }

    #[test]
    fn test_waiting_decodes_trajectory() {
        let mut rig = Rig::new();
        rig.state.phase = GamePhase::Waiting;
        rig.link.feed(b'g');
        rig.idle();

        assert_eq!(rig.state.phase, GamePhase::Playing);
        assert_eq!(rig.state.ball.pos, IVec2::new(0, 6));
        assert_eq!(rig.state.ball.vel, IVec2::new(1, 1));
        assert!(rig.fb.pixel(IVec2::new(0, 6)));
    }

    #[test]
    fn test_waiting_win_signal() {
        let mut rig = Rig::new();
        rig.state.phase = GamePhase::Waiting;
        rig.state.paddle = crate::sim::Paddle::at(1);
        rig.link.feed(b'w');
        rig.idle();

        assert_eq!(rig.state.phase, GamePhase::Won);
        assert_eq!(rig.fb.message(), Some((WIN_TEXT, TextMode::Scroll)));

        rig.press(NavDirection::Push);
        assert_eq!(rig.state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_waiting_discards_unknown_byte() {
        let mut rig = Rig::new();
        rig.state.phase = GamePhase::Waiting;
        rig.link.feed(b'z');
        rig.link.feed(b'c');

        rig.idle();
        assert_eq!(rig.state.phase, GamePhase::Waiting);
        assert_eq!(rig.link.pending(), 1);

        rig.idle();
        assert_eq!(rig.state.phase, GamePhase::Playing);
        assert_eq!(rig.state.ball.pos, IVec2::new(0, 3));
        assert_eq!(rig.state.ball.vel.y, -1);
    }

    #[test]
    fn test_playing_leaves_link_unread() {
        let mut rig = Rig::new();
        rig.press(NavDirection::West);
        rig.press(NavDirection::Push);
        rig.link.feed(b'w');
        for _ in 0..10 {
            rig.idle();
        }
        assert_eq!(rig.state.phase, GamePhase::Playing);
        assert_eq!(rig.link.pending(), 1);
    }

    #[test]
    fn test_ball_steps_once_per_tick_limit() {
        let mut rig = Rig::new();
        rig.press(NavDirection::West);
        rig.press(NavDirection::Push);
        for _ in 0..TICK_LIMIT_START - 1 {
            rig.idle();
        }
        assert_eq!(rig.state.ball.pos, IVec2::new(0, 3));
        rig.idle();
        assert_eq!(rig.state.ball.pos, IVec2::new(1, 4));
        assert!(rig.fb.pixel(IVec2::new(1, 4)));
        assert!(!rig.fb.pixel(IVec2::new(0, 3)));
    }

    #[test]
    fn test_paddle_moves_every_tick() {
        let mut rig = Rig::new();
        rig.press(NavDirection::East);
        rig.press(NavDirection::Push);
        rig.press(NavDirection::North);
        assert_eq!(rig.state.paddle.centre(), 3);
        assert!(rig.fb.pixel(IVec2::new(4, 2)));
        assert!(!rig.fb.pixel(IVec2::new(4, 4)));

        for _ in 0..10 {
            rig.press(NavDirection::South);
        }
        assert_eq!(rig.state.paddle.centre(), 6);
    }

    #[test]
    fn test_paddle_idle_when_lost() {
        let mut rig = Rig::new();
        rig.state.phase = GamePhase::Lost;
        rig.press(NavDirection::North);
        assert_eq!(rig.state.paddle.centre(), PADDLE_START_CENTRE);
    }

    #[test]
    fn test_miss_loses_and_signals_once() {
        let mut rig = Rig::new();
        rig.ball_due(4, 1, 1, 1);
        rig.idle();

        assert_eq!(rig.state.phase, GamePhase::Lost);
        assert_eq!(rig.link.sent(), vec![b'w']);
        assert_eq!(rig.fb.message(), Some((LOSE_TEXT, TextMode::Scroll)));

        for _ in 0..5 {
            rig.idle();
        }
        assert_eq!(rig.link.sent(), vec![b'w']);

        rig.press(NavDirection::Push);
        assert_eq!(rig.state.phase, GamePhase::Menu);
        assert_eq!(rig.state.speed.tick_limit, TICK_LIMIT_START);
    }

    #[test]
    fn test_handoff_sends_symbol_and_speeds_up() {
        let mut rig = Rig::new();
        rig.ball_due(0, 3, -1, 1);
        rig.idle();

        assert_eq!(rig.state.phase, GamePhase::Waiting);
        assert_eq!(rig.link.sent(), vec![b'i']);
        assert_eq!(rig.state.speed.tick_limit, 95);
        assert_eq!(rig.fb.lit_count(), 0);
    }

    #[test]
    fn test_speed_floor_after_eighteen_handoffs() {
        let mut rig = Rig::new();
        let mut last = rig.state.speed.tick_limit;
        for _ in 0..18 {
            rig.ball_due(0, 3, -1, 1);
            rig.idle();
            assert_eq!(rig.state.phase, GamePhase::Waiting);
            assert!(rig.state.speed.tick_limit <= last);
            last = rig.state.speed.tick_limit;
        }
        assert_eq!(rig.state.speed.tick_limit, TICK_LIMIT_FLOOR);

        for _ in 0..5 {
            rig.ball_due(0, 3, -1, 1);
            rig.idle();
        }
        assert_eq!(rig.state.speed.tick_limit, TICK_LIMIT_FLOOR);
        assert_eq!(rig.state.rallies, 23);
    }

    #[test]
    fn test_paddle_return_then_handoff() {
        let mut rig = Rig::new();
        rig.ball_due(3, 4, 1, -1);
        rig.idle();
        // Upper edge: (4,3) -> row 5, column back to 2
        assert_eq!(rig.state.ball.pos, IVec2::new(2, 5));
        assert!(rig.fb.pixel(IVec2::new(2, 5)));

        for _ in 0..3 * TICK_LIMIT_START {
            rig.idle();
        }
        assert_eq!(rig.state.phase, GamePhase::Waiting);
        // (1,6) (0,7->5) (-1,4) heading up
        assert_eq!(rig.link.sent(), vec![b'b']);
    }
}
