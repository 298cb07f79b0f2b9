//! In-process platform backends
//!
//! Used by the tests and for wiring two devices together in one process.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use glam::IVec2;

use super::{Display, NavDirection, NavSwitch, SerialLink, TextMode};
use crate::consts::{GRID_COLUMNS, GRID_ROWS};
use crate::on_grid;

/// 5x7 pixel grid held in memory
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    pixels: [[bool; GRID_ROWS as usize]; GRID_COLUMNS as usize],
    message: Option<(String, TextMode)>,
    refreshes: u64,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Off-grid cells read as off
    pub fn pixel(&self, pos: IVec2) -> bool {
        on_grid(pos) && self.pixels[pos.x as usize][pos.y as usize]
    }

    /// Lit cells in column-major order
    pub fn lit(&self) -> Vec<IVec2> {
        (0..GRID_COLUMNS)
            .flat_map(|x| (0..GRID_ROWS).map(move |y| IVec2::new(x, y)))
            .filter(|&p| self.pixel(p))
            .collect()
    }

    pub fn lit_count(&self) -> usize {
        self.lit().len()
    }

    pub fn message(&self) -> Option<(&str, TextMode)> {
        self.message.as_ref().map(|(m, mode)| (m.as_str(), *mode))
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Rows top to bottom, `#` for lit
    pub fn render(&self) -> Vec<String> {
        (0..GRID_ROWS)
            .map(|y| {
                (0..GRID_COLUMNS)
                    .map(|x| if self.pixel(IVec2::new(x, y)) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Display for FrameBuffer {
    fn set_pixel(&mut self, pos: IVec2, on: bool) {
        if on_grid(pos) {
            self.pixels[pos.x as usize][pos.y as usize] = on;
        }
    }

    fn clear(&mut self) {
        self.pixels = Default::default();
        self.message = None;
    }

    fn text(&mut self, message: &str, mode: TextMode) {
        self.message = Some((message.to_string(), mode));
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

type Queue = Rc<RefCell<VecDeque<u8>>>;

/// Byte link backed by shared queues
#[derive(Debug, Clone, Default)]
pub struct MemoryLink {
    inbox: Queue,
    outbox: Queue,
}

impl MemoryLink {
    /// Unconnected link; feed it with `feed` and inspect with `sent`
    pub fn new() -> Self {
        Self::default()
    }

    /// Two ends where each one's writes arrive at the other
    pub fn pair() -> (Self, Self) {
        let a = Self::new();
        let b = Self {
            inbox: a.outbox.clone(),
            outbox: a.inbox.clone(),
        };
        (a, b)
    }

    /// Queue an inbound byte
    pub fn feed(&self, byte: u8) {
        self.inbox.borrow_mut().push_back(byte);
    }

    /// Inbound bytes not yet read
    pub fn pending(&self) -> usize {
        self.inbox.borrow().len()
    }

    /// Outbound bytes the other end has not read yet
    pub fn sent(&self) -> Vec<u8> {
        self.outbox.borrow().iter().copied().collect()
    }
}

impl SerialLink for MemoryLink {
    fn byte_available(&mut self) -> bool {
        !self.inbox.borrow().is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.inbox.borrow_mut().pop_front().unwrap_or(0)
    }

    fn write_byte(&mut self, byte: u8) {
        self.outbox.borrow_mut().push_back(byte);
    }
}

/// Switch that replays queued presses, one batch per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedNav {
    script: VecDeque<Vec<NavDirection>>,
    current: HashSet<NavDirection>,
}

impl ScriptedNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presses reported by a future poll, after earlier batches
    pub fn queue(&mut self, presses: &[NavDirection]) {
        self.script.push_back(presses.to_vec());
    }
}

impl NavSwitch for ScriptedNav {
    fn poll_events(&mut self) {
        self.current = self.script.pop_front().unwrap_or_default().into_iter().collect();
    }

    fn pushed(&self, direction: NavDirection) -> bool {
        self.current.contains(&direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_pair_crosses_over() {
        let (mut a, mut b) = MemoryLink::pair();
        a.write_byte(b'a');
        a.write_byte(b'w');
        assert_eq!(a.sent(), vec![b'a', b'w']);
        assert!(b.byte_available());
        assert_eq!(b.read_byte(), b'a');
        assert_eq!(b.read_byte(), b'w');
        assert!(!b.byte_available());
        assert!(!a.byte_available());
    }

    #[test]
    fn test_draw_line_covers_paddle() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(IVec2::new(4, 4), IVec2::new(4, 3), true);
        assert_eq!(fb.lit(), vec![IVec2::new(4, 3), IVec2::new(4, 4)]);
        fb.draw_line(IVec2::new(0, 0), IVec2::new(4, 2), true);
        assert!(fb.pixel(IVec2::new(0, 0)) && fb.pixel(IVec2::new(4, 2)));
    }

    #[test]
    fn test_clear_drops_message() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(IVec2::new(2, 2), true);
        fb.set_pixel(IVec2::new(9, 9), true);
        fb.text("P1", TextMode::Step);
        assert_eq!(fb.render()[2], "..#..");
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
        assert_eq!(fb.message(), None);
    }

    #[test]
    fn test_scripted_nav() {
        let mut nav = ScriptedNav::new();
        nav.queue(&[NavDirection::West, NavDirection::Push]);
        nav.poll_events();
        assert!(nav.pushed(NavDirection::West) && nav.pushed(NavDirection::Push));
        nav.poll_events();
        assert!(!nav.pushed(NavDirection::West));
    }
}
