//! Terminal backend: the LED grid drawn with crossterm, keyboard as navswitch
//!
//! Keys: arrows / WASD / hjkl move, Enter or Space pushes, Esc, q or Ctrl-C quits.

use std::collections::HashSet;
use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use glam::IVec2;

use super::memory::FrameBuffer;
use super::{Display, NavDirection, NavSwitch, TextMode};
use crate::consts::{GRID_COLUMNS, GRID_ROWS};

/// Characters of a scrolling message visible at once
const SCROLL_WINDOW: usize = 8;
const LIT: &str = "██";
const UNLIT: &str = "··";

/// Grid rendered at the top-left of the terminal
pub struct TerminalDisplay {
    writer: BufWriter<Stdout>,
    frame: FrameBuffer,
    dirty: bool,
    /// Refreshes per scrolled character
    ticks_per_char: u32,
    scroll_ticks: u32,
    scroll_offset: usize,
}

impl TerminalDisplay {
    pub fn new(ticks_per_char: u32) -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
            frame: FrameBuffer::new(),
            dirty: true,
            ticks_per_char: ticks_per_char.max(1),
            scroll_ticks: 0,
            scroll_offset: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn message_line(&self) -> String {
        match self.frame.message() {
            None => String::new(),
            Some((message, TextMode::Step)) => message.to_string(),
            Some((message, TextMode::Scroll)) => {
                let tape: Vec<char> = format!("{message}   ").chars().collect();
                (0..SCROLL_WINDOW.min(tape.len()))
                    .map(|i| tape[(self.scroll_offset + i) % tape.len()])
                    .collect()
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        for y in 0..GRID_ROWS {
            queue!(self.writer, MoveTo(0, y as u16))?;
            for x in 0..GRID_COLUMNS {
                if self.frame.pixel(IVec2::new(x, y)) {
                    queue!(self.writer, SetForegroundColor(Color::Red), Print(LIT))?;
                } else {
                    queue!(self.writer, SetForegroundColor(Color::DarkGrey), Print(UNLIT))?;
                }
            }
        }
        let line = self.message_line();
        queue!(
            self.writer,
            MoveTo(0, GRID_ROWS as u16 + 1),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(line),
            ResetColor
        )?;
        self.writer.flush()
    }
}

impl Display for TerminalDisplay {
    fn set_pixel(&mut self, pos: IVec2, on: bool) {
        if self.frame.pixel(pos) != on {
            self.frame.set_pixel(pos, on);
            self.dirty = true;
        }
    }

    fn clear(&mut self) {
        self.frame.clear();
        self.dirty = true;
    }

    fn text(&mut self, message: &str, mode: TextMode) {
        self.frame.text(message, mode);
        self.scroll_ticks = 0;
        self.scroll_offset = 0;
        self.dirty = true;
    }

    fn refresh(&mut self) {
        if matches!(self.frame.message(), Some((_, TextMode::Scroll))) {
            self.scroll_ticks += 1;
            if self.scroll_ticks >= self.ticks_per_char {
                self.scroll_ticks = 0;
                self.scroll_offset = self.scroll_offset.wrapping_add(1);
                self.dirty = true;
            }
        }
        if !self.dirty {
            return;
        }
        match self.draw() {
            Ok(()) => self.dirty = false,
            Err(e) => log::error!("Terminal draw failed: {e}"),
        }
    }
}

/// Keyboard read as an edge-triggered five-way switch
#[derive(Debug, Default)]
pub struct KeyboardNav {
    pressed: HashSet<NavDirection>,
    quit: bool,
}

impl KeyboardNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Esc, q or Ctrl-C seen
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn map_key(code: KeyCode) -> Option<NavDirection> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(NavDirection::North),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(NavDirection::South),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(NavDirection::East),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(NavDirection::West),
            KeyCode::Enter | KeyCode::Char(' ') => Some(NavDirection::Push),
            _ => None,
        }
    }
}

impl NavSwitch for KeyboardNav {
    fn poll_events(&mut self) {
        self.pressed.clear();
        // Drain everything queued since the last tick without blocking
        while event::poll(Duration::ZERO).unwrap_or(false) {
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => key,
                Ok(_) => continue,
                Err(e) => {
                    log::error!("Keyboard read failed: {e}");
                    break;
                }
            };
            let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'));
            if ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.quit = true;
            } else if let Some(direction) = Self::map_key(key.code) {
                self.pressed.insert(direction);
            }
        }
    }

    fn pushed(&self, direction: NavDirection) -> bool {
        self.pressed.contains(&direction)
    }
}
