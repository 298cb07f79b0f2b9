//! Trajectory codec
//!
//! A ball crossing to the peer is described by its row and vertical
//! direction, sent as one lowercase letter:
//!
//! | row_step | rows 5..=0 | row_step | rows 6..=1 |
//! |----------|------------|----------|------------|
//! | -1       | `a`..=`f`  | +1       | `g`..=`l`  |
//!
//! `w` tells the peer it has won. Every other byte is undefined on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte sent by the losing device
pub const WIN_BYTE: u8 = b'w';

/// Trajectory codes in wire order: index `i` is sent as `b'a' + i`.
const TRAJECTORY_TABLE: [Trajectory; 12] = [
    Trajectory::new(5, -1),
    Trajectory::new(4, -1),
    Trajectory::new(3, -1),
    Trajectory::new(2, -1),
    Trajectory::new(1, -1),
    Trajectory::new(0, -1),
    Trajectory::new(6, 1),
    Trajectory::new(5, 1),
    Trajectory::new(4, 1),
    Trajectory::new(3, 1),
    Trajectory::new(2, 1),
    Trajectory::new(1, 1),
];

/// Row and vertical direction of a ball at the serve edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trajectory {
    pub row: i32,
    /// -1 (up) or +1 (down)
    pub row_step: i32,
}

impl Trajectory {
    pub const fn new(row: i32, row_step: i32) -> Self {
        Self { row, row_step }
    }

    /// Position in `TRAJECTORY_TABLE`, if this trajectory has a code.
    ///
    /// Upward balls never sit in row 6 and downward balls never sit in
    /// row 0 after a wall bounce, so those two rows have no code.
    fn table_index(self) -> Option<usize> {
        match (self.row_step, self.row) {
            (-1, row @ 0..=5) => Some((5 - row) as usize),
            (1, row @ 1..=6) => Some((12 - row) as usize),
            _ => None,
        }
    }
}

/// A decoded link message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkSymbol {
    /// Ball handed over with this trajectory
    Trajectory(Trajectory),
    /// Sender lost the rally
    Win,
}

impl LinkSymbol {
    pub fn to_byte(self) -> Result<u8, CodecError> {
        match self {
            LinkSymbol::Trajectory(t) => encode(t),
            LinkSymbol::Win => Ok(WIN_BYTE),
        }
    }
}

impl TryFrom<u8> for LinkSymbol {
    type Error = CodecError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        decode(byte)
    }
}

/// Codec failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Byte is not one of the 13 defined symbols
    UnknownByte(u8),
    /// Trajectory has no code
    Unencodable { row: i32, row_step: i32 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnknownByte(b) => write!(f, "unknown link byte 0x{b:02x}"),
            CodecError::Unencodable { row, row_step } => {
                write!(f, "no link code for row {row} with row step {row_step}")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Encode a trajectory as its wire byte
pub fn encode(trajectory: Trajectory) -> Result<u8, CodecError> {
    trajectory
        .table_index()
        .map(|i| b'a' + i as u8)
        .ok_or(CodecError::Unencodable {
            row: trajectory.row,
            row_step: trajectory.row_step,
        })
}

/// Decode a wire byte
pub fn decode(byte: u8) -> Result<LinkSymbol, CodecError> {
    match byte {
        WIN_BYTE => Ok(LinkSymbol::Win),
        b'a'..=b'l' => Ok(LinkSymbol::Trajectory(
            TRAJECTORY_TABLE[(byte - b'a') as usize],
        )),
        other => Err(CodecError::UnknownByte(other)),
    }
}
