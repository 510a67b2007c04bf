//! Errors raised while decoding a sequence against a model.
use std::fmt;
use std::io;

/// An error from the decoder or its surrounding I/O.
///
/// Numeric degeneracies are never reported here. A table full of
/// negative infinities is a valid outcome of an impossible-path model
/// and flows through ordinary floating-point comparisons.
#[derive(Debug)]
pub enum DecodeError {
    /// The model is structurally unusable: empty state set, mismatched
    /// table dimensions, or an observation with no emission entry.
    InvalidModel(String),
    /// A probability or path query at a position beyond the sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// Path reconstruction was attempted before the table was filled.
    DecoderNotRun,
    /// An I/O error while reading the input sequence.
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::InvalidModel(ref why) => write!(f, "invalid model: {}", why),
            DecodeError::IndexOutOfRange { index, len } => {
                write!(f, "position {} out of range (sequence length {})", index, len)
            }
            DecodeError::DecoderNotRun => write!(f, "table not filled; run the decoder first"),
            DecodeError::Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            DecodeError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> DecodeError {
        DecodeError::Io(err)
    }
}
