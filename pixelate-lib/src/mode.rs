use crate::*;
use std::{fmt, str::FromStr};

/// How a [`Pixelator`] schedules its blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One block after another on the calling thread.
    Sequential,

    /// One unit of work per block, spread over a fixed worker pool.
    Parallel,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Sequential
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sequential" => Ok(Mode::Sequential),
            "m" | "parallel" => Ok(Mode::Parallel),
            _ => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sequential => write!(f, "sequential"),
            Mode::Parallel => write!(f, "parallel"),
        }
    }
}
