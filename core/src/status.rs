use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Line of text pushed to the host's status display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    MinesLeft(CellCount),
    NoMarksLeft,
    Won,
    Lost,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinesLeft(count) => write!(f, "{count}"),
            Self::NoMarksLeft => f.write_str("No marks left"),
            Self::Won => f.write_str("Game won"),
            Self::Lost => f.write_str("Game lost"),
        }
    }
}

/// External text display, e.g. a status bar label.
pub trait StatusSink {
    fn set_text(&mut self, text: &str);
}

/// Keeps only the current line.
impl StatusSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Keeps every line ever published.
impl StatusSink for Vec<String> {
    fn set_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Discards every line.
impl StatusSink for () {
    fn set_text(&mut self, _text: &str) {}
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }
}
