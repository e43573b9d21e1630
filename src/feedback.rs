//! Referee feedback, parsed once at the boundary.
//!
//! The host hands over its notes as one `;`-delimited string. A rejected try
//! arrives as the lone message `Illegal move`; everything else is a list of
//! announcements about captures and checks, possibly empty.
use crate::config::{DELIMITER, ILLEGAL_MOVE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The previous try was rejected on the referee's board.
    Illegal,
    /// The previous move stood, with whatever the referee announced about it.
    Accepted(Vec<Announcement>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    Capture(String),
    Check(CheckDirection),
    Note(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDirection {
    Rank,
    File,
    LongDiagonal,
    ShortDiagonal,
    Knight,
    Unknown,
}

impl Feedback {
    pub fn is_illegal(&self) -> bool {
        matches!(self, Self::Illegal)
    }
    pub fn announcements(&self) -> &[Announcement] {
        match self {
            Self::Illegal => &[],
            Self::Accepted(notes) => notes.as_slice(),
        }
    }
    pub fn captures(&self) -> usize {
        self.announcements()
            .iter()
            .filter(|a| matches!(a, Announcement::Capture(_)))
            .count()
    }
    pub fn checks(&self) -> impl Iterator<Item = CheckDirection> + '_ {
        self.announcements().iter().filter_map(|a| match a {
            Announcement::Check(direction) => Some(*direction),
            _ => None,
        })
    }
}

impl From<&str> for Feedback {
    fn from(message: &str) -> Self {
        if message.trim() == ILLEGAL_MOVE {
            return Self::Illegal;
        }
        Self::Accepted(
            message
                .split(DELIMITER)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Announcement::from)
                .collect(),
        )
    }
}

impl From<&str> for Announcement {
    fn from(note: &str) -> Self {
        let lower = note.to_lowercase();
        if lower.contains("check") {
            Self::Check(CheckDirection::from(lower.as_str()))
        } else if lower.contains("captur") {
            Self::Capture(note.to_string())
        } else {
            Self::Note(note.to_string())
        }
    }
}

/// Expects an already lowercased note.
impl From<&str> for CheckDirection {
    fn from(note: &str) -> Self {
        if note.contains("long") {
            Self::LongDiagonal
        } else if note.contains("short") {
            Self::ShortDiagonal
        } else if note.contains("knight") {
            Self::Knight
        } else if note.contains("rank") {
            Self::Rank
        } else if note.contains("file") {
            Self::File
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Illegal => write!(f, "{}", ILLEGAL_MOVE),
            Self::Accepted(notes) => write!(f, "accepted ({} notes)", notes.len()),
        }
    }
}
