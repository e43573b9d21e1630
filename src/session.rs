use crate::config::{PLAYERS, Seat};

/// The seat an adapter instance was bound to for one game.
///
/// The opponent is derived once at binding time using the host's two-player
/// numbering (`players - player + 1`) and never re-derived afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    player: Seat,
    opponent: Seat,
    players: Seat,
}

impl Session {
    pub fn new(player: Seat) -> anyhow::Result<Self> {
        Self::seated(player, PLAYERS)
    }

    fn seated(player: Seat, players: Seat) -> anyhow::Result<Self> {
        if !(1..=players).contains(&player) {
            anyhow::bail!("seat {} outside 1..={} for this table", player, players);
        }
        Ok(Self {
            player,
            opponent: players - player + 1,
            players,
        })
    }

    pub fn player(&self) -> Seat {
        self.player
    }
    pub fn opponent(&self) -> Seat {
        self.opponent
    }
    pub fn players(&self) -> Seat {
        self.players
    }
    /// Seat 1 moves the white pieces.
    pub fn is_white(&self) -> bool {
        self.player == 1
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{} vs P{}", self.player, self.opponent)
    }
}
