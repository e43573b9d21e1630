//! The operations the adapter may ask of the host engine.
//!
//! The host owns the board, the rules, and the referee. These traits are the
//! whole of what the adapter sees of it: read-only queries against opaque
//! handles, each of which may fail if the host raises. [`crate::bridge`]
//! implements them over JNI; tests implement them in memory.
use crate::config::Seat;

/// Rules of the game being played. Immutable for the duration of a game.
pub trait GameView {
    fn is_stochastic(&self) -> anyhow::Result<bool>;
    fn is_imperfect_information(&self) -> anyhow::Result<bool>;
    fn is_simultaneous_move(&self) -> anyhow::Result<bool>;
    fn num_players(&self) -> anyhow::Result<Seat>;
}

/// Current position as the host lets this seat see it. Scoped to one
/// decision; never cached across calls.
pub trait StateView {
    type Move: MoveView;

    fn is_terminal(&self) -> anyhow::Result<bool>;
    /// Pseudo-legal tries available to the player to move.
    fn legal_moves(&self) -> anyhow::Result<Vec<Self::Move>>;
    fn current_player(&self) -> anyhow::Result<Seat>;
    /// Per-player scoring accessor. In Kriegspiel this counts the capturing
    /// tries available to the given seat.
    fn score(&self, player: Seat) -> anyhow::Result<i32>;
    fn apply_move(&mut self, action: &Self::Move) -> anyhow::Result<()>;
    fn run_random_playout(&mut self) -> anyhow::Result<()>;
    /// Final per-player returns, indexed from the first seat.
    fn returns(&self) -> anyhow::Result<Vec<f64>>;
}

/// One pseudo-legal try offered by the host.
pub trait MoveView {
    fn from(&self) -> anyhow::Result<i32>;
    fn to(&self) -> anyhow::Result<i32>;
    /// Piece discriminator; names the promotion piece on promotion moves.
    fn what(&self) -> anyhow::Result<i32>;
    /// Short human-readable action description, e.g. `Promote`.
    fn description(&self) -> anyhow::Result<String>;
}
