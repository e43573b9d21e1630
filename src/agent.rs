//! Turn a "your move" notification from the host into one chosen try.
use crate::config::{PLAYERS, PROMOTE, Seat};
use crate::feedback::Feedback;
use crate::host::*;
use crate::policy::{Policy, Uniform};
use crate::session::Session;
use crate::turn::*;
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Adapter bound to at most one seat at a time.
///
/// Every instance carries its own [`Session`], so concurrent games hosted
/// in one process never share seat state.
#[derive(Debug)]
pub struct Agent<P: Policy = Uniform> {
    policy: P,
    rng: SmallRng,
    session: Option<Session>,
}

impl Default for Agent<Uniform> {
    fn default() -> Self {
        Self::new(Uniform, None)
    }
}

impl<P: Policy> Agent<P> {
    pub fn new(policy: P, seed: Option<u64>) -> Self {
        Self {
            policy,
            rng: match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_rng(&mut rand::rng()),
            },
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Bind to a seat for a new game. The opponent is fixed here and never
    /// recomputed.
    pub fn init<G: GameView>(&mut self, game: &G, player: Seat) -> anyhow::Result<()> {
        let session = Session::new(player)?;
        let players = game.num_players().context("querying player count")?;
        if players != PLAYERS {
            log::warn!(
                "host reports {} players, seating as if {}",
                players,
                PLAYERS
            );
        }
        let colour = if session.is_white() { "white" } else { "black" };
        log::info!("seated {} ({})", session, colour);
        self.session = Some(session);
        Ok(())
    }

    /// Pick one of the host's pseudo-legal tries.
    ///
    /// `last_try` is the referee's verdict on our previous try this turn,
    /// `referee` the announcements that followed the opponent's last move.
    /// The returned move is always one of `state.legal_moves()`.
    pub fn select<S: StateView>(
        &mut self,
        state: &S,
        limits: Limits,
        last_try: &str,
        referee: &str,
    ) -> anyhow::Result<S::Move> {
        let session = self
            .session
            .ok_or_else(|| anyhow::anyhow!("asked to move before being seated"))?;
        let moves = state
            .legal_moves()
            .context("enumerating pseudo-legal moves")?;
        if moves.is_empty() {
            let terminal = state.is_terminal().context("querying terminality")?;
            anyhow::bail!(
                "host offered no candidates to {} (terminal: {})",
                session,
                terminal
            );
        }
        let phase = if Feedback::from(last_try).is_illegal() {
            Phase::Retry
        } else if moves[0].description().context("reading move description")? == PROMOTE {
            Phase::Promotion
        } else {
            Phase::Free
        };
        let turn = match phase {
            Phase::Retry => Turn {
                phase,
                candidates: vec![Candidate::default(); moves.len()],
                referee: None,
                signals: Signals::default(),
                limits,
            },
            Phase::Promotion => Turn {
                phase,
                candidates: Self::promotions(&moves)?,
                referee: None,
                signals: Signals::default(),
                limits,
            },
            Phase::Free => Turn {
                phase,
                candidates: Self::squares(&moves)?,
                referee: Some(Feedback::from(referee)),
                signals: Self::signals(state, &session)?,
                limits,
            },
        };
        let n = turn.len();
        let index = self.policy.choose(&turn, &mut self.rng)?;
        log::debug!(
            "{} {:?}: chose {} of {} ({:?}, referee {:?})",
            session,
            turn.phase,
            index,
            n,
            turn.signals,
            turn.referee
        );
        moves
            .into_iter()
            .nth(index)
            .ok_or_else(|| anyhow::anyhow!("{:?} chose {} of {} candidates", self.policy, index, n))
    }

    /// Unbind from the current game.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("closing {}", session);
        }
    }

    fn promotions<M: MoveView>(moves: &[M]) -> anyhow::Result<Vec<Candidate>> {
        moves
            .iter()
            .map(|m| {
                Ok(Candidate {
                    what: Some(m.what()?),
                    ..Candidate::default()
                })
            })
            .collect()
    }

    fn squares<M: MoveView>(moves: &[M]) -> anyhow::Result<Vec<Candidate>> {
        moves
            .iter()
            .map(|m| {
                Ok(Candidate {
                    from: Some(m.from()?),
                    to: Some(m.to()?),
                    what: None,
                })
            })
            .collect()
    }

    fn signals<S: StateView>(state: &S, session: &Session) -> anyhow::Result<Signals> {
        let mover = state.current_player().context("querying player to move")?;
        if mover != session.player() {
            log::warn!("host asks {} to move while P{} is to play", session, mover);
        }
        Ok(Signals {
            opponent_tries: state
                .score(session.opponent())
                .context("querying opponent tries")?,
            pawn_tries: state
                .score(session.player())
                .context("querying pawn tries")?,
        })
    }
}

/// Two seats, hidden information, alternating moves. Independent of any
/// seat binding, since the host asks before constructing a game.
pub fn supports<G: GameView>(game: &G) -> anyhow::Result<bool> {
    let players = game.num_players()?;
    let imperfect = game.is_imperfect_information()?;
    let simultaneous = game.is_simultaneous_move()?;
    let stochastic = game.is_stochastic()?;
    log::debug!(
        "game has {} players (imperfect: {}, simultaneous: {}, stochastic: {})",
        players,
        imperfect,
        simultaneous,
        stochastic
    );
    Ok(players == PLAYERS && imperfect && !simultaneous)
}
