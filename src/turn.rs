use crate::feedback::Feedback;

/// Why the adapter is being asked to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The previous try was illegal; pick another.
    Retry,
    /// A pawn reached the last rank; every candidate names a promotion piece.
    Promotion,
    /// An ordinary try.
    Free,
}

/// Search limits the host grants this decision. The call cannot be
/// preempted, so a policy that searches must check these itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub seconds: f64,
    pub iterations: i32,
    pub depth: i32,
}

impl Limits {
    /// `None` when the host grants no usable wall-clock budget.
    pub fn deadline(&self) -> Option<std::time::Duration> {
        if self.seconds > 0. {
            std::time::Duration::try_from_secs_f64(self.seconds).ok()
        } else {
            None
        }
    }
}

/// Capturing tries on the board after the last exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// Pawn captures the opponent could attempt after our last legal move.
    pub opponent_tries: i32,
    /// Pawn captures available to us this turn.
    pub pawn_tries: i32,
}

/// Observable fields of one candidate. Fields the adapter did not read for
/// this phase stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidate {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub what: Option<i32>,
}

/// Everything a policy may consult for one decision.
#[derive(Debug, Clone)]
pub struct Turn {
    pub phase: Phase,
    pub candidates: Vec<Candidate>,
    /// Announcements after the opponent's last move; `None` when this phase
    /// does not consult the referee.
    pub referee: Option<Feedback>,
    pub signals: Signals,
    pub limits: Limits,
}

impl Turn {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_budget_has_deadline() {
        let limits = Limits {
            seconds: 1.5,
            iterations: -1,
            depth: -1,
        };
        assert!(limits.deadline() == Some(std::time::Duration::from_millis(1500)));
    }

    #[test]
    fn unbounded_budget_has_none() {
        for seconds in [0., -1., f64::INFINITY, f64::NAN, f64::MAX, 1e300] {
            let limits = Limits {
                seconds,
                iterations: 0,
                depth: 0,
            };
            assert!(limits.deadline().is_none());
        }
    }
}
