use crate::turn::Turn;
use rand::{Rng, RngCore};

/// Decision rule mapping one turn to the index of the candidate to try.
///
/// A policy only ever picks among the host's candidates; it never synthesizes
/// a move of its own.
pub trait Policy: std::fmt::Debug {
    fn choose(&self, turn: &Turn, rng: &mut dyn RngCore) -> anyhow::Result<usize>;
}

/// Uniformly random over every candidate, whatever the phase or signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl Policy for Uniform {
    fn choose(&self, turn: &Turn, rng: &mut dyn RngCore) -> anyhow::Result<usize> {
        match turn.len() {
            0 => Err(anyhow::anyhow!("no candidates to choose from")),
            n => Ok(rng.random_range(0..n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Feedback;
    use crate::turn::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn turn(n: usize) -> Turn {
        Turn {
            phase: Phase::Free,
            candidates: vec![Candidate::default(); n],
            referee: Some(Feedback::Accepted(vec![])),
            signals: Signals::default(),
            limits: Limits {
                seconds: 1.,
                iterations: -1,
                depth: -1,
            },
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let turn = turn(7);
        for _ in 0..1000 {
            assert!(Uniform.choose(&turn, rng).unwrap() < 7);
        }
    }

    #[test]
    fn uniform_single_candidate() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(Uniform.choose(&turn(1), rng).unwrap() == 0);
    }

    #[test]
    fn uniform_refuses_empty() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(Uniform.choose(&turn(0), rng).is_err());
    }
}
