//! In-memory host used by unit tests.
use crate::config::Seat;
use crate::host::*;

#[derive(Debug, Clone)]
pub struct FakeGame {
    pub stochastic: bool,
    pub imperfect: bool,
    pub simultaneous: bool,
    pub players: Seat,
    pub broken: bool,
}

impl FakeGame {
    pub fn kriegspiel() -> Self {
        Self {
            stochastic: false,
            imperfect: true,
            simultaneous: false,
            players: 2,
            broken: false,
        }
    }
    fn guard<T>(&self, value: T) -> anyhow::Result<T> {
        if self.broken {
            return Err(anyhow::anyhow!("host raised"));
        }
        Ok(value)
    }
}

impl GameView for FakeGame {
    fn is_stochastic(&self) -> anyhow::Result<bool> {
        self.guard(self.stochastic)
    }
    fn is_imperfect_information(&self) -> anyhow::Result<bool> {
        self.guard(self.imperfect)
    }
    fn is_simultaneous_move(&self) -> anyhow::Result<bool> {
        self.guard(self.simultaneous)
    }
    fn num_players(&self) -> anyhow::Result<Seat> {
        self.guard(self.players)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeMove {
    pub id: usize,
    pub from: i32,
    pub to: i32,
    pub what: i32,
    pub description: String,
    pub fault: Fault,
}

impl FakeMove {
    pub fn step(id: usize) -> Self {
        Self {
            id,
            from: id as i32,
            to: id as i32 + 8,
            what: 0,
            description: "Move".to_string(),
            fault: Fault::None,
        }
    }
    pub fn promote(id: usize, piece: i32) -> Self {
        Self {
            id,
            from: 48,
            to: 56,
            what: piece,
            description: "Promote".to_string(),
            fault: Fault::None,
        }
    }
}

impl MoveView for FakeMove {
    fn from(&self) -> anyhow::Result<i32> {
        self.fault.raise(Fault::From)?;
        Ok(self.from)
    }
    fn to(&self) -> anyhow::Result<i32> {
        self.fault.raise(Fault::To)?;
        Ok(self.to)
    }
    fn what(&self) -> anyhow::Result<i32> {
        self.fault.raise(Fault::What)?;
        Ok(self.what)
    }
    fn description(&self) -> anyhow::Result<String> {
        self.fault.raise(Fault::Description)?;
        Ok(self.description.clone())
    }
}

/// Which host call should raise, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    LegalMoves,
    IsTerminal,
    CurrentPlayer,
    Score,
    From,
    To,
    What,
    Description,
}

impl Fault {
    fn raise(self, call: Fault) -> anyhow::Result<()> {
        if self == call {
            anyhow::bail!("host raised in {:?}", call);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FakeState {
    pub moves: Vec<FakeMove>,
    pub mover: Seat,
    pub terminal: bool,
    pub scores: [i32; 2],
    pub applied: Vec<usize>,
    pub fault: Fault,
    pub scored: std::cell::Cell<usize>,
}

impl FakeState {
    pub fn new(moves: Vec<FakeMove>) -> Self {
        Self {
            moves,
            mover: 1,
            terminal: false,
            scores: [0, 0],
            applied: vec![],
            fault: Fault::None,
            scored: std::cell::Cell::new(0),
        }
    }
    pub fn steps(n: usize) -> Self {
        Self::new((0..n).map(FakeMove::step).collect())
    }
    /// Make one host call raise, whether it is asked of the state or of
    /// any of its moves.
    pub fn faulty(mut self, fault: Fault) -> Self {
        self.fault = fault;
        self.moves.iter_mut().for_each(|m| m.fault = fault);
        self
    }
}

impl StateView for FakeState {
    type Move = FakeMove;

    fn is_terminal(&self) -> anyhow::Result<bool> {
        self.fault.raise(Fault::IsTerminal)?;
        Ok(self.terminal)
    }
    fn legal_moves(&self) -> anyhow::Result<Vec<FakeMove>> {
        self.fault.raise(Fault::LegalMoves)?;
        Ok(self.moves.clone())
    }
    fn current_player(&self) -> anyhow::Result<Seat> {
        self.fault.raise(Fault::CurrentPlayer)?;
        Ok(self.mover)
    }
    fn score(&self, player: Seat) -> anyhow::Result<i32> {
        self.scored.set(self.scored.get() + 1);
        self.fault.raise(Fault::Score)?;
        Ok(self.scores[(player - 1) as usize])
    }
    fn apply_move(&mut self, action: &FakeMove) -> anyhow::Result<()> {
        self.applied.push(action.id);
        self.mover = 3 - self.mover;
        Ok(())
    }
    fn run_random_playout(&mut self) -> anyhow::Result<()> {
        self.terminal = true;
        Ok(())
    }
    fn returns(&self) -> anyhow::Result<Vec<f64>> {
        if self.terminal {
            Ok(vec![1., -1.])
        } else {
            Ok(vec![0., 0.])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playout_reaches_returns() {
        let mut state = FakeState::steps(3);
        assert!(state.returns().unwrap() == vec![0., 0.]);
        let first = state.legal_moves().unwrap().remove(0);
        state.apply_move(&first).unwrap();
        assert!(state.current_player().unwrap() == 2);
        state.run_random_playout().unwrap();
        assert!(state.is_terminal().unwrap());
        assert!(state.returns().unwrap() == vec![1., -1.]);
        assert!(state.applied == vec![0]);
    }
}
