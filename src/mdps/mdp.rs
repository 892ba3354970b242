use crate::{Continous, Discrete};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    North,
    South,
    East,
    West,
}

impl Action {
    /// Declaration order. Ties between equally good actions resolve to the earliest one here.
    pub const ALL: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// `[intended, perpendicular, perpendicular]` steps as `(dx, dy)`.
    pub const fn direction_offsets(self) -> [(Discrete, Discrete); 3] {
        match self {
            Action::North => [(0, 1), (-1, 0), (1, 0)],
            Action::South => [(0, -1), (-1, 0), (1, 0)],
            Action::East => [(1, 0), (0, -1), (0, 1)],
            Action::West => [(-1, 0), (0, -1), (0, 1)],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::North => "N",
            Action::South => "S",
            Action::East => "E",
            Action::West => "W",
        };
        f.write_str(s)
    }
}

/// Markov Decision Process - Sutton & Barto 2018.
///
/// States are addressed by their flattened index in `0..n_s()`.
pub trait Mdp {
    fn n_s(&self) -> usize;

    fn n_a(&self) -> usize {
        Action::ALL.len()
    }

    fn gamma(&self) -> Continous;

    /// Distribution over next states, one entry per state.
    ///
    /// `s` must be a state of the MDP, i.e. lie in `0..n_s()`.
    fn transition(&self, s: usize, a: Action) -> Array1<Continous>;

    fn reward(&self, s: usize, a: Action, s_next: usize) -> Continous;

    /// One-step lookahead `Σ p(s'|s,a) [r(s,a,s') + γ v(s')]`.
    fn q_value(&self, s: usize, a: Action, v: &Array1<Continous>) -> Continous {
        let gamma = self.gamma();
        self.transition(s, a)
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0.)
            .map(|(s_next, &p)| p * (self.reward(s, a, s_next) + gamma * v[s_next]))
            .sum()
    }
}
