use super::mdp::*;
use crate::{error::*, math::solve_linear_system, Continous};
use ndarray::{Array1, Array2};
use rand::prelude::*;
use tracing::trace;

/// Deterministic mapping from state index to action. Its length is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    actions: Vec<Action>,
}

impl Policy {
    /// Uniformly random action per state, reproducible from `seed`.
    pub fn seeded(n_s: usize, seed: u64) -> Self {
        let rng = &mut StdRng::seed_from_u64(seed);
        let actions = (0..n_s)
            .map(|_| *Action::ALL.choose(rng).unwrap_or(&Action::North))
            .collect();

        Self { actions }
    }

    pub fn uniform(n_s: usize, a: Action) -> Self {
        Self {
            actions: vec![a; n_s],
        }
    }

    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn action(&self, s: usize) -> Action {
        self.actions[s]
    }

    pub fn set_action(&mut self, s: usize, a: Action) {
        self.actions[s] = a;
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Expected discounted return of every state when following this policy.
    ///
    /// Solves the Bellman expectation equations as one linear system. Row `i` reads
    /// `-q_i = -V_i + γ Σ_j p_ij V_j` where `q_i` is the immediate expected reward.
    pub fn evaluate<M: Mdp + ?Sized>(&self, mdp: &M) -> Result<Array1<Continous>> {
        let n_s = mdp.n_s();
        if self.actions.len() != n_s {
            return Err(MdpError::DimensionMismatch {
                expected: n_s,
                actual: self.actions.len(),
            });
        }

        let gamma = mdp.gamma();
        let mut coefficients = Array2::<Continous>::zeros((n_s, n_s));
        let mut constants = Array1::<Continous>::zeros(n_s);

        for (s, &a) in self.actions.iter().enumerate() {
            let ps = mdp.transition(s, a);
            let q: Continous = ps
                .iter()
                .enumerate()
                .map(|(s_next, &p)| p * mdp.reward(s, a, s_next))
                .sum();
            constants[s] = -q;

            let mut row = coefficients.row_mut(s);
            row.scaled_add(gamma, &ps);
            row[s] -= 1.;
        }

        let v = solve_linear_system(&coefficients, &constants)?;
        trace!(?v, "policy evaluated");

        Ok(v)
    }
}
