use super::super::{mdp::*, mdp_solver::*, policy::*};
use crate::{error::*, Continous};
use ndarray::Array1;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_TIE_TOLERANCE: Continous = 1e-9;

/// What one evaluate + improve round produced.
#[derive(Debug, Clone)]
pub struct IterationStats {
    pub iteration: usize,
    /// Number of states whose action changed in the improvement pass.
    pub changed: usize,
    pub mean_value: Continous,
    /// Values of the policy that was evaluated at the start of the round.
    pub values: Array1<Continous>,
}

/// Howard's policy iteration: evaluate the current policy exactly, then act greedily with
/// respect to its values, until no state changes its action.
///
/// Actions whose lookahead value lies within `tie_tolerance` of the best one are treated as
/// tied and the earliest in [`Action::ALL`] wins, even over a current action that is better by
/// less than the tolerance. The converged policy therefore does not depend on the starting
/// policy, at the cost of strict improvement: each switch may lose up to `tie_tolerance` per
/// state. Use `with_tie_tolerance(0.)` to only break exact ties.
///
/// With the cycle guard on, a state may not return to the action it held just before its
/// current one. This stops floating point ping-pong between near-equal actions but the
/// resulting policy is then only guaranteed to be close to optimal.
pub struct PolicyIteration<'a, M: Mdp + ?Sized> {
    mdp: &'a M,
    pi: Policy,
    v: Array1<Continous>,
    previous: Vec<Option<Action>>,
    cycle_guard: bool,
    tie_tolerance: Continous,
    history: Vec<IterationStats>,
}

impl<'a, M: Mdp + ?Sized> PolicyIteration<'a, M> {
    /// Starts from a random policy drawn with `seed`.
    pub fn new(mdp: &'a M, seed: u64) -> Self {
        let pi = Policy::seeded(mdp.n_s(), seed);
        Self::from_parts(mdp, pi)
    }

    pub fn with_policy(mdp: &'a M, pi: Policy) -> Result<Self> {
        if pi.len() != mdp.n_s() {
            return Err(MdpError::DimensionMismatch {
                expected: mdp.n_s(),
                actual: pi.len(),
            });
        }

        Ok(Self::from_parts(mdp, pi))
    }

    fn from_parts(mdp: &'a M, pi: Policy) -> Self {
        let n_s = mdp.n_s();
        Self {
            mdp,
            pi,
            v: Array1::zeros(n_s),
            previous: vec![None; n_s],
            cycle_guard: false,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            history: vec![],
        }
    }

    pub fn with_cycle_guard(mut self, on: bool) -> Self {
        self.cycle_guard = on;
        self
    }

    /// Actions whose lookahead value is within `tolerance` of the best count as tied.
    pub fn with_tie_tolerance(mut self, tolerance: Continous) -> Self {
        self.tie_tolerance = tolerance.abs();
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.pi
    }

    pub fn values(&self) -> &Array1<Continous> {
        &self.v
    }

    pub fn history(&self) -> &[IterationStats] {
        &self.history
    }

    /// Runs to completion and hands back plain vectors.
    pub fn solve(mut self, max_iterations: Option<usize>) -> Result<Solution> {
        let (stable, iterations) = self.exec(max_iterations)?;

        Ok(Solution {
            policy: self.pi.actions().to_vec(),
            values: self.v.to_vec(),
            iterations,
            stable,
        })
    }

    fn improve(&mut self) -> usize {
        let mut changed = 0;
        for s in 0..self.mdp.n_s() {
            let current = self.pi.action(s);
            let best = self.greedy_action(s);
            if best == current {
                continue;
            }

            if self.cycle_guard && self.previous[s] == Some(best) {
                warn!(s, %current, %best, "cycle guard kept the current action");
                continue;
            }

            trace!(s, from = %current, to = %best, "action improved");
            self.previous[s] = Some(current);
            self.pi.set_action(s, best);
            changed += 1;
        }

        changed
    }

    /// First action in declaration order whose value ties with the best one.
    fn greedy_action(&self, s: usize) -> Action {
        let qs = Action::ALL.map(|a| self.mdp.q_value(s, a, &self.v));
        let best = qs.iter().copied().fold(Continous::NEG_INFINITY, Continous::max);

        Action::ALL
            .into_iter()
            .zip(qs)
            .find(|&(_, q)| q >= best - self.tie_tolerance)
            .map_or(self.pi.action(s), |(a, _)| a)
    }
}

impl<M: Mdp + ?Sized> MdpSolver<bool> for PolicyIteration<'_, M> {
    /// # Panics
    /// If `s` is not a state of the MDP.
    fn v_star(&self, s: usize) -> Continous {
        self.v[s]
    }

    fn q_star(&self, s: usize, a: Action) -> Option<Continous> {
        (s < self.mdp.n_s()).then(|| self.mdp.q_value(s, a, &self.v))
    }

    fn pi_star(&self, s: usize) -> Option<Action> {
        self.pi.actions().get(s).copied()
    }

    /// Returns whether the policy stopped changing, and the number of rounds run.
    fn exec(&mut self, max_iterations: Option<usize>) -> Result<(bool, usize)> {
        info!(
            n_s = self.mdp.n_s(),
            gamma = self.mdp.gamma(),
            cycle_guard = self.cycle_guard,
            "policy iteration started"
        );

        let mut iterations = 0;
        loop {
            if max_iterations.is_some_and(|max| iterations >= max) {
                self.v = self.pi.evaluate(self.mdp)?;
                warn!(iterations, "policy iteration hit its iteration cap");
                return Ok((false, iterations));
            }

            iterations += 1;
            self.v = self.pi.evaluate(self.mdp)?;
            let values = self.v.clone();
            let changed = self.improve();
            let mean_value = values.mean().unwrap_or_default();
            debug!(iteration = iterations, changed, mean_value, "policy iteration round");

            self.history.push(IterationStats {
                iteration: self.history.len() + 1,
                changed,
                mean_value,
                values,
            });

            if changed == 0 {
                info!(iterations, "policy stable");
                return Ok((true, iterations));
            }
        }
    }
}
