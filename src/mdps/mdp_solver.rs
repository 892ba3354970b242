use super::mdp::*;
use crate::{error::*, Continous};
use serde::Serialize;

pub trait MdpSolver<T> {
    fn v_star(&self, s: usize) -> Continous;

    fn q_star(&self, s: usize, a: Action) -> Option<Continous>;

    fn pi_star(&self, s: usize) -> Option<Action>;

    fn exec(&mut self, max_iterations: Option<usize>) -> Result<(T, usize)>;
}

/// Converged policy and values, both indexed by the grid's flattened cell index.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub policy: Vec<Action>,
    pub values: Vec<Continous>,
    pub iterations: usize,
    pub stable: bool,
}
