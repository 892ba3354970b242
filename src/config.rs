use crate::{
    envs::grid_world::*,
    error::*,
    mdps::{grid_mdp::*, mdp_solver::Solution, solvers::policy_iteration::*},
    Continous, Discrete,
};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything needed to build a grid world and solve it, usually read from JSON.
///
/// ```json
/// { "width": 4, "height": 1, "cells": [{ "x": 3, "y": 0, "reward": 1.0 }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridWorldConfig {
    pub width: Discrete,
    pub height: Discrete,
    #[serde(default = "default_move_success_prob")]
    pub move_success_prob: Continous,
    #[serde(default = "default_discount")]
    pub discount: Continous,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_reward")]
    pub default_reward: Continous,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub cycle_guard: bool,
    #[serde(default)]
    pub cells: Vec<CellConfig>,
}

/// Override for a single cell. A missing `reward` falls back to the world's default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellConfig {
    pub x: Discrete,
    pub y: Discrete,
    #[serde(default = "default_reachable")]
    pub reachable: bool,
    #[serde(default)]
    pub reward: Option<Continous>,
}

fn default_move_success_prob() -> Continous {
    0.85
}

fn default_discount() -> Continous {
    0.99
}

fn default_reward() -> Continous {
    DEFAULT_REWARD
}

fn default_reachable() -> bool {
    true
}

impl GridWorldConfig {
    pub fn new(width: Discrete, height: Discrete) -> Self {
        Self {
            width,
            height,
            move_success_prob: default_move_success_prob(),
            discount: default_discount(),
            seed: 0,
            default_reward: DEFAULT_REWARD,
            max_iterations: None,
            cycle_guard: false,
            cells: vec![],
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let cfg = serde_json::from_str::<Self>(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MdpError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.default_reward.is_finite() {
            return Err(MdpError::Config("default_reward must be finite".to_string()));
        }

        if let Some(c) = self.cells.iter().find(|c| c.reward.is_some_and(|r| !r.is_finite())) {
            return Err(MdpError::Config(format!(
                "reward of cell ({}, {}) must be finite",
                c.x, c.y
            )));
        }

        validate_parameters(self.move_success_prob, self.discount)
    }

    /// Populates every cell with the defaults, then applies the overrides in order.
    pub fn build_grid(&self) -> Result<GridWorld> {
        let mut gw = GridWorld::new(self.width, self.height)?;
        for (y, x) in iproduct!(0..self.height, 0..self.width) {
            gw.add_state_with(x, y, true, self.default_reward)?;
        }

        for c in &self.cells {
            gw.add_state_with(
                c.x,
                c.y,
                c.reachable,
                c.reward.unwrap_or(self.default_reward),
            )?;
        }

        Ok(gw)
    }

    pub fn solve(&self) -> Result<Solution> {
        self.validate()?;
        let gw = self.build_grid()?;
        let mdp = GridMdp::new(&gw, self.move_success_prob, self.discount)?;

        let solution = PolicyIteration::new(&mdp, self.seed)
            .with_cycle_guard(self.cycle_guard)
            .solve(self.max_iterations)?;
        info!(
            iterations = solution.iterations,
            stable = solution.stable,
            "grid world solved"
        );

        Ok(solution)
    }
}
