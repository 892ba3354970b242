extern crate nalgebra;
extern crate ndarray;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod config;
pub mod envs;
pub mod error;
pub mod math;
pub mod mdps;

pub use config::*;
pub use envs::grid_world::*;
pub use error::*;
pub use mdps::{
    grid_mdp::*, mdp::*, mdp_solver::*, policy::*, solvers::policy_iteration::*,
};

pub type Discrete = i32;
pub type Continous = f64;
