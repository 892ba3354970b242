pub mod grid_mdp;
pub mod mdp;
pub mod mdp_solver;
pub mod policy;
pub mod solvers;
