use gridworld_mdp::*;
use itertools::Itertools;
use std::fs;

const FOUR_BY_FOUR: &str = include_str!("../worlds/four_by_four.json");

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => GridWorldConfig::from_json(&fs::read_to_string(path)?)?,
        None => GridWorldConfig::from_json(FOUR_BY_FOUR)?,
    };

    let solution = cfg.solve()?;
    println!(
        "Policy stable: {}, Number of iterations: {}",
        solution.stable, solution.iterations
    );
    println!("{:?}", solution.values);
    println!("{}", solution.policy.iter().join(" "));
    println!("{}", serde_json::to_string(&solution)?);

    Ok(())
}
