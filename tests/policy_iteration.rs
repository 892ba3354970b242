extern crate assertor;
extern crate float_eq;
extern crate gridworld_mdp;
extern crate insta;
extern crate rstest;
mod common;

use assertor::*;
use common::*;
use float_eq::*;
use gridworld_mdp::*;
use rstest::rstest;

#[test]
fn isolated_single_cell_world_is_worth_nothing() {
    let gw = GridWorld::filled(1, 1).unwrap();

    let solution = solve(&gw, 0.85, 0.9, 0);

    assert!(solution.stable);
    assert_float_eq!(solution.values[0], 0., abs <= 1e-12);
}

#[rstest]
fn strip_heads_east(#[values(0, 7, 2718)] seed: u64) {
    let gw = strip();

    let solution = solve(&gw, 0.85, 0.9, seed);

    assert!(solution.stable);
    assert_eq!(
        solution.policy,
        vec![Action::East, Action::East, Action::East, Action::West]
    );
    assert!(solution.values[0] < solution.values[1]);
    assert!(solution.values[1] < solution.values[2]);
}

#[test]
fn strip_policy_snapshot() {
    let solution = solve(&strip(), 0.85, 0.9, 0);

    insta::assert_debug_snapshot!(solution.policy, @r###"
    [
        East,
        East,
        East,
        West,
    ]
    "###);
}

#[rstest]
fn four_by_four_reference_world(#[values(0, 1, 42)] seed: u64) {
    let gw = four_by_four();

    let solution = solve(&gw, 0.85, 0.99, seed);

    assert_that!(solution.stable).is_equal_to(true);
    assert_that!(solution.policy.iter().map(ToString::to_string).collect::<String>())
        .is_equal_to("EEENEEESSENNEEES".to_string());
    assert_float_eq!(
        solution.values,
        vec![
            39.114900074247046,
            39.66878129615622,
            40.231343940145855,
            39.746803362882396,
            38.72847519217202,
            39.258563761398975,
            39.743860238711086,
            40.23134394014576,
            38.2237367870966,
            39.27022406293459,
            39.7576703774101,
            40.24232962259065,
            39.12080443797642,
            39.71981253953029,
            40.24232962259065,
            39.75767037741009
        ],
        abs_all <= 1e-7
    );
}

#[test]
fn solving_twice_is_deterministic() {
    let gw = four_by_four();

    let a = solve(&gw, 0.85, 0.99, 2718);
    let b = solve(&gw, 0.85, 0.99, 2718);

    assert_that!(a.policy).is_equal_to(b.policy);
    assert_that!(a.iterations).is_equal_to(b.iterations);
    assert_eq!(a.values, b.values);
}

#[test]
fn converged_values_satisfy_bellman_optimality() {
    let gw = four_by_four();
    let mdp = GridMdp::new(&gw, 0.85, 0.99).unwrap();
    let mut pi = PolicyIteration::new(&mdp, 5);

    pi.exec(None).unwrap();

    let v = pi.values();
    for s in 0..mdp.n_s() {
        let best = Action::ALL
            .iter()
            .map(|&a| mdp.q_value(s, a, v))
            .fold(Continous::NEG_INFINITY, Continous::max);
        assert_float_eq!(v[s], best, abs <= 1e-7);
    }
}

#[test]
fn mean_value_is_monotonic_across_rounds() {
    let gw = four_by_four();
    let mdp = GridMdp::new(&gw, 0.85, 0.99).unwrap();
    let mut pi =
        PolicyIteration::with_policy(&mdp, Policy::uniform(mdp.n_s(), Action::West)).unwrap();

    let (stable, iterations) = pi.exec(None).unwrap();

    assert!(stable);
    assert_eq!(iterations, 5);
    let means = pi.history().iter().map(|h| h.mean_value).collect::<Vec<_>>();
    assert_float_eq!(
        means,
        vec![
            -2.5426258997694147,
            7.632070235228007,
            39.25932700944194,
            39.56616560208749,
            39.56616560208742
        ],
        abs_all <= 1e-7
    );
}

#[test]
fn solution_serializes_as_plain_arrays() {
    let gw = strip();

    let solution = solve(&gw, 0.85, 0.9, 0);
    let json = serde_json::to_value(&solution).unwrap();

    assert_eq!(
        json["policy"],
        serde_json::json!(["East", "East", "East", "West"])
    );
    assert_eq!(json["values"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["stable"], serde_json::json!(true));
}

#[test]
fn bundled_world_matches_reference_world() {
    let cfg = GridWorldConfig::from_json(include_str!("../worlds/four_by_four.json")).unwrap();

    let from_config = cfg.solve().unwrap();
    let by_hand = solve(&four_by_four(), 0.85, 0.99, 0);

    assert_eq!(from_config.policy, by_hand.policy);
    assert_float_eq!(from_config.values, by_hand.values, abs_all <= 1e-9);
}
