use gridworld_mdp::*;

/// +1 in the South-East and North-East corners, -1 in the North-West corner and a pillar at (1, 2).
#[allow(dead_code)]
pub fn four_by_four() -> GridWorld {
    let mut gw = GridWorld::filled(4, 4).unwrap();
    gw.add_state_with(3, 0, true, 1.).unwrap();
    gw.add_state_with(1, 2, false, DEFAULT_REWARD).unwrap();
    gw.add_state_with(0, 3, true, -1.).unwrap();
    gw.add_state_with(3, 3, true, 1.).unwrap();
    gw
}

/// A single row of four cells with +1 on the Eastern end.
#[allow(dead_code)]
pub fn strip() -> GridWorld {
    let mut gw = GridWorld::filled(4, 1).unwrap();
    gw.add_state_with(3, 0, true, 1.).unwrap();
    gw
}

#[allow(dead_code)]
pub fn solve(gw: &GridWorld, p: Continous, gamma: Continous, seed: u64) -> Solution {
    let mdp = GridMdp::new(gw, p, gamma).unwrap();
    PolicyIteration::new(&mdp, seed).solve(None).unwrap()
}
