use super::mdp::*;
use crate::{envs::grid_world::*, error::*, Continous, Discrete};
use ndarray::Array1;
use tracing::debug;

/// Slippery grid navigation: the agent moves where it intends with probability
/// `move_success_prob` and otherwise slips to one of the two perpendicular cells.
/// Moves into unreachable cells bounce back to the current cell.
#[derive(Debug, Clone)]
pub struct GridMdp<'a> {
    grid: &'a GridWorld,
    move_success_prob: Continous,
    discount: Continous,
}

impl<'a> GridMdp<'a> {
    pub fn new(grid: &'a GridWorld, move_success_prob: Continous, discount: Continous) -> Result<Self> {
        validate_parameters(move_success_prob, discount)?;

        if let Some((x, y)) = grid.first_missing() {
            return Err(MdpError::MissingState { x, y });
        }

        debug!(
            width = grid.width(),
            height = grid.height(),
            move_success_prob,
            discount,
            "grid MDP ready"
        );

        Ok(Self {
            grid,
            move_success_prob,
            discount,
        })
    }

    pub fn grid(&self) -> &GridWorld {
        self.grid
    }

    pub fn move_success_prob(&self) -> Continous {
        self.move_success_prob
    }

    fn coordinates(&self, s: usize) -> (Discrete, Discrete) {
        let w = self.grid.width();
        (s as Discrete % w, s as Discrete / w)
    }
}

pub fn validate_parameters(move_success_prob: Continous, discount: Continous) -> Result<()> {
    if !(0.0..=1.0).contains(&move_success_prob) {
        return Err(MdpError::Config(format!(
            "move_success_prob must lie in [0, 1], got {move_success_prob}"
        )));
    }

    if !(0.0..1.0).contains(&discount) {
        return Err(MdpError::Config(format!(
            "discount must lie in [0, 1), got {discount}"
        )));
    }

    Ok(())
}

impl Mdp for GridMdp<'_> {
    fn n_s(&self) -> usize {
        self.grid.len()
    }

    fn gamma(&self) -> Continous {
        self.discount
    }

    /// # Panics
    /// If `s` is not in `0..n_s()`.
    fn transition(&self, s: usize, a: Action) -> Array1<Continous> {
        let (x, y) = self.coordinates(s);
        let slip = (1. - self.move_success_prob) * 0.5;
        let [intended, perp1, perp2] = a.direction_offsets();

        let mut ps = Array1::zeros(self.n_s());
        for ((dx, dy), p) in [
            (intended, self.move_success_prob),
            (perp1, slip),
            (perp2, slip),
        ] {
            let (nx, ny) = (x + dx, y + dy);
            let target = if self.grid.is_reachable(nx, ny) {
                self.grid.flatten_index(nx, ny)
            } else {
                s
            };
            ps[target] += p;
        }

        ps
    }

    /// Entering a different state pays that state's reward. Staying put pays nothing.
    fn reward(&self, s: usize, _a: Action, s_next: usize) -> Continous {
        if s == s_next {
            return 0.;
        }

        self.grid.state(s_next).map_or(0., |st| st.reward)
    }
}
