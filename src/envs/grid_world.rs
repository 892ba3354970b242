use crate::{error::*, Continous, Discrete};
use itertools::iproduct;

pub const DEFAULT_REWARD: Continous = -0.05;

/// One cell of a [`GridWorld`].
///
/// `x` grows West to East, `y` grows South to North. Two states are the same state iff their
/// `index` is the same.
#[derive(Debug, Clone)]
pub struct State {
    pub index: usize,
    pub x: Discrete,
    pub y: Discrete,
    pub reachable: bool,
    /// Granted when the agent enters this state from a different one.
    pub reward: Continous,
}

impl State {
    pub fn new(index: usize, x: Discrete, y: Discrete) -> Self {
        Self {
            index,
            x,
            y,
            reachable: true,
            reward: DEFAULT_REWARD,
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for State {}

/// A rectangular lattice of states, flattened row by row starting from the South-West corner.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: Discrete,
    height: Discrete,
    cells: Vec<Option<State>>,
}

impl GridWorld {
    /// Creates an empty grid. Every cell has to be added before the grid can back an MDP.
    pub fn new(width: Discrete, height: Discrete) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(MdpError::Config(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }

        let n = width.checked_mul(height).ok_or_else(|| {
            MdpError::Config(format!("grid of {width}x{height} cells is too large"))
        })?;

        Ok(Self {
            width,
            height,
            cells: vec![None; n as usize],
        })
    }

    /// Creates a grid with every cell reachable and carrying [`DEFAULT_REWARD`].
    pub fn filled(width: Discrete, height: Discrete) -> Result<Self> {
        let mut gw = Self::new(width, height)?;
        for (y, x) in iproduct!(0..height, 0..width) {
            gw.add_state(x, y)?;
        }

        Ok(gw)
    }

    pub fn width(&self) -> Discrete {
        self.width
    }

    pub fn height(&self) -> Discrete {
        self.height
    }

    /// Total number of cells, populated or not.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds (or replaces) a reachable state with the default reward at `(x, y)`.
    pub fn add_state(&mut self, x: Discrete, y: Discrete) -> Result<&mut State> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Err(MdpError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let index = self.flatten_index(x, y);
        Ok(self.cells[index].insert(State::new(index, x, y)))
    }

    pub fn add_state_with(
        &mut self,
        x: Discrete,
        y: Discrete,
        reachable: bool,
        reward: Continous,
    ) -> Result<&mut State> {
        let s = self.add_state(x, y)?;
        s.reachable = reachable;
        s.reward = reward;
        Ok(s)
    }

    /// Whether an agent could stand on `(x, y)`. Never fails: off-grid, missing and
    /// blocked cells are all simply unreachable.
    pub fn is_reachable(&self, x: Discrete, y: Discrete) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }

        self.cells[self.flatten_index(x, y)]
            .as_ref()
            .map_or(false, |s| s.reachable)
    }

    pub fn flatten_index(&self, x: Discrete, y: Discrete) -> usize {
        (self.width * y + x) as usize
    }

    /// Direct lookup for coordinates the caller already validated.
    ///
    /// # Panics
    /// If `(x, y)` flattens outside the grid.
    pub fn state_at(&self, x: Discrete, y: Discrete) -> Option<&State> {
        self.cells[self.flatten_index(x, y)].as_ref()
    }

    pub fn state(&self, index: usize) -> Option<&State> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.cells.iter().flatten()
    }

    /// First coordinate (in index order) that has not been populated yet.
    pub fn first_missing(&self) -> Option<(Discrete, Discrete)> {
        self.cells
            .iter()
            .position(Option::is_none)
            .map(|i| (i as Discrete % self.width, i as Discrete / self.width))
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }
}
