use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Cell, Grid};
use super::state::Position;

/// Picks empty cells uniformly at random for new food.
#[derive(Debug, Clone)]
pub struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose an empty cell, or `None` if the board has no empty cell left.
    ///
    /// Draws random cells and rejects occupied ones. After `size * size`
    /// rejected draws it falls back to choosing from the list of empty cells,
    /// which keeps the distribution uniform while bounding the cost on a
    /// nearly full board. The grid itself is not modified.
    pub fn spawn(&mut self, grid: &Grid) -> Option<Position> {
        if grid.count(Cell::Empty) == 0 {
            return None;
        }

        let size = grid.size();
        for _ in 0..size * size {
            let row = self.rng.gen_range(0..size) as i32;
            let col = self.rng.gen_range(0..size) as i32;
            let pos = Position::new(row, col);

            if grid.get(pos) == Cell::Empty {
                return Some(pos);
            }
        }

        grid.empty_cells().choose(&mut self.rng).copied()
    }
}
