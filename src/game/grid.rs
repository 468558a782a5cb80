use super::state::Position;

/// Content of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Fixed-size square occupancy map, stored row-major.
///
/// Accessing a position outside the board is a caller bug and panics;
/// use [`Grid::in_bounds`] first wherever the position is not known to be valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = self.size as i32;
        pos.row >= 0 && pos.row < size && pos.col >= 0 && pos.col < size
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    /// Mark every cell empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Number of cells holding the given content
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Positions of all empty cells, in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.get(pos) == Cell::Empty)
            .collect()
    }

    /// Positions of all cells holding the given content, in row-major order
    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        self.positions().filter(|&pos| self.get(pos) == cell).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size).map(move |col| Position::new(row as i32, col as i32))
        })
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "position ({}, {}) is outside a {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        pos.row as usize * self.size + pos.col as usize
    }
}
