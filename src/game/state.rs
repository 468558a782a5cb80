use std::collections::VecDeque;

use super::direction::{Direction, ReversalPolicy};
use super::grid::{Cell, Grid};

/// A cell on the board, addressed as (row, col).
///
/// Coordinates are signed so that a head computed one step past the edge
/// can be represented and rejected by [`Grid::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }
}

/// The snake in the game.
///
/// Every segment is mirrored as a [`Cell::Snake`] on the grid passed to
/// [`Snake::spawn`], [`Snake::advance`] and [`Snake::drop_tail`]; the snake
/// never touches the grid any other way.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Direction the next tick will move in
    direction: Direction,
    /// Direction the last tick moved in
    heading: Direction,
}

impl Snake {
    /// Create a one-segment snake and mark it on the grid
    pub fn spawn(grid: &mut Grid, head: Position, direction: Direction) -> Self {
        grid.set(head, Cell::Snake);
        Self {
            body: VecDeque::from([head]),
            direction,
            heading: direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        *self.body.front().expect("Snake body should never be empty")
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Head position after one step in `direction`. No bounds checking.
    pub fn compute_next_head(&self, direction: Direction) -> Position {
        self.head().moved_in_direction(direction)
    }

    /// Set the direction for the next tick unconditionally
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Request a turn, applying the reversal policy against the last applied heading.
    ///
    /// A one-segment snake has no neck to run into, so it may always reverse.
    /// Returns whether the request was accepted.
    pub fn turn(&mut self, direction: Direction, policy: ReversalPolicy) -> bool {
        if policy == ReversalPolicy::Ignore
            && self.len() > 1
            && self.heading.is_opposite(direction)
        {
            return false;
        }
        self.set_direction(direction);
        true
    }

    /// Prepend a new head and mark it on the grid. Never shrinks the body.
    pub fn advance(&mut self, grid: &mut Grid, new_head: Position) {
        grid.set(new_head, Cell::Snake);
        self.body.push_front(new_head);
        self.heading = self.direction;
    }

    /// Remove the last segment and clear its cell
    pub fn drop_tail(&mut self, grid: &mut Grid) -> Position {
        let tail = self
            .body
            .pop_back()
            .expect("Snake body should never be empty");
        grid.set(tail, Cell::Empty);
        tail
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// State of a game in progress
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub food: Option<Position>,
    pub score: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a new game state around an already spawned snake
    pub fn new(grid: Grid, snake: Snake) -> Self {
        Self {
            grid,
            snake,
            food: None,
            score: 0,
            steps: 0,
        }
    }

    /// Whether the grid's snake cells match the body exactly and food sits on a free cell
    pub fn is_consistent(&self) -> bool {
        let mut on_grid = self.grid.positions_of(Cell::Snake);
        let mut body: Vec<Position> = self.snake.segments().copied().collect();
        on_grid.sort_by_key(|p| (p.row, p.col));
        body.sort_by_key(|p| (p.row, p.col));

        let food_ok = match self.food {
            Some(food) => {
                self.grid.positions_of(Cell::Food) == vec![food] && !body.contains(&food)
            }
            None => self.grid.count(Cell::Food) == 0,
        };

        on_grid == body && food_ok
    }
}
