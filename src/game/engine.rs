use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    food::FoodSpawner,
    grid::{Cell, Grid},
    state::{CollisionType, GameState, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved into an empty cell
    Moved,
    /// The snake ate and grew; new food was placed
    FoodEaten,
    /// The snake ate and grew, and no empty cell is left for new food
    BoardFilled,
    /// The move was illegal; nothing was changed
    GameOver(CollisionType),
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    board_size: usize,
    food_reward: u32,
    spawner: FoodSpawner<R>,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        Self {
            board_size: config.board_size,
            food_reward: config.food_reward,
            spawner: FoodSpawner::new(rng),
        }
    }

    /// Lay out a fresh board: a one-segment snake heading right and one food
    pub fn new_game(&mut self) -> GameState {
        let mut grid = Grid::new(self.board_size);
        let start = Position::new((self.board_size / 2) as i32, (self.board_size / 4) as i32);
        let snake = Snake::spawn(&mut grid, start, Direction::Right);

        let mut state = GameState::new(grid, snake);
        self.place_food(&mut state);
        state
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        let new_head = state.snake.compute_next_head(state.snake.direction());

        if let Some(collision_type) = self.check_collision(state, new_head) {
            return StepOutcome::GameOver(collision_type);
        }

        // The food cell is overwritten here, so compare against the stored position
        let ate_food = state.food == Some(new_head);
        state.snake.advance(&mut state.grid, new_head);
        state.steps += 1;

        if ate_food {
            state.score = state.score.saturating_add(self.food_reward);
            if self.place_food(state) {
                StepOutcome::FoodEaten
            } else {
                StepOutcome::BoardFilled
            }
        } else {
            state.snake.drop_tail(&mut state.grid);
            StepOutcome::Moved
        }
    }

    /// Check if the new head position causes a collision.
    ///
    /// The tail is still on the grid at this point, so moving into the cell
    /// it is about to vacate counts as a self-collision.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.grid.in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.grid.get(pos) == Cell::Snake {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Put new food on the board. Returns false if there was no room.
    fn place_food(&mut self, state: &mut GameState) -> bool {
        state.food = self.spawner.spawn(&state.grid);
        match state.food {
            Some(pos) => {
                state.grid.set(pos, Cell::Food);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::ReversalPolicy;

    fn engine(size: usize) -> GameEngine {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::new(size)
        };
        GameEngine::new(&config)
    }

    /// Build a state with the given body (head first) and food, bypassing the spawner
    fn state_with(size: usize, body: &[(i32, i32)], direction: Direction, food: Option<(i32, i32)>) -> GameState {
        let mut grid = Grid::new(size);
        let tail_first: Vec<Position> = body.iter().rev().map(|&(r, c)| Position::new(r, c)).collect();
        let mut snake = Snake::spawn(&mut grid, tail_first[0], direction);
        for &pos in &tail_first[1..] {
            snake.advance(&mut grid, pos);
        }

        let mut state = GameState::new(grid, snake);
        if let Some((row, col)) = food {
            let pos = Position::new(row, col);
            state.grid.set(pos, Cell::Food);
            state.food = Some(pos);
        }
        state
    }

    #[test]
    fn test_new_game() {
        let mut engine = engine(20);
        let state = engine.new_game();

        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 5));
        assert_eq!(state.snake.direction(), Direction::Right);
        assert!(state.food.is_some());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(10);
        let mut state = state_with(10, &[(5, 5), (5, 4), (5, 3)], Direction::Right, Some((0, 0)));

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.head(), Position::new(5, 6));
        assert_eq!(state.grid.get(Position::new(5, 6)), Cell::Snake);
        assert_eq!(state.grid.get(Position::new(5, 3)), Cell::Empty);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(20);
        let mut state = state_with(20, &[(10, 5)], Direction::Right, Some((10, 6)));

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::FoodEaten);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.head(), Position::new(10, 6));
        let food = state.food.unwrap();
        assert_ne!(food, Position::new(10, 6));
        assert_ne!(food, Position::new(10, 5));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_score_saturates_at_max() {
        let config = GameConfig {
            food_reward: u32::MAX,
            seed: Some(3),
            ..GameConfig::new(10)
        };
        let mut engine = GameEngine::new(&config);
        let mut state = state_with(10, &[(5, 5), (5, 4)], Direction::Right, Some((5, 6)));

        assert_eq!(engine.step(&mut state), StepOutcome::FoodEaten);
        assert_eq!(state.score, u32::MAX);

        // Second food right ahead
        if let Some(old) = state.food {
            state.grid.set(old, Cell::Empty);
        }
        state.grid.set(Position::new(5, 7), Cell::Food);
        state.food = Some(Position::new(5, 7));

        assert_eq!(engine.step(&mut state), StepOutcome::FoodEaten);
        assert_eq!(state.score, u32::MAX);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine(10);
        let mut state = state_with(10, &[(5, 0), (5, 1)], Direction::Left, Some((0, 0)));
        let before = state.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::GameOver(CollisionType::Wall));
        assert_eq!(state, before);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(10);
        // Head at (5,5) turning up into (4,5), which is part of the body
        let mut state = state_with(
            10,
            &[(5, 5), (5, 4), (4, 4), (4, 5), (4, 6)],
            Direction::Right,
            Some((9, 9)),
        );
        state.snake.set_direction(Direction::Up);

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::GameOver(CollisionType::SelfCollision));
    }

    #[test]
    fn test_moving_into_current_tail_collides() {
        let mut engine = engine(10);
        // A 2x2 loop: the head's next cell is the tail, which would vacate this tick
        let mut state = state_with(10, &[(5, 5), (6, 5), (6, 4), (5, 4)], Direction::Up, Some((0, 0)));
        state.snake.set_direction(Direction::Left);

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::GameOver(CollisionType::SelfCollision));
    }

    #[test]
    fn test_adjacent_body_is_not_a_collision() {
        let mut engine = engine(20);
        // Heading left from (5,3): (5,2) is free
        let mut state = state_with(20, &[(5, 3), (5, 4), (5, 5)], Direction::Left, Some((0, 0)));
        assert_eq!(engine.step(&mut state), StepOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(5, 2));

        // Same move, but the body curls round so (5,2) is occupied by the tail
        let mut state = state_with(20, &[(5, 3), (4, 3), (4, 2), (5, 2)], Direction::Left, Some((0, 0)));
        assert_eq!(
            engine.step(&mut state),
            StepOutcome::GameOver(CollisionType::SelfCollision)
        );

        // Passing alongside the body is fine
        let mut state = state_with(20, &[(5, 3), (4, 3), (4, 2), (4, 1)], Direction::Left, Some((0, 0)));
        assert_eq!(engine.step(&mut state), StepOutcome::Moved);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_lethal_reversal() {
        let mut engine = engine(10);
        let mut state = state_with(10, &[(5, 5), (5, 4)], Direction::Right, Some((0, 0)));
        assert!(state.snake.turn(Direction::Left, ReversalPolicy::Lethal));

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::GameOver(CollisionType::SelfCollision));
    }

    #[test]
    fn test_board_filled() {
        let mut engine = engine(5);
        // Snake covers every cell except (0,0), which holds the food
        let mut body: Vec<(i32, i32)> = (1..5).map(|col| (0, col)).collect();
        for row in 1..5 {
            let cols: Vec<i32> = if row % 2 == 1 { (0..5).rev().collect() } else { (0..5).collect() };
            body.extend(cols.into_iter().map(|col| (row, col)));
        }
        // Head is (0,1), heading left onto the food
        let mut state = state_with(5, &body, Direction::Left, Some((0, 0)));
        assert_eq!(state.snake.head(), Position::new(0, 1));

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::BoardFilled);
        assert_eq!(state.food, None);
        assert_eq!(state.snake.len(), 25);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_invariants_hold_over_random_walk() {
        let mut engine = engine(12);
        let mut state = engine.new_game();
        let mut rng = StdRng::seed_from_u64(11);
        let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        for _ in 0..2_000 {
            let candidate = directions[rng.gen_range(0..4)];
            state.snake.turn(candidate, ReversalPolicy::Ignore);

            let length_before = state.snake.len();
            let score_before = state.score;
            let outcome = engine.step(&mut state);

            match outcome {
                StepOutcome::Moved => {
                    assert_eq!(state.snake.len(), length_before);
                    assert_eq!(state.score, score_before);
                }
                StepOutcome::FoodEaten | StepOutcome::BoardFilled => {
                    assert_eq!(state.snake.len(), length_before + 1);
                    assert_eq!(state.score, score_before + 10);
                }
                StepOutcome::GameOver(_) => state = engine.new_game(),
            }
            assert!(state.is_consistent());
        }
    }
}
