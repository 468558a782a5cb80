//! Session lifecycle: Idle → Running ⇄ Paused → Ended, and back to Idle on reset.
//!
//! The session has no event loop of its own. A driver calls one entry point
//! per command and calls [`GameSession::on_tick`] whenever the live timer
//! fires. The session describes that timer as a [`TimerHandle`]; there is at
//! most one at any time, and every re-arm produces a handle with a new id so
//! the driver can tell a replaced timer from the one it is already running.

use anyhow::Result;
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;

use super::{
    config::GameConfig,
    direction::{Command, Direction},
    engine::{GameEngine, StepOutcome},
    grid::Grid,
    state::{CollisionType, GameState},
    view::{GameView, RenderSink},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Ended,
}

/// Why the last game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake filled the board; there is nowhere left for food
    BoardFilled,
}

/// The periodic timer the driver should be running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: u64,
    pub interval: Duration,
}

pub struct GameSession<S, R = StdRng> {
    config: GameConfig,
    engine: GameEngine<R>,
    sink: S,
    state: SessionState,
    game: Option<GameState>,
    /// Score of the last finished game, shown while no game is live
    final_score: u32,
    end_reason: Option<EndReason>,
    tick_interval_ms: u64,
    timer: Option<TimerHandle>,
    next_timer_id: u64,
}

impl<S: RenderSink> GameSession<S, StdRng> {
    /// Create an Idle session. Fails if `config` does not validate.
    pub fn new(config: GameConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let engine = GameEngine::new(&config);
        Ok(Self::with_engine(config, engine, sink))
    }
}

impl<S: RenderSink, R: Rng> GameSession<S, R> {
    pub fn with_rng(config: GameConfig, rng: R, sink: S) -> Result<Self> {
        config.validate()?;
        let engine = GameEngine::with_rng(&config, rng);
        Ok(Self::with_engine(config, engine, sink))
    }

    fn with_engine(config: GameConfig, engine: GameEngine<R>, sink: S) -> Self {
        let tick_interval_ms = GameConfig::clamp_tick_interval(config.tick_interval_ms);
        let mut session = Self {
            config,
            engine,
            sink,
            state: SessionState::Idle,
            game: None,
            final_score: 0,
            end_reason: None,
            tick_interval_ms,
            timer: None,
            next_timer_id: 1,
        };
        session.emit();
        session
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => self.on_direction(direction),
            Command::Start => self.on_start(),
            Command::Pause => self.on_pause(),
            Command::Reset => self.on_reset(),
            Command::SetSpeed(ms) => self.set_tick_interval_ms(ms),
        }
    }

    /// Begin a new game. Does nothing unless the session is Idle.
    pub fn on_start(&mut self) {
        if self.state != SessionState::Idle {
            return;
        }

        self.game = Some(self.engine.new_game());
        self.final_score = 0;
        self.end_reason = None;
        self.state = SessionState::Running;
        self.arm_timer();
        info!(
            "Game started on a {0}x{0} board at {1}ms per tick",
            self.config.board_size, self.tick_interval_ms
        );
        self.emit();
    }

    /// Pause a running game or resume a paused one
    pub fn on_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.cancel_timer();
                self.state = SessionState::Paused;
                info!("Game paused");
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                self.arm_timer();
                info!("Game resumed");
            }
            SessionState::Idle | SessionState::Ended => return,
        }
        self.emit();
    }

    /// Drop the current game and return to Idle with an empty board
    pub fn on_reset(&mut self) {
        self.cancel_timer();
        self.game = None;
        self.final_score = 0;
        self.end_reason = None;
        self.state = SessionState::Idle;
        info!("Game reset");
        self.emit();
    }

    /// Steer the snake for the next tick. Ignored unless Running.
    pub fn on_direction(&mut self, direction: Direction) {
        if self.state != SessionState::Running {
            return;
        }
        if let Some(game) = self.game.as_mut()
            && !game.snake.turn(direction, self.config.reversal)
        {
            debug!("Ignored reversal to {:?}", direction);
        }
    }

    /// Advance the game by one step. Returns `None` when no game is running,
    /// which is how a tick from a cancelled timer is absorbed.
    pub fn on_tick(&mut self) -> Option<StepOutcome> {
        if self.state != SessionState::Running {
            return None;
        }
        let game = self.game.as_mut()?;

        let outcome = self.engine.step(game);
        match outcome {
            StepOutcome::Moved => {}
            StepOutcome::FoodEaten => {
                debug!("Food eaten, score {}, length {}", game.score, game.snake.len());
            }
            StepOutcome::BoardFilled => self.end(EndReason::BoardFilled),
            StepOutcome::GameOver(collision) => self.end(EndReason::Collision(collision)),
        }

        self.emit();
        Some(outcome)
    }

    /// Change the tick cadence. A running game gets a fresh timer at the new
    /// interval straight away; otherwise the interval is used on the next arm.
    pub fn set_tick_interval_ms(&mut self, ms: u64) {
        let ms = GameConfig::clamp_tick_interval(ms);
        if ms == self.tick_interval_ms {
            return;
        }

        self.tick_interval_ms = ms;
        if self.state == SessionState::Running {
            self.arm_timer();
        }
        info!("Tick interval set to {}ms", ms);
        self.emit();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.game.as_ref().map_or(self.final_score, |game| game.score)
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn view(&self) -> GameView {
        let (grid, head) = match &self.game {
            Some(game) => (game.grid.clone(), Some(game.snake.head())),
            None => (Grid::new(self.config.board_size), None),
        };

        GameView {
            grid,
            head,
            score: self.score(),
            state: self.state,
            status: self.status(),
            tick_interval_ms: self.tick_interval_ms,
        }
    }

    fn status(&self) -> String {
        match (self.state, self.end_reason) {
            (SessionState::Idle | SessionState::Running, _) => format!("Score: {}", self.score()),
            (SessionState::Paused, _) => "Game Paused".to_string(),
            (SessionState::Ended, Some(EndReason::BoardFilled)) => "Board Cleared".to_string(),
            (SessionState::Ended, _) => "Game Over".to_string(),
        }
    }

    fn end(&mut self, reason: EndReason) {
        self.cancel_timer();
        self.final_score = self.score();
        self.game = None;
        self.end_reason = Some(reason);
        self.state = SessionState::Ended;
        info!("Game over ({:?}) with score {}", reason, self.final_score);
    }

    fn arm_timer(&mut self) {
        self.timer = Some(TimerHandle {
            id: self.next_timer_id,
            interval: Duration::from_millis(self.tick_interval_ms),
        });
        self.next_timer_id += 1;
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }

    fn emit(&mut self) {
        let view = self.view();
        self.sink.render(&view);
    }
}
