use std::time::{Duration, Instant};

use crate::game::SessionState;

/// Play time and best score for the current process. Nothing is persisted.
pub struct GameMetrics {
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Play time banked before the current running stretch
    banked: Duration,
    running_since: Option<Instant>,
    last_state: SessionState,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            banked: Duration::ZERO,
            running_since: None,
            last_state: SessionState::Idle,
        }
    }

    /// Refresh `elapsed_time`. The clock only runs while a game is Running.
    pub fn update(&mut self) {
        self.elapsed_time = self.banked
            + self
                .running_since
                .map_or(Duration::ZERO, |since| since.elapsed());
    }

    /// Feed the session state after every command or tick
    pub fn observe(&mut self, state: SessionState, score: u32) {
        if state == self.last_state {
            return;
        }

        if self.last_state == SessionState::Idle && state == SessionState::Running {
            self.on_game_start();
        }
        if state == SessionState::Ended {
            self.on_game_over(score);
        }

        match (self.last_state, state) {
            (_, SessionState::Running) => self.running_since = Some(Instant::now()),
            (SessionState::Running, _) => {
                if let Some(since) = self.running_since.take() {
                    self.banked += since.elapsed();
                }
            }
            _ => {}
        }

        if state == SessionState::Idle {
            self.banked = Duration::ZERO;
        }

        self.last_state = state;
        self.update();
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = None;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
