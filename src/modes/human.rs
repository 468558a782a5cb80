use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::config::SPEED_STEP_MS;
use crate::game::{GameConfig, GameSession, LatestView, TimerHandle};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Runs a single tokio interval matching the session's live timer handle.
///
/// A new handle id replaces the interval; no handle drops it, so a cancelled
/// or superseded timer can never fire.
struct TickTimer {
    armed: Option<TimerHandle>,
    interval: Option<Interval>,
}

impl TickTimer {
    fn new() -> Self {
        Self {
            armed: None,
            interval: None,
        }
    }

    fn sync(&mut self, handle: Option<TimerHandle>) {
        if self.armed == handle {
            return;
        }

        // Like a browser setInterval, the first tick comes one full period after arming
        self.interval = handle.map(|handle| {
            let mut timer = interval_at(Instant::now() + handle.interval, handle.interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });
        self.armed = handle;
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

pub struct HumanMode {
    session: GameSession<LatestView>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            session: GameSession::new(config, LatestView::new())?,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = TickTimer::new();
        tick_timer.sync(self.session.timer());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.session.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    if let Some(view) = self.session.sink().view() {
                        terminal.draw(|frame| {
                            self.renderer.render(frame, view, &self.metrics);
                        }).context("Failed to draw frame")?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.metrics
                .observe(self.session.state(), self.session.score());
            tick_timer.sync(self.session.timer());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) {
        let current = self.session.tick_interval_ms();
        match action {
            KeyAction::GameCommand(command) => self.session.dispatch(command),
            KeyAction::SpeedUp => self
                .session
                .set_tick_interval_ms(current.saturating_sub(SPEED_STEP_MS)),
            KeyAction::SlowDown => self
                .session
                .set_tick_interval_ms(current.saturating_add(SPEED_STEP_MS)),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
