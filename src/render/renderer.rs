use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameView, Position, SessionState};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &GameView, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Status
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if view.state == SessionState::Ended {
            frame.render_widget(self.render_game_over(view, metrics), game_area);
        } else {
            frame.render_widget(self.render_grid(view), game_area);
        }

        frame.render_widget(self.render_status(view), chunks[2]);
        frame.render_widget(self.render_controls(view.state), chunks[3]);
    }

    fn render_grid(&self, view: &GameView) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for (row, cells) in view.grid.rows().enumerate() {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, &cell)| {
                    let pos = Position::new(row as i32, col as i32);
                    Self::cell_span(cell, view.head == Some(pos))
                })
                .collect();

            lines.push(Line::from(spans));
        }

        let border_color = match view.state {
            SessionState::Paused => Color::Yellow,
            _ => Color::White,
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn cell_span(cell: Cell, is_head: bool) -> Span<'static> {
        match cell {
            Cell::Snake if is_head => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::Snake => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_stats(&self, view: &GameView, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(view.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", view.tick_interval_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_status(&self, view: &GameView) -> Paragraph<'_> {
        let color = match view.state {
            SessionState::Idle => Color::Gray,
            SessionState::Running => Color::Green,
            SessionState::Paused => Color::Yellow,
            SessionState::Ended => Color::Red,
        };

        Paragraph::new(Line::from(Span::styled(
            view.status.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn render_game_over(&self, view: &GameView, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                view.status.to_uppercase(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games Played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to reset or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: SessionState) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let mut spans = match state {
            SessionState::Idle => vec![Span::styled("Enter", key), Span::raw(" to start | ")],
            SessionState::Running | SessionState::Paused => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Space", key),
                Span::raw(" pause | "),
            ],
            SessionState::Ended => Vec::new(),
        };
        spans.extend([
            Span::styled("+/-", key),
            Span::raw(" speed | "),
            Span::styled("R", key),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Grid;
    use ratatui::{Terminal, backend::TestBackend};

    fn view(state: SessionState, status: &str) -> GameView {
        let mut grid = Grid::new(5);
        grid.set(Position::new(2, 2), Cell::Snake);
        grid.set(Position::new(0, 4), Cell::Food);
        GameView {
            grid,
            head: Some(Position::new(2, 2)),
            score: 40,
            state,
            status: status.to_string(),
            tick_interval_ms: 150,
        }
    }

    fn draw(view: &GameView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, view, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_running_frame_shows_board_and_stats() {
        let screen = draw(&view(SessionState::Running, "Score: 40"));
        assert!(screen.contains("Score: 40"));
        assert!(screen.contains("150ms"));
        assert!(screen.contains("■"));
        assert!(screen.contains("O"));
    }

    #[test]
    fn test_ended_frame_shows_game_over() {
        let screen = draw(&view(SessionState::Ended, "Game Over"));
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 40"));
    }
}
