use super::grid::Grid;
use super::session::SessionState;
use super::state::Position;

/// Snapshot of everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub grid: Grid,
    /// Snake head, so it can be drawn apart from the body
    pub head: Option<Position>,
    pub score: u32,
    pub state: SessionState,
    pub status: String,
    pub tick_interval_ms: u64,
}

/// Receives a view after every tick and every state change.
pub trait RenderSink {
    fn render(&mut self, view: &GameView);
}

/// Keeps only the most recent view, for front ends that draw on their own clock.
#[derive(Debug, Default)]
pub struct LatestView {
    view: Option<GameView>,
}

impl LatestView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&GameView> {
        self.view.as_ref()
    }
}

impl RenderSink for LatestView {
    fn render(&mut self, view: &GameView) {
        self.view = Some(view.clone());
    }
}

/// Records every view it receives
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ViewLog {
    pub views: Vec<GameView>,
}

#[cfg(test)]
impl RenderSink for ViewLog {
    fn render(&mut self, view: &GameView) {
        self.views.push(view.clone());
    }
}
