use diktant::{app::App, session::Phase, view::DisplayModel};
use ratatui::Frame;

use crate::ui::{render_checked, render_selection, render_writing};

/// A UI Screen boundary: renders one phase of the session
pub trait Screen {
    fn render(&self, app: &App, model: &DisplayModel, f: &mut Frame);
}

/// Selection screen - the list of reference texts
pub struct SelectionScreen;

impl Screen for SelectionScreen {
    fn render(&self, app: &App, _model: &DisplayModel, f: &mut Frame) {
        render_selection(app, f);
    }
}

/// Writing screen - reference text and the draft being typed
pub struct WritingScreen;

impl Screen for WritingScreen {
    fn render(&self, app: &App, model: &DisplayModel, f: &mut Frame) {
        render_writing(app, model, f);
    }
}

/// Checked screen - highlighted draft and the score summary
pub struct CheckedScreen;

impl Screen for CheckedScreen {
    fn render(&self, app: &App, model: &DisplayModel, f: &mut Frame) {
        render_checked(app, model, f);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Selecting => Box::new(SelectionScreen),
        Phase::Writing => Box::new(WritingScreen),
        Phase::Checked => Box::new(CheckedScreen),
    }
}
