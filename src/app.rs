use crate::catalog::Catalog;
use crate::error::DictationError;
use crate::session::{Phase, SessionState};
use crate::view::{project, DisplayModel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Ties a catalog to a practice session and translates keys into session
/// operations.
#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    pub session: SessionState,
    /// Highlighted entry on the selection screen.
    pub cursor: usize,
    pub show_reference: bool,
}

impl App {
    pub fn new(catalog: Catalog, show_reference: bool) -> Self {
        Self {
            catalog,
            session: SessionState::new(),
            cursor: 0,
            show_reference,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn display(&self) -> Result<DisplayModel, DictationError> {
        project(&self.session)
    }

    /// Start the text under the cursor.
    pub fn open_selected(&mut self) -> Result<(), DictationError> {
        let text = self
            .catalog
            .texts()
            .get(self.cursor)
            .cloned()
            .ok_or(DictationError::EmptyCatalog)?;
        self.session.select_text(text)
    }

    pub fn open(&mut self, id: u32) -> Result<(), DictationError> {
        let text = self.catalog.require(id)?.clone();
        if let Some(pos) = self.catalog.position_of(id) {
            self.cursor = pos;
        }
        self.session.select_text(text)
    }

    pub fn open_random(&mut self) -> Result<(), DictationError> {
        let id = self
            .catalog
            .random(&mut rand::thread_rng())
            .map(|t| t.id)
            .ok_or(DictationError::EmptyCatalog)?;
        self.open(id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Control, DictationError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Control::Quit);
        }

        match self.phase() {
            Phase::Selecting => self.on_selecting_key(key),
            Phase::Writing => self.on_writing_key(key),
            Phase::Checked => self.on_checked_key(key),
        }
    }

    fn on_selecting_key(&mut self, key: KeyEvent) -> Result<Control, DictationError> {
        let last = self.catalog.len().saturating_sub(1);

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Control::Quit),
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor = (self.cursor + 1).min(last),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = last,
            KeyCode::Enter => self.open_selected()?,
            KeyCode::Char('r') => self.open_random()?,
            KeyCode::Char(c) => {
                if let Some(pos) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    if pos <= last {
                        self.cursor = pos;
                        self.open_selected()?;
                    }
                }
            }
            _ => {}
        }

        Ok(Control::Continue)
    }

    fn on_writing_key(&mut self, key: KeyEvent) -> Result<Control, DictationError> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.session.deselect_text(),
            KeyCode::Tab => {
                if self.session.can_check() {
                    self.session.check()?;
                } else {
                    log::debug!("check ignored: nothing to check yet");
                }
            }
            KeyCode::Char('r') if ctrl => self.session.reset(),
            KeyCode::Char('w') if ctrl => {
                let mut draft = self.session.draft().trim_end().to_owned();
                let keep = draft
                    .char_indices()
                    .rev()
                    .find(|(_, c)| c.is_whitespace())
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);
                draft.truncate(keep);
                self.edit_draft(draft)?;
            }
            KeyCode::Char(c) if !ctrl => {
                let mut draft = self.session.draft().to_owned();
                draft.push(c);
                self.edit_draft(draft)?;
            }
            KeyCode::Enter => {
                let mut draft = self.session.draft().to_owned();
                draft.push('\n');
                self.edit_draft(draft)?;
            }
            KeyCode::Backspace => {
                let mut draft = self.session.draft().to_owned();
                if draft.pop().is_some() {
                    self.edit_draft(draft)?;
                }
            }
            _ => {}
        }

        Ok(Control::Continue)
    }

    fn on_checked_key(&mut self, key: KeyEvent) -> Result<Control, DictationError> {
        match key.code {
            KeyCode::Char('q') => return Ok(Control::Quit),
            KeyCode::Char('r') | KeyCode::Enter => self.session.reset(),
            KeyCode::Char('b') | KeyCode::Esc => self.session.deselect_text(),
            _ => {}
        }

        Ok(Control::Continue)
    }

    fn edit_draft(&mut self, draft: String) -> Result<(), DictationError> {
        match self.session.update_draft(draft) {
            Err(DictationError::InvariantViolation) => {
                log::debug!("draft edit ignored after check");
                Ok(())
            }
            other => other,
        }
    }
}
