//! Screen-level UI building block.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// A self-contained piece of the UI driven by the app loop.
///
/// Input hooks may answer with an [`Action`]; the loop queues it and later
/// hands every queued action back through [`update`](Self::update).
pub trait Component: Send {
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Only wheel scrolling reaches components.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// True while a text field is being edited. The app then forwards every
    /// key here instead of interpreting `q`, `?` or `/` itself.
    fn captures_input(&self) -> bool {
        false
    }

    fn set_focused(&mut self, _focused: bool) {}

    /// Name used in log lines.
    fn id(&self) -> &str;
}
