//! Application core: event loop, key routing and action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use roster_core::{Directory, ViewQuery};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::UsersScreen;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Directory backing the users screen.
    directory: Directory,
    /// The single screen component.
    screen: Box<dyn Component>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search bar is taking keystrokes.
    search_active: bool,
    /// Search text as typed so far.
    search_query: String,
    /// Components and spawned tasks dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancels the data bridge on shutdown.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(directory: Directory, query: ViewQuery) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let search_query = query.search.clone();

        Self {
            directory,
            screen: Box::new(UsersScreen::new(query)),
            running: true,
            help_visible: false,
            search_active: false,
            search_query,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.screen.set_focused(true);
        debug!(screen = self.screen.id(), "screen mounted");

        // One load, then follow the store
        let directory = self.directory.clone();
        let tx = self.action_tx.clone();
        let cancel = self.data_cancel.clone();
        tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(directory, tx, cancel).await;
        });

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.search_active {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseSearch),
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Backspace => {
                    let mut query = self.search_query.clone();
                    query.pop();
                    Some(Action::SearchInput(query))
                }
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let mut query = self.search_query.clone();
                    query.push(ch);
                    Some(Action::SearchInput(query))
                }
                _ => None,
            });
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Form fields take every printable key
        if self.screen.captures_input() {
            return self.screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),
            _ => {}
        }

        self.screen.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        self.screen.handle_mouse_event(mouse)
    }

    /// Process a single action, then propagate it to the screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::DeleteUser(id) => {
                // Local only; the data bridge delivers the new snapshot.
                self.directory.delete(*id);
            }

            Action::SubmitDraft(submission, draft) => {
                let submission = *submission;
                let directory = self.directory.clone();
                let tx = self.action_tx.clone();
                let draft = draft.clone();
                tokio::spawn(async move {
                    let outcome = match directory.add(&draft).await {
                        Ok(user) => Action::UserAdded(submission, user),
                        Err(e) => {
                            error!(error = %e, submission, "failed to add user");
                            Action::AddFailed(submission)
                        }
                    };
                    let _ = tx.send(outcome);
                });
            }

            // Render is handled in the main loop, not here
            Action::Render | Action::Tick => {}

            other => {
                match other {
                    Action::OpenSearch => self.search_active = true,
                    Action::SearchSubmit => self.search_active = false,
                    Action::CloseSearch => {
                        self.search_active = false;
                        self.search_query.clear();
                    }
                    Action::SearchInput(query) => self.search_query.clone_from(query),
                    _ => {}
                }

                if let Some(follow_up) = self.screen.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.screen.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Render the bottom status bar with mode and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode = if self.search_active {
            Span::styled(" SEARCH ", theme::input_active())
        } else if self.screen.captures_input() {
            Span::styled(" INSERT ", theme::input_active())
        } else {
            Span::styled(" NORMAL ", theme::value())
        };

        let hints = if self.search_active {
            Span::styled(" │ Enter keep  Esc clear", theme::key_hint())
        } else {
            Span::styled(" │ ? help  / search  q quit", theme::key_hint())
        };

        frame.render_widget(Paragraph::new(Line::from(vec![mode, hints])), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 52u16.min(area.width.saturating_sub(4));
        let help_height = 18u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |keys: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };
        let heading = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };

        let help_text = vec![
            Line::from(""),
            heading("Table"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("g/G", "Top / bottom"),
            entry("s", "Cycle sort field"),
            entry("o", "Toggle sort order"),
            entry("d/Del", "Delete (local only)"),
            entry("a", "Add user / cancel"),
            Line::from(""),
            heading("Add form"),
            entry("Tab/S-Tab", "Next / previous field"),
            entry("Enter", "Submit when complete"),
            Line::from(""),
            heading("Global"),
            entry("/", "Search name or username"),
            entry("q  Ctrl+c", "Quit"),
            Line::from(Span::styled(
                "                   Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use roster_core::DirectoryConfig;

    fn app() -> App {
        let config = DirectoryConfig::public_defaults().unwrap();
        App::new(Directory::new(config).unwrap(), ViewQuery::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed a key through routing and processing, like one loop turn.
    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let action = app.handle_key_event(key(code)).unwrap();
        if let Some(ref a) = action {
            app.process_action(a).unwrap();
        }
        action
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn search_mode_accumulates_typed_text() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('/')), Some(Action::OpenSearch));
        assert!(app.search_active);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('l'));
        // 'q' is text here, not quit
        assert_eq!(
            press(&mut app, KeyCode::Char('q')),
            Some(Action::SearchInput("alq".into()))
        );
        assert_eq!(
            press(&mut app, KeyCode::Backspace),
            Some(Action::SearchInput("al".into()))
        );
        assert!(app.running);

        assert_eq!(press(&mut app, KeyCode::Enter), Some(Action::SearchSubmit));
        assert!(!app.search_active);
        assert_eq!(app.search_query, "al");
    }

    #[test]
    fn escape_clears_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(press(&mut app, KeyCode::Esc), Some(Action::CloseSearch));
        assert!(!app.search_active);
        assert_eq!(app.search_query, "");
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible);
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_visible);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit));
        assert!(!app.running);
    }

    #[test]
    fn open_form_receives_global_keys_as_text() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('a')), Some(Action::ToggleAddForm));
        assert!(app.screen.captures_input());
        assert_eq!(press(&mut app, KeyCode::Char('q')), None);
        assert_eq!(press(&mut app, KeyCode::Char('/')), None);
        assert!(app.running);
        assert!(!app.search_active);
    }
}
