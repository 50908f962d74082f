//! Users screen: search line, sort control, users table, and the add form.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::debug;

use roster_core::{DraftField, User, UserDraft, ViewQuery, derive_view};

use crate::action::{Action, SubmissionId};
use crate::component::Component;
use crate::theme;

pub struct UsersScreen {
    focused: bool,
    /// Working collection as last published by the store.
    users: Arc<Vec<Arc<User>>>,
    query: ViewQuery,
    /// `users` filtered and sorted by `query`.
    view: Vec<Arc<User>>,
    table_state: TableState,
    search_active: bool,
    form_open: bool,
    draft: UserDraft,
    active_field: DraftField,
    /// Submission whose POST has not answered yet.
    pending: Option<SubmissionId>,
    next_submission: SubmissionId,
}

impl UsersScreen {
    pub fn new(query: ViewQuery) -> Self {
        Self {
            focused: false,
            users: Arc::new(Vec::new()),
            query,
            view: Vec::new(),
            table_state: TableState::default(),
            search_active: false,
            form_open: false,
            draft: UserDraft::default(),
            active_field: DraftField::Name,
            pending: None,
            next_submission: 0,
        }
    }

    /// Rebuild the derived view and keep the selection inside it.
    fn recompute(&mut self) {
        self.view = derive_view(&self.users, &self.query);
        if self.view.is_empty() {
            self.table_state.select(None);
        } else {
            let idx = self.selected_index().min(self.view.len() - 1);
            self.table_state.select(Some(idx));
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        if self.view.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(self.view.len() - 1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.view.is_empty() {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, self.view.len() as isize - 1);
        self.select(next as usize);
    }

    fn selected_user(&self) -> Option<&Arc<User>> {
        self.table_state.selected().and_then(|i| self.view.get(i))
    }

    fn close_form(&mut self) {
        self.form_open = false;
        self.draft.clear();
        self.active_field = DraftField::Name;
        // A response still in flight no longer owns the form.
        self.pending = None;
    }

    // ── Form input ──────────────────────────────────────────────

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => return Some(Action::ToggleAddForm),
            KeyCode::Enter => {
                if let Some(pending) = self.pending {
                    debug!(submission = pending, "add already in flight, ignoring Enter");
                } else if self.draft.is_complete() {
                    let submission = self.next_submission;
                    self.next_submission += 1;
                    self.pending = Some(submission);
                    return Some(Action::SubmitDraft(submission, self.draft.clone()));
                } else {
                    // Incomplete drafts are ignored; the form stays as typed.
                    debug!(missing = ?self.draft.missing_fields(), "draft incomplete, not submitting");
                }
            }
            KeyCode::Tab | KeyCode::Down => self.active_field = self.active_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.active_field = self.active_field.prev(),
            KeyCode::Backspace => {
                self.draft.field_mut(self.active_field).pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.draft.field_mut(self.active_field).push(ch);
            }
            _ => {}
        }
        None
    }

    // ── Rendering ───────────────────────────────────────────────

    fn render_controls(&self, frame: &mut Frame, search_area: Rect, sort_area: Rect) {
        let search = if self.search_active {
            Line::from(vec![
                Span::styled(" Search: ", theme::label()),
                Span::styled(self.query.search.clone(), theme::input_active()),
                Span::styled("▎", Style::default().fg(theme::ELECTRIC_YELLOW)),
            ])
        } else if self.query.search.is_empty() {
            Line::from(vec![
                Span::styled(" Search: ", theme::label()),
                Span::styled("press / to search", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" Search: ", theme::label()),
                Span::styled(self.query.search.clone(), theme::value()),
            ])
        };
        frame.render_widget(Paragraph::new(search), search_area);

        let sort = Line::from(vec![
            Span::styled(" Sort: ", theme::label()),
            Span::styled(
                format!("{} {}", self.query.sort_field, self.query.sort_order.arrow()),
                theme::value(),
            ),
        ]);
        frame.render_widget(Paragraph::new(sort), sort_area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            Cell::from("Name").style(theme::table_header()),
            Cell::from("Email").style(theme::table_header()),
            Cell::from("Username").style(theme::table_header()),
            Cell::from("ID").style(theme::table_header()),
        ]);

        let selected = self.table_state.selected();
        let rows: Vec<Row> = self
            .view
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let is_selected = Some(i) == selected;
                let prefix = if is_selected { "▸" } else { " " };
                let row_style = if is_selected {
                    theme::table_selected()
                } else {
                    theme::table_row()
                };

                Row::new(vec![
                    Cell::from(format!("{prefix}{}", user.name)).style(
                        Style::default().fg(theme::NEON_CYAN).add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Cell::from(user.email.clone()).style(Style::default().fg(theme::CORAL)),
                    Cell::from(user.username.clone()),
                    Cell::from(user.id.to_string()),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(if self.pending.is_some() {
                " Add User (sending…) "
            } else {
                " Add User "
            })
            .title_style(
                Style::default()
                    .fg(theme::ELECTRIC_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let focused_label = Style::default()
            .fg(theme::ELECTRIC_YELLOW)
            .add_modifier(Modifier::BOLD);

        let lines: Vec<Line> = [DraftField::Name, DraftField::Username, DraftField::Email]
            .into_iter()
            .map(|field| {
                let is_active = field == self.active_field;
                let lbl_style = if is_active { focused_label } else { theme::label() };
                let marker = if is_active { "▸ " } else { "  " };
                let cursor = if is_active { "▎" } else { "" };
                Line::from(vec![
                    Span::styled(marker, lbl_style),
                    Span::styled(format!("{:<10}", field.label()), lbl_style),
                    Span::styled(self.draft.get(field).to_owned(), theme::value()),
                    Span::styled(cursor, Style::default().fg(theme::ELECTRIC_YELLOW)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.form_open {
            Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("submit  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  j/k ", theme::key_hint_key()),
                Span::styled("navigate  ", theme::key_hint()),
                Span::styled("s ", theme::key_hint_key()),
                Span::styled("sort field  ", theme::key_hint()),
                Span::styled("o ", theme::key_hint_key()),
                Span::styled("order  ", theme::key_hint()),
                Span::styled("d ", theme::key_hint_key()),
                Span::styled("delete  ", theme::key_hint()),
                Span::styled("a ", theme::key_hint_key()),
                Span::styled("add", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), area);
    }
}

impl Component for UsersScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form_open {
            return Ok(self.handle_form_key(key));
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.select(0);
                None
            }
            KeyCode::Char('G') => {
                self.select(self.view.len().saturating_sub(1));
                None
            }
            KeyCode::Char('s') => Some(Action::CycleSortField),
            KeyCode::Char('o') => Some(Action::ToggleSortOrder),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.selected_user().map(|u| Action::DeleteUser(u.id))
            }
            KeyCode::Char('a') => Some(Action::ToggleAddForm),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.move_selection(1),
            MouseEventKind::ScrollUp => self.move_selection(-1),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::UsersUpdated(users) => {
                self.users = Arc::clone(users);
                self.recompute();
            }
            Action::OpenSearch => self.search_active = true,
            Action::SearchSubmit => self.search_active = false,
            Action::CloseSearch => {
                self.search_active = false;
                self.query.search.clear();
                self.recompute();
            }
            Action::SearchInput(search) => {
                self.query.search.clone_from(search);
                self.recompute();
                self.select(0);
            }
            Action::CycleSortField => {
                self.query.sort_field = self.query.sort_field.next();
                self.recompute();
            }
            Action::ToggleSortOrder => {
                self.query.sort_order = self.query.sort_order.toggle();
                self.recompute();
            }
            Action::ToggleAddForm => {
                if self.form_open {
                    self.close_form();
                } else {
                    self.form_open = true;
                    self.active_field = DraftField::Name;
                }
            }
            Action::UserAdded(submission, _) if self.pending == Some(*submission) => {
                self.close_form();
            }
            Action::AddFailed(submission) if self.pending == Some(*submission) => {
                // Keep the input so it can be corrected and resent.
                self.pending = None;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Users ({}/{}) ", self.view.len(), self.users.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let form_height = if self.form_open { 5 } else { 0 };
        let layout = Layout::vertical([
            Constraint::Length(1),           // search
            Constraint::Length(1),           // sort
            Constraint::Min(1),              // table
            Constraint::Length(form_height), // add form
            Constraint::Length(1),           // hints
        ])
        .split(inner);

        self.render_controls(frame, layout[0], layout[1]);
        self.render_table(frame, layout[2]);
        if self.form_open {
            self.render_form(frame, layout[3]);
        }
        self.render_hints(frame, layout[4]);
    }

    fn captures_input(&self) -> bool {
        self.form_open
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Users"
    }
}
