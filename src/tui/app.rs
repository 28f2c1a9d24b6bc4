//! Main application logic for the terminal dashboard.
//!
//! This module contains the `App` struct which manages the dashboard state,
//! handles key input, renders the screens (task list, task detail, forms,
//! dialogs), and routes every change through the `Tracker`.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::display::{format_due_relative, format_priority, format_progress, format_status};
use crate::error::StoreError;
use crate::fields::{StatusFilter, SubjectFilter};
use crate::query::{distinct_subjects, filter_tasks, is_overdue};
use crate::task::Task;
use crate::tracker::Tracker;
use crate::tui::{
    colors::{priority_color, INK},
    enums::{AppState, PendingAction},
    input::InputField,
    task_form::{TaskForm, DESCRIPTION_ORDER, DUE_ORDER, PRIORITY_ORDER, SUBJECT_ORDER, TITLE_ORDER},
    utils::centered_rect,
};

/// Dashboard state for one session.
pub struct App<'a> {
    tracker: &'a mut Tracker,
    state: AppState,
    /// Screen to return to when a dialog closes.
    previous_state: AppState,
    task_list_state: TableState,
    sub_task_state: ListState,
    filtered_tasks: Vec<String>,
    selected_task: Option<String>,
    status_filter: StatusFilter,
    subject_filter: SubjectFilter,
    task_form: TaskForm,
    sub_task_input: InputField,
    pending_action: Option<PendingAction>,
    status_message: String,
}

impl<'a> App<'a> {
    pub fn new(tracker: &'a mut Tracker) -> Self {
        let mut app = App {
            tracker,
            state: AppState::TaskList,
            previous_state: AppState::TaskList,
            task_list_state: TableState::default(),
            sub_task_state: ListState::default(),
            filtered_tasks: Vec::new(),
            selected_task: None,
            status_filter: StatusFilter::All,
            subject_filter: SubjectFilter::All,
            task_form: TaskForm::new(),
            sub_task_input: InputField::new(),
            pending_action: None,
            status_message: String::new(),
        };
        app.update_filtered_tasks();
        app
    }

    /// Recompute the visible rows, keeping the selection on the same task when possible.
    fn update_filtered_tasks(&mut self) {
        let old_selected_id = self
            .task_list_state
            .selected()
            .and_then(|idx| self.filtered_tasks.get(idx))
            .cloned();

        self.filtered_tasks = filter_tasks(self.tracker.tasks(), self.status_filter, &self.subject_filter)
            .into_iter()
            .map(|t| t.id.clone())
            .collect();

        let restored = old_selected_id.and_then(|id| self.filtered_tasks.iter().position(|t| *t == id));
        let selection = match restored {
            Some(idx) => Some(idx),
            None if self.filtered_tasks.is_empty() => None,
            None => Some(
                self.task_list_state
                    .selected()
                    .unwrap_or(0)
                    .min(self.filtered_tasks.len() - 1),
            ),
        };
        self.task_list_state.select(selection);
    }

    fn highlighted_task_id(&self) -> Option<String> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.filtered_tasks.get(idx))
            .cloned()
    }

    fn get_selected_task(&self) -> Option<&Task> {
        self.selected_task
            .as_deref()
            .and_then(|id| self.tracker.store().get(id))
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Report a failed operation and keep the dashboard running.
    fn report(&mut self, err: StoreError) {
        let msg = match err {
            StoreError::Persistence(_) => format!("{err}. Please try again."),
            other => other.to_string(),
        };
        self.set_status_message(msg);
    }

    fn cycle_subject_filter(&mut self) {
        let subjects: Vec<String> = distinct_subjects(self.tracker.tasks()).into_iter().collect();
        self.subject_filter = match &self.subject_filter {
            SubjectFilter::All => subjects
                .first()
                .cloned()
                .map(SubjectFilter::Subject)
                .unwrap_or(SubjectFilter::All),
            SubjectFilter::Subject(current) => subjects
                .iter()
                .position(|s| s == current)
                .and_then(|i| subjects.get(i + 1))
                .cloned()
                .map(SubjectFilter::Subject)
                .unwrap_or(SubjectFilter::All),
        };
        self.update_filtered_tasks();
        self.set_status_message(format!("Subject: {}", self.subject_filter));
    }

    fn toggle_task(&mut self, id: &str) {
        match self.tracker.toggle_task(id) {
            Ok(outcome) if outcome.completed_now => {
                let stats = self.tracker.stats();
                let mut msg = format!(
                    "* Completed '{}'! Streak: {} *",
                    outcome.task.title, outcome.streak
                );
                if stats.goal_reached() {
                    msg.push_str("  Monthly goal reached!");
                }
                self.set_status_message(msg);
            }
            Ok(outcome) => self.set_status_message(format!("Reopened '{}'", outcome.task.title)),
            Err(e) => self.report(e),
        }
        self.update_filtered_tasks();
    }

    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.task_list_state.selected() {
                    self.task_list_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.filtered_tasks.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.highlighted_task_id() {
                    self.selected_task = Some(id);
                    self.sub_task_state = ListState::default();
                    if self.get_selected_task().is_some_and(|t| !t.sub_tasks.is_empty()) {
                        self.sub_task_state.select(Some(0));
                    }
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = self.highlighted_task_id() {
                    self.toggle_task(&id);
                }
            }
            KeyCode::Char('a') => {
                self.task_form = match &self.subject_filter {
                    SubjectFilter::Subject(s) => TaskForm::with_subject(s),
                    SubjectFilter::All => TaskForm::new(),
                };
                self.previous_state = AppState::TaskList;
                self.state = AppState::AddTask;
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.highlighted_task_id() {
                    self.open_edit(id, AppState::TaskList);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.highlighted_task_id() {
                    self.pending_action = Some(PendingAction::DeleteTask(id));
                    self.previous_state = AppState::TaskList;
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('f') => {
                self.status_filter = self.status_filter.cycle();
                self.update_filtered_tasks();
                self.set_status_message(format!("Status: {:?}", self.status_filter));
            }
            KeyCode::Char('s') => self.cycle_subject_filter(),
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.previous_state = AppState::TaskList;
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    fn open_edit(&mut self, id: String, from: AppState) {
        if let Some(task) = self.tracker.store().get(&id) {
            self.task_form = TaskForm::from_task(task);
            self.selected_task = Some(id);
            self.previous_state = from;
            self.state = AppState::EditTask;
        }
    }

    fn handle_detail_input(&mut self, key: KeyCode) {
        let Some(task_id) = self.selected_task.clone() else {
            self.state = AppState::TaskList;
            return;
        };
        let sub_count = self.get_selected_task().map_or(0, |t| t.sub_tasks.len());
        let selected_sub_id = self
            .sub_task_state
            .selected()
            .and_then(|i| self.get_selected_task().and_then(|t| t.sub_tasks.get(i)))
            .map(|s| s.id.clone());

        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state = AppState::TaskList;
                self.update_filtered_tasks();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.sub_task_state.selected() {
                    self.sub_task_state.select(Some(i.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(i) = self.sub_task_state.selected() {
                    if i + 1 < sub_count {
                        self.sub_task_state.select(Some(i + 1));
                    }
                }
            }
            KeyCode::Char(' ') => {
                if let Some(sub_id) = selected_sub_id {
                    if let Err(e) = self.tracker.toggle_sub_task(&task_id, &sub_id) {
                        self.report(e);
                    }
                }
            }
            KeyCode::Char('x') => self.toggle_task(&task_id),
            KeyCode::Char('n') => {
                self.sub_task_input.clear();
                self.sub_task_input.active = true;
                self.state = AppState::AddSubTask;
            }
            KeyCode::Char('r') => {
                let current = self
                    .sub_task_state
                    .selected()
                    .and_then(|i| self.get_selected_task().and_then(|t| t.sub_tasks.get(i)))
                    .map(|s| s.title.clone());
                if let Some(title) = current {
                    self.sub_task_input = InputField::with_value(&title);
                    self.sub_task_input.active = true;
                    self.state = AppState::RenameSubTask;
                }
            }
            KeyCode::Char('d') => {
                if let Some(sub_task_id) = selected_sub_id {
                    self.pending_action = Some(PendingAction::DeleteSubTask {
                        task_id,
                        sub_task_id,
                    });
                    self.previous_state = AppState::TaskDetail;
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('e') => self.open_edit(task_id, AppState::TaskDetail),
            _ => {}
        }
    }

    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers, is_edit: bool) {
        match key {
            KeyCode::Esc => {
                self.state = self.previous_state;
                self.set_status_message("Cancelled");
            }
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Enter => self.submit_form(is_edit),
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => self.submit_form(is_edit),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self, is_edit: bool) {
        let today = self.tracker.today();
        let result = if is_edit {
            let Some(id) = self.selected_task.clone() else {
                self.state = AppState::TaskList;
                return;
            };
            match self.task_form.to_patch(today) {
                Ok(patch) => self.tracker.update_task(&id, patch).map(|t| format!("Updated '{}'", t.title)),
                Err(msg) => {
                    self.set_status_message(msg);
                    return;
                }
            }
        } else {
            match self.task_form.to_draft(today) {
                Ok(draft) => self.tracker.create_task(draft).map(|t| {
                    self.selected_task = Some(t.id.clone());
                    format!("Added '{}'", t.title)
                }),
                Err(msg) => {
                    self.set_status_message(msg);
                    return;
                }
            }
        };
        match result {
            Ok(msg) => {
                self.set_status_message(msg);
                self.state = self.previous_state;
                self.update_filtered_tasks();
            }
            // Stay on the form so the user can fix the input.
            Err(e) => self.report(e),
        }
    }

    fn handle_sub_task_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::TaskDetail,
            KeyCode::Enter if self.state == AppState::RenameSubTask => self.submit_sub_task_rename(),
            KeyCode::Enter => {
                if let Some(task_id) = self.selected_task.clone() {
                    match self.tracker.add_sub_task(&task_id, &self.sub_task_input.value) {
                        Ok(sub) => {
                            self.set_status_message(format!("Added subtask '{}'", sub.title));
                            let count = self.get_selected_task().map_or(0, |t| t.sub_tasks.len());
                            self.sub_task_state.select(count.checked_sub(1));
                            self.state = AppState::TaskDetail;
                        }
                        Err(e) => self.report(e),
                    }
                }
            }
            KeyCode::Backspace => self.sub_task_input.handle_backspace(),
            KeyCode::Left => self.sub_task_input.move_cursor_left(),
            KeyCode::Right => self.sub_task_input.move_cursor_right(),
            KeyCode::Char(c) => self.sub_task_input.handle_char(c),
            _ => {}
        }
    }

    fn submit_sub_task_rename(&mut self) {
        let Some(task_id) = self.selected_task.clone() else {
            self.state = AppState::TaskList;
            return;
        };
        let sub_id = self
            .sub_task_state
            .selected()
            .and_then(|i| self.get_selected_task().and_then(|t| t.sub_tasks.get(i)))
            .map(|s| s.id.clone());
        let Some(sub_id) = sub_id else {
            self.state = AppState::TaskDetail;
            return;
        };
        match self
            .tracker
            .rename_sub_task(&task_id, &sub_id, &self.sub_task_input.value)
        {
            Ok(_) => {
                self.set_status_message("Subtask renamed");
                self.state = AppState::TaskDetail;
            }
            Err(e) => self.report(e),
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let result = match self.pending_action.take() {
                    Some(PendingAction::DeleteTask(id)) => self.tracker.delete_task(&id).map(|_| {
                        if self.selected_task.as_deref() == Some(id.as_str()) {
                            self.selected_task = None;
                        }
                        "Task deleted"
                    }),
                    Some(PendingAction::DeleteSubTask { task_id, sub_task_id }) => self
                        .tracker
                        .delete_sub_task(&task_id, &sub_task_id)
                        .map(|_| "Subtask deleted"),
                    None => Ok(""),
                };
                match result {
                    Ok(msg) => self.set_status_message(msg),
                    Err(e) => self.report(e),
                }
                self.state = self.previous_state;
                let sub_count = self.get_selected_task().map_or(0, |t| t.sub_tasks.len());
                if let Some(i) = self.sub_task_state.selected() {
                    self.sub_task_state
                        .select(if sub_count == 0 { None } else { Some(i.min(sub_count - 1)) });
                }
                self.update_filtered_tasks();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_action = None;
                self.state = self.previous_state;
            }
            _ => {}
        }
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                self.status_message.clear();
                match self.state {
                    AppState::TaskList => return Ok(self.handle_task_list_input(key.code, key.modifiers)),
                    AppState::TaskDetail => self.handle_detail_input(key.code),
                    AppState::AddTask => self.handle_form_input(key.code, key.modifiers, false),
                    AppState::EditTask => self.handle_form_input(key.code, key.modifiers, true),
                    AppState::AddSubTask | AppState::RenameSubTask => self.handle_sub_task_input(key.code),
                    AppState::Help => self.state = self.previous_state,
                    AppState::Confirm => self.handle_confirm_input(key.code),
                }
            }
        }
        Ok(false)
    }

    /// Stats header: counters on the left, monthly goal gauge on the right.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let stats = self.tracker.stats();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let counters = Line::from(vec![
            Span::styled("STUDY TRACKER  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "Total {}  Pending {}  Done {}  ",
                stats.total_tasks, stats.pending_tasks, stats.completed_tasks
            )),
            Span::styled(
                format!("Streak {}", stats.current_streak),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(
            Paragraph::new(counters).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Monthly goal"))
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .percent(stats.goal_progress() as u16)
            .label(format!(
                "{}/{} ({}%)",
                stats.this_month_completed,
                stats.monthly_goal,
                stats.goal_progress()
            ));
        f.render_widget(gauge, chunks[1]);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = self.tracker.today();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        self.render_header(f, chunks[0]);

        let header_cells = ["Status", "Priority", "Due", "Subject", "Subs", "Title"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(INK).fg(Color::White))
            .height(1);

        let store = self.tracker.store();
        let rows: Vec<Row> = self
            .filtered_tasks
            .iter()
            .filter_map(|id| store.get(id))
            .map(|task| {
                let overdue = is_overdue(task, today);
                let style = if task.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else if overdue {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::White)
                };
                let due = if overdue {
                    format!("{} !", format_due_relative(task.due_date, today))
                } else {
                    format_due_relative(task.due_date, today)
                };
                Row::new(vec![
                    Cell::from(format_status(task.completed)),
                    Cell::from(format_priority(task.priority))
                        .style(Style::default().fg(priority_color(task.priority))),
                    Cell::from(due),
                    Cell::from(task.subject.clone()),
                    Cell::from(format_progress(task)),
                    Cell::from(task.title.clone()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Min(20),
        ];

        let title = format!(
            "Tasks ({}/{})  status: {:?}  subject: {}  - 'h' for help",
            self.filtered_tasks.len(),
            self.tracker.tasks().len(),
            self.status_filter,
            self.subject_filter
        );
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);

        if self.filtered_tasks.is_empty() {
            let msg = if self.tracker.tasks().is_empty() {
                "No tasks yet. Press 'a' to add one."
            } else {
                "No tasks match your filters."
            };
            let inner = centered_rect(60, 20, chunks[1]);
            f.render_widget(Paragraph::new(msg).alignment(Alignment::Center), inner);
        }
    }

    fn render_task_detail(&mut self, f: &mut Frame, area: Rect) {
        let today = self.tracker.today();
        let Some(task) = self.get_selected_task().cloned() else {
            return;
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(area);

        let due_line = format!(
            "{} ({}){}",
            task.due_date,
            format_due_relative(task.due_date, today),
            if is_overdue(&task, today) { "  OVERDUE" } else { "" }
        );
        let label = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![Span::styled("Title:    ", label), Span::raw(task.title.clone())]),
            Line::from(vec![Span::styled("Subject:  ", label), Span::raw(task.subject.clone())]),
            Line::from(vec![
                Span::styled("Priority: ", label),
                Span::styled(
                    format_priority(task.priority),
                    Style::default().fg(priority_color(task.priority)),
                ),
            ]),
            Line::from(vec![Span::styled("Due:      ", label), Span::raw(due_line)]),
            Line::from(vec![
                Span::styled("Status:   ", label),
                Span::raw(format_status(task.completed)),
            ]),
            Line::from(vec![
                Span::styled("Created:  ", label),
                Span::raw(task.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ]),
            Line::from(vec![Span::styled("Notes:    ", label), Span::raw(task.description.clone())]),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(format!("Task {}", task.id))),
            chunks[0],
        );

        let items: Vec<ListItem> = task
            .sub_tasks
            .iter()
            .map(|s| {
                let style = if s.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                ListItem::new(format!("[{}] {}", if s.completed { "x" } else { " " }, s.title)).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Subtasks {}", format_progress(&task))),
            )
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut self.sub_task_state);
    }

    fn render_task_form(&mut self, f: &mut Frame, area: Rect, is_edit: bool) {
        let form = &self.task_form;
        let field_style = |order: usize| {
            if form.current_field == order {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };
        let input = |field: &InputField| {
            if field.active {
                let split = field
                    .value
                    .char_indices()
                    .nth(field.cursor)
                    .map(|(i, _)| i)
                    .unwrap_or(field.value.len());
                format!("{}|{}", &field.value[..split], &field.value[split..])
            } else {
                field.value.clone()
            }
        };
        let lines = vec![
            Line::from(vec![Span::styled("Title*:       ", field_style(TITLE_ORDER)), Span::raw(input(&form.title))]),
            Line::from(vec![Span::styled("Subject*:     ", field_style(SUBJECT_ORDER)), Span::raw(input(&form.subject))]),
            Line::from(vec![Span::styled("Due*:         ", field_style(DUE_ORDER)), Span::raw(input(&form.due))]),
            Line::from(vec![
                Span::styled("Priority:     ", field_style(PRIORITY_ORDER)),
                Span::styled(
                    format!("< {} >", format_priority(form.selected_priority())),
                    Style::default().fg(priority_color(form.selected_priority())),
                ),
            ]),
            Line::from(vec![
                Span::styled("Description:  ", field_style(DESCRIPTION_ORDER)),
                Span::raw(input(&form.description)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Tab/Shift-Tab move  Left/Right priority  Enter save  Esc cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let popup = centered_rect(70, 50, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(if is_edit { "Edit Task" } else { "Add Task" }),
            ),
            popup,
        );
    }

    fn render_sub_task_input(&mut self, f: &mut Frame, area: Rect) {
        let title = if self.state == AppState::RenameSubTask {
            "Rename subtask (Enter to save)"
        } else {
            "New subtask (Enter to add)"
        };
        let popup = centered_rect(60, 20, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(format!("{}|", self.sub_task_input.value))
                .block(Block::default().borders(Borders::ALL).title(title)),
            popup,
        );
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("Task list", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Up/Down, j/k   move"),
            Line::from("  Enter          open task"),
            Line::from("  Space, x       toggle done"),
            Line::from("  a / e / d      add / edit / delete"),
            Line::from("  f              cycle status filter"),
            Line::from("  s              cycle subject filter"),
            Line::from("  q, Esc         quit"),
            Line::from(""),
            Line::from(Span::styled("Task detail", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("  Space          toggle subtask"),
            Line::from("  n / r / d      new / rename / delete subtask"),
            Line::from("  x              toggle task"),
            Line::from("  e              edit task"),
            Line::from("  Esc            back"),
        ];
        let popup = centered_rect(60, 70, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Help (any key to close)")),
            popup,
        );
    }

    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let question = match &self.pending_action {
            Some(PendingAction::DeleteTask(id)) => {
                let title = self.tracker.store().get(id).map_or("", |t| t.title.as_str());
                format!("Delete task '{title}'? (y/n)")
            }
            Some(PendingAction::DeleteSubTask { .. }) => "Delete this subtask? (y/n)".to_string(),
            None => String::new(),
        };
        let popup = centered_rect(50, 20, area);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(question)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Confirm")),
            popup,
        );
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => format!("Tasks: {} | Press 'h' for help", self.filtered_tasks.len()),
                AppState::TaskDetail => "Task details | Esc to go back".to_string(),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::AddSubTask => "New Subtask".to_string(),
                AppState::RenameSubTask => "Rename Subtask".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().bg(INK).fg(Color::White))
                .alignment(Alignment::Left),
            area,
        );
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::TaskDetail => self.render_task_detail(f, chunks[0]),
            AppState::AddSubTask | AppState::RenameSubTask => {
                self.render_task_detail(f, chunks[0]);
                self.render_sub_task_input(f, chunks[0]);
            }
            AppState::AddTask | AppState::EditTask => {
                match self.previous_state {
                    AppState::TaskDetail => self.render_task_detail(f, chunks[0]),
                    _ => self.render_task_list(f, chunks[0]),
                }
                self.render_task_form(f, chunks[0], self.state == AppState::EditTask);
            }
            AppState::Help => {
                self.render_task_list(f, chunks[0]);
                self.render_help(f, chunks[0]);
            }
            AppState::Confirm => {
                match self.previous_state {
                    AppState::TaskDetail => self.render_task_detail(f, chunks[0]),
                    _ => self.render_task_list(f, chunks[0]),
                }
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the dashboard.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
