// ============================================================================
// APP STATE & EVENT HANDLING
// ============================================================================
//
// The App owns the store plus everything that only matters on screen:
// current page, selections, the open editor, popups, and the clickable
// rects recorded by the last draw.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tui_textarea::{CursorMove, Input, Key, TextArea};
use uuid::Uuid;

use crate::editor;
use crate::export::{self, ExportFormat};
use crate::faq::FAQ_ENTRIES;
use crate::model::{Idea, Label};
use crate::route::Route;
use crate::storage::{FileStorage, Storage};
use crate::store::{Feedback, FeedbackLevel, IdeaStore, StoreResult};
use crate::views::{self, IdeaQuery, LabelTab};

/// How long success/info popups stay up.
const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    None,
    IdeaNew,
    IdeaEdit(Uuid),
    Comment(Uuid),
    Share(Uuid),
    CategoryNew,
    CategoryRename(String),
    TemplateNew,
}

impl EditTarget {
    pub fn title(&self) -> &'static str {
        match self {
            EditTarget::None => "",
            EditTarget::IdeaNew => "New Idea (Ctrl+S to save, Esc to cancel)",
            EditTarget::IdeaEdit(_) => "Edit Idea (Ctrl+S to save, Esc to cancel)",
            EditTarget::Comment(_) => "Add Comment (Ctrl+S to post, Esc to cancel)",
            EditTarget::Share(_) => "Share Idea (Ctrl+S to share, Esc to cancel)",
            EditTarget::CategoryNew => "New Category (Ctrl+S to save, Esc to cancel)",
            EditTarget::CategoryRename(_) => "Rename Category (Ctrl+S to save, Esc to cancel)",
            EditTarget::TemplateNew => "New Template (Ctrl+S to save, Esc to cancel)",
        }
    }
}

pub struct App<S: Storage = FileStorage> {
    pub store: IdeaStore<S>,
    pub export_dir: PathBuf,
    pub route: Route,

    // Ideas page
    pub query: IdeaQuery,
    pub tab: LabelTab,
    pub current_idea_idx: usize,
    pub searching: bool,

    pub current_category_idx: usize,
    pub current_template_idx: usize,
    pub current_faq_idx: usize,
    pub expanded_faq: Option<usize>,

    // Notification popover
    pub show_notifications: bool,
    pub current_notification_idx: usize,

    pub show_help: bool,
    pub help_scroll: u16,
    /// Last scroll offset that still shows text, set by the draw
    pub help_max_scroll: u16,

    // Form editor
    pub textarea: TextArea<'static>,
    pub editing_input: String,
    pub edit_target: EditTarget,

    pub toast: Option<Feedback>,
    toast_shown_at: Option<Instant>,
    pub last_export: Option<PathBuf>,

    // UI areas for mouse support, rebuilt on every draw
    pub nav_btns: Vec<(Route, Rect)>,
    pub tab_btns: Vec<(LabelTab, Rect)>,
    pub list_items: Vec<(usize, Rect)>,
    pub notification_items: Vec<(usize, Rect)>,
    pub bell_btn: Rect,
}

impl<S: Storage> App<S> {
    pub fn new(store: IdeaStore<S>, export_dir: PathBuf, route: Route) -> Self {
        Self {
            store,
            export_dir,
            route,
            query: IdeaQuery::default(),
            tab: LabelTab::All,
            current_idea_idx: 0,
            searching: false,
            current_category_idx: 0,
            current_template_idx: 0,
            current_faq_idx: 0,
            expanded_faq: None,
            show_notifications: false,
            current_notification_idx: 0,
            show_help: false,
            help_scroll: 0,
            help_max_scroll: 0,
            textarea: TextArea::default(),
            editing_input: String::new(),
            edit_target: EditTarget::None,
            toast: None,
            toast_shown_at: None,
            last_export: None,
            nav_btns: Vec::new(),
            tab_btns: Vec::new(),
            list_items: Vec::new(),
            notification_items: Vec::new(),
            bell_btn: Rect::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target != EditTarget::None
    }

    /// Ideas after the search/category filter and the active tab.
    pub fn visible_ideas(&self) -> Vec<&Idea> {
        let filtered = self.query.apply(self.store.ideas());
        self.tab.select(&filtered)
    }

    pub fn selected_idea(&self) -> Option<&Idea> {
        self.visible_ideas().get(self.current_idea_idx).copied()
    }

    fn selected_idea_id(&self) -> Option<Uuid> {
        self.selected_idea().map(|i| i.id)
    }

    pub fn selected_category(&self) -> Option<&String> {
        self.store.categories().get(self.current_category_idx)
    }

    fn selected_template_id(&self) -> Option<Uuid> {
        self.store
            .templates()
            .get(self.current_template_idx)
            .map(|t| t.id)
    }

    /// Clamp every selection to its list after something was removed.
    pub fn validate_indices(&mut self) {
        let clamp = |idx: usize, len: usize| idx.min(len.saturating_sub(1));
        self.current_idea_idx = clamp(self.current_idea_idx, self.visible_ideas().len());
        self.current_category_idx = clamp(self.current_category_idx, self.store.categories().len());
        self.current_template_idx = clamp(self.current_template_idx, self.store.templates().len());
        self.current_notification_idx = clamp(
            self.current_notification_idx,
            self.store.notifications().len(),
        );
        self.current_faq_idx = clamp(self.current_faq_idx, FAQ_ENTRIES.len());
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
        self.searching = false;
        self.show_notifications = false;
        self.validate_indices();
    }

    // ------------------------------------------------------------------
    // Feedback popups
    // ------------------------------------------------------------------

    fn show_toast(&mut self, feedback: Feedback) {
        self.toast = Some(feedback);
        self.toast_shown_at = Some(Instant::now());
    }

    fn show_error(&mut self, message: impl Into<String>) {
        self.show_toast(Feedback::error(message));
    }

    /// Shows the newest queued store message, if any.
    fn flush_feedback(&mut self) {
        if let Some(latest) = self.store.take_feedback().pop() {
            self.show_toast(latest);
        }
    }

    /// Turns a store result into a popup; `None` on failure.
    fn report<T>(&mut self, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.flush_feedback();
                Some(value)
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "{}", err.message());
                self.store.take_feedback();
                self.show_error(err.message());
                None
            }
        }
    }

    pub fn error_showing(&self) -> bool {
        matches!(&self.toast, Some(t) if t.level == FeedbackLevel::Error)
    }

    fn dismiss_toast(&mut self) {
        self.toast = None;
        self.toast_shown_at = None;
    }

    /// Called every loop tick; expires non-error popups.
    pub fn on_tick(&mut self) {
        if self.error_showing() {
            return;
        }
        if let Some(shown) = self.toast_shown_at {
            if shown.elapsed() >= TOAST_DURATION {
                self.dismiss_toast();
            }
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    pub fn start_editing(&mut self, target: EditTarget, content: String) {
        self.textarea = TextArea::new(content.split('\n').map(|s| s.to_string()).collect());
        self.editing_input = content;
        // Cursor goes to the end of the first line, where the first value is typed
        let first_len = self.textarea.lines().first().map(|l| l.chars().count()).unwrap_or(0);
        self.textarea
            .move_cursor(CursorMove::Jump(0, first_len as u16));
        self.edit_target = target;
        self.searching = false;
        self.show_notifications = false;
    }

    fn finish_editing(&mut self) {
        self.edit_target = EditTarget::None;
        self.editing_input.clear();
        self.textarea = TextArea::default();
    }

    /// Parses the open form and applies it. Validation failures keep the
    /// editor open behind an error popup.
    pub fn save_input(&mut self) {
        self.editing_input = self.textarea.lines().join("\n");
        let input = self.editing_input.clone();

        match self.edit_target.clone() {
            EditTarget::None => {}
            EditTarget::IdeaNew => match editor::parse_and_validate_idea(&input) {
                Ok(form) => {
                    let result = self.store.add_idea(form.into_draft());
                    if let Some(id) = self.report(result) {
                        self.finish_editing();
                        self.select_idea(id);
                    }
                }
                Err(msg) => self.show_error(msg),
            },
            EditTarget::IdeaEdit(id) => match editor::parse_and_validate_idea(&input) {
                Ok(form) => {
                    let result = self.store.update_idea(id, form.into_patch());
                    if self.report(result).is_some() {
                        self.finish_editing();
                        self.select_idea(id);
                    }
                }
                Err(msg) => self.show_error(msg),
            },
            EditTarget::Comment(id) => match editor::parse_and_validate_comment(&input) {
                Ok((author, content)) => {
                    let result = self.store.add_comment(id, &author, &content);
                    if self.report(result).is_some() {
                        self.finish_editing();
                    }
                }
                Err(msg) => self.show_error(msg),
            },
            EditTarget::Share(id) => {
                let email = editor::parse_single_value(&input, "Email:");
                let result = self.store.share_idea(id, &email);
                if self.report(result).is_some() {
                    self.finish_editing();
                }
            }
            EditTarget::CategoryNew => {
                let name = editor::parse_single_value(&input, "Name:");
                let result = self.store.add_category(&name);
                if self.report(result).is_some() {
                    self.finish_editing();
                    self.current_category_idx = self.store.categories().len().saturating_sub(1);
                }
            }
            EditTarget::CategoryRename(old) => {
                let name = editor::parse_single_value(&input, "Name:");
                let result = self.store.rename_category(&old, &name);
                if self.report(result).is_some() {
                    self.finish_editing();
                }
            }
            EditTarget::TemplateNew => match editor::parse_and_validate_template(&input) {
                Ok(draft) => {
                    let result = self.store.add_template(draft);
                    if self.report(result).is_some() {
                        self.finish_editing();
                        self.current_template_idx =
                            self.store.templates().len().saturating_sub(1);
                    }
                }
                Err(msg) => self.show_error(msg),
            },
        }
    }

    /// Moves the selection onto `id` if it is visible under the current filters.
    fn select_idea(&mut self, id: Uuid) {
        if let Some(idx) = self.visible_ideas().iter().position(|i| i.id == id) {
            self.current_idea_idx = idx;
        }
        self.validate_indices();
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    fn toggle_label(&mut self, label: Label) {
        if let Some(id) = self.selected_idea_id() {
            let result = self.store.set_label(id, label);
            self.report(result);
            self.validate_indices();
        }
    }

    fn delete_selected_idea(&mut self) {
        if let Some(id) = self.selected_idea_id() {
            let result = self.store.delete_idea(id);
            self.report(result);
            self.validate_indices();
        }
    }

    fn delete_selected_category(&mut self) {
        if let Some(name) = self.selected_category().cloned() {
            let result = self.store.delete_category(&name);
            self.report(result);
            self.validate_indices();
        }
    }

    fn delete_selected_template(&mut self) {
        if let Some(id) = self.selected_template_id() {
            let result = self.store.delete_template(id);
            self.report(result);
            self.validate_indices();
        }
    }

    /// Creates an idea from the selected template and shows it on the ideas page.
    fn use_selected_template(&mut self) {
        let Some(id) = self.selected_template_id() else {
            return;
        };
        let result = self.store.instantiate_template(id);
        if let Some(idea_id) = self.report(result) {
            self.query = IdeaQuery::default();
            self.tab = LabelTab::All;
            self.navigate(Route::Ideas);
            self.select_idea(idea_id);
        }
    }

    pub fn export_ideas(&mut self, format: ExportFormat) {
        let today = Local::now().date_naive();
        match export::write_export(&self.export_dir, format, self.store.ideas(), today) {
            Ok(path) => {
                self.show_toast(Feedback::success(format!(
                    "Ideas exported as {}!\n{}",
                    format.label(),
                    path.display()
                )));
                self.last_export = Some(path);
            }
            Err(err) => {
                tracing::error!("Export failed: {:#}", err);
                self.show_error("Failed to export ideas");
            }
        }
    }

    fn open_last_export(&mut self) {
        match self.last_export.clone() {
            Some(path) => {
                if let Err(err) = open::that(&path) {
                    tracing::warn!(path = %path.display(), "Failed to open export: {}", err);
                    self.show_error(format!("Could not open {}", path.display()));
                }
            }
            None => self.show_toast(Feedback::info("Nothing exported yet")),
        }
    }

    fn reset_filters(&mut self) {
        self.query = IdeaQuery::default();
        self.tab = LabelTab::All;
        self.current_idea_idx = 0;
    }

    fn cycle_category_filter(&mut self) {
        let options = views::filter_categories(self.store.ideas());
        self.query.category = views::cycle_category(self.query.category.as_deref(), &options);
        self.current_idea_idx = 0;
    }
}

// ============================================================================
// KEYBOARD
// ============================================================================

/// Returns `Ok(true)` when the app should quit.
pub fn handle_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    // Error popups block everything until dismissed
    if app.error_showing() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_toast();
        }
        return Ok(false);
    }

    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::Down => scroll_help_down(app, 1),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::PageDown => scroll_help_down(app, 10),
            _ => {}
        }
        return Ok(false);
    }

    if app.is_editing() {
        handle_editor_key(app, key);
        return Ok(false);
    }

    if app.searching {
        match key.code {
            KeyCode::Esc => {
                app.query.search.clear();
                app.searching = false;
            }
            KeyCode::Enter => app.searching = false,
            KeyCode::Backspace => {
                app.query.search.pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                app.query.search.push(c)
            }
            _ => {}
        }
        app.current_idea_idx = 0;
        return Ok(false);
    }

    if app.show_notifications {
        handle_notifications_key(app, key);
        return Ok(false);
    }

    if key.code == KeyCode::Esc && app.toast.is_some() {
        app.dismiss_toast();
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Tab => {
            let next = app.route.next();
            app.navigate(next);
            return Ok(false);
        }
        KeyCode::BackTab => {
            let prev = app.route.prev();
            app.navigate(prev);
            return Ok(false);
        }
        KeyCode::Char(c @ '1'..='6') => {
            let idx = (c as usize) - ('1' as usize);
            app.navigate(Route::NAV[idx].clone());
            return Ok(false);
        }
        KeyCode::Char('n') => {
            app.show_notifications = true;
            app.current_notification_idx = 0;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return Ok(false);
        }
        _ => {}
    }

    match app.route {
        Route::Landing => match key.code {
            KeyCode::Enter => app.navigate(Route::Ideas),
            KeyCode::Char('l') => app.navigate(Route::Faq),
            _ => {}
        },
        Route::Ideas => handle_ideas_key(app, key),
        Route::Analytics => {}
        Route::Categories => handle_categories_key(app, key),
        Route::Templates => handle_templates_key(app, key),
        Route::Faq => match key.code {
            KeyCode::Up => app.current_faq_idx = app.current_faq_idx.saturating_sub(1),
            KeyCode::Down => {
                if app.current_faq_idx + 1 < FAQ_ENTRIES.len() {
                    app.current_faq_idx += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let idx = app.current_faq_idx;
                toggle_faq(app, idx);
            }
            _ => {}
        },
        Route::NotFound(_) => {
            if key.code == KeyCode::Enter {
                app.navigate(Route::Landing);
            }
        }
    }

    Ok(false)
}

fn handle_editor_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.save_input();
        return;
    }

    if key.code == KeyCode::Esc {
        app.finish_editing();
        return;
    }

    let input = Input {
        key: match key.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Tab => Key::Tab,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Null,
        },
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    app.textarea.input(input);
    app.editing_input = app.textarea.lines().join("\n");
}

fn handle_notifications_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => app.show_notifications = false,
        KeyCode::Up => {
            app.current_notification_idx = app.current_notification_idx.saturating_sub(1)
        }
        KeyCode::Down => {
            if app.current_notification_idx + 1 < app.store.notifications().len() {
                app.current_notification_idx += 1;
            }
        }
        KeyCode::Enter => {
            let idx = app.current_notification_idx;
            mark_notification_read(app, idx);
        }
        KeyCode::Char('a') => {
            let result = app.store.mark_all_notifications_as_read();
            app.report(result);
        }
        KeyCode::Char('c') => {
            let result = app.store.clear_notifications();
            app.report(result);
            app.validate_indices();
        }
        _ => {}
    }
}

fn mark_notification_read<S: Storage>(app: &mut App<S>, idx: usize) {
    if let Some(id) = app.store.notifications().get(idx).map(|n| n.id) {
        app.current_notification_idx = idx;
        let result = app.store.mark_notification_as_read(id);
        app.report(result);
    }
}

fn handle_ideas_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.current_idea_idx = app.current_idea_idx.saturating_sub(1),
        KeyCode::Down => {
            if app.current_idea_idx + 1 < app.visible_ideas().len() {
                app.current_idea_idx += 1;
            }
        }
        KeyCode::Left => {
            app.tab = app.tab.prev();
            app.current_idea_idx = 0;
        }
        KeyCode::Right => {
            app.tab = app.tab.next();
            app.current_idea_idx = 0;
        }
        KeyCode::Char('/') => app.searching = true,
        KeyCode::Char('f') => app.cycle_category_filter(),
        KeyCode::Char('r') => app.reset_filters(),
        KeyCode::Char('a') => {
            let content = editor::new_idea_editor_template(app.store.categories());
            app.start_editing(EditTarget::IdeaNew, content);
        }
        KeyCode::Char('e') => {
            if let Some(idea) = app.selected_idea() {
                let id = idea.id;
                let content = editor::format_idea_editor_content(idea, app.store.categories());
                app.start_editing(EditTarget::IdeaEdit(id), content);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_idea(),
        KeyCode::Char('b') => app.toggle_label(Label::Best),
        KeyCode::Char('w') => app.toggle_label(Label::Worst),
        KeyCode::Char('s') => {
            if let Some(id) = app.selected_idea_id() {
                app.start_editing(EditTarget::Share(id), "Email: ".to_string());
            }
        }
        KeyCode::Char('c') => {
            if let Some(id) = app.selected_idea_id() {
                app.start_editing(EditTarget::Comment(id), editor::new_comment_editor_template());
            }
        }
        KeyCode::Char('x') => app.export_ideas(ExportFormat::Csv),
        KeyCode::Char('t') => app.export_ideas(ExportFormat::Text),
        KeyCode::Char('o') => app.open_last_export(),
        _ => {}
    }
}

fn handle_categories_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.current_category_idx = app.current_category_idx.saturating_sub(1),
        KeyCode::Down => {
            if app.current_category_idx + 1 < app.store.categories().len() {
                app.current_category_idx += 1;
            }
        }
        KeyCode::Char('a') => app.start_editing(EditTarget::CategoryNew, "Name: ".to_string()),
        KeyCode::Char('r') => {
            if let Some(name) = app.selected_category().cloned() {
                let content = format!("Name: {}", name);
                app.start_editing(EditTarget::CategoryRename(name), content);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_category(),
        _ => {}
    }
}

fn handle_templates_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.current_template_idx = app.current_template_idx.saturating_sub(1),
        KeyCode::Down => {
            if app.current_template_idx + 1 < app.store.templates().len() {
                app.current_template_idx += 1;
            }
        }
        KeyCode::Char('a') => {
            let content = editor::new_template_editor_template(app.store.categories());
            app.start_editing(EditTarget::TemplateNew, content);
        }
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_template(),
        KeyCode::Enter | KeyCode::Char('u') => app.use_selected_template(),
        _ => {}
    }
}

fn scroll_help_down<S: Storage>(app: &mut App<S>, by: u16) {
    app.help_scroll = app.help_scroll.saturating_add(by).min(app.help_max_scroll);
}

fn toggle_faq<S: Storage>(app: &mut App<S>, idx: usize) {
    app.current_faq_idx = idx;
    app.expanded_faq = if app.expanded_faq == Some(idx) {
        None
    } else {
        Some(idx)
    };
}

// ============================================================================
// MOUSE
// ============================================================================

pub fn handle_mouse<S: Storage>(app: &mut App<S>, mouse: MouseEvent) {
    if app.show_help {
        match mouse.kind {
            MouseEventKind::ScrollUp => app.help_scroll = app.help_scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => scroll_help_down(app, 3),
            _ => {}
        }
        return;
    }

    if app.is_editing() || app.error_showing() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            for (route, rect) in app.nav_btns.clone() {
                if inside_rect(mouse, rect) {
                    app.navigate(route);
                    return;
                }
            }

            if inside_rect(mouse, app.bell_btn) {
                app.show_notifications = !app.show_notifications;
                app.current_notification_idx = 0;
                return;
            }

            if app.show_notifications {
                if let Some(idx) = find_clicked_item(mouse, &app.notification_items) {
                    mark_notification_read(app, idx);
                }
                return;
            }

            if let Some(tab) = app
                .tab_btns
                .iter()
                .find(|(_, rect)| inside_rect(mouse, *rect))
                .map(|(tab, _)| *tab)
            {
                app.tab = tab;
                app.current_idea_idx = 0;
                return;
            }

            if let Some(idx) = find_clicked_item(mouse, &app.list_items) {
                match app.route {
                    Route::Ideas => app.current_idea_idx = idx,
                    Route::Categories => app.current_category_idx = idx,
                    Route::Templates => app.current_template_idx = idx,
                    Route::Faq => toggle_faq(app, idx),
                    _ => {}
                }
            }
        }
        MouseEventKind::ScrollUp => scroll_selection(app, false),
        MouseEventKind::ScrollDown => scroll_selection(app, true),
        _ => {}
    }
}

fn scroll_selection<S: Storage>(app: &mut App<S>, down: bool) {
    let (idx, len) = match app.route {
        Route::Ideas => {
            let len = app.visible_ideas().len();
            (&mut app.current_idea_idx, len)
        }
        Route::Categories => (&mut app.current_category_idx, app.store.categories().len()),
        Route::Templates => (&mut app.current_template_idx, app.store.templates().len()),
        Route::Faq => (&mut app.current_faq_idx, FAQ_ENTRIES.len()),
        _ => return,
    };
    if down {
        if *idx + 1 < len {
            *idx += 1;
        }
    } else {
        *idx = idx.saturating_sub(1);
    }
}

pub fn inside_rect(mouse: MouseEvent, rect: Rect) -> bool {
    mouse.row >= rect.y
        && mouse.row < rect.y + rect.height
        && mouse.column >= rect.x
        && mouse.column < rect.x + rect.width
}

fn find_clicked_item(mouse: MouseEvent, items: &[(usize, Rect)]) -> Option<usize> {
    items
        .iter()
        .find(|(_, rect)| inside_rect(mouse, *rect))
        .map(|(idx, _)| *idx)
}
