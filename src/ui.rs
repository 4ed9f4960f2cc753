// ============================================================================
// RENDERING - pages, popups, notification popover
// ============================================================================
//
// Draw functions only read the store; the one thing they write back into the
// App is the set of clickable rects for mouse handling.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, EditTarget};
use crate::faq::FAQ_ENTRIES;
use crate::model::{Idea, time_ago};
use crate::route::Route;
use crate::storage::Storage;
use crate::store::FeedbackLevel;
use crate::views::{self, LabelTab};

struct HelpTopic {
    title: &'static str,
    detail: &'static str,
}

const HELP_TOPICS: &[HelpTopic] = &[
    HelpTopic {
        title: "Navigation",
        detail: "Tab / Shift+Tab cycle pages, 1-6 jump straight to one. Click the navbar with the mouse. q or Ctrl+C quits.",
    },
    HelpTopic {
        title: "Ideas",
        detail: "Up/Down select, a add, e edit, d delete, b mark best, w mark worst (press again to remove), s share, c comment.",
    },
    HelpTopic {
        title: "Filtering",
        detail: "/ starts a search over titles and descriptions (Enter keeps it, Esc clears). f cycles the category filter, Left/Right switch tabs, r resets.",
    },
    HelpTopic {
        title: "Export",
        detail: "x writes a CSV file, t writes a text report into the export folder. o opens the last exported file.",
    },
    HelpTopic {
        title: "Editor",
        detail: "Fill in the Key: value lines and the body below them. Ctrl+S saves, Esc cancels. Errors keep the editor open.",
    },
    HelpTopic {
        title: "Categories & Templates",
        detail: "Categories: a add, r rename, d delete (only when unused). Templates: a add, d delete, Enter or u creates an idea from the template.",
    },
    HelpTopic {
        title: "Notifications",
        detail: "n opens the notification list. Enter marks one read, a marks all read, c clears them, Esc closes.",
    },
];

/// Get centered popup area for overlays
fn get_popup_area(frame_width: u16, frame_height: u16, width_percent: u16, height_percent: u16) -> Rect {
    let width = frame_width.saturating_mul(width_percent) / 100;
    let height = frame_height.saturating_mul(height_percent) / 100;
    let x = (frame_width.saturating_sub(width)) / 2;
    let y = (frame_height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

fn render_button(frame: &mut ratatui::Frame, text: &str, area: Rect, style: Style) {
    let btn = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(btn, area);
}

fn split_equal_horizontal(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn selected_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Builds list rows scrolled so `current_idx` stays visible and records the
/// rect of every row drawn.
fn build_list_items(
    rows: Vec<(usize, Line<'static>)>,
    current_idx: usize,
    area: Rect,
    item_rects: &mut Vec<(usize, Rect)>,
) -> Vec<ListItem<'static>> {
    let visible = area.height.saturating_sub(2).max(1) as usize;
    let offset = current_idx.saturating_sub(visible - 1);
    let inner_y = area.y + 1;

    item_rects.clear();
    let mut items = Vec::new();
    for (row_idx, (idx, line)) in rows.into_iter().skip(offset).take(visible).enumerate() {
        let style = if idx == current_idx {
            selected_style()
        } else {
            Style::default()
        };
        item_rects.push((
            idx,
            Rect {
                x: area.x,
                y: inner_y + row_idx as u16,
                width: area.width,
                height: 1,
            },
        ));
        items.push(ListItem::new(line).style(style));
    }
    items
}

pub fn draw<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>) {
    app.validate_indices();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_navbar(frame, app, chunks[0]);

    app.list_items.clear();
    app.tab_btns.clear();
    match app.route.clone() {
        Route::Landing => draw_landing(frame, app, chunks[1]),
        Route::Ideas => draw_ideas_view(frame, app, chunks[1]),
        Route::Analytics => draw_analytics_view(frame, app, chunks[1]),
        Route::Categories => draw_categories_view(frame, app, chunks[1]),
        Route::Templates => draw_templates_view(frame, app, chunks[1]),
        Route::Faq => draw_faq_view(frame, app, chunks[1]),
        Route::NotFound(path) => draw_not_found(frame, &path, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);

    if app.show_notifications {
        draw_notifications_popover(frame, app);
    } else {
        app.notification_items.clear();
    }

    if app.show_help {
        draw_help_overlay(frame, app);
    }

    if app.toast.is_some() {
        draw_toast(frame, app);
    }
}

fn draw_navbar<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(20)])
        .split(area);

    app.nav_btns.clear();
    let slots = split_equal_horizontal(chunks[0], Route::NAV.len());
    for (n, (route, rect)) in Route::NAV.iter().zip(slots).enumerate() {
        let style = if *route == app.route {
            selected_style()
        } else {
            Style::default().fg(route.color())
        };
        render_button(frame, &format!("{} {}", n + 1, route.title()), rect, style);
        app.nav_btns.push((route.clone(), rect));
    }

    let unread = app.store.unread_count();
    let (label, style) = if unread > 0 {
        (
            format!("Alerts ({})", unread),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        ("Alerts".to_string(), Style::default().fg(Color::Gray))
    };
    let style = if app.show_notifications {
        selected_style()
    } else {
        style
    };
    render_button(frame, &label, chunks[1], style);
    app.bell_btn = chunks[1];
}

fn draw_status_bar<S: Storage>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let hints = if app.is_editing() {
        "Ctrl+S save | Esc cancel"
    } else if app.searching {
        "Type to search | Enter keep | Esc clear"
    } else {
        match app.route {
            Route::Landing => "Enter get started | l learn more | ? help | q quit",
            Route::Ideas => {
                "a add | e edit | d delete | b/w label | s share | c comment | x/t export | ? help"
            }
            Route::Analytics => "Tab next page | ? help | q quit",
            Route::Categories => "a add | r rename | d delete | ? help",
            Route::Templates => "a add | Enter use | d delete | ? help",
            Route::Faq => "Up/Down select | Enter expand | ? help",
            Route::NotFound(_) => "Enter return home | q quit",
        }
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.route.path()),
            Style::default().fg(Color::Black).bg(app.route.color()),
        ),
        Span::raw(" "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ----------------------------------------------------------------------------
// Landing / FAQ / not found
// ----------------------------------------------------------------------------

fn draw_landing<S: Storage>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .split(area);

    let hero = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Capture Your Bright Ideas and Never Lose Them Again",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("IdeaSpark helps you collect, organize, and evaluate your ideas."),
        Line::from("Label your best insights and learn from the not-so-great ones."),
    ];
    frame.render_widget(
        Paragraph::new(hero)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded)),
        chunks[0],
    );

    let features = [
        ("Capture Ideas", "Record ideas as they come, with descriptions and categories.", Color::Green),
        ("Mark Your Best", "Highlight your most valuable ideas for future development.", Color::Yellow),
        ("Learn From Mistakes", "Flag less promising ideas to refine your process.", Color::Red),
    ];
    for ((title, body, color), rect) in features.iter().zip(split_equal_horizontal(chunks[1], 3)) {
        let para = Paragraph::new(*body)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(*title, Style::default().fg(*color).bold()))
                    .borders(Borders::ALL),
            );
        frame.render_widget(para, rect);
    }

    let analytics = app.store.analytics();
    let stats = vec![
        Line::from(vec![
            Span::styled("Ideas: ", Style::default().fg(Color::Gray)),
            Span::raw(analytics.total_ideas.to_string()),
            Span::styled("   Best: ", Style::default().fg(Color::Gray)),
            Span::styled(analytics.best_ideas_count.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("   Categories: ", Style::default().fg(Color::Gray)),
            Span::raw(app.store.categories().len().to_string()),
            Span::styled("   Templates: ", Style::default().fg(Color::Gray)),
            Span::raw(app.store.templates().len().to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to get started, or l to learn more",
            Style::default().fg(Color::Green).italic(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(stats)
            .alignment(Alignment::Center)
            .block(Block::default().title("Your Ideas").borders(Borders::ALL)),
        chunks[2],
    );
}

/// Greedy word wrap; rows must be known up front to place click targets.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(10);
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn draw_faq_view<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut rects = Vec::new();
    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    for (idx, entry) in FAQ_ENTRIES.iter().enumerate() {
        let expanded = app.expanded_faq == Some(idx);
        let marker = if expanded { "v" } else { ">" };
        let style = if idx == app.current_faq_idx {
            selected_style()
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };
        let row = lines.len() as u16;
        if row < inner.height {
            rects.push((
                idx,
                Rect {
                    x: inner.x,
                    y: inner.y + row,
                    width: inner.width,
                    height: 1,
                },
            ));
        }
        lines.push(Line::from(Span::styled(
            format!("{} {}", marker, entry.question),
            style,
        )));
        if expanded {
            for text in wrap_text(entry.answer, inner.width.saturating_sub(2) as usize) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default().fg(Color::White),
                )));
            }
        }
        lines.push(Line::from(""));
    }
    app.list_items = rects;

    let para = Paragraph::new(lines).block(
        Block::default()
            .title("Frequently Asked Questions")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(para, area);
}

fn draw_not_found(frame: &mut ratatui::Frame, path: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Oops! Page not found: {}", path)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to return home",
            Style::default().fg(Color::DarkGray).italic(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// ----------------------------------------------------------------------------
// Ideas
// ----------------------------------------------------------------------------

fn idea_row(idea: &Idea) -> Line<'static> {
    let mut spans = Vec::new();
    match idea.label {
        Some(label) => spans.push(Span::styled(
            format!("{:<8}", format!("[{}]", label.as_str())),
            Style::default().fg(label.color()),
        )),
        None => spans.push(Span::raw(" ".repeat(8))),
    }
    spans.push(Span::raw(idea.title.clone()));
    if let Some(category) = &idea.category {
        spans.push(Span::styled(
            format!("  #{}", category),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if idea.shared {
        spans.push(Span::styled("  shared", Style::default().fg(Color::Blue)));
    }
    Line::from(spans)
}

fn draw_ideas_view<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_idea_list(frame, app, chunks[0]);

    let editing_ideas = matches!(
        app.edit_target,
        EditTarget::IdeaNew | EditTarget::IdeaEdit(_) | EditTarget::Comment(_) | EditTarget::Share(_)
    );
    if editing_ideas {
        let mut title = app.edit_target.title().to_string();
        if let EditTarget::Comment(id) | EditTarget::Share(id) = &app.edit_target {
            if let Some(idea) = app.store.idea(*id) {
                title = format!("{} - {}", idea.title, title);
            }
        }
        render_textarea_editor(frame, app, chunks[1], &title);
    } else {
        draw_idea_details(frame, app, chunks[1]);
    }
}

fn draw_idea_list<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    // Search + category filter
    let cursor = if app.searching { "|" } else { "" };
    let filter_line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}{}", app.query.search, cursor),
            Style::default().fg(if app.searching { Color::Yellow } else { Color::White }),
        ),
        Span::styled("   Category: ", Style::default().fg(Color::Gray)),
        Span::raw(app.query.category.clone().unwrap_or_else(|| "All".to_string())),
    ]);
    let filter_border = if app.searching { Color::Yellow } else { Color::DarkGray };
    frame.render_widget(
        Paragraph::new(filter_line).block(
            Block::default()
                .title("Filter (/ search, f category, r reset)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(filter_border)),
        ),
        chunks[0],
    );

    // Tabs with badge counts
    let filtered = app.query.apply(app.store.ideas());
    let counts = views::tab_counts(&filtered);
    let slots = split_equal_horizontal(chunks[1], LabelTab::ALL.len());
    let mut tab_btns = Vec::new();
    for ((tab, count), rect) in counts.into_iter().zip(slots) {
        let style = if tab == app.tab {
            Style::default()
                .bg(tab.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(tab.color())
        };
        frame.render_widget(
            Paragraph::new(format!("{} {}", tab.title(), count))
                .alignment(Alignment::Center)
                .style(style),
            rect,
        );
        tab_btns.push((tab, rect));
    }
    app.tab_btns = tab_btns;

    let visible = app.visible_ideas();
    let title = format!("Showing {}", views::idea_count_label(visible.len()));

    if visible.is_empty() {
        let message = if app.store.ideas().is_empty() {
            "No ideas yet. Press 'a' to add your first idea."
        } else if app.query.is_active() {
            "No ideas match your filters. Press 'r' to reset."
        } else {
            "No ideas under this tab."
        };
        frame.render_widget(
            Paragraph::new(message)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().title(title).borders(Borders::ALL)),
            chunks[2],
        );
        return;
    }

    let rows: Vec<(usize, Line<'static>)> = visible
        .iter()
        .enumerate()
        .map(|(idx, idea)| (idx, idea_row(idea)))
        .collect();
    let current = app.current_idea_idx;
    let mut rects = Vec::new();
    let items = build_list_items(rows, current, chunks[2], &mut rects);
    app.list_items = rects;

    frame.render_widget(
        List::new(items).block(Block::default().title(title).borders(Borders::ALL)),
        chunks[2],
    );
}

fn draw_idea_details<S: Storage>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let Some(idea) = app.selected_idea() else {
        let help = vec![
            Line::from(""),
            Line::from("Press 'a' to capture a new idea."),
            Line::from("Mark it 'b'est or 'w'orst once you have thought it through."),
            Line::from(""),
            Line::from("Press ? for every shortcut."),
        ];
        frame.render_widget(
            Paragraph::new(help)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().title("Details").borders(Borders::ALL)),
            area,
        );
        return;
    };

    let now = app.store.now();
    let mut lines = vec![Line::from(Span::styled(
        idea.title.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];

    let mut badges = Vec::new();
    if let Some(label) = idea.label {
        badges.push(Span::styled(
            format!(" {} ", label.badge()),
            Style::default().bg(label.color()).fg(Color::Black),
        ));
        badges.push(Span::raw(" "));
    }
    if let Some(category) = &idea.category {
        badges.push(Span::styled(
            format!(" {} ", category),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ));
        badges.push(Span::raw(" "));
    }
    if idea.shared {
        badges.push(Span::styled(
            format!(" Shared with {} ", idea.collaborators.len()),
            Style::default().bg(Color::Blue).fg(Color::White),
        ));
    }
    if !badges.is_empty() {
        lines.push(Line::from(badges));
    }

    let mut stamp = format!("Created {}", time_ago(idea.created_at, now));
    if let Some(updated) = idea.last_updated.filter(|u| *u != idea.created_at) {
        stamp.push_str(&format!(" | Updated {}", time_ago(updated, now)));
    }
    lines.push(Line::from(Span::styled(stamp, Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(""));

    if idea.description.is_empty() {
        lines.push(Line::from(Span::styled(
            "No description",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    } else {
        for text in idea.description.lines() {
            lines.push(Line::from(text.to_string()));
        }
    }

    if !idea.collaborators.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Collaborators",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )));
        for email in &idea.collaborators {
            lines.push(Line::from(format!("  {}", email)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Comments ({})", idea.comments.len()),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    if idea.comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No comments yet. Press 'c' to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for comment in &idea.comments {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", comment.author),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("  {}", time_ago(comment.created_at, now)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(format!("    {}", comment.content)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Details").borders(Borders::ALL)),
        area,
    );
}

// ----------------------------------------------------------------------------
// Analytics
// ----------------------------------------------------------------------------

const BAR_WIDTH: usize = 30;

fn bar_line(label: &str, count: usize, max: usize, color: Color) -> Line<'static> {
    let len = if max > 0 { count * BAR_WIDTH / max } else { 0 };
    Line::from(vec![
        Span::styled(format!("{:>14} ", label), Style::default().fg(Color::Gray)),
        Span::styled("█".repeat(len.max(usize::from(count > 0))), Style::default().fg(color)),
        Span::raw(format!(" {}", count)),
    ])
}

fn draw_analytics_view<S: Storage>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let analytics = app.store.analytics();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    let cards = [
        ("Total Ideas", analytics.total_ideas, Color::Cyan),
        ("Best Ideas", analytics.best_ideas_count, Color::Yellow),
        ("Worst Ideas", analytics.worst_ideas_count, Color::Red),
        ("Shared Ideas", analytics.shared_ideas_count, Color::Blue),
    ];
    for ((title, value, color), rect) in cards.iter().zip(split_equal_horizontal(chunks[0], cards.len())) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                value.to_string(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(Block::default().title(*title).borders(Borders::ALL)),
            rect,
        );
    }

    if analytics.total_ideas == 0 {
        frame.render_widget(
            Paragraph::new("No ideas yet. Add some ideas to see analytics.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
        return;
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    // Category distribution
    let max_category = analytics.category_counts.values().copied().max().unwrap_or(0);
    let mut category_lines: Vec<Line> = analytics
        .category_counts
        .iter()
        .map(|(name, count)| bar_line(name, *count, max_category, Color::Magenta))
        .collect();
    if category_lines.is_empty() {
        category_lines.push(Line::from(Span::styled(
            "No categorized ideas",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(category_lines)
            .block(Block::default().title("Ideas by Category").borders(Borders::ALL)),
        body[0],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(body[1]);

    let label_max = analytics
        .best_ideas_count
        .max(analytics.worst_ideas_count)
        .max(analytics.unlabeled_count());
    let label_lines = vec![
        bar_line("Best", analytics.best_ideas_count, label_max, Color::Yellow),
        bar_line("Worst", analytics.worst_ideas_count, label_max, Color::Red),
        bar_line("Unlabeled", analytics.unlabeled_count(), label_max, Color::Gray),
    ];
    frame.render_widget(
        Paragraph::new(label_lines)
            .block(Block::default().title("Best vs Worst").borders(Borders::ALL)),
        right[0],
    );

    let trend = analytics.monthly_trend();
    let max_month = trend.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let trend_lines: Vec<Line> = trend
        .iter()
        .map(|(month, count)| bar_line(month, *count, max_month, Color::Green))
        .collect();
    frame.render_widget(
        Paragraph::new(trend_lines)
            .block(Block::default().title("Ideas per Month").borders(Borders::ALL)),
        right[1],
    );
}

// ----------------------------------------------------------------------------
// Categories / Templates
// ----------------------------------------------------------------------------

fn draw_categories_view<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let rows: Vec<(usize, Line<'static>)> = app
        .store
        .categories()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let usage = app.store.category_usage(name);
            (
                idx,
                Line::from(vec![
                    Span::raw(name.clone()),
                    Span::styled(
                        format!("  {}", views::idea_count_label(usage)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            )
        })
        .collect();

    let title = "Categories (a add, r rename, d delete)";
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No categories yet. Press 'a' to add one.")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().title(title).borders(Borders::ALL)),
            chunks[0],
        );
    } else {
        let mut rects = Vec::new();
        let items = build_list_items(rows, app.current_category_idx, chunks[0], &mut rects);
        app.list_items = rects;
        frame.render_widget(
            List::new(items).block(Block::default().title(title).borders(Borders::ALL)),
            chunks[0],
        );
    }

    if matches!(app.edit_target, EditTarget::CategoryNew | EditTarget::CategoryRename(_)) {
        let title = app.edit_target.title();
        render_textarea_editor(frame, app, chunks[1], title);
        return;
    }

    let detail = match app.selected_category() {
        Some(name) => {
            let usage = app.store.category_usage(name);
            vec![
                Line::from(Span::styled(
                    name.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!("Used by {}", views::idea_count_label(usage))),
                Line::from(""),
                Line::from(Span::styled(
                    if usage > 0 {
                        "Re-file or delete those ideas before deleting this category."
                    } else {
                        "Not in use, safe to delete."
                    },
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
        None => vec![Line::from("Categories group related ideas together.")],
    };
    frame.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Category").borders(Borders::ALL)),
        chunks[1],
    );
}

fn draw_templates_view<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let rows: Vec<(usize, Line<'static>)> = app
        .store
        .templates()
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let mut spans = vec![Span::raw(t.name.clone())];
            if let Some(category) = &t.default_category {
                spans.push(Span::styled(
                    format!("  #{}", category),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            (idx, Line::from(spans))
        })
        .collect();

    let title = "Templates (a add, Enter use, d delete)";
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No templates yet. Press 'a' to create one.")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().title(title).borders(Borders::ALL)),
            chunks[0],
        );
    } else {
        let mut rects = Vec::new();
        let items = build_list_items(rows, app.current_template_idx, chunks[0], &mut rects);
        app.list_items = rects;
        frame.render_widget(
            List::new(items).block(Block::default().title(title).borders(Borders::ALL)),
            chunks[0],
        );
    }

    if app.edit_target == EditTarget::TemplateNew {
        let title = app.edit_target.title();
        render_textarea_editor(frame, app, chunks[1], title);
        return;
    }

    let preview = match app.store.templates().get(app.current_template_idx) {
        Some(template) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    template.name.clone(),
                    Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "Default category: {}",
                    template.default_category.as_deref().unwrap_or("None")
                )),
                Line::from(""),
            ];
            lines.extend(template.description.lines().map(|l| Line::from(l.to_string())));
            lines
        }
        None => vec![Line::from(
            "Templates are reusable idea skeletons. Using one creates a new idea with its body.",
        )],
    };
    frame.render_widget(
        Paragraph::new(preview)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Preview").borders(Borders::ALL)),
        chunks[1],
    );
}

// ----------------------------------------------------------------------------
// Editor
// ----------------------------------------------------------------------------

fn textarea_lines_with_cursor<S: Storage>(app: &App<S>, height: u16) -> Vec<Line<'static>> {
    let (cursor_row, cursor_col) = app.textarea.cursor();
    let text_lines = app.textarea.lines();

    if text_lines.is_empty() {
        return vec![Line::from("|")];
    }

    let mut lines = Vec::new();
    for (idx, line) in text_lines.iter().enumerate() {
        if idx == cursor_row {
            let char_col = cursor_col.min(line.chars().count());
            let mut with_cursor = String::new();
            for (i, c) in line.chars().enumerate() {
                if i == char_col {
                    with_cursor.push('|');
                }
                with_cursor.push(c);
            }
            if char_col == line.chars().count() {
                with_cursor.push('|');
            }
            lines.push(Line::from(Span::styled(
                with_cursor,
                Style::default().fg(Color::Yellow).bg(Color::Rgb(30, 30, 40)),
            )));
        } else if line.contains(" (options:") {
            lines.push(Line::from(Span::styled(
                line.clone(),
                Style::default().fg(Color::Gray),
            )));
        } else {
            lines.push(Line::from(line.clone()));
        }
    }

    let view_height = height.max(1) as usize;
    if lines.len() > view_height {
        let start = cursor_row.saturating_sub(view_height.saturating_sub(1));
        let end = (start + view_height).min(lines.len());
        lines[start..end].to_vec()
    } else {
        lines
    }
}

fn render_textarea_editor<S: Storage>(
    frame: &mut ratatui::Frame,
    app: &App<S>,
    area: Rect,
    title: &str,
) {
    let inner_height = area.height.saturating_sub(2);
    let panel = Paragraph::new(textarea_lines_with_cursor(app, inner_height))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

// ----------------------------------------------------------------------------
// Overlays
// ----------------------------------------------------------------------------

fn draw_notifications_popover<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>) {
    let size = frame.size();
    let width = 56.min(size.width);
    let height = 16.min(size.height.saturating_sub(3));
    let area = Rect {
        x: size.width.saturating_sub(width),
        y: 3.min(size.height),
        width,
        height,
    };

    let block = Block::default()
        .title(format!("Notifications ({} unread)", app.store.unread_count()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if app.store.notifications().is_empty() {
        app.notification_items.clear();
        frame.render_widget(
            Paragraph::new("No notifications")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[0],
        );
    } else {
        let now = app.store.now();
        let rows: Vec<(usize, Line<'static>)> = app
            .store
            .notifications()
            .iter()
            .enumerate()
            .map(|(idx, n)| {
                let text_style = if n.read {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                };
                (
                    idx,
                    Line::from(vec![
                        Span::styled(
                            format!("{} {:<8}", if n.read { " " } else { "*" }, n.kind.label()),
                            Style::default().fg(n.kind.color()),
                        ),
                        Span::styled(n.message.clone(), text_style),
                        Span::styled(
                            format!("  {}", time_ago(n.created_at, now)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                )
            })
            .collect();

        // build_list_items assumes a bordered area
        let list_area = Rect {
            x: chunks[0].x,
            y: chunks[0].y.saturating_sub(1),
            width: chunks[0].width,
            height: chunks[0].height + 2,
        };
        let mut rects = Vec::new();
        let items = build_list_items(rows, app.current_notification_idx, list_area, &mut rects);
        app.notification_items = rects;
        frame.render_widget(List::new(items), chunks[0]);
    }

    frame.render_widget(
        Paragraph::new("Enter read | a all read | c clear all | Esc close")
            .style(Style::default().fg(Color::DarkGray).italic()),
        chunks[1],
    );
}

fn draw_help_overlay<S: Storage>(frame: &mut ratatui::Frame, app: &mut App<S>) {
    let size = frame.size();
    let area = get_popup_area(size.width, size.height, 75, 75);
    frame.render_widget(Clear, area);

    // Pre-wrapped so the line count bounds the scroll offset
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for topic in HELP_TOPICS {
        lines.push(Line::from(Span::styled(
            topic.title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.extend(wrap_text(topic.detail, inner_width).into_iter().map(Line::from));
        lines.push(Line::from(""));
    }
    let max_scroll = (lines.len() as u16).saturating_sub(area.height.saturating_sub(2));
    app.help_max_scroll = max_scroll;
    app.help_scroll = app.help_scroll.min(max_scroll);

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Quick Help (Esc to close, arrows or mouse wheel to scroll)")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .scroll((app.help_scroll, 0))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    frame.render_widget(help, area);
}

fn draw_toast<S: Storage>(frame: &mut ratatui::Frame, app: &App<S>) {
    let Some(toast) = &app.toast else {
        return;
    };
    let size = frame.size();
    let (title, color, hint) = match toast.level {
        FeedbackLevel::Success => ("[OK] Success", Color::Green, None),
        FeedbackLevel::Info => ("[i] Info", Color::Cyan, None),
        FeedbackLevel::Error => ("[!] Error", Color::Red, Some("Press Esc to dismiss")),
    };
    let area = get_popup_area(size.width, size.height, 55, 25);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(color).bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        chunks[0],
    );
    if let Some(hint) = hint {
        frame.render_widget(
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray).italic()),
            chunks[1],
        );
    }
}
