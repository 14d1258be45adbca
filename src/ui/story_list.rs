use chrono::{DateTime, Utc};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::types::NewsItem;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.feed.items();
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Top Stories ({}/{}, {} pages) ",
        items.len(),
        app.feed.index_len(),
        app.feed.cursor()
    ));

    if items.is_empty() {
        let message = if app.feed.is_initial_loading() {
            "Loading Hacker News..."
        } else {
            "No stories loaded - press r to refresh"
        };
        let empty = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let title_width = area.width.saturating_sub(8) as usize;

    let mut rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| story_row(i, item, i == app.selected, title_width))
        .collect();

    if app.feed.is_loading_more() {
        rows.push(ListItem::new(Line::from(Span::styled(
            "     Loading more...",
            Style::default().fg(Color::Yellow),
        ))));
    }

    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn story_row(rank: usize, item: &NewsItem, selected: bool, width: usize) -> ListItem<'static> {
    let title_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if item.has_link() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        // Text posts cannot be opened
        Style::default().fg(Color::Gray)
    };

    let title = truncate(&item.title, width);
    let date = item
        .created_at_utc()
        .map(|dt| format!("{} ({})", dt.format("%Y-%m-%d"), format_age(dt)))
        .unwrap_or_default();

    let headline = Line::from(vec![
        Span::styled(
            format!("{:>3}. ", rank + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(title, title_style),
    ]);
    let meta = Line::from(vec![
        Span::raw("     "),
        Span::styled(format!("@{}", item.author), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!("▲ {}", item.score),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(Color::DarkGray)),
    ]);

    ListItem::new(vec![headline, meta])
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

fn format_age(dt: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(dt);

    if duration.num_days() > 0 {
        format!("{}d", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m", duration.num_minutes())
    } else {
        "now".to_string()
    }
}
