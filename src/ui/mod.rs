mod story_list;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::feed::{FeedState, Phase};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    story_list::render(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("hntop - {} top stories", app.source_name());

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let color = if app.feed.is_initial_loading() || app.feed.is_loading_more() {
        Color::Yellow
    } else {
        Color::Gray
    };
    let status = Line::from(vec![Span::styled(
        status_text(&app.feed),
        Style::default().fg(color),
    )]);

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

fn status_text(feed: &FeedState) -> &'static str {
    match feed.phase() {
        Phase::InitialLoading => "Loading Hacker News...",
        Phase::Refreshing => "Refreshing...",
        Phase::LoadingMore => "Loading more...",
        Phase::Ready if !feed.has_more() && !feed.items().is_empty() => {
            "End of top stories | Enter: open | r: refresh | q: quit"
        }
        Phase::Idle | Phase::Ready => {
            "j/k/g/G: nav | Ctrl+d/u: page | Enter: open | r: refresh | q: quit"
        }
    }
}
