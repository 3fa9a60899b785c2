//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs};

use dayring_core::projection::UrgencyTier;
use dayring_store::Horizon;

use super::app::{App, Focus};

/// Render the current frame.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // horizon tabs
            Constraint::Min(5),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);

    if app.show_help {
        render_help(f, chunks[1]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[1]);
        render_plan_table(f, app, panes[0]);
        render_subtask_pane(f, app, panes[1]);
    }

    render_status_bar(f, app, chunks[2]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Horizon::ALL
        .iter()
        .map(|h| Line::from(format!(" {h} ")))
        .collect();
    let selected = Horizon::ALL
        .iter()
        .position(|h| *h == app.horizon)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" dayring "));
    f.render_widget(tabs, area);
}

fn urgency_color(urgency: UrgencyTier) -> Color {
    match urgency {
        UrgencyTier::Overdue => Color::Red,
        UrgencyTier::DueToday => Color::LightRed,
        UrgencyTier::DueSoon => Color::Yellow,
        UrgencyTier::DueLater => Color::Green,
    }
}

fn render_plan_table(f: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["Title", "Deadline", "Due", "Progress", "Done"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = app.views.iter().enumerate().map(|(i, view)| {
        let due = match view.urgency {
            UrgencyTier::Overdue => format!("overdue {}d", -view.days_remaining),
            UrgencyTier::DueToday => "today".to_owned(),
            _ => format!("in {}d", view.days_remaining),
        };
        let progress = if view.plan.subtasks.is_empty() {
            "-".to_owned()
        } else {
            format!(
                "{}/{} {}%",
                view.plan.completed_subtasks(),
                view.plan.subtasks.len(),
                view.percent_complete
            )
        };

        let title_style = if view.plan.completed {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default()
        };
        let row_style = if i == app.selected_plan && app.focus == Focus::Plans {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Row::new(vec![
            Cell::from(Span::styled(view.plan.title.clone(), title_style)),
            Cell::from(view.plan.deadline.to_string()),
            Cell::from(Span::styled(
                due,
                Style::default().fg(urgency_color(view.urgency)),
            )),
            Cell::from(progress),
            Cell::from(if view.plan.completed { "[x]" } else { "[ ]" }),
        ])
        .style(row_style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Length(11),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} plans ", app.horizon)),
    );

    f.render_widget(table, area);
}

fn render_subtask_pane(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = match app.selected_view() {
        Some(view) if !view.plan.subtasks.is_empty() => view
            .plan
            .subtasks
            .iter()
            .enumerate()
            .map(|(i, subtask)| {
                let marker = if subtask.completed { "[x]" } else { "[ ]" };
                let mut style = if subtask.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                if i == app.selected_subtask && app.focus == Focus::Subtasks {
                    style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                }
                ListItem::new(Span::styled(format!("{marker} {}", subtask.text), style))
            })
            .collect(),
        Some(_) => vec![ListItem::new("No sub-tasks")],
        None => vec![ListItem::new("No plan selected")],
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Sub-tasks "),
    );
    f.render_widget(list, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("  Tab        switch horizon"),
        Line::from("  j/k, arrows move selection"),
        Line::from("  Enter      focus the sub-task list"),
        Line::from("  Space/x    toggle plan or sub-task completion"),
        Line::from("  d          delete the selected plan"),
        Line::from("  q/Esc      back (quit from the plan list)"),
        Line::from("  ?          this help"),
    ];
    let help = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help "),
    );
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status_message {
        Some(message) => Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::LightRed),
        ),
        None => Span::styled(
            " Tab horizon | Enter sub-tasks | Space toggle | d delete | ? help | q quit",
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}
