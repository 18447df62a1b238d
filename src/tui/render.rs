use super::state::{DashState, ViewState};
use crate::lead::Lead;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, state: &DashState, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    draw_leads(f, state, view, chunks[1]);
    draw_logs(f, state, chunks[2]);
    draw_footer(f, chunks[3]);

    if let Some(lead) = &view.detail {
        draw_detail(f, lead);
    }
}

fn draw_header(f: &mut Frame, state: &DashState, area: Rect) {
    let stats = state.stats();

    let feed_status = if state.is_stale() {
        Span::styled("STALE", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("LIVE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    };

    let updated = state
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let line = Line::from(vec![
        Span::styled("Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.total.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled("Sent ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.sent.to_string(), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled("Researching ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.researching.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled("Pending ", Style::default().fg(Color::DarkGray)),
        Span::styled(stats.pending.to_string(), Style::default().fg(Color::Gray)),
        Span::raw("   │ feed "),
        feed_status,
        Span::styled(
            format!("   updated {}   up {}", updated, state.uptime()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" LeadPulse — live feed (10s) "),
    );
    f.render_widget(header, area);
}

fn status_style(status: &str) -> Style {
    match status {
        "SENT" => Style::default().fg(Color::Green),
        "RESEARCHING" => Style::default().fg(Color::Yellow),
        "NEW" => Style::default().fg(Color::DarkGray),
        _ => Style::default().fg(Color::Cyan),
    }
}

fn draw_leads(f: &mut Frame, state: &DashState, view: &ViewState, area: Rect) {
    // Keep the cursor row inside the visible window.
    let visible = area.height.saturating_sub(3) as usize;
    let first = view.cursor.saturating_sub(visible.saturating_sub(1));

    let rows: Vec<Row> = state
        .leads
        .iter()
        .enumerate()
        .skip(first)
        .take(visible.max(1))
        .map(|(i, lead)| {
            let research = if lead.linkedin_post.is_some() {
                Cell::from(Span::styled("post", Style::default().fg(Color::Cyan)))
            } else {
                Cell::from(Span::styled("web", Style::default().fg(Color::DarkGray)))
            };
            let draft = if lead.has_draft() {
                Cell::from(Span::styled("DRAFT", Style::default().fg(Color::Magenta)))
            } else {
                Cell::from(Span::styled("-", Style::default().fg(Color::DarkGray)))
            };
            let status = lead.display_status();

            let row = Row::new(vec![
                Cell::from(lead.full_name()),
                Cell::from(lead.email.clone().unwrap_or_default()),
                Cell::from(lead.company_name.clone().unwrap_or_default()),
                Cell::from(lead.role.clone().unwrap_or_default()),
                Cell::from(Span::styled(status.to_string(), status_style(status))),
                research,
                draft,
            ]);
            if i == view.cursor {
                row.style(Style::default().bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Min(22),
            Constraint::Length(18),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Lead", "Email", "Company", "Role", "Status", "Rsrch", "Draft"])
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Leads ({}) ", state.leads.len())),
    );
    f.render_widget(table, area);
}

fn draw_logs(f: &mut Frame, state: &DashState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.logs.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .logs
        .iter()
        .skip(skip)
        .map(|entry| {
            let level_color = match entry.level.as_str() {
                "WARN" => Color::Yellow,
                "ERROR" => Color::Red,
                _ => Color::DarkGray,
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:5} ", entry.level), Style::default().fg(level_color)),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();

    let logs = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(logs, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q quit   r refresh   ↑/↓ select   enter view draft   esc close",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(footer, area);
}

fn draw_detail(f: &mut Frame, lead: &Lead) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("SUBJECT", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            lead.email_subject.clone().unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("BODY", Style::default().fg(Color::DarkGray))),
    ];
    for body_line in lead.email_body.as_deref().unwrap_or("(no body)").lines() {
        lines.push(Line::from(body_line.to_string()));
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Draft — {} ", lead.full_name()))
                .title_alignment(Alignment::Center),
        );
    f.render_widget(detail, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
