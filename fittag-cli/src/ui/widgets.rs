use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

use crate::flows::{OnboardingFlow, OnboardingPhase};
use crate::models::TrainingDay;
use crate::notification::{Notification, NotificationKind};

fn panel_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Render the screen header
pub fn render_header(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "Let's get started!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Create the tags that organize your training across the week.",
            Style::default().fg(Color::Gray),
        )),
    ];

    Paragraph::new(lines).render(area, buf);
}

/// Render assigned routine panel
pub fn render_routine(area: Rect, buf: &mut Buffer, flow: &OnboardingFlow, art_url: Option<&str>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🏋 Routine ")
        .border_style(panel_style(flow.phase() == OnboardingPhase::RoutineSelection));

    let inner = block.inner(area);
    block.render(area, buf);

    let Some(routine) = flow.routine() else {
        let lines = vec![
            Line::from("First we'll assign you a routine that fits your level."),
            Line::from(""),
            Line::from(Span::styled(
                "Press 'A' to assign your routine",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "This will be your routine:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            routine.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match art_url {
        Some(url) => lines.push(Line::from(vec![
            Span::styled("Illustration: ", Style::default().fg(Color::Gray)),
            Span::styled(url.to_string(), Style::default().fg(Color::Blue)),
        ])),
        None => lines.push(Line::from(Span::styled(
            "No illustration for this routine",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render the single-select day list
pub fn render_days(
    area: Rect,
    buf: &mut Buffer,
    cursor: TrainingDay,
    selected: Option<TrainingDay>,
    is_active: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 📅 Which day will you train? ")
        .border_style(panel_style(is_active));

    let inner = block.inner(area);
    block.render(area, buf);

    let items: Vec<ListItem> = TrainingDay::ALL
        .iter()
        .enumerate()
        .map(|(idx, day)| {
            let marker = if selected == Some(*day) { "●" } else { "○" };

            let mut style = if selected == Some(*day) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            if *day == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let content = format!("  [{}] {} {}", idx + 1, marker, day.wire_name());
            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render actions panel
pub fn render_actions(area: Rect, buf: &mut Buffer, flow: &OnboardingFlow) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ⚡ Actions ")
        .border_style(panel_style(flow.phase() == OnboardingPhase::TagLoop));

    let inner = block.inner(area);
    block.render(area, buf);

    let has_routine = flow.routine().is_some();
    let actions = [
        ("A", "Assign routine", if has_routine { Color::DarkGray } else { Color::Green }),
        ("C", "Create tag for selected day", Color::Yellow),
        ("F", "Finish onboarding", Color::Cyan),
    ];

    let mut items: Vec<ListItem> = actions
        .iter()
        .map(|(key, desc, color)| {
            ListItem::new(Line::from(Span::styled(
                format!("  [{}] {}", key, desc),
                Style::default().fg(*color),
            )))
        })
        .collect();

    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::from(Span::styled(
        format!(
            "  Create one tag per training day ({} so far)",
            flow.tags_created()
        ),
        Style::default().fg(Color::Gray),
    ))));

    List::new(items).render(inner, buf);
}

/// Render the notification banner
pub fn render_banner(area: Rect, buf: &mut Buffer, banner: Option<&Notification>) {
    let Some(notification) = banner else {
        return;
    };

    let color = match notification.kind() {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
        NotificationKind::Info => Color::Blue,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(area);
    block.render(area, buf);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", notification.kind().icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message().to_string(), Style::default().fg(color)),
    ]);

    Paragraph::new(line).render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Days:", Style::default().fg(Color::Cyan))),
        Line::from("  ←/h →/l  - Move through days"),
        Line::from("  Space    - Select highlighted day"),
        Line::from("  1-7      - Select Monday..Sunday"),
        Line::from(""),
        Line::from(Span::styled("Actions:", Style::default().fg(Color::Cyan))),
        Line::from("  A        - Assign routine"),
        Line::from("  C/Enter  - Create tag"),
        Line::from("  F        - Finish onboarding"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q/Esc    - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, phase: OnboardingPhase) {
    let step = match phase {
        OnboardingPhase::CheckingAuth => " Checking account… ",
        OnboardingPhase::RoutineSelection => " Step 1/3: routine ",
        OnboardingPhase::TagLoop => " Step 2/3: tags ",
        OnboardingPhase::Finished => " Step 3/3: done ",
    };

    let line = Line::from(vec![
        Span::styled(step, Style::default().fg(Color::Yellow).bg(Color::DarkGray)),
        Span::styled(
            " Press ? for help ",
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ),
    ]);

    Paragraph::new(line).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_days_render_all_wire_names() {
        let area = Rect::new(0, 0, 40, 9);
        let mut buf = Buffer::empty(area);

        render_days(area, &mut buf, TrainingDay::Monday, Some(TrainingDay::Friday), true);

        let text = buffer_text(&buf);
        for day in TrainingDay::ALL {
            assert!(text.contains(day.wire_name()), "missing {}", day);
        }
    }

    #[test]
    fn test_no_banner_leaves_area_empty() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);

        render_banner(area, &mut buf, None);

        assert!(buffer_text(&buf).trim().is_empty());
    }
}
