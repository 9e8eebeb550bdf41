use crate::state::{Outcome, Status};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{box_columns, centered_rect, inner};

const BOX_WIDTH: u16 = 8;

pub(super) fn draw_board(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let status_height: u16 = 3 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // header
            Constraint::Length(3),             // current number
            Constraint::Length(5),             // boxes
            Constraint::Min(3),                // trash
            Constraint::Length(status_height), // status bar
        ])
        .split(size);

    let state = app.session.state();
    let cfg = state.config();
    let seed = app.cfg_seed.map(|s| s.to_string()).unwrap_or_else(|| "random".to_string());
    let header = Paragraph::new(Line::from(format!(
        "Boxes: {}   Numbers: 1-{}   Left in pool: {}   Seed: {}",
        cfg.box_count(),
        cfg.max_number(),
        state.pool().len(),
        seed,
    )))
    .block(Block::default().title("roskis").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let current_line = match (state.status(), app.visible_number()) {
        (Status::InProgress, Some(n)) => Line::from(vec![
            Span::raw("Place number: "),
            Span::styled(n.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        (Status::InProgress, None) => {
            Line::from(Span::styled("…", Style::default().add_modifier(Modifier::DIM)))
        }
        (status, _) => Line::from(status.label()),
    };
    let current = Paragraph::new(current_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(current, chunks[1]);

    draw_boxes(f, chunks[2], app);
    draw_trash(f, chunks[3], app);
    draw_status(f, chunks[4], app);

    if app.help_open() {
        draw_help(f);
    } else if let Some(outcome) = app.outcome {
        draw_game_over(f, app, outcome);
    }
}

fn draw_boxes(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().title("Boxes").borders(Borders::ALL);
    f.render_widget(block, area);
    let boxes = app.session.state().boxes();
    let placeable = app.placeable_boxes();
    let columns = box_columns(inner(area), boxes.len(), BOX_WIDTH);
    for (i, slot) in boxes.as_slice().iter().enumerate() {
        let Some(&cell) = columns.get(i) else {
            continue;
        };
        let can_click = placeable.contains(&i);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{}", i + 1))
            .title_alignment(Alignment::Center);
        let mut border = Style::default();
        if can_click {
            border = border.fg(Color::Green);
        } else if slot.is_none() {
            border = border.add_modifier(Modifier::DIM);
        }
        if i == app.selected && !app.game_over() {
            border = border.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        block = block.border_style(border);
        let content = match slot {
            Some(v) => Line::from(Span::styled(
                v.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            None if can_click => Line::from(Span::styled("+", Style::default().fg(Color::Green))),
            None => Line::from(""),
        };
        f.render_widget(Paragraph::new(content).alignment(Alignment::Center).block(block), cell);
    }
}

fn draw_trash(f: &mut Frame, area: Rect, app: &AppState) {
    let trash = app.session.state().trash();
    let mut block = Block::default().title("Trash").borders(Borders::ALL);
    if app.trash_flashing() {
        block = block.border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    }
    let line = if trash.is_empty() {
        Line::from(Span::styled("empty", Style::default().add_modifier(Modifier::DIM)))
    } else {
        let joined = trash.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        Line::from(Span::styled(joined, Style::default().fg(Color::Red)))
    };
    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }).block(block), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let mut left_info: Vec<Line> = Vec::new();
    if app.game_over() {
        left_info.push(Line::from("Game over. Press Enter or R to play again."));
    } else {
        let placeable = app.placeable_boxes();
        let stuck = app.visible_number().is_some() && placeable.is_empty();
        let action_style = |enabled: bool| {
            if enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            }
        };
        left_info.push(Line::from(format!("Selected: box {}", app.selected + 1)));
        left_info.push(Line::from(vec![
            Span::raw("Actions: "),
            Span::styled("Enter place", action_style(placeable.contains(&app.selected))),
            Span::raw(" • "),
            Span::styled("T trash", action_style(stuck)),
            Span::raw(" • "),
            Span::styled("A auto", action_style(app.visible_number().is_some())),
        ]));
    }
    if let Some(err) = app.action_error() {
        left_info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right_keys = vec![Line::from(""), Line::from("? help • M menu • Q quit")];
    f.render_widget(Paragraph::new(left_info).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right_keys).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_game_over(f: &mut Frame, app: &AppState, outcome: Outcome) {
    let area = centered_rect(50, 40, f.area());
    let trash = app.session.state().trash().len();
    let (title, color, lines) = match outcome {
        Outcome::Perfect => (
            "Perfect game!",
            Color::Green,
            vec![Line::from("Every box filled without touching the trash.")],
        ),
        Outcome::WithTrash => (
            "Finished",
            Color::Yellow,
            vec![Line::from(format!(
                "All boxes filled with {trash} number{} in the trash.",
                if trash == 1 { "" } else { "s" }
            ))],
        ),
        Outcome::Lost => (
            "Out of numbers",
            Color::Red,
            vec![Line::from("The pool ran dry before the row was full.")],
        ),
    };
    let mut lines = lines;
    lines.push(Line::from(""));
    lines.push(Line::from(app.session.state().boxes().to_string()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter / R: play again • Q: quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let lines = vec![
        Line::from(Span::styled("Board:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- Left / Right (h / l): move selection"),
        Line::from("- 1-9, 0: select box 1-10"),
        Line::from("- Enter / Space: place number in selected box"),
        Line::from("- T: trash number (only when it fits nowhere)"),
        Line::from("- A: let the computer make this move"),
        Line::from("- R: restart"),
        Line::from(""),
        Line::from(Span::styled("Menu:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- M / Esc: open menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value, 0-9 to type"),
        Line::from("- Enter: start"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}
