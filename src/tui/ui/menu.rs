use crate::config::{MAX_BOXES, MAX_NUMBER_LIMIT, MIN_BOXES};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let area = centered_rect(70, 80, size);
    let block = Block::default().title("roskis").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    let inner_all = inner(area);

    let logo = r#"
 ____            _    _
|  _ \ ___  ___ | | _(_)___
| |_) / _ \/ __|| |/ / / __|
|  _ < (_) \__ \|   <| \__ \
|_| \_\___/|___/|_|\_\_|___/
"#;

    let logo_lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Cyan))))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(logo_lines.len() as u16 + 1),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(inner_all);

    let logo_para = Paragraph::new(logo_lines).alignment(Alignment::Center);
    f.render_widget(logo_para, rows[0]);

    let rules = vec![
        Line::from("Place each drawn number so the boxes stay in increasing order."),
        Line::from("A number that fits nowhere goes to the trash."),
        Line::from("Fill every box with an empty trash for a perfect game."),
    ];
    let rules_para = Paragraph::new(rules)
        .style(Style::default().add_modifier(Modifier::DIM))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(rules_para, rows[1]);

    let hints = [
        format!("Boxes {MIN_BOXES}-{MAX_BOXES}, max number up to {MAX_NUMBER_LIMIT}"),
        String::from("[Enter] Start  [Q] Quit  [Esc] Back  [↑/↓] Move  [+/-] Adjust  [0-9] Type"),
    ];
    let mut cfg_lines: Vec<Line> = Vec::new();
    cfg_lines.push(Line::from(Span::styled(
        "Settings:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, it) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        cfg_lines.push(Line::from(Span::styled(it, style)));
    }
    cfg_lines.push(Line::from(""));
    for hint in hints {
        cfg_lines
            .push(Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))));
    }
    let cfg_para = Paragraph::new(cfg_lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(cfg_para, rows[2]);
}
