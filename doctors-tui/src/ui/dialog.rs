use super::utils::centered_rect;
use super::*;
use crate::notifier::{Dialog, DialogKind};

pub fn render_dialog(frame: &mut Frame, dialog: &Dialog, pending: usize) {
    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);

    let color = match dialog.kind {
        DialogKind::Success => Color::Green,
        DialogKind::Error => Color::Red,
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            dialog.message.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    let hint = if pending > 1 {
        format!("Enter: OK ({} pendentes)", pending - 1)
    } else {
        "Enter: OK".to_string()
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", dialog.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(paragraph, area);
}
