use super::utils::{centered_rect, with_cursor};
use super::*;
use crate::form::{FormField, FormPhase, TimeInput};

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// `[HH:MM]`, with a block cursor while the time is still being typed.
fn time_display(input: &TimeInput, focused: bool) -> String {
    let s = input.as_str();
    if !focused || s.len() >= 5 {
        format!("[{:<5}]", s)
    } else {
        let spaces = 5 - s.len() - 1;
        format!("[{}█{}]", s, " ".repeat(spaces))
    }
}

pub fn render_doctor_form(frame: &mut Frame, app: &App) {
    let form = &app.form;
    let area = centered_rect(60, 14, frame.area());
    frame.render_widget(Clear, area);

    let text_value = |field: FormField, before: &str, after: &str, value: &str| {
        if form.focused_field == field {
            with_cursor(before, after)
        } else {
            value.to_string()
        }
    };

    let (name_before, name_after) = form.name.split_at_cursor();
    let (phone_before, phone_after) = form.phone.split_at_cursor();

    let row = |label: &'static str, field: FormField, value: String| {
        let focused = form.focused_field == field;
        let mut style = value_style(focused);
        let time = match field {
            FormField::CheckIn => Some(&form.check_in),
            FormField::CheckOut => Some(&form.check_out),
            FormField::Name | FormField::Phone => None,
        };
        // e.g. "25:00"
        if time.is_some_and(|t| t.is_complete() && t.parse().is_err()) {
            style = style.fg(Color::Red);
        }
        Line::from(vec![
            Span::styled(format!("{:<10}", label), label_style(focused)),
            Span::styled(value, style),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        row(
            "Nome:",
            FormField::Name,
            text_value(FormField::Name, name_before, name_after, &form.name.value),
        ),
        row(
            "Telefone:",
            FormField::Phone,
            text_value(FormField::Phone, phone_before, phone_after, &form.phone.value),
        ),
        row(
            "Entrada:",
            FormField::CheckIn,
            time_display(&form.check_in, form.focused_field == FormField::CheckIn),
        ),
        row(
            "Saída:",
            FormField::CheckOut,
            time_display(&form.check_out, form.focused_field == FormField::CheckOut),
        ),
        Line::from(""),
    ];

    let progress = match form.phase() {
        FormPhase::Idle => "",
        FormPhase::Loading => "Carregando...",
        FormPhase::Validating => "Validando...",
        FormPhase::Submitting => "Salvando...",
    };
    lines.push(Line::from(Span::styled(
        progress,
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(""));
    lines.push(controls_line(&[
        ("Tab", "Próximo campo"),
        ("Enter", "Salvar"),
        ("Esc", "Fechar"),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", form.title()))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(paragraph, area);
}
