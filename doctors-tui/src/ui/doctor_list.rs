use super::utils::with_cursor;
use super::*;

pub fn render_doctor_list(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Doctor list
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let search_text = if app.searching {
        let (before, after) = app.search_input.split_at_cursor();
        with_cursor(before, after)
    } else if app.search_input.value.is_empty() {
        "/ para buscar".to_string()
    } else {
        app.search_input.value.clone()
    };
    let search_border = if app.searching {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search_box = Paragraph::new(search_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_border)
                .title(" Buscar ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search_box, chunks[0]);

    let items: Vec<ListItem> = app
        .filtered_doctors
        .iter()
        .enumerate()
        .map(|(i, doctor)| {
            let style = if i == app.selected_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            let line = Line::from(vec![
                Span::styled(format!("{:<32}", doctor.name), style),
                Span::styled(
                    format!("{:<16}", doctor.phone),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{} - {}", doctor.check_in, doctor.check_out),
                    Style::default().fg(Color::Cyan),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if app.search_input.value.is_empty() {
        format!(" Médicos ({}) ", app.doctors.len())
    } else {
        format!(
            " Médicos ({}/{}) ",
            app.filtered_doctors.len(),
            app.doctors.len()
        )
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[1]);

    let hints: &[(&str, &str)] = if app.searching {
        &[
            ("Type", "Filtrar"),
            ("Ctrl+X", "Limpar"),
            ("Enter/Esc", "Concluir"),
        ]
    } else {
        &[
            ("↑↓/j/k", "Navegar"),
            ("n", "Novo"),
            ("Enter/e", "Editar"),
            ("/", "Buscar"),
            ("r", "Recarregar"),
            ("q", "Sair"),
        ]
    };
    let controls = Paragraph::new(controls_line(hints))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controles ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, chunks[2]);
}
