use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let state = app.view();
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(if state.accepts_writes() { 3 } else { 0 }),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, app, &state, chunks[0]);
    draw_body(frame, app, &state, chunks[1]);
    if state.accepts_writes() {
        draw_input(frame, app, chunks[2]);
    }
    draw_last(frame, app, chunks[3]);

    frame.render_widget(
        Paragraph::new(hints(app, &state)).style(Style::default().fg(Color::Gray)),
        chunks[4],
    );

    if let Some(prompt) = &app.modal {
        modal::draw_modal(frame, prompt);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &App, state: &ViewState, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "GIF Portal",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        Span::raw(format!("{} @ {}", short(&app.account), app.rpc_url)),
        Span::raw("  "),
    ];
    match app.controller.gate().identity() {
        Some(identity) => spans.push(Span::styled(
            short(identity.as_str()),
            Style::default().fg(Color::Green),
        )),
        None => {
            let note = match state {
                ViewState::WalletMissing => "no wallet",
                ViewState::GateClosed { connecting: true } => "connecting",
                _ => "not connected",
            };
            spans.push(Span::styled(note, Style::default().fg(Color::Red)));
        }
    }
    if app.in_flight > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("working ({})", app.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_body(frame: &mut ratatui::Frame, app: &App, state: &ViewState, area: Rect) {
    let lines: Vec<Line> = match state {
        ViewState::Resolved { entries, .. } if !entries.is_empty() => {
            let items: Vec<ListItem> = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:>3}. ", i + 1),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(
                            format!("{:>4} ^ ", entry.upvotes),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(entry.link.as_str()),
                        Span::styled(
                            format!("  by {}", short(entry.submitter.as_str())),
                            Style::default().fg(Color::Gray),
                        ),
                    ]))
                })
                .collect();
            let mut list_state = ListState::default();
            list_state.select(Some(app.selected.min(entries.len() - 1)));
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::NONE)
                        .title(format!("GIFs ({})", entries.len())),
                )
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            frame.render_stateful_widget(list, area, &mut list_state);
            return;
        }
        ViewState::Resolved { .. } => vec![
            Line::from("No GIFs yet."),
            Line::from("Press / to add the first link."),
        ],
        ViewState::WalletMissing => vec![
            Line::from(Span::styled(
                "No wallet found.",
                Style::default().fg(Color::Red),
            )),
            Line::from(format!("Looked in {}.", app.wallet_dir)),
            Line::from("Create one with `gif-portal wallet new`, then restart."),
        ],
        ViewState::GateClosed { connecting: false } => vec![
            Line::from("Connect your wallet to see the list."),
            Line::from("Press c to connect."),
        ],
        ViewState::GateClosed { connecting: true } => {
            vec![Line::from("Waiting for the wallet to answer...")]
        }
        ViewState::Unresolved(Unresolved::NotFetched) => vec![Line::from("Loading the list...")],
        ViewState::Unresolved(Unresolved::NotFound) => vec![
            Line::from("This list account has not been initialized yet."),
            Line::from("Press i to create it (a one-time step)."),
        ],
        ViewState::Unresolved(Unresolved::Unavailable(reason)) => vec![
            Line::from(Span::styled(
                "Could not load the list.",
                Style::default().fg(Color::Red),
            )),
            Line::from(reason.as_str()),
            Line::from("Press r to retry."),
        ],
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_input(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(app.input.buf.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Add a GIF link"),
        ),
        area,
    );
    if focused && app.modal.is_none() {
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(app.input.cursor as u16).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn draw_last(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(cmd) = &app.last_command {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(cmd.as_str()),
        ]));
    }
    if let Some(r) = &app.last_result {
        let style = match r.kind {
            EntryKind::Output => Style::default().fg(Color::White),
            EntryKind::Error => Style::default().fg(Color::Red),
        };
        for (i, l) in r.lines.iter().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", fmt_ts_ui(&r.ts)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(l.as_str(), style),
                ]));
            } else {
                lines.push(Line::from(Span::styled(l.as_str(), style)));
            }
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP).title("Last")),
        area,
    );
}

fn hints(app: &App, state: &ViewState) -> String {
    if app.modal.is_some() {
        return "y approve  n reject".to_string();
    }
    if app.focus == Focus::Input {
        return "enter submit  esc back  up/down history  ctrl-u clear".to_string();
    }
    let mut parts = Vec::new();
    if state.offers_connect() {
        parts.push("c connect");
    }
    if state.offers_initialize() {
        parts.push("i initialize");
    }
    if state.offers_retry() {
        parts.push("r retry");
    }
    if state.accepts_writes() {
        parts.push("j/k select");
        parts.push("u upvote");
        parts.push("/ add link");
        parts.push("r refresh");
    }
    if app.controller.gate().identity().is_some() {
        parts.push("d disconnect");
    }
    parts.push("q quit");
    parts.join("  ")
}

/// `abcdef...7890` for long keys; short strings pass through.
fn short(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 16 {
        return s.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
