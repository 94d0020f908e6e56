use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent};

use crate::wallet::{ApprovalPrompt, ApprovalRequest};

pub(super) fn draw_modal(frame: &mut ratatui::Frame, prompt: &ApprovalPrompt) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 72);
    let h = area.height.saturating_sub(6).clamp(6, 9);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(modal_title(&prompt.request));
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let mut lines = vec![Line::from(prompt.request.describe()), Line::from("")];
    let identity = match &prompt.request {
        ApprovalRequest::Connect { identity, .. } | ApprovalRequest::Sign { identity, .. } => {
            identity
        }
    };
    lines.push(Line::from(format!("key {}", identity)));
    lines.push(Line::from(""));
    lines.push(Line::from("y / enter: approve    n / esc: reject"));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn modal_title(request: &ApprovalRequest) -> &'static str {
    match request {
        ApprovalRequest::Connect { .. } => "Wallet: connect",
        ApprovalRequest::Sign { .. } => "Wallet: sign",
    }
}

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_modal(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_modal(false),
        _ => {}
    }
}
