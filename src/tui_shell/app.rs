use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use time::OffsetDateTime;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::PortalConfig;
use crate::view::{PortalController, Unresolved, ViewState};
use crate::wallet::{ApprovalPrompt, ChannelApprover};

use super::input::Input;
use super::modal;

mod actions;
mod event_loop;
mod render;
mod runtime;
mod time_utils;

use self::actions::{Action, ActionOutcome};
pub(super) use self::runtime::run;
use self::time_utils::fmt_ts_ui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
struct ScrollEntry {
    ts: OffsetDateTime,
    kind: EntryKind,
    lines: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    List,
    Input,
}

pub(super) struct App {
    controller: Arc<PortalController<ChannelApprover>>,
    runtime: Handle,

    prompts: mpsc::UnboundedReceiver<ApprovalPrompt>,
    outcomes_tx: mpsc::UnboundedSender<ActionOutcome>,
    outcomes: mpsc::UnboundedReceiver<ActionOutcome>,

    // Header text, fixed for the run.
    rpc_url: String,
    account: String,
    wallet_dir: String,

    modal: Option<ApprovalPrompt>,
    input: Input,
    focus: Focus,
    selected: usize,
    in_flight: usize,

    last_command: Option<String>,
    last_result: Option<ScrollEntry>,

    quit: bool,
}

impl App {
    fn new(
        config: &PortalConfig,
        controller: PortalController<ChannelApprover>,
        prompts: mpsc::UnboundedReceiver<ApprovalPrompt>,
        runtime: Handle,
    ) -> Self {
        let (outcomes_tx, outcomes) = mpsc::unbounded_channel();
        Self {
            controller: Arc::new(controller),
            runtime,
            prompts,
            outcomes_tx,
            outcomes,
            rpc_url: config.rpc_url.clone(),
            account: config.account.to_string(),
            wallet_dir: config.wallet_dir.display().to_string(),
            modal: None,
            input: Input::default(),
            focus: Focus::List,
            selected: 0,
            in_flight: 0,
            last_command: None,
            last_result: None,
            quit: false,
        }
    }

    fn view(&self) -> ViewState {
        self.controller.view()
    }

    /// Runs an action on the runtime; its outcome comes back through `outcomes`.
    fn spawn(&mut self, action: Action) {
        tracing::debug!(action = action.label(), "spawn action");
        self.last_command = Some(action.label().to_string());
        self.in_flight += 1;
        let controller = self.controller.clone();
        let tx = self.outcomes_tx.clone();
        self.runtime.spawn(async move {
            let outcome = action.perform(&*controller).await;
            let _ = tx.send(outcome);
        });
    }

    /// Collects finished actions and the next wallet prompt, if any.
    fn drain(&mut self) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.push(outcome.kind, outcome.lines);
        }
        if self.modal.is_none() {
            if let Ok(prompt) = self.prompts.try_recv() {
                self.modal = Some(prompt);
            }
        }
    }

    /// The controller owns the pending link; it clears it on submit and on
    /// disconnect, and the editor follows.
    fn sync_input(&mut self) {
        let current = self.controller.input();
        if current != self.input.buf {
            self.input.set(current);
        }
        if !self.view().accepts_writes() {
            self.focus = Focus::List;
        }
    }

    fn edited(&mut self) {
        self.controller.set_input(self.input.buf.clone());
    }

    fn push(&mut self, kind: EntryKind, lines: Vec<String>) {
        self.last_result = Some(ScrollEntry {
            ts: OffsetDateTime::now_utc(),
            kind,
            lines,
        });
    }

    fn push_error(&mut self, line: impl Into<String>) {
        self.push(EntryKind::Error, vec![line.into()]);
    }

    pub(super) fn answer_modal(&mut self, approved: bool) {
        let Some(prompt) = self.modal.take() else {
            return;
        };
        let verdict = if approved { "approved" } else { "rejected" };
        let line = format!("{}: {}", verdict, prompt.request.describe());
        prompt.answer(approved);
        self.push(EntryKind::Output, vec![line]);
    }

    fn connect(&mut self) {
        match self.view() {
            ViewState::GateClosed { connecting: false } => self.spawn(Action::Connect),
            ViewState::WalletMissing => {
                self.push_error("no wallet found; run `gif-portal wallet new` first")
            }
            ViewState::GateClosed { connecting: true } => {
                self.push_error("already waiting for the wallet")
            }
            _ => self.push_error("already connected"),
        }
    }

    fn disconnect(&mut self) {
        self.last_command = Some("disconnect".to_string());
        if self.controller.disconnect() {
            self.selected = 0;
            self.push(EntryKind::Output, vec!["disconnected".to_string()]);
        } else {
            self.push_error("not connected");
        }
    }

    fn refresh(&mut self) {
        match self.view() {
            ViewState::Unresolved(_) | ViewState::Resolved { .. } => self.spawn(Action::Refresh),
            _ => self.push_error("connect a wallet first"),
        }
    }

    fn initialize(&mut self) {
        if self.view().offers_initialize() {
            self.spawn(Action::Initialize);
        } else {
            self.push_error("nothing to initialize here");
        }
    }

    fn upvote_selected(&mut self) {
        let ViewState::Resolved { entries, .. } = self.view() else {
            self.push_error("no list to upvote in");
            return;
        };
        if entries.is_empty() {
            self.push_error("the list is empty");
            return;
        }
        let index = self.selected.min(entries.len() - 1);
        self.spawn(Action::Upvote(index));
    }

    fn focus_input(&mut self) {
        if self.view().accepts_writes() {
            self.focus = Focus::Input;
        } else {
            self.push_error("connect and load the list before adding links");
        }
    }

    fn submit(&mut self) {
        let line = self.input.buf.clone();
        self.edited();
        self.input.push_history(&line);
        self.spawn(Action::Submit);
    }

    fn move_selection(&mut self, delta: isize) {
        let len = match self.view() {
            ViewState::Resolved { entries, .. } => entries.len(),
            _ => 0,
        };
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1) as isize;
        self.selected = (current + delta).clamp(0, len as isize - 1) as usize;
    }
}
