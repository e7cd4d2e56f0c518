//! Interactive editor for an account's report-config split
//!
//! A three-field form (Total %, Company %, My-Own %) driven entirely by the
//! `SplitState` reducer: every keystroke becomes a `SplitInput` and the form
//! re-renders from the returned state. Submitting runs the reducer's gate
//! first; the server is only called when the gate passes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;
use tracing::{info, warn};

use crate::api::types::{AccountId, ReportConfig, ReportConfigRequest};
use crate::api::HubClient;
use crate::split::{round2, Focus, SplitInput, SplitState, Tone};
use crate::tui::events::{Event, EventHandler};

const FIELD_TITLES: [&str; 3] = ["Total %", "Company %", "My-Own %"];

struct ReportEditor {
    account: AccountId,
    state: SplitState,
    /// Text buffers backing the three fields, in field order
    buffers: [String; 3],
    status: Option<(String, Tone)>,
    done: bool,
}

fn field_focus(index: usize) -> Focus {
    match index {
        0 => Focus::Total,
        1 => Focus::Company,
        _ => Focus::MyOwn,
    }
}

fn format_percent(value: f64) -> String {
    let rounded = round2(value);
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

impl ReportEditor {
    fn new(account: AccountId, config: ReportConfig) -> Self {
        let state = SplitState::from_config(&config).apply(SplitInput::FocusChanged(Focus::Total));
        let buffers = [
            format_percent(state.total),
            format_percent(state.company),
            format_percent(state.my_own),
        ];
        Self {
            account,
            state,
            buffers,
            status: None,
            done: false,
        }
    }

    fn focused_index(&self) -> usize {
        match self.state.focus {
            Focus::Company => 1,
            Focus::MyOwn => 2,
            _ => 0,
        }
    }

    /// Re-render the fields the reducer may have rewritten; the focused
    /// buffer is left alone so typing is never clobbered mid-edit
    fn refresh_unfocused_buffers(&mut self) {
        let focused = self.focused_index();
        let values = [self.state.total, self.state.company, self.state.my_own];
        for (i, value) in values.iter().enumerate() {
            if i != focused {
                self.buffers[i] = format_percent(*value);
            }
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let current = self.focused_index();
        let next = if forward {
            (current + 1) % 3
        } else {
            (current + 2) % 3
        };
        // Settle the field being left to its display form
        self.buffers[current] = format_percent(field_value(&self.state, current));
        self.state = self.state.apply(SplitInput::FocusChanged(field_focus(next)));
    }

    fn edited(&mut self) {
        let index = self.focused_index();
        let value = self.buffers[index].parse::<f64>().unwrap_or(0.0);
        let input = match index {
            0 => SplitInput::TotalChanged(value),
            1 => SplitInput::CompanyChanged(value),
            _ => SplitInput::MyOwnChanged(value),
        };
        self.state = self.state.apply(input);
        self.refresh_unfocused_buffers();
        self.status = None;
    }

    fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '.' && !self.buffers[self.focused_index()].contains('.')) {
            let index = self.focused_index();
            self.buffers[index].push(c);
            self.edited();
        }
    }

    fn backspace(&mut self) {
        let index = self.focused_index();
        if self.buffers[index].pop().is_some() {
            self.edited();
        }
    }

    async fn submit(&mut self, client: &HubClient) {
        if let Err(e) = self.state.check_submit() {
            warn!("Report config rejected locally: {}", e);
            self.status = Some((e.to_string(), Tone::Error));
            return;
        }

        let request = ReportConfigRequest {
            friend_percentage: round2(self.state.company),
            my_own_percentage: round2(self.state.my_own),
        };
        match client.update_report_config(self.account, &request).await {
            Ok(updated) => {
                info!("Report config saved for account {}", self.account);
                let focus = self.state.focus;
                self.state =
                    SplitState::from_config(&updated).apply(SplitInput::FocusChanged(focus));
                let focused = self.focused_index();
                self.buffers[focused] = format_percent(field_value(&self.state, focused));
                self.refresh_unfocused_buffers();
                self.status = Some(("Saved".to_string(), Tone::Success));
            }
            Err(e) => {
                // Edit state stays intact for retry
                warn!("Report config update failed: {}", e);
                self.status = Some((e.to_string(), Tone::Error));
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent, client: &HubClient) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.done = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Enter => self.submit(client).await,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit(client).await
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) => self.input_char(c),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(3), // total
                Constraint::Length(3), // company
                Constraint::Length(3), // my own
                Constraint::Length(1), // validity
                Constraint::Length(1), // status
                Constraint::Min(1),    // help
            ])
            .split(frame.area());

        let title = Paragraph::new(format!("Report config - account {}", self.account))
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(title, chunks[0]);

        let focused = self.focused_index();
        for (i, field_title) in FIELD_TITLES.iter().enumerate() {
            let border_style = if i == focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let content = if i == focused {
                format!("{}_", self.buffers[i])
            } else {
                self.buffers[i].clone()
            };
            let field = Paragraph::new(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(*field_title),
            );
            frame.render_widget(field, chunks[1 + i]);
        }

        let validity = self.state.validity();
        let validity_style = match validity.tone() {
            Tone::Neutral => Style::default().fg(Color::DarkGray),
            Tone::Success => Style::default().fg(Color::Green),
            Tone::Error => Style::default().fg(Color::Red),
        };
        frame.render_widget(
            Paragraph::new(validity.message()).style(validity_style),
            chunks[4],
        );

        if let Some((message, tone)) = &self.status {
            let status_style = match tone {
                Tone::Neutral => Style::default().fg(Color::DarkGray),
                Tone::Success => Style::default().fg(Color::Green),
                Tone::Error => Style::default().fg(Color::Red),
            };
            frame.render_widget(
                Paragraph::new(message.clone()).style(status_style),
                chunks[5],
            );
        }

        let help = Paragraph::new("Tab/↑↓ move - type to edit - Enter/Ctrl-S save - Esc quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[6]);
    }
}

fn field_value(state: &SplitState, index: usize) -> f64 {
    match index {
        0 => state.total,
        1 => state.company,
        _ => state.my_own,
    }
}

/// Run the editor until the user saves or quits
pub async fn run(client: &HubClient, account: AccountId, config: ReportConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, client, account, config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    client: &HubClient,
    account: AccountId,
    config: ReportConfig,
) -> Result<()> {
    let mut editor = ReportEditor::new(account, config);
    let mut events = EventHandler::new(Duration::from_millis(250));

    while !editor.done {
        terminal.draw(|frame| editor.render(frame))?;

        match events.next().await {
            Some(Event::Key(key)) => editor.handle_key(key, client).await,
            Some(Event::Tick) => {}
            Some(Event::Error(message)) => {
                editor.status = Some((message, Tone::Error));
            }
            None => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ReportConfig {
        ReportConfig {
            friend_percentage: 40.0,
            my_own_percentage: 60.0,
            my_total_percentage: 100.0,
        }
    }

    fn editor() -> ReportEditor {
        ReportEditor::new(AccountId(1), sample_config())
    }

    #[test]
    fn test_editor_starts_on_total() {
        let e = editor();
        assert_eq!(e.focused_index(), 0);
        assert_eq!(e.buffers, ["100", "40", "60"]);
    }

    #[test]
    fn test_typing_total_reassigns_split() {
        let mut e = editor();
        // Clear "100" and type "80": neither sub-share is focused, and
        // 40+60 no longer matches, so everything moves to My-Own
        e.backspace();
        e.backspace();
        e.backspace();
        e.input_char('8');
        e.input_char('0');
        assert_eq!(e.state.total, 80.0);
        assert_eq!(e.state.company, 0.0);
        assert_eq!(e.state.my_own, 80.0);
        assert_eq!(e.buffers[1], "0");
        assert_eq!(e.buffers[2], "80");
    }

    #[test]
    fn test_focused_company_edit_keeps_my_own() {
        let mut e = editor();
        e.move_focus(true); // Company
        assert_eq!(e.focused_index(), 1);

        e.backspace();
        e.backspace();
        e.input_char('3');
        e.input_char('0');
        assert_eq!(e.state.company, 30.0);
        assert_eq!(e.state.my_own, 60.0);
        assert!(matches!(
            e.state.validity(),
            crate::split::Validity::Invalid { .. }
        ));
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        let mut e = editor();
        e.input_char('.');
        e.input_char('5');
        e.input_char('.');
        assert_eq!(e.buffers[0], "100.5");
    }

    #[test]
    fn test_move_focus_wraps() {
        let mut e = editor();
        e.move_focus(true);
        e.move_focus(true);
        e.move_focus(true);
        assert_eq!(e.focused_index(), 0);

        e.move_focus(false);
        assert_eq!(e.focused_index(), 2);
    }

    #[test]
    fn test_format_percent_trims_integers() {
        assert_eq!(format_percent(40.0), "40");
        assert_eq!(format_percent(33.333333), "33.33");
    }
}
