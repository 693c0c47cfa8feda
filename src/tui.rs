//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! `TuiInterface` is both the game's renderer ([`GameInterface`]) and the
//! line input for human players ([`Prompter`]). The binary shares a single
//! instance between the two through `Rc<RefCell<_>>`.
//!
//! # State Machine
//! - `Watching`: showing the board while automated players move
//! - `Prompting`: collecting a line of text for a human player
//! - `GameOver`: outcome shown, waiting for a key before exit

use crate::cli::{format_guessed, format_outcome, format_turn};
use crate::game_state::{GameInterface, GameOutcome, Role, TurnStatus, UNREVEALED};
use crate::player::Prompter;
use crate::solver::{LetterSet, Positions};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_LENGTH: usize = 64;
const MAX_LOG_LINES: usize = 6;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

/// Body parts drawn on the gallows: head, body, two arms, two legs.
pub const GALLOWS_STAGES: usize = 6;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const REVEALED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);
const HIDDEN_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

#[derive(Debug, Clone, PartialEq)]
enum TuiState {
    Watching,
    Prompting { question: String },
    GameOver,
}

/// Everything the last `display_status` call told us about the game.
#[derive(Debug, Default)]
struct GameView {
    slots: Vec<Option<char>>,
    remaining_turns: usize,
    max_turns: usize,
    guessed: LetterSet,
    guesser: String,
    referee: String,
}

impl GameView {
    fn wrong_guesses(&self) -> usize {
        self.max_turns.saturating_sub(self.remaining_turns)
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: &'a GameView,
    state: &'a TuiState,
    current_input: &'a str,
    log: &'a [String],
    outcome: &'a [String],
    error_message: &'a str,
    status: &'a str,
}

/// How many body parts to draw after `wrong` misses out of `max_turns`.
///
/// The figure is complete exactly when the last turn is lost, whatever the
/// turn budget.
pub fn gallows_stage(wrong: usize, max_turns: usize) -> usize {
    if max_turns == 0 {
        return GALLOWS_STAGES;
    }
    let wrong = wrong.min(max_turns);
    (wrong * GALLOWS_STAGES).div_ceil(max_turns)
}

pub fn gallows_lines(stage: usize) -> Vec<String> {
    let part = |n: usize, glyph: &'static str| if stage >= n { glyph } else { " " };
    vec![
        "  +---+".to_string(),
        "  |   |".to_string(),
        format!("  {}   |", part(1, "O")),
        format!(" {}{}{}  |", part(3, "/"), part(2, "|"), part(4, "\\")),
        format!(" {} {}  |", part(5, "/"), part(6, "\\")),
        "      |".to_string(),
        "=========".to_string(),
    ]
}

/// Main TUI interface component.
///
/// Manages terminal rendering, line input and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: GameView,
    state: TuiState,
    current_input: String,
    log: Vec<String>,
    outcome: Vec<String>,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: GameView::default(),
            state: TuiState::Watching,
            current_input: String::new(),
            log: Vec::new(),
            outcome: Vec::new(),
            error_message: String::new(),
            status: "Setting up".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: &self.view,
            state: &self.state,
            current_input: &self.current_input,
            log: &self.log,
            outcome: &self.outcome,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(11), // Gallows and word
                Constraint::Min(6),     // Info panel
                Constraint::Length(3),  // Prompt
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.view);
        Self::render_info(f, chunks[2], ctx);
        Self::render_prompt(f, chunks[3], ctx.state, ctx.current_input);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, view: &GameView) {
        let block = Block::default()
            .title("Board")
            .borders(Borders::ALL)
            .style(Style::default());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(14), Constraint::Min(10)])
            .split(inner);

        let stage = gallows_stage(view.wrong_guesses(), view.max_turns);
        let gallows: Vec<Line> = gallows_lines(stage).into_iter().map(Line::from).collect();
        f.render_widget(Paragraph::new(gallows), columns[0]);

        let mut spans = vec![Span::raw("  ")];
        for slot in &view.slots {
            let (letter, style) = match slot {
                Some(c) => (c.to_ascii_uppercase(), REVEALED_STYLE),
                None => (UNREVEALED, HIDDEN_STYLE),
            };
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }
        let index_line: String = (0..view.slots.len())
            .map(|i| format!(" {:<3}", i % 100))
            .collect();

        let word = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::from(spans),
            Line::from(Span::styled(
                format!("  {index_line}"),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        f.render_widget(word, columns[1]);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let view = ctx.view;
        let mut lines = Vec::new();

        if !view.guesser.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Guesser: {}   Referee: {}", view.guesser, view.referee),
                HEADER_STYLE,
            )]));
        }
        lines.push(Line::from(vec![Span::styled(
            format!(
                "Remaining turns: {} of {}",
                view.remaining_turns, view.max_turns
            ),
            INFO_STYLE,
        )]));
        if !view.guessed.is_empty() {
            lines.push(Line::from(format!(
                "Guessed letters: {}",
                format_guessed(&view.guessed)
            )));
        }
        lines.push(Line::from(""));

        for entry in ctx.log {
            lines.push(Line::from(vec![Span::styled(entry.as_str(), MESSAGE_STYLE)]));
        }

        for line in ctx.outcome {
            lines.push(Line::from(vec![Span::styled(line.as_str(), SUCCESS_STYLE)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_prompt(f: &mut Frame, area: Rect, state: &TuiState, current_input: &str) {
        let (title, text) = match state {
            TuiState::Prompting { question } => (question.as_str(), format!("> {current_input}_")),
            TuiState::Watching => ("Input", String::new()),
            TuiState::GameOver => ("Input", "Game over".to_string()),
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::Prompting { .. } => "Type your answer | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
            TuiState::Watching => "Computer is playing...",
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Waits up to one poll interval for a key press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => Ok(Some(key)),
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Applies one key to the input line. `Some(Some(line))` submits,
    /// `Some(None)` abandons input, `None` keeps editing.
    fn handle_prompt_key(&mut self, key: KeyEvent) -> Option<Option<String>> {
        match key.code {
            KeyCode::Enter => Some(Some(self.current_input.trim().to_string())),
            KeyCode::Esc => Some(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(None),
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Char(c) => {
                // Escape sequences from focus changes show up as replacement or control characters
                if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                    debug_log!("handle_prompt_key() - Ignoring invalid character {:?}", c);
                } else if Self::has_modifier_keys(&key) {
                    debug_log!("handle_prompt_key() - Ignoring {:?} with {:?}", c, key.modifiers);
                } else if self.current_input.len() < MAX_INPUT_LENGTH {
                    self.current_input.push(c);
                }
                None
            }
            _ => None,
        }
    }

    /// Blocks until any key is pressed. Called once the outcome is on screen.
    pub fn wait_for_exit(&mut self) -> Result<(), io::Error> {
        self.state = TuiState::GameOver;
        self.draw()?;
        loop {
            if self.next_key()?.is_some() {
                return Ok(());
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_status(&mut self, status: &TurnStatus) {
        self.view = GameView {
            slots: status.board.slots().to_vec(),
            remaining_turns: status.remaining_turns,
            max_turns: status.max_turns,
            guessed: status.guessed.clone(),
            guesser: status.guesser.to_string(),
            referee: status.referee.to_string(),
        };
        self.status = format!(
            "{} letters hidden, {} wrong guesses",
            status.board.unrevealed_count(),
            status.wrong_guesses()
        );
        self.draw_or_log();
    }

    fn display_turn(&mut self, letter: char, positions: &Positions) {
        self.push_log(format_turn(letter, positions));
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &GameOutcome) {
        self.outcome = format_outcome(outcome);
        self.state = TuiState::GameOver;
        self.status = match outcome.winner {
            Role::Guesser => "Game Over - the word was guessed".to_string(),
            Role::Referee => "Game Over - out of turns".to_string(),
        };
        self.draw_or_log();
    }

    fn display_message(&mut self, message: &str) {
        self.push_log(message.to_string());
        self.draw_or_log();
    }
}

impl Prompter for TuiInterface {
    fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        info_log!("TuiInterface::ask() - {}", message);
        self.state = TuiState::Prompting {
            question: message.to_string(),
        };
        self.current_input.clear();

        let answer = loop {
            self.draw()?;
            let Some(key) = self.next_key()? else {
                continue;
            };
            self.error_message.clear();
            if let Some(answer) = self.handle_prompt_key(key) {
                break answer;
            }
        };

        self.state = TuiState::Watching;
        self.current_input.clear();
        self.draw_or_log();
        Ok(answer)
    }

    fn warn(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
