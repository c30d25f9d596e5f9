//! TUI (Terminal User Interface) module for Wordy
//!
//! This module provides the interactive full-screen interface using Ratatui.
//!
//! # Architecture
//! - `BoardView`: what is on screen (tile grid, key colours, current message),
//!   updated from the structured events the game produces
//! - `TuiInterface`: owns the terminal, renders a `BoardView` and turns key
//!   presses into `UserAction`s
//!
//! All timing lives here: tiles of a submitted row are revealed one by one,
//! an invalid row shakes, and messages disappear after their duration.

use crate::evaluator::{KeyboardState, LetterStatus, WORD_LENGTH};
use crate::game_state::{
    GameInterface, GameState, InputEvent, MAX_GUESSES, Message, MessageKind, Phase, Submission,
    TileUpdate, UserAction,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const REVEAL_STEP_MS: u64 = 300;
const SHAKE_STEP_MS: u64 = 50;
const SHAKE_OFFSETS: [i8; 10] = [-1, 1, -1, 1, -1, 1, -1, 1, -1, 0];
const ENTER_LABEL: &str = "ENTER";
const DELETE_LABEL: &str = "⌫";
const KEY_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const WIN_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TileState {
    Empty,
    Filled,
    Revealed(LetterStatus),
}

impl TileState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty => (Color::Black, Color::DarkGray),
            Self::Filled => (Color::DarkGray, Color::White),
            Self::Revealed(status) => status_colors(Some(status)),
        }
    }
}

/// (background, foreground) for a tile or key with the given status.
fn status_colors(status: Option<LetterStatus>) -> (Color, Color) {
    match status {
        None => (Color::Gray, Color::Black),
        Some(LetterStatus::Correct) => (Color::Green, Color::Black),
        Some(LetterStatus::Present) => (Color::Yellow, Color::Black),
        Some(LetterStatus::Absent) => (Color::DarkGray, Color::White),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tile {
    letter: Option<char>,
    state: TileState,
}

impl Tile {
    const EMPTY: Self = Self {
        letter: None,
        state: TileState::Empty,
    };
}

#[derive(Clone, Debug)]
struct ActiveMessage {
    message: Message,
    expires_at: Instant,
}

/// Screen model: tile grid, key colours and the current notice.
#[derive(Clone, Debug)]
pub struct BoardView {
    tiles: [[Tile; WORD_LENGTH]; MAX_GUESSES],
    keys: KeyboardState,
    message: Option<ActiveMessage>,
    shake: Option<(usize, i8)>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            tiles: [[Tile::EMPTY; WORD_LENGTH]; MAX_GUESSES],
            keys: KeyboardState::new(),
            message: None,
            shake: None,
        }
    }
}

impl BoardView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_tile(&mut self, update: &TileUpdate) {
        let Some(tile) = self
            .tiles
            .get_mut(update.row)
            .and_then(|row| row.get_mut(update.col))
        else {
            return;
        };
        *tile = match update.letter {
            Some(letter) => Tile {
                letter: Some(letter),
                state: TileState::Filled,
            },
            None => Tile::EMPTY,
        };
    }

    /// Reveal tile `index` of a submission, with its key update.
    pub fn apply_reveal(&mut self, submission: &Submission, index: usize) {
        if let Some(reveal) = submission.reveals.get(index)
            && let Some(tile) = self
                .tiles
                .get_mut(reveal.row)
                .and_then(|row| row.get_mut(reveal.col))
        {
            *tile = Tile {
                letter: Some(reveal.letter),
                state: TileState::Revealed(reveal.status),
            };
        }
        if let Some(key) = submission.key_updates.get(index) {
            self.keys.record(key.letter, key.status);
        }
    }

    pub fn set_message(&mut self, message: &Message, now: Instant) {
        self.message = Some(ActiveMessage {
            message: message.clone(),
            expires_at: now + Duration::from_millis(message.duration_ms),
        });
    }

    /// The message still on screen at `now`, dropping it once expired.
    pub fn active_message(&mut self, now: Instant) -> Option<&Message> {
        if self.message.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.message = None;
        }
        self.message.as_ref().map(|m| &m.message)
    }

    fn key_status(&self, letter: char) -> Option<LetterStatus> {
        self.keys.get(letter)
    }

    fn board_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(MAX_GUESSES * 2);
        for (row_index, row) in self.tiles.iter().enumerate() {
            let offset = match self.shake {
                Some((shaking, offset)) if shaking == row_index => offset,
                _ => 0,
            };
            let mut spans = Vec::with_capacity(WORD_LENGTH * 2 + 2);
            spans.push(Span::raw(if offset < 0 { "" } else { "  " }));
            for tile in row {
                let (bg, fg) = tile.state.colors();
                let letter = tile.letter.unwrap_or(' ');
                spans.push(Span::styled(
                    format!(" {letter} "),
                    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(" "));
            }
            spans.push(Span::raw(if offset > 0 { "" } else { "  " }));
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines
    }

    fn keyboard_lines(&self) -> Vec<Line<'static>> {
        let key_span = |label: String, status: Option<LetterStatus>| {
            let (bg, fg) = status_colors(status);
            Span::styled(format!(" {label} "), Style::default().fg(fg).bg(bg))
        };

        let mut lines = Vec::with_capacity(KEY_ROWS.len() * 2);
        for (i, row) in KEY_ROWS.iter().enumerate() {
            let mut spans = Vec::new();
            if i == KEY_ROWS.len() - 1 {
                spans.push(key_span(ENTER_LABEL.to_string(), None));
                spans.push(Span::raw(" "));
            }
            for letter in row.chars() {
                spans.push(key_span(letter.to_string(), self.key_status(letter)));
                spans.push(Span::raw(" "));
            }
            if i == KEY_ROWS.len() - 1 {
                spans.push(key_span(DELETE_LABEL.to_string(), None));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines
    }
}

/// Map a key press to an action. Letters are uppercased; anything else that
/// is not Enter, Backspace or Esc is dropped.
#[must_use]
pub fn key_to_action(key: &KeyEvent) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if has_ctrl => Some(UserAction::Exit),
        KeyCode::Char(_) if has_ctrl || has_alt => None,
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(UserAction::Input(
            InputEvent::Letter(c.to_ascii_uppercase()),
        )),
        KeyCode::Enter => Some(UserAction::Input(InputEvent::Submit)),
        KeyCode::Backspace => Some(UserAction::Input(InputEvent::Delete)),
        KeyCode::Esc => Some(UserAction::Exit),
        _ => None,
    }
}

fn status_text(state: &GameState) -> String {
    match state.phase() {
        Phase::Entering => format!("Guess {} of {MAX_GUESSES}", state.current_row() + 1),
        Phase::Won => format!("Solved in {} - ESC: Quit", state.attempts().len()),
        Phase::Lost => "Out of guesses - ESC: Quit".to_string(),
    }
}

fn message_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::None => MESSAGE_STYLE,
        MessageKind::Win => WIN_STYLE,
        MessageKind::Lose => LOSE_STYLE,
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input handling.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: BoardView,
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
            view: BoardView::new(),
            status: String::new(),
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
        let message = self.view.active_message(Instant::now()).cloned();
        let view = &self.view;
        let status = &self.status;
        self.terminal.draw(|f| {
            Self::render(f, view, message.as_ref(), status);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render(f: &mut Frame, view: &BoardView, message: Option<&Message>, status: &str) {
        #[allow(clippy::cast_possible_truncation)]
        let board_height = (MAX_GUESSES * 2 + 1) as u16;
        #[allow(clippy::cast_possible_truncation)]
        let keyboard_height = (KEY_ROWS.len() * 2 + 1) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                   // Title
                Constraint::Length(board_height + 1),    // Board
                Constraint::Length(3),                   // Message
                Constraint::Length(keyboard_height + 1), // Keyboard
                Constraint::Min(3),                      // Status
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], view);
        Self::render_message(f, chunks[2], message);
        Self::render_keyboard(f, chunks[3], view);
        Self::render_status(f, chunks[4], status);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDY")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, view: &BoardView) {
        let paragraph = Paragraph::new(view.board_lines())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(paragraph, area);
    }

    fn render_message(f: &mut Frame, area: Rect, message: Option<&Message>) {
        let line = message.map_or_else(Line::default, |m| {
            Line::from(Span::styled(m.text.clone(), message_style(m.kind)))
        });
        let paragraph = Paragraph::new(line).alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, view: &BoardView) {
        let paragraph = Paragraph::new(view.keyboard_lines()).alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let text = format!("{status} | ENTER: Submit | BACKSPACE: Delete | ESC: Quit");
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                let action = key_to_action(&key);
                debug_log!("handle_input() - key {:?} -> {:?}", key.code, action);
                Ok(action)
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        self.status = status_text(state);
        if self.draw().is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }

        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Error reading terminal input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_tile(&mut self, update: &TileUpdate) {
        self.view.apply_tile(update);
        self.draw_or_log();
    }

    fn display_submission(&mut self, submission: &Submission) {
        for index in 0..submission.reveals.len() {
            self.view.apply_reveal(submission, index);
            self.draw_or_log();
            thread::sleep(Duration::from_millis(REVEAL_STEP_MS));
        }
    }

    fn display_shake(&mut self, row: usize) {
        for offset in SHAKE_OFFSETS {
            self.view.shake = Some((row, offset));
            self.draw_or_log();
            thread::sleep(Duration::from_millis(SHAKE_STEP_MS));
        }
        self.view.shake = None;
        self.draw_or_log();
    }

    fn display_message(&mut self, message: &Message) {
        info_log!("display_message() - {}", message.text);
        self.view.set_message(message, Instant::now());
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Puzzle;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn submit(state: &mut GameState, word: &str) -> Submission {
        for c in word.chars() {
            state.append_letter(c);
        }
        state.submit().unwrap().unwrap()
    }

    #[test]
    fn test_key_to_action_letters_uppercased() {
        assert_eq!(
            key_to_action(&press(KeyCode::Char('q'))),
            Some(UserAction::Input(InputEvent::Letter('Q')))
        );
    }

    #[test]
    fn test_key_to_action_controls() {
        assert_eq!(
            key_to_action(&press(KeyCode::Enter)),
            Some(UserAction::Input(InputEvent::Submit))
        );
        assert_eq!(
            key_to_action(&press(KeyCode::Backspace)),
            Some(UserAction::Input(InputEvent::Delete))
        );
        assert_eq!(key_to_action(&press(KeyCode::Esc)), Some(UserAction::Exit));
        assert_eq!(
            key_to_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UserAction::Exit)
        );
    }

    #[test]
    fn test_key_to_action_ignores_other_keys() {
        assert_eq!(key_to_action(&press(KeyCode::Char('1'))), None);
        assert_eq!(key_to_action(&press(KeyCode::Tab)), None);
        assert_eq!(
            key_to_action(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)),
            None
        );
        let mut release = press(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(&release), None);
    }

    #[test]
    fn test_view_tiles_follow_updates() {
        let mut view = BoardView::new();
        view.apply_tile(&TileUpdate {
            row: 0,
            col: 0,
            letter: Some('C'),
        });
        assert_eq!(view.tiles[0][0].letter, Some('C'));
        assert_eq!(view.tiles[0][0].state, TileState::Filled);

        view.apply_tile(&TileUpdate {
            row: 0,
            col: 0,
            letter: None,
        });
        assert_eq!(view.tiles[0][0], Tile::EMPTY);
    }

    #[test]
    fn test_view_ignores_out_of_range_tiles() {
        let mut view = BoardView::new();
        view.apply_tile(&TileUpdate {
            row: MAX_GUESSES,
            col: 0,
            letter: Some('C'),
        });
        assert!(view.tiles.iter().flatten().all(|t| *t == Tile::EMPTY));
    }

    #[test]
    fn test_view_reveal_updates_tiles_and_keys() {
        let mut state = GameState::new(Puzzle::default());
        let submission = submit(&mut state, "CLOUD");

        let mut view = BoardView::new();
        view.apply_reveal(&submission, 0);
        assert_eq!(
            view.tiles[0][0].state,
            TileState::Revealed(LetterStatus::Correct)
        );
        assert_eq!(view.key_status('C'), Some(LetterStatus::Correct));
        assert_eq!(view.key_status('L'), None);

        for index in 1..submission.reveals.len() {
            view.apply_reveal(&submission, index);
        }
        assert_eq!(view.key_status('L'), Some(LetterStatus::Absent));
    }

    #[test]
    fn test_view_keys_match_game_aggregate() {
        let mut state = GameState::new(Puzzle::default());
        let mut view = BoardView::new();
        for word in ["CLOUD", "ACHED"] {
            let submission = submit(&mut state, word);
            for index in 0..submission.reveals.len() {
                view.apply_reveal(&submission, index);
            }
        }
        for letter in 'A'..='Z' {
            assert_eq!(view.key_status(letter), state.keyboard().get(letter));
        }
    }

    #[test]
    fn test_view_message_expires() {
        let mut view = BoardView::new();
        let now = Instant::now();
        let message = Message {
            text: "Not enough letters".to_string(),
            duration_ms: 1000,
            kind: MessageKind::None,
        };
        view.set_message(&message, now);

        assert_eq!(view.active_message(now), Some(&message));
        assert_eq!(
            view.active_message(now + Duration::from_millis(999)),
            Some(&message)
        );
        assert_eq!(view.active_message(now + Duration::from_millis(1000)), None);
        assert_eq!(view.active_message(now), None);
    }

    #[test]
    fn test_board_and_keyboard_line_counts() {
        let view = BoardView::new();
        assert_eq!(view.board_lines().len(), MAX_GUESSES * 2);
        assert_eq!(view.keyboard_lines().len(), KEY_ROWS.len() * 2);
    }

    #[test]
    fn test_status_text() {
        let mut state = GameState::new(Puzzle::default());
        assert_eq!(status_text(&state), "Guess 1 of 6");
        submit(&mut state, "CRANE");
        assert_eq!(status_text(&state), "Solved in 1 - ESC: Quit");
    }
}
