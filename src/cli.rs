use crate::evaluator::LetterStatus;
use crate::game_state::{
    GameInterface, GameState, InputEvent, Message, Submission, TileUpdate, UserAction,
    format_statuses,
};
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;

/// Wordy: guess the five-letter word in six tries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store a new target word before starting
    #[arg(short = 'w', long = "word")]
    pub word: Option<String>,

    /// Path of the file holding the target word
    #[arg(short = 's', long = "store")]
    pub store_path: Option<String>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(short = 'p', long = "plain")]
    pub plain: bool,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// One line of plain-interface input.
#[derive(Debug, PartialEq, Eq)]
pub enum LineInput {
    Exit,
    Events(Vec<InputEvent>),
}

/// Turn a typed line into input events.
///
/// `-` deletes, whitespace is skipped, anything else is typed as a letter,
/// and the end of the line submits.
#[must_use]
pub fn parse_line(line: &str) -> LineInput {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        return LineInput::Exit;
    }

    let mut events: Vec<InputEvent> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '-' => InputEvent::Delete,
            c => InputEvent::Letter(c),
        })
        .collect();
    events.push(InputEvent::Submit);
    LineInput::Events(events)
}

fn status_symbol(status: Option<LetterStatus>) -> char {
    status.map_or('.', LetterStatus::to_char)
}

pub fn display_prompt(state: &GameState) {
    println!(
        "\nGuess {} of {} (letters, '-' to delete, ENTER to submit, 'exit' to quit):",
        state.current_row() + 1,
        crate::game_state::MAX_GUESSES
    );
}

pub fn display_submission(submission: &Submission) {
    let letters: String = submission.reveals.iter().map(|r| r.letter).collect();
    let statuses: Vec<LetterStatus> = submission.reveals.iter().map(|r| r.status).collect();
    println!("{letters}");
    println!("{}", format_statuses(&statuses));
}

pub fn display_keyboard(state: &GameState) {
    let keys: String = ('A'..='Z')
        .map(|c| format!("{c}{}", status_symbol(state.keyboard().get(c))))
        .collect::<Vec<_>>()
        .join(" ");
    println!("Keys: {keys}");
}

pub fn display_message(message: &Message) {
    println!("{}", message.text);
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Line-based implementation of the `GameInterface` trait.
///
/// Each line read from `reader` is expanded into a queue of input events that
/// is drained one action at a time.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<InputEvent>,
    shown_keyboard_after: usize,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            shown_keyboard_after: 0,
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self, state: &GameState) -> Option<UserAction> {
        if let Some(event) = self.pending.pop_front() {
            return Some(UserAction::Input(event));
        }

        if self.shown_keyboard_after < state.attempts().len() {
            display_keyboard(state);
            self.shown_keyboard_after = state.attempts().len();
        }
        if !state.is_over() {
            display_prompt(state);
        }

        let Some(line) = self.read_line() else {
            return Some(UserAction::Exit);
        };
        match parse_line(&line) {
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Events(events) => {
                self.pending.extend(events);
                None
            }
        }
    }

    fn display_tile(&mut self, _update: &TileUpdate) {}

    fn display_submission(&mut self, submission: &Submission) {
        display_submission(submission);
    }

    fn display_shake(&mut self, _row: usize) {}

    fn display_message(&mut self, message: &Message) {
        display_message(message);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
