use crate::evaluator::{KeyboardState, LetterStatus, WORD_LENGTH, evaluate, is_valid_word, to_letters};
use std::fmt;
use thiserror::Error;

pub const MAX_GUESSES: usize = 6;
pub const DEFAULT_TARGET_WORD: &str = "CRANE";

const ERROR_MESSAGE_DURATION_MS: u64 = 1000;
const OUTCOME_MESSAGE_DURATION_MS: u64 = 5000;

/// Errors from submitting the current row. Neither is fatal; the display text
/// is what the player sees.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    #[error("Not enough letters")]
    IncompleteGuess,

    #[error("Not in word list")]
    InvalidWord,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("\"{0}\" is not a 5-letter word")]
    InvalidTarget(String),
}

/// The hidden word for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    target: [char; WORD_LENGTH],
}

impl Puzzle {
    /// Build a puzzle from `word`, case-insensitively.
    pub fn new(word: &str) -> Result<Self, PuzzleError> {
        let upper = word.trim().to_uppercase();
        to_letters(&upper)
            .map(|target| Self { target })
            .ok_or_else(|| PuzzleError::InvalidTarget(word.to_string()))
    }

    #[must_use]
    pub fn target(&self) -> &[char; WORD_LENGTH] {
        &self.target
    }

    #[must_use]
    pub fn target_word(&self) -> String {
        self.target.iter().collect()
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        let mut target = [' '; WORD_LENGTH];
        for (slot, c) in target.iter_mut().zip(DEFAULT_TARGET_WORD.chars()) {
            *slot = c;
        }
        Self { target }
    }
}

/// A submitted guess and its feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub letters: [char; WORD_LENGTH],
    pub statuses: [LetterStatus; WORD_LENGTH],
}

impl Attempt {
    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.statuses.iter().all(|s| *s == LetterStatus::Correct)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Won,
    Lost,
}

/// Result of a valid submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose { target: String },
    Continue,
}

/// One revealed tile of a submitted row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileReveal {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    pub status: LetterStatus,
}

/// One keyboard key after a submission updated its aggregate status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyUpdate {
    pub letter: char,
    pub status: LetterStatus,
}

/// Everything a renderer needs to present a submission, in reveal order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub row: usize,
    pub reveals: Vec<TileReveal>,
    pub key_updates: Vec<KeyUpdate>,
    pub outcome: Outcome,
}

/// A tile of the row in progress was set (`Some`) or cleared (`None`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileUpdate {
    pub row: usize,
    pub col: usize,
    pub letter: Option<char>,
}

/// Normalized input symbols, independent of where they came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Letter(char),
    Submit,
    Delete,
}

/// What handling one input event did to the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Ignored,
    TileSet(TileUpdate),
    Rejected { row: usize, error: GuessError },
    Submitted(Submission),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    None,
    Win,
    Lose,
}

/// A transient notice for the message surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub duration_ms: u64,
    pub kind: MessageKind,
}

impl Message {
    #[must_use]
    pub fn for_error(error: GuessError) -> Self {
        Self {
            text: error.to_string(),
            duration_ms: ERROR_MESSAGE_DURATION_MS,
            kind: MessageKind::None,
        }
    }

    /// Message announcing a finished game, or `None` if play continues.
    #[must_use]
    pub fn for_outcome(outcome: &Outcome) -> Option<Self> {
        match outcome {
            Outcome::Win => Some(Self {
                text: "Excellent! You won!".to_string(),
                duration_ms: OUTCOME_MESSAGE_DURATION_MS,
                kind: MessageKind::Win,
            }),
            Outcome::Lose { target } => Some(Self {
                text: format!("Game Over! The word was {target}"),
                duration_ms: OUTCOME_MESSAGE_DURATION_MS,
                kind: MessageKind::Lose,
            }),
            Outcome::Continue => None,
        }
    }
}

/// Puzzle state for one session: the row being typed, finished attempts and
/// the keyboard aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    puzzle: Puzzle,
    current_row: usize,
    current_tile: usize,
    buffer: [Option<char>; WORD_LENGTH],
    attempts: Vec<Attempt>,
    keyboard: KeyboardState,
    phase: Phase,
}

impl GameState {
    #[must_use]
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            current_row: 0,
            current_tile: 0,
            buffer: [None; WORD_LENGTH],
            attempts: Vec::with_capacity(MAX_GUESSES),
            keyboard: KeyboardState::new(),
            phase: Phase::Entering,
        }
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    #[must_use]
    pub fn current_tile(&self) -> usize {
        self.current_tile
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost)
    }

    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Letters typed so far in the current row.
    #[must_use]
    pub fn current_guess(&self) -> String {
        self.buffer.iter().flatten().collect()
    }

    /// Dispatch a normalized input event.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::Letter(c) => self
                .append_letter(c)
                .map_or(Response::Ignored, Response::TileSet),
            InputEvent::Delete => self
                .delete_letter()
                .map_or(Response::Ignored, Response::TileSet),
            InputEvent::Submit => match self.submit() {
                Ok(Some(submission)) => Response::Submitted(submission),
                Ok(None) => Response::Ignored,
                Err(error) => Response::Rejected {
                    row: self.current_row,
                    error,
                },
            },
        }
    }

    /// Put `ch` in the next free tile of the current row.
    ///
    /// Returns `None` without touching anything when the game is over or the
    /// row is full. Characters other than `A`-`Z` are accepted here and
    /// rejected by [`GameState::submit`].
    pub fn append_letter(&mut self, ch: char) -> Option<TileUpdate> {
        if self.is_over() || self.current_tile >= WORD_LENGTH {
            return None;
        }
        let letter = ch.to_ascii_uppercase();
        let col = self.current_tile;
        self.buffer[col] = Some(letter);
        self.current_tile += 1;
        log::debug!("Row {} tile {col} set to '{letter}'", self.current_row);
        Some(TileUpdate {
            row: self.current_row,
            col,
            letter: Some(letter),
        })
    }

    /// Clear the last filled tile of the current row.
    pub fn delete_letter(&mut self) -> Option<TileUpdate> {
        if self.is_over() || self.current_tile == 0 {
            return None;
        }
        self.current_tile -= 1;
        let col = self.current_tile;
        self.buffer[col] = None;
        log::debug!("Row {} tile {col} cleared", self.current_row);
        Some(TileUpdate {
            row: self.current_row,
            col,
            letter: None,
        })
    }

    /// Evaluate the current row against the target.
    ///
    /// Returns `Ok(None)` once the game is over. Rejections leave the state
    /// untouched.
    pub fn submit(&mut self) -> Result<Option<Submission>, GuessError> {
        if self.is_over() {
            return Ok(None);
        }
        if self.current_tile != WORD_LENGTH {
            log::debug!("Rejected incomplete guess '{}'", self.current_guess());
            return Err(GuessError::IncompleteGuess);
        }

        let guess = self.current_guess();
        if !is_valid_word(&guess) {
            log::debug!("Rejected invalid guess '{guess}'");
            return Err(GuessError::InvalidWord);
        }
        let letters = to_letters(&guess).ok_or(GuessError::InvalidWord)?;

        let statuses = evaluate(&letters, self.puzzle.target());
        let row = self.current_row;

        let mut reveals = Vec::with_capacity(WORD_LENGTH);
        let mut key_updates = Vec::with_capacity(WORD_LENGTH);
        for (col, (&letter, &status)) in letters.iter().zip(statuses.iter()).enumerate() {
            reveals.push(TileReveal {
                row,
                col,
                letter,
                status,
            });
            if let Some(aggregate) = self.keyboard.record(letter, status) {
                key_updates.push(KeyUpdate {
                    letter,
                    status: aggregate,
                });
            }
        }

        let attempt = Attempt { letters, statuses };
        let won = attempt.is_win();
        self.attempts.push(attempt);

        let outcome = if won {
            self.phase = Phase::Won;
            log::info!("Guess {guess} solved the puzzle in {} attempt(s)", row + 1);
            Outcome::Win
        } else if row + 1 == MAX_GUESSES {
            self.phase = Phase::Lost;
            let target = self.puzzle.target_word();
            log::info!("Out of guesses; the word was {target}");
            Outcome::Lose { target }
        } else {
            self.current_row += 1;
            self.current_tile = 0;
            self.buffer = [None; WORD_LENGTH];
            log::debug!("Guess {guess} scored {}", format_statuses(&statuses));
            Outcome::Continue
        };

        Ok(Some(Submission {
            row,
            reveals,
            key_updates,
            outcome,
        }))
    }
}

/// Render statuses as G/Y/X codes, e.g. `XYGXG`.
#[must_use]
pub fn format_statuses(statuses: &[LetterStatus]) -> String {
    statuses.iter().map(|s| s.to_char()).collect()
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Entering => "entering",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(text)
    }
}

// Driver

/// Actions a front-end can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Input(InputEvent),
    Exit,
}

/// Interface for front-ends (CLI, TUI). The game loop feeds each input to the
/// game state and forwards the results here.
pub trait GameInterface {
    /// Next user action, or `None` if nothing happened yet.
    fn read_action(&mut self, state: &GameState) -> Option<UserAction>;
    fn display_tile(&mut self, update: &TileUpdate);
    fn display_submission(&mut self, submission: &Submission);
    fn display_shake(&mut self, row: usize);
    fn display_message(&mut self, message: &Message);
    fn display_exit_message(&mut self);
}

/// Run the game until the front-end asks to exit.
///
/// Input keeps being read after the game ends so the final board stays up;
/// the state simply ignores it.
pub fn game_loop<I: GameInterface>(state: &mut GameState, interface: &mut I) {
    log::info!("Starting game");
    loop {
        let Some(action) = interface.read_action(state) else {
            continue;
        };

        match action {
            UserAction::Exit => {
                log::info!("Exiting in phase {}", state.phase());
                interface.display_exit_message();
                break;
            }
            UserAction::Input(event) => dispatch(state, event, interface),
        }
    }
}

fn dispatch<I: GameInterface>(state: &mut GameState, event: InputEvent, interface: &mut I) {
    match state.handle(event) {
        Response::Ignored => {}
        Response::TileSet(update) => interface.display_tile(&update),
        Response::Rejected { row, error } => {
            if error == GuessError::InvalidWord {
                interface.display_shake(row);
            }
            interface.display_message(&Message::for_error(error));
        }
        Response::Submitted(submission) => {
            interface.display_submission(&submission);
            if let Some(message) = Message::for_outcome(&submission.outcome) {
                interface.display_message(&message);
            }
        }
    }
}
