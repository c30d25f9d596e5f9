// Library interface for wordy
// This allows integration tests to access internal modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod word_store;

// Re-export commonly used items for easier testing
pub use evaluator::{KeyboardState, LetterStatus, WORD_LENGTH, evaluate, is_valid_word};
pub use game_state::{
    GameInterface, GameState, GuessError, InputEvent, MAX_GUESSES, Message, MessageKind, Outcome,
    Phase, Puzzle, Response, Submission, UserAction, game_loop,
};
pub use word_store::{FileWordStore, MemoryWordStore, WordStore, load_target_word};
