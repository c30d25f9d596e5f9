use std::process::ExitCode;
use wordy::cli::{CliInterface, parse_cli};
use wordy::game_state::{GameState, Puzzle, game_loop};
use wordy::logging::init_logging;
use wordy::tui::TuiInterface;
use wordy::word_store::{
    FileWordStore, MemoryWordStore, WordStore, get_target_word_path, load_target_word,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    let log_path = init_logging(cli.verbose);
    log::info!("wordy {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &log_path {
        log::debug!("Logging to {}", path.display());
    }

    let store: Box<dyn WordStore> = match cli.store_path.as_ref() {
        Some(path) => Box::new(FileWordStore::new(path)),
        None => match get_target_word_path() {
            Some(path) => Box::new(FileWordStore::new(path)),
            None => {
                log::warn!("No data directory available; target word will not be saved");
                Box::new(MemoryWordStore::new())
            }
        },
    };

    if let Some(word) = &cli.word {
        let puzzle = match Puzzle::new(word) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                eprintln!("Invalid target word: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = store.set_target_word(&puzzle.target_word()) {
            eprintln!("Failed to store target word: {e}");
            return ExitCode::FAILURE;
        }
        log::info!("Stored a new target word");
    }

    let target = load_target_word(store.as_ref());
    let puzzle = match Puzzle::new(&target) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Invalid target word: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut state = GameState::new(puzzle);

    if cli.plain {
        let stdin = std::io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut state, &mut interface);
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut state, &mut interface);
    }

    ExitCode::SUCCESS
}
