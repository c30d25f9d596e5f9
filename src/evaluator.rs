use std::fmt;

pub const WORD_LENGTH: usize = 5;
const ALPHABET_SIZE: usize = 26;

/// Per-position outcome of comparing a guess against the target word.
///
/// Variants are declared in precedence order, so `Ord` gives
/// `Absent < Present < Correct`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

impl LetterStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Correct => "correct",
        }
    }

    /// Single-character code used by the plain interface (G/Y/X).
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

impl fmt::Display for LetterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some((c as u8 - b'A') as usize)
    } else {
        None
    }
}

/// A guess is valid when it is exactly `WORD_LENGTH` letters, all `A`-`Z`.
///
/// There is no dictionary lookup; any such combination is accepted.
#[must_use]
pub fn is_valid_word(word: &str) -> bool {
    word.chars().count() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_uppercase())
}

/// Compute the feedback for `guess` against `target`.
///
/// Exact matches are resolved first and consume their letter from the
/// target's pool; the remaining positions are then scanned left to right and
/// marked present only while that letter still has unconsumed occurrences.
/// Both words must be valid (see [`is_valid_word`]).
#[must_use]
pub fn evaluate(guess: &[char; WORD_LENGTH], target: &[char; WORD_LENGTH]) -> [LetterStatus; WORD_LENGTH] {
    let mut remaining = [0u8; ALPHABET_SIZE];
    for &c in target {
        if let Some(idx) = letter_index(c) {
            remaining[idx] += 1;
        }
    }

    let mut statuses = [LetterStatus::Absent; WORD_LENGTH];

    // First pass: exact matches
    for i in 0..WORD_LENGTH {
        if guess[i] == target[i] {
            statuses[i] = LetterStatus::Correct;
            if let Some(idx) = letter_index(guess[i]) {
                remaining[idx] -= 1;
            }
        }
    }

    // Second pass: present letters from what is left
    for i in 0..WORD_LENGTH {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(idx) = letter_index(guess[i])
            && remaining[idx] > 0
        {
            statuses[i] = LetterStatus::Present;
            remaining[idx] -= 1;
        }
    }

    statuses
}

/// Convert a word into a fixed-size letter array, or `None` if it is not valid.
#[must_use]
pub fn to_letters(word: &str) -> Option<[char; WORD_LENGTH]> {
    if !is_valid_word(word) {
        return None;
    }
    let mut letters = [' '; WORD_LENGTH];
    for (slot, c) in letters.iter_mut().zip(word.chars()) {
        *slot = c;
    }
    Some(letters)
}

/// Best status observed so far for each letter of the alphabet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardState {
    statuses: [Option<LetterStatus>; ALPHABET_SIZE],
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate status of `letter`, or `None` if it has not been evaluated yet.
    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterStatus> {
        letter_index(letter.to_ascii_uppercase()).and_then(|idx| self.statuses[idx])
    }

    /// Record a newly evaluated status for `letter`, keeping the higher one.
    ///
    /// Returns the aggregate after the update.
    pub fn record(&mut self, letter: char, status: LetterStatus) -> Option<LetterStatus> {
        let idx = letter_index(letter.to_ascii_uppercase())?;
        let slot = &mut self.statuses[idx];
        match *slot {
            Some(current) if current >= status => {}
            _ => *slot = Some(status),
        }
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn letters(word: &str) -> [char; WORD_LENGTH] {
        to_letters(word).unwrap()
    }

    fn eval(guess: &str, target: &str) -> [LetterStatus; WORD_LENGTH] {
        evaluate(&letters(guess), &letters(target))
    }

    use LetterStatus::{Absent, Correct, Present};

    #[test]
    fn test_exact_match_all_correct() {
        assert_eq!(eval("CRANE", "CRANE"), [Correct; WORD_LENGTH]);
    }

    #[test]
    fn test_no_shared_letters_all_absent() {
        assert_eq!(eval("TUMID", "CRANE"), [Absent; WORD_LENGTH]);
    }

    #[test]
    fn test_duplicate_letters_speed_erase() {
        assert_eq!(
            eval("ERASE", "SPEED"),
            [Present, Absent, Absent, Present, Present]
        );
    }

    #[test]
    fn test_correct_consumes_before_present() {
        // The E at the end is exact, so the leading E's have nothing left to match.
        assert_eq!(
            eval("EERIE", "CRANE"),
            [Absent, Absent, Present, Absent, Correct]
        );
    }

    #[test]
    fn test_repeated_guess_letter_single_occurrence_in_target() {
        assert_eq!(
            eval("LLAMA", "HELLO"),
            [Present, Present, Absent, Absent, Absent]
        );
        assert_eq!(
            eval("SPEED", "ABIDE"),
            [Absent, Absent, Present, Absent, Present]
        );
    }

    #[test]
    fn test_mixed_feedback() {
        assert_eq!(
            eval("CRANE", "SLATE"),
            [Absent, Absent, Correct, Absent, Correct]
        );
        assert_eq!(
            eval("CRANE", "FRAME"),
            [Absent, Correct, Correct, Absent, Correct]
        );
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("CRANE"));
        assert!(!is_valid_word("crane")); // Lowercase
        assert!(!is_valid_word("CRAN")); // Too short
        assert!(!is_valid_word("CRANES")); // Too long
        assert!(!is_valid_word("CRAN3")); // Contains digit
        assert!(!is_valid_word("CRAN ")); // Contains space
        assert!(!is_valid_word("CRANÉ")); // Non-ASCII
        assert!(!is_valid_word("")); // Empty
    }

    #[test]
    fn test_status_ordering() {
        assert!(Correct > Present);
        assert!(Present > Absent);
        assert_eq!(Correct.to_char(), 'G');
        assert_eq!(Present.to_string(), "present");
    }

    #[test]
    fn test_keyboard_never_downgrades() {
        let mut keyboard = KeyboardState::new();
        assert_eq!(keyboard.get('C'), None);

        assert_eq!(keyboard.record('C', Correct), Some(Correct));
        assert_eq!(keyboard.record('C', Present), Some(Correct));
        assert_eq!(keyboard.record('C', Absent), Some(Correct));
        assert_eq!(keyboard.get('c'), Some(Correct));

        assert_eq!(keyboard.record('A', Absent), Some(Absent));
        assert_eq!(keyboard.record('A', Present), Some(Present));
        assert_eq!(keyboard.record('A', Absent), Some(Present));
    }

    #[test]
    fn test_keyboard_ignores_non_letters() {
        let mut keyboard = KeyboardState::new();
        assert_eq!(keyboard.record('1', Correct), None);
        assert_eq!(keyboard, KeyboardState::new());
    }

    fn word_strategy() -> impl Strategy<Value = [char; WORD_LENGTH]> {
        // A small alphabet makes repeated letters common
        prop::array::uniform5(prop::sample::select(vec!['A', 'B', 'C', 'D', 'E']))
    }

    proptest! {
        #[test]
        fn prop_marks_never_exceed_target_count(guess in word_strategy(), target in word_strategy()) {
            let statuses = evaluate(&guess, &target);
            prop_assert_eq!(statuses.len(), WORD_LENGTH);

            for letter in guess {
                let marked = guess
                    .iter()
                    .zip(statuses.iter())
                    .filter(|(g, s)| **g == letter && **s != Absent)
                    .count();
                let in_target = target.iter().filter(|t| **t == letter).count();
                prop_assert!(marked <= in_target);
            }
        }

        #[test]
        fn prop_correct_exactly_where_letters_match(guess in word_strategy(), target in word_strategy()) {
            let statuses = evaluate(&guess, &target);
            for i in 0..WORD_LENGTH {
                prop_assert_eq!(statuses[i] == Correct, guess[i] == target[i]);
            }
        }

        #[test]
        fn prop_self_evaluation_is_all_correct(word in word_strategy()) {
            prop_assert_eq!(evaluate(&word, &word), [Correct; WORD_LENGTH]);
        }
    }
}
