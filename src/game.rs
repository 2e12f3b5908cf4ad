use crate::words::{Word, WORD_LENGTH};
use log::debug;
use thiserror::Error;

pub const MAX_ATTEMPTS: usize = 6;
const ALPHABET: usize = 26;

/// Feedback for a single letter. The derived ordering is the ranking used
/// when folding feedback into the keyboard: `Correct > Present > Absent > Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    #[default]
    Unknown,
    Absent,
    Present,
    Correct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub verdicts: [Verdict; WORD_LENGTH],
    pub is_win: bool,
}

/// Scores `guess` against `secret`.
///
/// Exact matches are taken first, then the remaining secret letters are
/// handed out left to right as `Present`, so a repeated guess letter is never
/// credited more often than it occurs in the secret.
pub fn evaluate(secret: &Word, guess: &Word) -> Evaluation {
    let mut verdicts = [Verdict::Absent; WORD_LENGTH];
    let mut consumed = [false; WORD_LENGTH];

    for i in 0..WORD_LENGTH {
        if guess.letter(i) == secret.letter(i) {
            verdicts[i] = Verdict::Correct;
            consumed[i] = true;
        }
    }

    for i in 0..WORD_LENGTH {
        if verdicts[i] == Verdict::Correct {
            continue;
        }
        let c = guess.letter(i);
        if let Some(j) = (0..WORD_LENGTH).find(|&j| !consumed[j] && secret.letter(j) == c) {
            verdicts[i] = Verdict::Present;
            consumed[j] = true;
        }
    }

    Evaluation {
        verdicts,
        is_win: verdicts == [Verdict::Correct; WORD_LENGTH],
    }
}

fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_lowercase() {
        Some((letter as u8 - b'a') as usize)
    } else {
        None
    }
}

/// Best known verdict for every letter of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterState {
    letters: [Verdict; ALPHABET],
}

impl Default for LetterState {
    fn default() -> Self {
        LetterState {
            letters: [Verdict::Unknown; ALPHABET],
        }
    }
}

impl LetterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the status of `letter` to `verdict` if it ranks higher.
    /// Returns whether anything changed; non `a-z` letters are ignored.
    pub fn upgrade(&mut self, letter: char, verdict: Verdict) -> bool {
        match letter_index(letter) {
            Some(idx) if verdict > self.letters[idx] => {
                self.letters[idx] = verdict;
                true
            }
            _ => false,
        }
    }

    pub fn record(&mut self, guess: &Guess) {
        for (c, v) in guess.word.letters().zip(guess.verdicts) {
            self.upgrade(c, v);
        }
    }

    pub fn reset(&mut self) {
        self.letters = [Verdict::Unknown; ALPHABET];
    }

    pub fn status(&self, letter: char) -> Verdict {
        letter_index(letter)
            .map(|idx| self.letters[idx])
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Verdict)> + '_ {
        ('a'..='z').zip(self.letters.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub word: Word,
    pub verdicts: [Verdict; WORD_LENGTH],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingGuess,
    Won,
    AttemptsExhausted,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Hard mode can only be toggled at the start of a game.")]
    HardModeLocked,
    #[error("This game is already over.")]
    Finished,
}

#[derive(Debug)]
pub struct GameState {
    secret: Word,
    attempts_remaining: usize,
    guesses: Vec<Guess>,
    letters: LetterState,
    hard_mode: bool,
}

impl GameState {
    pub fn new(secret: Word) -> Self {
        debug!("new game started");
        Self {
            secret,
            attempts_remaining: MAX_ATTEMPTS,
            guesses: Vec::with_capacity(MAX_ATTEMPTS),
            letters: LetterState::new(),
            hard_mode: false,
        }
    }

    /// Starts over with a fresh secret, keeping the hard mode setting.
    pub fn restart(&mut self, secret: Word) {
        self.secret = secret;
        self.attempts_remaining = MAX_ATTEMPTS;
        self.guesses.clear();
        self.letters.reset();
        debug!("game restarted");
    }

    pub fn secret(&self) -> &Word {
        &self.secret
    }

    pub fn attempts_remaining(&self) -> usize {
        self.attempts_remaining
    }

    pub fn attempts_used(&self) -> usize {
        MAX_ATTEMPTS - self.attempts_remaining
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn letters(&self) -> &LetterState {
        &self.letters
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn phase(&self) -> Phase {
        match self.guesses.last() {
            Some(g) if g.verdicts == [Verdict::Correct; WORD_LENGTH] => Phase::Won,
            _ if self.attempts_remaining == 0 => Phase::AttemptsExhausted,
            _ => Phase::AwaitingGuess,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase() != Phase::AwaitingGuess
    }

    pub fn is_win(&self) -> bool {
        self.phase() == Phase::Won
    }

    /// Plays one guess. The word must already be checked against the corpus.
    pub fn submit(&mut self, word: Word) -> Result<Phase, GameError> {
        if self.is_over() {
            return Err(GameError::Finished);
        }
        self.attempts_remaining -= 1;
        let evaluation = evaluate(&self.secret, &word);
        let guess = Guess {
            word,
            verdicts: evaluation.verdicts,
        };
        self.letters.record(&guess);
        self.guesses.push(guess);

        let phase = if evaluation.is_win {
            Phase::Won
        } else if self.attempts_remaining == 0 {
            Phase::AttemptsExhausted
        } else {
            Phase::AwaitingGuess
        };
        debug!(
            "guess {} of {}: {:?}",
            self.attempts_used(),
            MAX_ATTEMPTS,
            phase
        );
        Ok(phase)
    }

    pub fn toggle_hard_mode(&mut self) -> Result<bool, GameError> {
        if self.attempts_remaining != MAX_ATTEMPTS {
            return Err(GameError::HardModeLocked);
        }
        self.hard_mode = !self.hard_mode;
        Ok(self.hard_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn result(code: &str) -> [Verdict; WORD_LENGTH] {
        code.chars()
            .map(|c| match c {
                '!' => Verdict::Correct,
                '?' => Verdict::Present,
                'x' => Verdict::Absent,
                _ => panic!("unknown code char {}", c),
            })
            .collect::<Vec<Verdict>>()
            .try_into()
            .unwrap()
    }

    fn verdicts(secret: &str, guess: &str) -> [Verdict; WORD_LENGTH] {
        evaluate(&word(secret), &word(guess)).verdicts
    }

    #[test]
    fn evaluate_confirms_all_match() {
        let e = evaluate(&word("MATCH"), &word("MATCH"));
        assert_eq!(e.verdicts, result("!!!!!"));
        assert!(e.is_win);
    }

    #[test]
    fn evaluate_allows_double_correct() {
        assert_eq!(verdicts("NOOBS", "ROOTY"), result("x!!xx"))
    }

    #[test]
    fn evaluate_allows_double_present() {
        assert_eq!(verdicts("NOOBS", "IGLOO"), result("xxx??"))
    }

    #[test]
    fn evaluate_isnt_greedy() {
        assert_eq!(verdicts("FRAME", "ELIDE"), result("xxxx!"))
    }

    #[test]
    fn evaluate_crane_trace() {
        let e = evaluate(&word("crane"), &word("trace"));
        assert_eq!(e.verdicts, result("x!!?!"));
        assert!(!e.is_win);
    }

    #[test]
    fn evaluate_allow_llama() {
        let v = verdicts("allow", "llama");
        assert_eq!(v, result("?!?xx"));
        let marked = |letter: char| {
            word("llama")
                .letters()
                .zip(v)
                .filter(|&(c, v)| c == letter && v != Verdict::Absent)
                .count()
        };
        assert_eq!(marked('l'), 2);
        assert_eq!(marked('a'), 1);
    }

    #[test]
    fn evaluate_prefers_exact_match_over_earlier_present() {
        // the last e is exact, so the earlier ones have nothing left to claim
        assert_eq!(verdicts("crane", "eerie"), result("xx?x!"));
    }

    #[test]
    fn verdict_ranking() {
        assert!(Verdict::Correct > Verdict::Present);
        assert!(Verdict::Present > Verdict::Absent);
        assert!(Verdict::Absent > Verdict::Unknown);
        assert_eq!(Verdict::default(), Verdict::Unknown);
    }

    #[test]
    fn upgrade_never_downgrades() {
        let mut letters = LetterState::new();
        assert!(letters.upgrade('e', Verdict::Present));
        assert!(letters.upgrade('e', Verdict::Correct));
        assert!(!letters.upgrade('e', Verdict::Absent));
        assert!(!letters.upgrade('e', Verdict::Present));
        assert_eq!(letters.status('e'), Verdict::Correct);
    }

    #[test]
    fn upgrade_rejects_non_letters() {
        let mut letters = LetterState::new();
        assert!(!letters.upgrade('E', Verdict::Correct));
        assert!(!letters.upgrade('{', Verdict::Correct));
        assert!(letters.iter().all(|(_, v)| v == Verdict::Unknown));
        assert_eq!(letters.status('!'), Verdict::Unknown);
    }

    #[test]
    fn record_processes_every_position() {
        // o is absent in the middle but correct at the end
        let guess = Guess {
            word: word("xxoxo"),
            verdicts: [
                Verdict::Absent,
                Verdict::Absent,
                Verdict::Absent,
                Verdict::Absent,
                Verdict::Correct,
            ],
        };
        let mut letters = LetterState::new();
        letters.record(&guess);
        assert_eq!(letters.status('o'), Verdict::Correct);
        assert_eq!(letters.status('x'), Verdict::Absent);
    }

    #[test]
    fn reset_clears_all_letters() {
        let mut letters = LetterState::new();
        for c in 'a'..='z' {
            letters.upgrade(c, Verdict::Correct);
        }
        letters.reset();
        assert!(('a'..='z').all(|c| letters.status(c) == Verdict::Unknown));
    }

    #[test]
    fn exhausting_attempts_ends_game() {
        let mut game = GameState::new(word("crane"));
        for i in 0..MAX_ATTEMPTS - 1 {
            assert_eq!(game.submit(word("slate")), Ok(Phase::AwaitingGuess));
            assert_eq!(game.attempts_remaining(), MAX_ATTEMPTS - 1 - i);
        }
        assert_eq!(game.submit(word("slate")), Ok(Phase::AttemptsExhausted));
        assert_eq!(game.attempts_remaining(), 0);
        assert_eq!(game.submit(word("crane")), Err(GameError::Finished));
        assert_eq!(game.guesses().len(), MAX_ATTEMPTS);
    }

    #[test]
    fn winning_guess_ends_game() {
        let mut game = GameState::new(word("crane"));
        assert_eq!(game.submit(word("trace")), Ok(Phase::AwaitingGuess));
        assert_eq!(game.submit(word("crane")), Ok(Phase::Won));
        assert!(game.is_win());
        assert_eq!(game.attempts_used(), 2);
        assert_eq!(game.letters().status('t'), Verdict::Absent);
        assert_eq!(game.letters().status('c'), Verdict::Correct);
        assert_eq!(game.guesses()[0].word, word("trace"));
    }

    #[test]
    fn win_on_last_attempt_is_a_win() {
        let mut game = GameState::new(word("crane"));
        for _ in 0..MAX_ATTEMPTS - 1 {
            game.submit(word("slate")).unwrap();
        }
        assert_eq!(game.submit(word("crane")), Ok(Phase::Won));
    }

    #[test]
    fn hard_mode_only_toggles_before_first_guess() {
        let mut game = GameState::new(word("crane"));
        assert_eq!(game.toggle_hard_mode(), Ok(true));
        assert_eq!(game.toggle_hard_mode(), Ok(false));
        assert_eq!(game.toggle_hard_mode(), Ok(true));
        game.submit(word("slate")).unwrap();
        assert_eq!(game.toggle_hard_mode(), Err(GameError::HardModeLocked));
        assert!(game.hard_mode());
    }

    #[test]
    fn restart_resets_everything_but_hard_mode() {
        let mut game = GameState::new(word("crane"));
        game.toggle_hard_mode().unwrap();
        game.submit(word("slate")).unwrap();
        game.restart(word("allow"));
        assert_eq!(game.secret(), &word("allow"));
        assert_eq!(game.attempts_remaining(), MAX_ATTEMPTS);
        assert!(game.guesses().is_empty());
        assert_eq!(game.letters(), &LetterState::new());
        assert!(game.hard_mode());
    }

    fn any_word() -> impl Strategy<Value = Word> {
        // small alphabet so duplicates are common
        "[a-e]{5}".prop_map(|s| s.parse().unwrap())
    }

    proptest! {
        #[test]
        fn marks_never_exceed_secret_count(secret in any_word(), guess in any_word()) {
            let e = evaluate(&secret, &guess);
            for c in 'a'..='e' {
                let marked = guess
                    .letters()
                    .zip(e.verdicts)
                    .filter(|&(g, v)| g == c && v != Verdict::Absent)
                    .count();
                prop_assert!(marked <= secret.letters().filter(|&s| s == c).count());
            }
        }

        #[test]
        fn correct_iff_same_letter(secret in any_word(), guess in any_word()) {
            let e = evaluate(&secret, &guess);
            for i in 0..WORD_LENGTH {
                let same = secret.letter(i) == guess.letter(i);
                prop_assert_eq!(e.verdicts[i] == Verdict::Correct, same);
            }
            prop_assert_eq!(e.is_win, secret == guess);
        }

        #[test]
        fn self_guess_wins(secret in any_word()) {
            let e = evaluate(&secret, &secret);
            prop_assert_eq!(e.verdicts, [Verdict::Correct; WORD_LENGTH]);
            prop_assert!(e.is_win);
        }

        #[test]
        fn correct_is_sticky(
            guesses in proptest::collection::vec(any_word(), 1..8),
            secret in any_word(),
        ) {
            let mut letters = LetterState::new();
            let mut seen_correct = Vec::new();
            for word in guesses {
                let guess = Guess { word, verdicts: evaluate(&secret, &word).verdicts };
                letters.record(&guess);
                for (c, v) in letters.iter() {
                    if v == Verdict::Correct && !seen_correct.contains(&c) {
                        seen_correct.push(c);
                    }
                }
                for c in &seen_correct {
                    prop_assert_eq!(letters.status(*c), Verdict::Correct);
                }
            }
        }
    }
}
