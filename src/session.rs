use crate::{
    command::Command,
    game::{GameState, Phase},
    renderer::Renderer,
    stats::{Stats, StatsStore},
    words::{Corpus, Word},
};
use clap::ArgEnum;
use log::{debug, warn};
use rand::rngs::StdRng;

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Random,
    Daily,
}

/// Where each new game gets its secret from.
#[derive(Debug)]
pub enum SecretSource {
    Random(StdRng),
    Daily,
    Fixed(Word),
}

impl SecretSource {
    fn next(&mut self, corpus: &Corpus) -> Word {
        match self {
            SecretSource::Random(rng) => corpus.random_word(rng),
            SecretSource::Daily => corpus.word_of_the_day(),
            SecretSource::Fixed(word) => *word,
        }
    }
}

/// The shell around a game: reads commands, keeps the stats file up to date
/// and starts new games until the player leaves.
pub struct Session<'a> {
    corpus: &'a Corpus,
    store: StatsStore,
    stats: Stats,
    secrets: SecretSource,
}

enum GameEnd {
    NewGame,
    Quit,
}

impl<'a> Session<'a> {
    pub fn new(corpus: &'a Corpus, store: StatsStore, secrets: SecretSource) -> Self {
        let stats = store.load();
        Self {
            corpus,
            store,
            stats,
            secrets,
        }
    }

    pub(crate) fn run(&mut self, renderer: &mut dyn Renderer) -> anyhow::Result<()> {
        let mut game = GameState::new(self.secrets.next(self.corpus));
        loop {
            if let GameEnd::Quit = self.play(&mut game, renderer)? {
                return Ok(());
            }
            game.restart(self.secrets.next(self.corpus));
        }
    }

    fn play(
        &mut self,
        game: &mut GameState,
        renderer: &mut dyn Renderer,
    ) -> anyhow::Result<GameEnd> {
        renderer.render(game)?;
        loop {
            let command = match renderer.next_command()? {
                Some(command) => command,
                None => return Ok(GameEnd::Quit),
            };
            match command {
                Command::Exit => return Ok(GameEnd::Quit),
                Command::Skip => {
                    debug!("game skipped after {} guesses", game.attempts_used());
                    return Ok(GameEnd::NewGame);
                }
                Command::ToggleHard => match game.toggle_hard_mode() {
                    Ok(on) => renderer.message(&format!(
                        "Hard mode is now {}.",
                        if on { "on" } else { "off" }
                    ))?,
                    Err(e) => {
                        renderer.message(&e.to_string())?;
                        renderer.message("Enter 'skip' to start a new game.")?;
                    }
                },
                Command::ShowStats => renderer.show_stats(&self.stats)?,
                Command::Debug => renderer.show_debug(game, &self.stats, self.corpus.len())?,
                Command::Guess(input) => {
                    let word = match self.corpus.parse_guess(&input) {
                        Ok(word) => word,
                        Err(e) => {
                            renderer.message(&e.to_string())?;
                            continue;
                        }
                    };
                    let phase = game.submit(word)?;
                    renderer.render(game)?;
                    if phase != Phase::AwaitingGuess {
                        return self.finish(game, renderer);
                    }
                }
            }
        }
    }

    fn finish(
        &mut self,
        game: &GameState,
        renderer: &mut dyn Renderer,
    ) -> anyhow::Result<GameEnd> {
        let won = game.is_win();
        match self.store.record_result(won, game.attempts_used()) {
            Ok(stats) => self.stats = stats,
            Err(e) => {
                warn!("{:#}", anyhow::Error::new(e));
                renderer.message("Could not save stats.")?;
                self.stats.record_result(won, game.attempts_used());
            }
        }

        let prompt = if won {
            renderer.message("Correct!")?;
            "Clear screen and play again? (y/n)"
        } else {
            renderer.message(&format!("The answer was: {}", game.secret()))?;
            "Out of attempts, play again? (y/n)"
        };
        Ok(if renderer.confirm(prompt)? {
            GameEnd::NewGame
        } else {
            GameEnd::Quit
        })
    }
}
