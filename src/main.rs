mod command;
mod game;
mod renderer;
mod rendering;
mod session;
mod stats;
mod words;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use rand::{rngs::StdRng, SeedableRng};
use session::{GameMode, SecretSource, Session};
use stats::StatsStore;
use std::path::PathBuf;
use words::{Corpus, Word};

/// Guess the five letter word in six tries.
///
/// While playing, enter `skip` for a new word, `hard` to toggle hard mode
/// before the first guess, `stat` for statistics and `exit` to quit.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Word list to play with, one word per line. Defaults to the built in list
    #[clap(short, long)]
    wordlist: Option<PathBuf>,

    /// File the statistics are kept in
    #[clap(short, long, default_value = "stats.txt")]
    stats: PathBuf,

    /// How each game's word is chosen
    #[clap(short, long, arg_enum, default_value = "random")]
    mode: GameMode,

    /// Seed for random word selection
    #[clap(long)]
    seed: Option<u64>,

    /// Always play this word (must be in the word list). Overrides --mode
    #[clap(long)]
    word: Option<String>,
}

fn secret_source(args: &Args, corpus: &Corpus) -> Result<SecretSource> {
    if let Some(word) = &args.word {
        let word: Word = word
            .parse()
            .with_context(|| format!("invalid word {:?}", word))?;
        if !corpus.is_valid_word(&word) {
            bail!("{} is not in the word list", word);
        }
        return Ok(SecretSource::Fixed(word));
    }
    Ok(match args.mode {
        GameMode::Daily => SecretSource::Daily,
        GameMode::Random => SecretSource::Random(match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or("TERMLE_LOG", "warn")).init();
    let args = Args::parse();

    let corpus = Corpus::load(args.wordlist.as_ref()).context("failed to load word list")?;
    let secrets = secret_source(&args, &corpus)?;
    let mut session = Session::new(&corpus, StatsStore::new(&args.stats), secrets);

    renderer::with_terminal(|r| session.run(r))?;
    println!("Thank you for playing!");
    Ok(())
}
