use crate::{
    command::Command,
    game::{GameState, MAX_ATTEMPTS},
    rendering::{render_cells, render_keyboard, render_line, verdict_style},
    stats::Stats,
};
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{ContentStyle, Print, PrintStyledContent, ResetColor, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};

const RULE: &str = "_________________";

pub(crate) trait Renderer {
    /// Blocks for the next line of input; `None` once input is exhausted.
    fn next_command(&mut self) -> io::Result<Option<Command>>;
    fn render(&mut self, state: &GameState) -> io::Result<()>;
    fn message(&mut self, text: &str) -> io::Result<()>;
    fn show_stats(&mut self, stats: &Stats) -> io::Result<()>;
    fn show_debug(
        &mut self,
        state: &GameState,
        stats: &Stats,
        corpus_len: usize,
    ) -> io::Result<()>;
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

pub(crate) fn with_terminal<F>(func: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut dyn Renderer) -> anyhow::Result<()>,
{
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut r = TerminalRenderer::new(stdin.lock(), stdout.lock());
    let result = func(&mut r);
    r.destroy()?;
    result
}

/// Line based renderer: clears the screen for every board and prints plain
/// coloured text.
pub(crate) struct TerminalRenderer<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> TerminalRenderer<R, W> {
    pub(crate) fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn rule(&mut self) -> io::Result<()> {
        render_line(&mut self.out, RULE, ContentStyle::new().cyan())
    }

    fn destroy(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor)
    }

    fn render_guesses(&mut self, state: &GameState) -> io::Result<()> {
        for guess in state.guesses() {
            render_cells(
                &mut self.out,
                &guess.word.to_string(),
                guess.verdicts.iter().map(|v| verdict_style(*v)),
            )?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Renderer for TerminalRenderer<R, W> {
    fn next_command(&mut self) -> io::Result<Option<Command>> {
        Ok(self.read_line()?.map(|line| Command::parse(&line)))
    }

    fn render(&mut self, state: &GameState) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        self.rule()?;
        render_keyboard(&mut self.out, state.letters())?;
        self.rule()?;
        queue!(
            self.out,
            PrintStyledContent("Attempts: ".cyan()),
            PrintStyledContent(ContentStyle::new().magenta().apply(state.attempts_remaining())),
        )?;
        if state.hard_mode() {
            queue!(self.out, PrintStyledContent("  (hard mode)".magenta()))?;
        }
        queue!(self.out, Print("\n"))?;
        self.render_guesses(state)?;
        self.rule()?;
        self.out.flush()
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        render_line(&mut self.out, text, ContentStyle::new().cyan())
    }

    fn show_stats(&mut self, stats: &Stats) -> io::Result<()> {
        let lines = [
            format!("Played: {}", stats.played),
            format!("Wins: {:.2}%", stats.win_percentage()),
            format!("Streak: {}", stats.current_streak),
            format!("Max streak: {}", stats.max_streak),
            "Guess Distribution:".to_string(),
        ];
        for line in &lines {
            self.message(line)?;
        }
        for attempts in 1..=MAX_ATTEMPTS {
            let count = stats.wins_in(attempts);
            let bar = "#".repeat(count.min(40) as usize);
            self.message(&format!("{}: {} {}", attempts, bar, count))?;
        }
        self.rule()
    }

    fn show_debug(
        &mut self,
        state: &GameState,
        stats: &Stats,
        corpus_len: usize,
    ) -> io::Result<()> {
        let style = ContentStyle::new().magenta();
        render_line(&mut self.out, "---DEBUG PRINT---", style)?;
        self.message(&format!("attempts remaining: {}", state.attempts_remaining()))?;
        self.message(&format!("hard mode: {}", state.hard_mode()))?;
        self.message(&format!("answer: {}", state.secret()))?;
        self.message("letters:")?;
        for (c, v) in state.letters().iter() {
            self.message(&format!("  {}: {:?}", c, v))?;
        }
        self.message("guesses:")?;
        self.render_guesses(state)?;
        self.message(&format!("stats record: {}", stats))?;
        self.message(&format!("word list: {} words", corpus_len))?;
        render_line(&mut self.out, "---END DEBUG PRINT---", style)
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.message(prompt)?;
        Ok(match self.read_line()? {
            Some(answer) => !answer
                .trim_start()
                .starts_with(|c: char| c.eq_ignore_ascii_case(&'n')),
            None => false,
        })
    }
}
