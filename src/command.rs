/// One line of player input, sorted into either a game command or a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    Skip,
    ToggleHard,
    ShowStats,
    Exit,
    Debug,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let token = line.trim();
        match token.to_ascii_lowercase().as_str() {
            "skip" => Command::Skip,
            "hard" => Command::ToggleHard,
            "stat" => Command::ShowStats,
            "exit" => Command::Exit,
            "dbug" => Command::Debug,
            _ => Command::Guess(token.to_string()),
        }
    }
}
