//! Slash commands.

/// A message starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Unknown(String),
}

impl Command {
    /// Parse a command, or `None` for free text.
    ///
    /// A `@botname` suffix on the command word is ignored, and so is
    /// anything after the first word.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim_start().strip_prefix('/')?.split_whitespace().next()?;
        let name = word.split('@').next().unwrap_or(word).to_lowercase();
        Some(match name.as_str() {
            "start" => Command::Start,
            "help" | "ayuda" => Command::Help,
            _ => Command::Unknown(name),
        })
    }
}
