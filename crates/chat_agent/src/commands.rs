#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Session,
    Health,
    /// `/suggest` lists suggested queries; `/suggest N` loads query N (1-based).
    Suggest(Option<usize>),
    Quit,
}

/// Recognises the known command names only. Any other text, including text
/// that merely starts with `/`, is a message to send.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut words = trimmed.split_whitespace();
    let command = words.next().unwrap_or(trimmed);

    let parsed = match command {
        "/help" => SlashCommand::Help,
        "/session" => SlashCommand::Session,
        "/health" => SlashCommand::Health,
        "/suggest" => SlashCommand::Suggest(words.next().and_then(|arg| arg.parse().ok())),
        "/quit" | "/exit" => SlashCommand::Quit,
        _ => return None,
    };

    Some(parsed)
}

/// Command names offered for completion.
pub const COMMAND_NAMES: [&str; 5] = ["/help", "/session", "/health", "/suggest", "/quit"];
