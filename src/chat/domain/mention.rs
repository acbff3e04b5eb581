//! Detection of messages addressed to the bot.

/// Returns the command text of a message addressed to `bot_name`.
///
/// A message is addressed when, after leading whitespace, it starts with the
/// bot name (case-insensitive, optionally prefixed by `@`) followed by `:`,
/// `,`, whitespace, or the end of the text. Returns `None` for messages not
/// addressed to the bot and for addressed messages with no command text.
#[must_use]
pub fn addressed_text<'a>(bot_name: &str, text: &'a str) -> Option<&'a str> {
    let trimmed = text.trim_start();
    let unprefixed = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let name_len = bot_name.len();
    let candidate = unprefixed.get(..name_len)?;
    if bot_name.is_empty() || !candidate.eq_ignore_ascii_case(bot_name) {
        return None;
    }

    let after_name = unprefixed.get(name_len..)?;
    let remainder = match after_name.chars().next() {
        None => return None,
        Some(':' | ',') => after_name.get(1..)?,
        Some(separator) if separator.is_whitespace() => after_name,
        Some(_) => return None,
    };

    let command = remainder.trim();
    (!command.is_empty()).then_some(command)
}
