const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PREFIXES: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens free text (transcripts, prompts) and masks credential-like
/// values before it reaches the logs.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let cut = trimmed
            .char_indices()
            .nth(MAX_VISIBLE_CHARS)
            .map(|(idx, _)| idx)
            .unwrap_or(trimmed.len());
        format!("{}... ({} chars total)", &trimmed[..cut], total_chars)
    } else {
        trimmed.to_string()
    };

    SENSITIVE_PREFIXES
        .iter()
        .fold(visible, |text, prefix| redact_after(&text, prefix))
}

/// Replaces the value following every occurrence of `prefix`.
fn redact_after(text: &str, prefix: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(prefix) {
        let value_start = idx + prefix.len();
        result.push_str(&rest[..value_start]);
        result.push_str("[REDACTED]");

        let value_len = rest[value_start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
            .unwrap_or(rest.len() - value_start);
        rest = &rest[value_start + value_len..];
    }

    result.push_str(rest);
    result
}
