//! Locating the JSON object inside model output text.
//!
//! Models asked for JSON sometimes wrap it in a markdown fence or add a
//! sentence around it. These helpers find the object so it can be parsed.

/// Find the JSON object embedded in `text`.
///
/// Tries a ` ```json ` fence, then a bare ` ``` ` fence whose body starts with
/// `{`, then the first balanced `{...}` span that parses as JSON.
pub fn find_json_object(text: &str) -> Option<&str> {
    let trimmed = text.trim();

    if let Some(body) = fenced_body(trimmed, "```json") {
        return Some(body);
    }

    if let Some(body) = fenced_body(trimmed, "```")
        && body.starts_with('{')
    {
        return Some(body);
    }

    trimmed.match_indices('{').find_map(|(start, _)| {
        let span = balanced_object(&trimmed[start..])?;
        serde_json::from_str::<serde_json::Value>(span)
            .is_ok()
            .then_some(span)
    })
}

/// Body between an opening fence marker and the next closing fence.
fn fenced_body<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let start = text.find(opener)? + opener.len();
    let len = text[start..].find("```")?;
    Some(text[start..start + len].trim())
}

/// Prefix of `text` (which starts at `{`) up to its matching `}`.
///
/// Braces inside JSON string literals, including escaped quotes, are ignored.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}
