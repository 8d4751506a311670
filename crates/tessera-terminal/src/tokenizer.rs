//! Tokenizer: splits a command line on whitespace, honoring double quotes
//! and backslash escapes.

/// Tokenize a command line.
///
/// - `"..."` groups characters (whitespace included) into one token; the
///   quotes themselves are dropped. A closed pair always produces a token,
///   even an empty one.
/// - `\` makes the next character literal, including `"`, `\`, and
///   whitespace. The backslash itself is dropped.
/// - An unterminated quote never fails: everything after it becomes part
///   of the trailing token.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if !escaped && ch == '"' {
            if in_string {
                tokens.push(std::mem::take(&mut current));
            }
            in_string = !in_string;
            continue;
        }

        if !escaped && ch == '\\' {
            escaped = true;
            continue;
        }

        if !in_string && !escaped && ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
        escaped = false;
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// The text after the first token, exactly as typed.
///
/// Follows the same quoting and escaping rules as [`tokenize`], so a quoted
/// or escaped command name is skipped whole.
pub fn after_first_token(text: &str) -> &str {
    let text = text.trim_start();
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' if in_string => return &text[i + 1..],
            '"' => in_string = true,
            c if c.is_whitespace() && !in_string => return &text[i..],
            _ => {},
        }
    }

    ""
}
