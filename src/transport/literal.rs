//! Rewrites a Python `repr()` of a flat dict into JSON.
//!
//! Handles single- and double-quoted strings, `None`, `True`, `False` and
//! numbers; anything else is copied through and left for the JSON parser to
//! reject.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unterminated string literal starting at byte {start}")]
pub struct LiteralError {
    pub start: usize,
}

pub fn python_literal_to_json(input: &str) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        match ch {
            '\'' | '"' => {
                let quote = ch;
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some((_, escaped)) => push_escape(&mut value, escaped),
                            None => break,
                        },
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        c => value.push(c),
                    }
                }
                if !closed {
                    return Err(LiteralError { start });
                }
                out.push_str(&serde_json::Value::String(value).to_string());
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(match word.as_str() {
                    "None" => "null",
                    "True" => "true",
                    "False" => "false",
                    other => other,
                });
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

fn push_escape(value: &mut String, escaped: char) {
    match escaped {
        'n' => value.push('\n'),
        't' => value.push('\t'),
        'r' => value.push('\r'),
        '0' => value.push('\0'),
        other => value.push(other),
    }
}
