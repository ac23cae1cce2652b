//! Evaluation of Python string literals as they appear in docstrings.

/// Value of a single string literal such as `"""Text."""` or `r'\d'`.
///
/// Returns `None` for byte strings and f/t-strings, which never become a
/// docstring.
pub fn decode_string_literal(text: &str) -> Option<String> {
    let quote_start = text.find(['"', '\''])?;
    let prefix = text[..quote_start].to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }
    let raw = prefix.contains('r');

    let literal = &text[quote_start..];
    let quote_len = if literal.starts_with("\"\"\"") || literal.starts_with("'''") {
        3
    } else {
        1
    };
    if literal.len() < quote_len * 2 {
        return None;
    }
    let body = literal[quote_len..literal.len() - quote_len].replace("\r\n", "\n");

    if raw {
        Some(body)
    } else {
        Some(unescape(&body))
    }
}

/// Joined value of implicitly concatenated literals, `"a" "b"`
pub fn decode_concatenated<'a>(parts: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut value = String::new();
    for part in parts {
        value.push_str(&decode_string_literal(part)?);
    }
    Some(value)
}

fn unescape(body: &str) -> String {
    let mut output = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }

        let Some(escaped) = chars.next() else {
            output.push('\\');
            break;
        };

        match escaped {
            '\n' => {}
            '\\' => output.push('\\'),
            '\'' => output.push('\''),
            '"' => output.push('"'),
            'a' => output.push('\u{07}'),
            'b' => output.push('\u{08}'),
            'f' => output.push('\u{0c}'),
            'n' => output.push('\n'),
            'r' => output.push('\r'),
            't' => output.push('\t'),
            'v' => output.push('\u{0b}'),
            '0'..='7' => {
                let mut digits = escaped.to_string();
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                push_code_point(&mut output, &digits, 8, escaped);
            }
            'x' => push_hex_escape(&mut output, &mut chars, 2, 'x'),
            'u' => push_hex_escape(&mut output, &mut chars, 4, 'u'),
            'U' => push_hex_escape(&mut output, &mut chars, 8, 'U'),
            'N' => push_named_escape(&mut output, &mut chars),
            other => {
                output.push('\\');
                output.push(other);
            }
        }
    }

    output
}

fn push_hex_escape(
    output: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
    marker: char,
) {
    let mut digits = String::new();
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }

    if digits.len() == width {
        push_code_point(output, &digits, 16, marker);
    } else {
        output.push('\\');
        output.push(marker);
        output.push_str(&digits);
    }
}

/// `\N{EM DASH}`; names match case-insensitively, unknown names stay as written
fn push_named_escape(
    output: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) {
    if chars.peek() != Some(&'{') {
        output.push_str("\\N");
        return;
    }
    chars.next();

    let mut name = String::new();
    let mut closed = false;
    for c in chars.by_ref() {
        if c == '}' {
            closed = true;
            break;
        }
        name.push(c);
    }

    let resolved = if closed {
        unicode_names2::character(&name.to_ascii_uppercase())
    } else {
        None
    };
    match resolved {
        Some(c) => output.push(c),
        None => {
            output.push_str("\\N{");
            output.push_str(&name);
            if closed {
                output.push('}');
            }
        }
    }
}

fn push_code_point(output: &mut String, digits: &str, radix: u32, marker: char) {
    match u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
    {
        Some(c) => output.push(c),
        None => {
            output.push('\\');
            if radix == 16 {
                output.push(marker);
            }
            output.push_str(digits);
        }
    }
}
