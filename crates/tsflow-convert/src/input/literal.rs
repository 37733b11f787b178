//! Decoding of literal token text.

/// Numeric value of a TypeScript numeric literal, as written (no sign).
///
/// Accepts decimal, exponent, hex (`0x`), octal (`0o`, legacy `0777`) and
/// binary (`0b`) forms, with `_` separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    if let Some(digits) = lower.strip_prefix("0x") {
        return parse_radix(digits, 16);
    }
    if let Some(digits) = lower.strip_prefix("0o") {
        return parse_radix(digits, 8);
    }
    if let Some(digits) = lower.strip_prefix("0b") {
        return parse_radix(digits, 2);
    }
    if lower.len() > 1 && lower.starts_with('0') && lower.bytes().all(|b| (b'0'..=b'7').contains(&b))
    {
        return parse_radix(&lower[1..], 8);
    }

    lower.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Cooked value of a quoted string literal (quotes included in `raw`).
pub fn decode_string(raw: &str) -> Option<String> {
    let quote = raw.chars().next()?;
    if !(quote == '"' || quote == '\'') || raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    // Pending high surrogate from a `\uD8xx` escape.
    let mut high: Option<u32> = None;

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_surrogate(&mut out, &mut high);
            out.push(c);
            continue;
        }
        let escaped = chars.next()?;
        let unit = match escaped {
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok()?
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 {
                        return None;
                    }
                    u32::from_str_radix(&hex, 16).ok()?
                };
                Some(code)
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                if hex.len() != 2 {
                    return None;
                }
                Some(u32::from_str_radix(&hex, 16).ok()?)
            }
            _ => None,
        };

        match unit {
            Some(code @ 0xD800..=0xDBFF) => {
                flush_surrogate(&mut out, &mut high);
                high = Some(code);
            }
            Some(code @ 0xDC00..=0xDFFF) => match high.take() {
                Some(hi) => {
                    let combined = 0x10000 + ((hi - 0xD800) << 10) + (code - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => out.push(char::REPLACEMENT_CHARACTER),
            },
            Some(code) => {
                flush_surrogate(&mut out, &mut high);
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            None => {
                flush_surrogate(&mut out, &mut high);
                match escaped {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    'v' => out.push('\u{b}'),
                    '0' if !chars.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
                    // Line continuations contribute nothing.
                    '\n' | '\u{2028}' | '\u{2029}' => {}
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                    }
                    other => out.push(other),
                }
            }
        }
    }
    flush_surrogate(&mut out, &mut high);

    Some(out)
}

fn flush_surrogate(out: &mut String, high: &mut Option<u32>) {
    if high.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("5"), Some(5.0));
        assert_eq!(parse_number("1_000"), Some(1000.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("017"), Some(15.0));
        assert_eq!(parse_number("1.5e3"), Some(1500.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("0"), Some(0.0));
        assert_eq!(parse_number("0x"), None);
    }

    #[test]
    fn test_decode_plain_strings() {
        assert_eq!(decode_string("\"ok\"").as_deref(), Some("ok"));
        assert_eq!(decode_string("'single'").as_deref(), Some("single"));
        assert_eq!(decode_string("''").as_deref(), Some(""));
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_string(r#""a\nb""#).as_deref(), Some("a\nb"));
        assert_eq!(decode_string(r#""\"q\"""#).as_deref(), Some("\"q\""));
        assert_eq!(decode_string(r#"'\x41B\u{43}'"#).as_deref(), Some("ABC"));
        assert_eq!(decode_string(r#""\uD83D\uDE00""#).as_deref(), Some("\u{1F600}"));
        assert_eq!(decode_string("\"a\\\nb\"").as_deref(), Some("ab"));
    }

    #[test]
    fn test_decode_rejects_unquoted() {
        assert_eq!(decode_string("ok"), None);
        assert_eq!(decode_string("\"unterminated"), None);
    }
}
