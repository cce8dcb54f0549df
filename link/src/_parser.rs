//! The `Link` header tokenizer: a three-state machine scanning the header left to right.
use crate::{ExtendedValue, LinkError, LinkRef};
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;

lazy_static! {
    static ref FOLD: Regex = Regex::new(r"\r?\n[ \t]+").unwrap();
    static ref COMPATIBLE_ENCODING: Regex =
        Regex::new(r"(?i)^(utf-?8|ascii|utf-?16-?le|ucs-?2|base-?64|latin-?1)$").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Uri,
    Attr,
}

pub(crate) fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ';' | ',' | '"')
}

/// Parse `value` and append the links it contains to `refs`.
pub(crate) fn parse_into(value: &str, refs: &mut Vec<LinkRef>) -> Result<(), LinkError> {
    let value = FOLD.replace_all(value.trim_matches(is_whitespace), "");
    let chars: Vec<char> = value.chars().collect();
    let length = chars.len();
    let mut state = State::Idle;
    let mut offset = 0;
    let mut current: Option<LinkRef> = None;

    while offset < length {
        let c = chars[offset];
        match state {
            State::Idle => {
                if is_whitespace(c) {
                    offset += 1;
                    continue;
                }
                if c != '<' {
                    return Err(LinkError::UnexpectedCharacter { found: c, offset });
                }
                if let Some(link) = current.take() {
                    refs.extend(link.expand_relations());
                }
                let end = find(&chars, '>', offset)
                    .ok_or(LinkError::UnterminatedUri { offset })?;
                current = Some(LinkRef::new(collect(&chars[offset + 1..end])));
                offset = end + 1;
                state = State::Uri;
            }
            State::Uri => {
                if is_whitespace(c) {
                    offset += 1;
                    continue;
                }
                state = match c {
                    ';' => State::Attr,
                    ',' => State::Idle,
                    _ => return Err(LinkError::UnexpectedCharacter { found: c, offset }),
                };
                offset += 1;
            }
            State::Attr => {
                if c == ';' || is_whitespace(c) {
                    offset += 1;
                    continue;
                }
                let end = find(&chars, '=', offset)
                    .ok_or(LinkError::MissingAttributeDelimiter { offset })?;
                let name = collect(&chars[offset..end])
                    .trim_matches(is_whitespace)
                    .to_lowercase();
                offset = skip_whitespace(&chars, end + 1);
                let mut attr_value = String::new();
                if chars.get(offset) == Some(&'"') {
                    offset += 1;
                    while offset < length {
                        match chars[offset] {
                            '"' => {
                                offset += 1;
                                break;
                            }
                            '\\' if offset + 1 < length => offset += 1,
                            _ => {}
                        }
                        attr_value.push(chars[offset]);
                        offset += 1;
                    }
                } else {
                    let mut end = offset + 1;
                    while end < length && !is_delimiter(chars[end]) {
                        end += 1;
                    }
                    let end = end.min(length);
                    attr_value = collect(&chars[offset.min(end)..end])
                        .trim_end_matches(is_whitespace)
                        .to_string();
                    offset = end;
                }
                if let Some(link) = current.as_mut() {
                    link.push_param(name, attr_value);
                }
                offset = skip_whitespace(&chars, offset);
                match chars.get(offset) {
                    Some(',') => state = State::Idle,
                    Some(';') => state = State::Attr,
                    _ => {}
                }
                offset += 1;
            }
        }
    }

    if let Some(link) = current {
        refs.extend(link.expand_relations());
    }
    Ok(())
}

/// Decode an extended parameter value of the form `charset'language'value`.
///
/// When the charset is one we can handle (or is missing), the value is percent-decoded;
/// otherwise the charset label is kept and the value is left as is.
pub(crate) fn parse_extended_value(value: &str) -> ExtendedValue {
    let parts: Vec<&str> = value.splitn(3, '\'').collect();
    let (charset, language, raw) = match parts[..] {
        [charset, language, raw] => (charset, language, raw),
        _ => ("", "", value),
    };
    let language = Some(language.to_lowercase()).filter(|l| !l.is_empty());
    if charset.is_empty() || COMPATIBLE_ENCODING.is_match(charset) {
        ExtendedValue {
            language,
            encoding: None,
            value: percent_decode_str(raw).decode_utf8_lossy().into_owned(),
        }
    } else {
        ExtendedValue {
            language,
            encoding: Some(charset.to_lowercase()),
            value: raw.to_string(),
        }
    }
}

fn find(chars: &[char], needle: char, from: usize) -> Option<usize> {
    chars[from..]
        .iter()
        .position(|c| *c == needle)
        .map(|i| i + from)
}

fn skip_whitespace(chars: &[char], mut offset: usize) -> usize {
    while offset < chars.len() && is_whitespace(chars[offset]) {
        offset += 1;
    }
    offset
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}
