//! Serialization of [`Link`] back to a header value.
use crate::_parser::is_whitespace;
use crate::{ExtendedValue, Link, LinkRef, ParamValue};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Characters escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.refs().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            link.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for LinkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.uri)?;
        for (name, value) in self.params() {
            match value {
                ParamValue::Text(txt) => write!(f, "; {}", format_param(name, txt))?,
                ParamValue::List(items) => {
                    for item in items {
                        write!(f, "; {}", format_param(name, item))?;
                    }
                }
                ParamValue::Extended(ext) => write!(f, "; {}", format_extended(name, ext))?,
            }
        }
        Ok(())
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || !value.chars().all(is_token_char) || value.contains(is_whitespace)
}

/// Parameters whose values are tokens, only quoted when necessary.
fn is_token_param(name: &str) -> bool {
    matches!(name, "rel" | "type" | "anchor")
}

fn format_param(name: &str, value: &str) -> String {
    if is_token_param(name) {
        let escaped = value.replace('"', "\\\"");
        if needs_quotes(value) {
            format!("{name}=\"{escaped}\"")
        } else {
            format!("{name}={escaped}")
        }
    } else if needs_quotes(value) {
        // space, comma and semicolon are allowed inside quotes
        let encoded = utf8_percent_encode(value, URI_COMPONENT)
            .to_string()
            .replace("%20", " ")
            .replace("%2C", ",")
            .replace("%3B", ";");
        format!("{name}=\"{encoded}\"")
    } else {
        format!("{name}={value}")
    }
}

fn format_extended(name: &str, ext: &ExtendedValue) -> String {
    let encoding = ext.encoding.as_deref().unwrap_or("utf-8").to_uppercase();
    let language = ext.language.as_deref().unwrap_or("en");
    let value = match ext.encoding {
        None => utf8_percent_encode(&ext.value, URI_COMPONENT).to_string(),
        Some(_) => ext.value.clone(),
    };
    format!("{name}={encoding}'{language}'{value}")
}
