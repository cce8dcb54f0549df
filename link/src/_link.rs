// this module is transparently re-exported by its parent `lib`
use crate::LinkError;
use std::str::FromStr;

/// The value of a link parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A parameter that occurred once.
    Text(String),
    /// A repeatable parameter that occurred several times.
    List(Vec<String>),
    /// An extended parameter (name ending with `*`), see RFC 8187.
    Extended(ExtendedValue),
}

impl ParamValue {
    /// Whether this value is, or contains, `value`.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            ParamValue::Text(txt) => txt == value,
            ParamValue::List(items) => items.iter().any(|i| i == value),
            ParamValue::Extended(ext) => ext.value == value,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// The decoded value of an extended parameter,
/// written `charset'language'value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedValue {
    /// Lower-cased language tag, if any.
    pub language: Option<String>,
    /// Lower-cased charset label, kept only when it is not one we can decode;
    /// in that case `value` is left undecoded.
    pub encoding: Option<String>,
    /// The (decoded when possible) value.
    pub value: String,
}

/// One link: a target URI and its parameters, in order of appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkRef {
    /// The target URI, as written between `<` and `>`.
    pub uri: String,
    params: Vec<(String, ParamValue)>,
}

impl LinkRef {
    /// A link to `uri` without parameters.
    pub fn new(uri: impl Into<String>) -> Self {
        LinkRef {
            uri: uri.into(),
            params: vec![],
        }
    }

    /// Set parameter `name` (lower-cased) to `value`, replacing any previous value.
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        let name = name.to_lowercase();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// The relation type of this link, if any.
    pub fn rel(&self) -> Option<&str> {
        self.text("rel")
    }

    /// The value of parameter `name`.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// The value of parameter `name`, if it occurred once and is not extended.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.param(name) {
            Some(ParamValue::Text(txt)) => Some(txt),
            _ => None,
        }
    }

    /// All parameters of this link, in order of appearance.
    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamValue)> + '_ {
        self.params.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Record a parsed parameter.
    ///
    /// Single-occurrence parameters keep their first value,
    /// extended parameters are decoded,
    /// `type` values are lower-cased,
    /// and other repeated parameters accumulate.
    pub(crate) fn push_param(&mut self, name: String, value: String) {
        let existing = self.params.iter().position(|(n, _)| *n == name);
        if existing.is_some() && is_single_occurrence(&name) {
            return;
        }
        let value = if name.ends_with('*') {
            ParamValue::Extended(crate::_parser::parse_extended_value(&value))
        } else if name == "type" {
            ParamValue::Text(value.to_lowercase())
        } else {
            ParamValue::Text(value)
        };
        match (existing, value) {
            (None, value) => self.params.push((name, value)),
            (Some(i), ParamValue::Text(value)) => {
                let slot = &mut self.params[i].1;
                let previous = std::mem::replace(slot, ParamValue::List(vec![]));
                *slot = match previous {
                    ParamValue::List(mut items) => {
                        items.push(value);
                        ParamValue::List(items)
                    }
                    ParamValue::Text(first) => ParamValue::List(vec![first, value]),
                    ParamValue::Extended(_) => ParamValue::Text(value),
                };
            }
            (Some(i), value) => self.params[i].1 = value,
        }
    }

    /// One copy of this link per space-separated relation type in its `rel`.
    pub(crate) fn expand_relations(self) -> Vec<LinkRef> {
        let Some(rel) = self.rel().map(str::to_string) else {
            return vec![self];
        };
        let rels: Vec<&str> = rel.split_whitespace().collect();
        if rels.len() <= 1 {
            return vec![self];
        }
        rels.into_iter()
            .map(|r| self.clone().with_param("rel", r))
            .collect()
    }
}

/// Parameters that keep their first value when repeated.
pub(crate) fn is_single_occurrence(name: &str) -> bool {
    matches!(name, "rel" | "type" | "media" | "title" | "title*")
}

/// A parsed `Link` header: a list of [`LinkRef`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Link {
    refs: Vec<LinkRef>,
}

impl Link {
    /// An empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the value of a `Link` header.
    pub fn parse(value: &str) -> Result<Self, LinkError> {
        let mut link = Link::new();
        crate::_parser::parse_into(value, &mut link.refs)?;
        Ok(link)
    }

    /// All links, in order.
    pub fn refs(&self) -> &[LinkRef] {
        &self.refs
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether there is no link.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Links whose relation type is `value`, compared case-insensitively.
    pub fn rel(&self, value: &str) -> Vec<&LinkRef> {
        self.refs
            .iter()
            .filter(|r| r.rel().is_some_and(|rel| rel.eq_ignore_ascii_case(value)))
            .collect()
    }

    /// Links where parameter `attr` (or `uri`) has value `value`.
    pub fn get(&self, attr: &str, value: &str) -> Vec<&LinkRef> {
        let attr = attr.to_lowercase();
        self.refs
            .iter()
            .filter(|r| ref_has(r, &attr, value))
            .collect()
    }

    /// Whether some link has parameter `attr` (or `uri`) set to `value`.
    pub fn has(&self, attr: &str, value: &str) -> bool {
        let attr = attr.to_lowercase();
        self.refs.iter().any(|r| ref_has(r, &attr, value))
    }

    /// Append a link.
    pub fn set(&mut self, link: LinkRef) -> &mut Self {
        self.refs.push(link);
        self
    }
}

fn ref_has(r: &LinkRef, attr: &str, value: &str) -> bool {
    if attr == "uri" {
        r.uri == value
    } else {
        r.param(attr).is_some_and(|v| v.contains(value))
    }
}

impl FromStr for Link {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Link::parse(s)
    }
}

impl<'a> IntoIterator for &'a Link {
    type Item = &'a LinkRef;
    type IntoIter = std::slice::Iter<'a, LinkRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}
