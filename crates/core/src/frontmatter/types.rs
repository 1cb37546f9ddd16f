//! Frontmatter types and data structures.

use std::fmt;

/// A single frontmatter value.
///
/// Hugo headers only ever carry these shapes in practice; anything else is
/// dropped by the parser with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// Quoted string, stored unescaped.
    String(String),
    /// Bare `true` / `false`.
    Bool(bool),
    /// Bracketed list of strings, order preserved.
    List(Vec<String>),
    /// Bare date or datetime token, kept verbatim.
    Date(String),
    /// Bare integer or decimal, kept verbatim.
    Number(String),
}

impl FrontmatterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(s)
            | FrontmatterValue::Date(s)
            | FrontmatterValue::Number(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FrontmatterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontmatterValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::serializer::serialize_value(self))
    }
}

/// Parsed frontmatter: an insertion-ordered map with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    ///
    /// Replacing keeps the key's original position. Returns the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: FrontmatterValue,
    ) -> Option<FrontmatterValue> {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.fields.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontmatterValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FrontmatterValue> {
        let pos = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FrontmatterValue)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, FrontmatterValue)>>(iter: I) -> Self {
        let mut fm = Frontmatter::new();
        for (k, v) in iter {
            fm.insert(k, v);
        }
        fm
    }
}

/// Result of splitting frontmatter from a document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if a delimited header was found).
    pub frontmatter: Option<Frontmatter>,
    /// Everything after the closing delimiter.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut fm = Frontmatter::new();
        fm.insert("title", FrontmatterValue::String("a".into()));
        fm.insert("draft", FrontmatterValue::Bool(true));
        let prev = fm.insert("title", FrontmatterValue::String("b".into()));

        assert_eq!(prev, Some(FrontmatterValue::String("a".into())));
        assert_eq!(fm.len(), 2);
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["title", "draft"]);
        assert_eq!(fm.get_str("title"), Some("b"));
    }

    #[test]
    fn remove_field() {
        let mut fm: Frontmatter =
            [("a", FrontmatterValue::Bool(false)), ("b", FrontmatterValue::Bool(true))]
                .into_iter()
                .collect();
        assert_eq!(fm.remove("a"), Some(FrontmatterValue::Bool(false)));
        assert!(!fm.contains_key("a"));
        assert_eq!(fm.len(), 1);
    }
}
