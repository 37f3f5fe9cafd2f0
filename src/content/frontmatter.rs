//! Front-matter parsing

use indexmap::IndexMap;
use serde_yaml::Value;

/// Opening and closing fence of a front-matter block
const FENCE: &str = "---";

/// Key/value metadata from the head of a post
///
/// Keys keep the order they were written in. Values are kept as YAML so that
/// callers can read nested data, but the common accessors return strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    attributes: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Split a document into front-matter and markdown body
    ///
    /// Never fails: anything that is not a well-formed YAML block yields
    /// empty metadata and the whole document as the body.
    pub fn parse(content: &str) -> (Self, &str) {
        match Self::parse_yaml(content) {
            Some((fm, body)) => (fm, body),
            None => (FrontMatter::default(), content),
        }
    }

    fn parse_yaml(content: &str) -> Option<(Self, &str)> {
        let trimmed = content.trim_start();
        let rest = trimmed.strip_prefix(FENCE)?;

        // The opening fence must be a line of its own
        let rest = strip_line_break(rest.trim_start_matches([' ', '\t']))?;

        let (yaml_content, remaining) = split_at_closing_fence(rest)?;

        if yaml_content.trim().is_empty() {
            return Some((FrontMatter::default(), remaining));
        }

        if !has_yaml_structure(yaml_content) {
            // A leading thematic break, not metadata
            return None;
        }

        match serde_yaml::from_str::<IndexMap<String, Value>>(yaml_content) {
            Ok(attributes) => Some((FrontMatter { attributes }, remaining)),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                None
            }
        }
    }

    /// Whether no metadata was found
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Raw attribute mapping
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Look up an attribute rendered as a string
    ///
    /// Strings are returned verbatim, numbers and booleans via their display
    /// form. Null, sequences and mappings have no string form.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => match &tagged.value {
                Value::String(s) => Some(s.clone()),
                _ => None,
            },
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    pub fn title(&self) -> Option<String> {
        self.get("title")
    }

    pub fn date(&self) -> Option<String> {
        self.get("date")
    }

    pub fn description(&self) -> Option<String> {
        self.get("description")
    }
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

/// Find the closing fence line and return (block, body after the fence)
fn split_at_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }
    None
}

/// Valid front-matter has at least one `key: value` line
fn has_yaml_structure(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let before_colon = &trimmed[..colon_pos];
        // Keys are simple identifiers, and URL schemes are not keys
        let is_valid_key = !before_colon.is_empty()
            && before_colon
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(before_colon, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}
