//! Splitting of `name;key=value;key:=value` rule clauses.

/// One blacklist rule: a name followed by attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Clause {
    /// Parses a clause. Returns `None` for blank input.
    ///
    /// Values may be double-quoted so they can contain `;`. Directives
    /// (`key:=value`) are stored under `key`.
    pub fn parse(rule: &str) -> Option<Self> {
        let mut parts = split_unquoted(rule).into_iter();
        let name = parts.next()?.trim().to_string();
        if name.is_empty() {
            return None;
        }

        let attributes = parts
            .filter_map(|part| {
                let (key, value) = part.split_once('=')?;
                let key = key.trim().trim_end_matches(':').trim();
                if key.is_empty() {
                    return None;
                }
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                Some((key.to_string(), value.to_string()))
            })
            .collect();

        Some(Self { name, attributes })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn split_unquoted(rule: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (idx, c) in rule.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                parts.push(&rule[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&rule[start..]);
    parts
}
