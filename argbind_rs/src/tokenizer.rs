//! Tokenizer for raw command line arguments.
//!
//! Turns the raw argument strings into a [`ParsedEntries`] set: a
//! case-normalized named view plus an ordered positional queue. No schema
//! validation happens here; unknown names are legal at this stage.
//!
//! A token starting with `-` or `/` is named and split at the first `=` or
//! `:`. Any other token is positional *and* also reachable through the
//! named view under its own text, which is what lets sub-commands resolve
//! by name (`app execute -path=...`).

use std::collections::HashMap;

use serde::Serialize;

/// One parsed argument token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEntry {
    /// Name as the user typed it (the whole token text for positionals).
    pub name: String,
    /// The value part, if a `=`/`:` delimiter was present. `Some("")` for
    /// `-name=`; `None` for a bare `-name`.
    pub value: Option<String>,
    /// 0-based index among positional tokens; `None` for marked tokens.
    pub position: Option<usize>,
}

impl ParsedEntry {
    pub fn is_positional(&self) -> bool {
        self.position.is_some()
    }
}

/// The mutable entry set owned by one binding call.
///
/// The binder removes entries as it matches them, so whatever remains
/// afterwards is observable as leftover (unmapped) input.
#[derive(Debug)]
pub struct ParsedEntries {
    case_sensitive: bool,
    named: HashMap<String, ParsedEntry>,
    positional: Vec<Option<ParsedEntry>>,
}

/// Parses raw arguments into an entry set.
///
/// Names are folded to lower-case unless `case_sensitive` is set, in which
/// case the literal spelling is the lookup key. Tokens are trimmed first;
/// whitespace-only tokens are ignored. Quoted values are preserved
/// verbatim: quote trimming is a binder concern driven by schema metadata.
pub fn tokenize<S: AsRef<str>>(args: &[S], case_sensitive: bool) -> ParsedEntries {
    let mut entries = ParsedEntries::new(case_sensitive);
    for raw in args {
        let token = raw.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        if let Some(rest) = token.strip_prefix(['-', '/']) {
            let (name, value) = match rest.find(['=', ':']) {
                Some(at) => (&rest[..at], Some(rest[at + 1..].to_string())),
                None => (rest, None),
            };
            if name.is_empty() {
                continue;
            }
            entries.insert_named(name, value);
        } else {
            entries.insert_positional(token);
        }
    }
    entries
}

impl ParsedEntries {
    fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            named: HashMap::new(),
            positional: Vec::new(),
        }
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn fold(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    fn insert_named(&mut self, name: &str, value: Option<String>) {
        let entry = ParsedEntry {
            name: name.to_string(),
            value,
            position: None,
        };
        // Last occurrence wins when the same name is supplied twice.
        self.named.insert(self.fold(name), entry);
    }

    fn insert_positional(&mut self, token: &str) {
        let entry = ParsedEntry {
            name: token.to_string(),
            value: None,
            position: Some(self.positional.len()),
        };
        self.named.insert(self.fold(token), entry.clone());
        self.positional.push(Some(entry));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(&self.fold(name))
    }

    /// Removes and returns the entry matching `name`. If the entry was a
    /// positional token, its queue slot is cleared as well.
    pub fn take(&mut self, name: &str) -> Option<ParsedEntry> {
        let entry = self.named.remove(&self.fold(name))?;
        if let Some(position) = entry.position {
            if let Some(slot) = self.positional.get_mut(position) {
                *slot = None;
            }
        }
        Some(entry)
    }

    /// Like [`take`](Self::take), but only matches marked entries. Bare
    /// positional tokens whose text happens to equal `name` stay put.
    pub fn take_marked(&mut self, name: &str) -> Option<ParsedEntry> {
        let key = self.fold(name);
        if self.named.get(&key)?.position.is_some() {
            return None;
        }
        self.named.remove(&key)
    }

    /// Removes and returns the positional entry at `position`, clearing its
    /// named view too (unless that key now refers to a later duplicate).
    pub fn take_position(&mut self, position: usize) -> Option<ParsedEntry> {
        let entry = self.positional.get_mut(position)?.take()?;
        let key = self.fold(&entry.name);
        if self
            .named
            .get(&key)
            .is_some_and(|named| named.position == Some(position))
        {
            self.named.remove(&key);
        }
        Some(entry)
    }

    /// Entries that matched no schema member, in positional-then-name
    /// order so output is stable.
    pub fn leftovers(&self) -> Vec<ParsedEntry> {
        let mut left: Vec<ParsedEntry> = self.named.values().cloned().collect();
        for slot in self.positional.iter().flatten() {
            // A positional slot shadowed in the named view by a later
            // duplicate token is still leftover input.
            let shadowed = self
                .named
                .get(&self.fold(&slot.name))
                .is_none_or(|named| named.position != slot.position);
            if shadowed {
                left.push(slot.clone());
            }
        }
        left.sort_by(|a, b| (a.position, &a.name).cmp(&(b.position, &b.name)));
        left
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.iter().all(Option::is_none)
    }
}
