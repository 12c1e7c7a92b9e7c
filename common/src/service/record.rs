use std::collections::BTreeSet;
use std::fmt;

use super::protocol;

/// Identifies one merged entry: a port number paired with a protocol token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    pub port: u16,
    pub protocol: String,
}

impl ServiceKey {
    pub fn new(port: u16, protocol: impl Into<String>) -> Self {
        Self {
            port,
            protocol: protocol.into(),
        }
    }

    /// Output ordering: port first, then the protocol's registered number.
    ///
    /// The literal protocol is the last component so that a protocol literally
    /// named like a rank (e.g. `006`) still orders deterministically.
    pub fn sort_key(&self) -> (u16, &str, &str) {
        (self.port, protocol::rank(&self.protocol), &self.protocol)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// One `services(5)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: String,
    pub key: ServiceKey,
    aliases: BTreeSet<String>,
    pub comment: Option<String>,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, port: u16, protocol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: ServiceKey::new(port, protocol),
            aliases: BTreeSet::new(),
            comment: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the comment; blank text counts as no comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment: String = comment.into();
        let trimmed: &str = comment.trim();
        self.comment = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn port(&self) -> u16 {
        self.key.port
    }

    pub fn protocol(&self) -> &str {
        &self.key.protocol
    }

    /// Aliases in lexical order, never including the record's own name.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(String::as_str)
            .filter(move |alias| *alias != self.name)
    }

    /// Folds an earlier record for the same key into this one.
    ///
    /// `self` keeps its name. The earlier name and all earlier aliases become
    /// aliases of `self`, and the earlier comment is kept when `self` has none.
    pub fn supersede(&mut self, older: ServiceRecord) {
        debug_assert_eq!(self.key, older.key);

        self.aliases.insert(older.name);
        self.aliases.extend(older.aliases);

        if self.comment.is_none() {
            self.comment = older.comment;
        }
    }
}
