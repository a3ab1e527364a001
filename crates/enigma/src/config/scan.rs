//! Token scanner shared by the configuration and setup-line parsers.

/// Splits text into whitespace-separated tokens and parenthesised groups.
///
/// A group runs from `(` to the next `)` and may contain whitespace; an
/// unterminated group runs to the end of the text so that the cycle parser
/// can report it.
pub(crate) struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// True if the next non-blank character opens a group.
    pub(crate) fn at_group(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.starts_with('(')
    }

    pub(crate) fn is_empty(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty()
    }

    /// The next whitespace-delimited token, unless the text is exhausted or
    /// the next token opens a group.
    pub(crate) fn word(&mut self) -> Option<&'a str> {
        if self.is_empty() || self.at_group() {
            return None;
        }
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }

    /// The next parenthesised group, including its parentheses.
    pub(crate) fn group(&mut self) -> Option<&'a str> {
        if !self.at_group() {
            return None;
        }
        let end = self.rest.find(')').map_or(self.rest.len(), |i| i + 1);
        let (group, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(group)
    }

    /// Every consecutive group, joined with single spaces.
    pub(crate) fn groups(&mut self) -> String {
        let mut groups = Vec::new();
        while let Some(group) = self.group() {
            groups.push(group);
        }
        groups.join(" ")
    }

    /// Everything not yet consumed, trimmed.
    pub(crate) fn remainder(&mut self) -> &'a str {
        let rest = self.rest.trim();
        self.rest = "";
        rest
    }
}
