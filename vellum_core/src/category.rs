// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category tokens and selection matching.
//!
//! Content items are tagged with a comma-separated list of category tokens
//! in the page markup (`data-category="frontend,backend"`). [`CategorySet`]
//! parses that attribute into a token set; [`Selection`] is the state of the
//! category selector, either the `"all"` sentinel or a single token.
//!
//! Matching is exact string comparison. Tokens are not trimmed or
//! case-folded; the markup contract requires well-formed attributes.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// The sentinel selector value that matches every item.
pub const ALL: &str = "all";

/// A category selection made through the selector bar.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    /// The `"all"` sentinel: every item matches.
    All,
    /// A single category token; an item matches iff the token is a member of
    /// its category set.
    Token(String),
}

impl Selection {
    /// Parses a selector attribute value. The literal string `"all"` becomes
    /// [`Selection::All`]; anything else is a token.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Token(raw.to_string())
        }
    }

    /// Returns `true` for the `"all"` sentinel.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// An item's set of category tokens, parsed from a comma-separated attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorySet {
    tokens: Vec<String>,
}

impl CategorySet {
    /// Parses a comma-separated token list.
    ///
    /// Empty segments are dropped, so the empty string parses to the empty
    /// set. An item with an empty set never matches a token selection and is
    /// shown only under [`Selection::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            tokens: raw
                .split(',')
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Returns `true` if the set contains no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns `true` if `token` is a member of the set.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Returns `true` if the item tagged with this set should be visible
    /// under the given selection.
    #[must_use]
    pub fn matches(&self, selection: &Selection) -> bool {
        match selection {
            Selection::All => true,
            Selection::Token(token) => self.contains(token),
        }
    }

    /// Returns the tokens in attribute order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_comma() {
        let set = CategorySet::parse("frontend,backend");
        assert!(set.contains("frontend"));
        assert!(set.contains("backend"));
        assert!(!set.contains("tooling"));
    }

    #[test]
    fn empty_attribute_is_empty_set() {
        let set = CategorySet::parse("");
        assert!(set.is_empty());
        assert!(!set.matches(&Selection::parse("frontend")));
        assert!(set.matches(&Selection::All));
    }

    #[test]
    fn empty_segments_are_dropped() {
        let set = CategorySet::parse("frontend,,backend");
        assert_eq!(set.tokens().len(), 2);
        assert!(!set.contains(""));
    }

    #[test]
    fn tokens_are_not_trimmed() {
        // The markup contract requires well-formed attributes; a stray space
        // produces a distinct token.
        let set = CategorySet::parse("frontend, backend");
        assert!(!set.contains("backend"));
        assert!(set.contains(" backend"));
    }

    #[test]
    fn all_sentinel_parses_to_all() {
        assert!(Selection::parse("all").is_all());
        assert_eq!(
            Selection::parse("backend"),
            Selection::Token("backend".to_string())
        );
    }

    #[test]
    fn match_truth_table() {
        let both = CategorySet::parse("frontend,backend");
        let back = CategorySet::parse("backend");
        let backend = Selection::parse("backend");
        let frontend = Selection::parse("frontend");

        assert!(both.matches(&backend));
        assert!(back.matches(&backend));
        assert!(both.matches(&frontend));
        assert!(!back.matches(&frontend));
        assert!(both.matches(&Selection::All));
        assert!(back.matches(&Selection::All));
    }

    #[test]
    fn unmatched_token_matches_nothing() {
        let set = CategorySet::parse("frontend");
        assert!(!set.matches(&Selection::parse("no-such-category")));
    }
}
