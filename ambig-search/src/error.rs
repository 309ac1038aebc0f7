//! The search's error taxonomy. Derivations pruned by illegal semantics
//! are not errors; everything here either fails one path fatally or fails
//! the whole run.

use thiserror::Error;

/// A derivation pruned by an illegal semantic operation. The enumeration
/// drops the derivation and continues.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Discarded;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The conjugator exhausted every governing property without finding a
    /// matching inflection.
    #[error("no inflection of {text} matches {context}")]
    Conjugation { text: String, context: String },

    /// Completing a finished derivation hit an illegal semantic merge.
    /// Such a derivation should have been pruned during enumeration.
    #[error("illegal semantic merge while completing the finished derivation `{terminals}`")]
    ForcedMergeIllegal { terminals: String },

    /// A symbol marked ambiguous reported no ambiguity.
    #[error("expected an ambiguity for `{symbol}`, found none")]
    MissingAmbiguity { symbol: String },

    /// A symbol marked unambiguous reported ambiguities.
    #[error("expected no ambiguity for `{symbol}`, found {count}")]
    UnexpectedAmbiguity { symbol: String, count: usize },

    /// A marked test symbol cannot be searched for ambiguity.
    #[error("test symbol `{symbol}` has {count} rules, needs at least 2")]
    IllFormedTestSymbol { symbol: String, count: usize },
}
