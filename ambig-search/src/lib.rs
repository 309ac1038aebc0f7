//! The ambiguity search: bounded depth-first enumeration of the
//! derivations below every nonterminal, and detection of derivation pairs
//! that yield the same observable output, i.e. the same rightmost symbols
//! together with equal semantics and/or equal surface text.

pub mod compare;
pub mod conjugate;
pub mod continuation;
pub mod driver;
pub mod error;
pub mod expand;
pub mod path;
pub mod person_number;
pub mod semantic_list;
pub mod tree;

pub use crate::compare::{AmbiguousPath, Ambiguity, FlatItem};
pub use crate::driver::{search, Driver, RootOutcome, SearchOutcome};
pub use crate::error::{Discarded, SearchError};
pub use crate::expand::{expand_root, PathStore};
pub use crate::path::Path;
pub use crate::semantic_list::ForcedSemantic;
pub use crate::tree::{NodeLabel, TreeNode};

/// The default cap on symbols consumed per derivation.
pub const DEFAULT_TREE_SYM_LIMIT: usize = 9;

/// Options governing a search.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Hard cap on the number of grammar symbols a derivation may consume.
    /// The budget is mandatory: without it the grammar admits infinite
    /// derivations.
    pub tree_sym_limit: usize,
    /// Store only derivations whose pending branches have all closed.
    pub complete_trees: bool,
    /// Report every distinct ambiguous pair instead of stopping at the
    /// first per root.
    pub find_all: bool,
    /// Force-complete every derivation's semantics during expansion, to
    /// surface latent illegal semantics.
    pub semantic_check: bool,
    /// Verify that every `[ambig-` root reports an ambiguity and every
    /// `[unambig-` root reports none.
    pub test_coverage: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            tree_sym_limit: DEFAULT_TREE_SYM_LIMIT,
            complete_trees: true,
            find_all: false,
            semantic_check: false,
            test_coverage: false,
        }
    }
}

mod local_prelude {
    pub use ambig_grammar::*;
    pub use ambig_symbol::{Symbol, SymbolSource};
}
