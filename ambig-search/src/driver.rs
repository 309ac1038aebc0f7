//! The driver: runs the expander and the comparator for every nonterminal
//! of the grammar, and verifies coverage expectations in test mode.

use std::time::Instant;

use log::{debug, info};

use crate::compare::{compare_store, Ambiguity};
use crate::error::SearchError;
use crate::expand::expand_root;
use crate::local_prelude::*;
use crate::SearchOptions;

/// Symbols named with this prefix must report at least one ambiguity in
/// test mode.
pub const AMBIG_PREFIX: &str = "[ambig-";
/// Symbols named with this prefix must report none.
pub const UNAMBIG_PREFIX: &str = "[unambig-";

/// Searches every nonterminal of a grammar for ambiguous derivation pairs.
pub struct Driver<'g> {
    grammar: &'g Grammar,
    opts: SearchOptions,
}

/// The outcome for one root nonterminal.
pub struct RootOutcome {
    pub root: Symbol,
    pub ambiguities: Vec<Ambiguity>,
}

/// The outcome of a whole search.
pub struct SearchOutcome {
    pub roots: Vec<RootOutcome>,
}

impl SearchOutcome {
    /// Iterates over every reported ambiguity, in root order.
    pub fn ambiguities(&self) -> impl Iterator<Item = &Ambiguity> {
        self.roots.iter().flat_map(|root| root.ambiguities.iter())
    }

    /// The ambiguities reported for one root.
    pub fn for_root(&self, root: Symbol) -> &[Ambiguity] {
        self.roots
            .iter()
            .find(|outcome| outcome.root == root)
            .map(|outcome| &outcome.ambiguities[..])
            .unwrap_or(&[])
    }
}

/// Removes transpositions, then searches every nonterminal.
pub fn search(grammar: &mut Grammar, opts: SearchOptions) -> Result<SearchOutcome, SearchError> {
    grammar.remove_transpositions();
    Driver::new(&*grammar, opts).run()
}

impl<'g> Driver<'g> {
    /// Creates a driver. The grammar must not contain transpositions;
    /// see [`fn search`] for the one-call entry point.
    ///
    /// [`fn search`]: search
    pub fn new(grammar: &'g Grammar, opts: SearchOptions) -> Self {
        Driver { grammar, opts }
    }

    pub fn run(&self) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        if self.opts.test_coverage {
            self.check_test_symbols()?;
        }

        let mut roots = Vec::new();
        let mut pair_count = 0usize;
        for (root, rules) in self.grammar.nonterminals() {
            // A single rule cannot be ambiguous. Semantic-check mode still
            // enumerates, solely to force-complete every semantic.
            if rules.len() < 2 && !self.opts.semantic_check {
                continue;
            }
            let root_started = Instant::now();
            let store = expand_root(self.grammar, root, &self.opts)?;
            let ambiguities = if rules.len() >= 2 {
                compare_store(root, &store, &self.opts)?
            } else {
                Vec::new()
            };
            debug!(
                "searched `{}` in {:?}: {} ambiguous pairs",
                self.grammar.sym_source().name_of(root),
                root_started.elapsed(),
                ambiguities.len(),
            );
            if self.opts.test_coverage {
                self.verify_coverage(root, &ambiguities)?;
            }
            pair_count += ambiguities.len();
            roots.push(RootOutcome { root, ambiguities });
        }

        info!(
            "searched {} nonterminals in {:?}: {} ambiguous pairs",
            roots.len(),
            started.elapsed(),
            pair_count,
        );
        Ok(SearchOutcome { roots })
    }

    /// A marked test symbol with fewer than two rules cannot exercise the
    /// comparator; fail before enumerating anything.
    fn check_test_symbols(&self) -> Result<(), SearchError> {
        for (root, rules) in self.grammar.nonterminals() {
            let name = self.grammar.sym_source().name_of(root);
            if (name.starts_with(AMBIG_PREFIX) || name.starts_with(UNAMBIG_PREFIX))
                && rules.len() < 2
            {
                return Err(SearchError::IllFormedTestSymbol {
                    symbol: name.into_owned(),
                    count: rules.len(),
                });
            }
        }
        Ok(())
    }

    fn verify_coverage(&self, root: Symbol, ambiguities: &[Ambiguity]) -> Result<(), SearchError> {
        let name = self.grammar.sym_source().name_of(root);
        if name.starts_with(AMBIG_PREFIX) && ambiguities.is_empty() {
            return Err(SearchError::MissingAmbiguity {
                symbol: name.into_owned(),
            });
        }
        if name.starts_with(UNAMBIG_PREFIX) && !ambiguities.is_empty() {
            return Err(SearchError::UnexpectedAmbiguity {
                symbol: name.into_owned(),
                count: ambiguities.len(),
            });
        }
        Ok(())
    }
}
