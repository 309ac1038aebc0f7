#![allow(dead_code)]

use ambig::search::{search, Ambiguity, SearchOptions, SearchOutcome};
use ambig::{Grammar, Symbol};

/// Runs a search with capabilities stamped, as the loader would.
pub fn run(grammar: &mut Grammar, opts: SearchOptions) -> SearchOutcome {
    grammar.stamp_semantic_capabilities();
    search(grammar, opts).expect("search failed")
}

/// Looks a symbol up by name.
pub fn sym(grammar: &Grammar, name: &str) -> Symbol {
    grammar.sym_source().name_map()[name]
}

/// Renders every report of an outcome, for byte-for-byte comparison.
pub fn render(grammar: &Grammar, outcome: &SearchOutcome) -> String {
    outcome
        .ambiguities()
        .map(|ambiguity| render_one(grammar, ambiguity))
        .collect()
}

pub fn render_one(grammar: &Grammar, ambiguity: &Ambiguity) -> String {
    ambig::search::compare::DisplayAmbiguity {
        ambiguity,
        source: grammar.sym_source(),
    }
    .to_string()
}
