//! The built-in test grammar, classified end to end.

mod support;

use test_case::test_case;

use ambig::examples::coverage_grammar;
use ambig::search::{search, SearchOptions};

use support::sym;

/// Every marked root classifies as its name demands; the driver's own
/// verification passes.
#[test]
fn test_coverage_verification_passes() {
    let mut grammar = coverage_grammar();
    let opts = SearchOptions {
        test_coverage: true,
        ..SearchOptions::default()
    };
    search(&mut grammar, opts).expect("coverage verification failed");
}

#[test_case("[ambig-terminal-equal-depth]", true)]
#[test_case("[ambig-terminal-unequal-depth]", true)]
#[test_case("[ambig-nonterminal-equal-depth]", true)]
#[test_case("[ambig-nonterminal-unequal-depth]", true)]
#[test_case("[ambig-binary]", true)]
#[test_case("[ambig-same-terminal-count]", true)]
#[test_case("[ambig-terminal-count-differs]", true)]
#[test_case("[ambig-dedup-by-trim]", true)]
#[test_case("[ambig-reused-path]", true)]
#[test_case("[ambig-multiple-from-one-pair]", true)]
#[test_case("[ambig-left-right-recursion]", true)]
#[test_case("[ambig-recursion-in-rhs]", true)]
#[test_case("[ambig-recursive-start-repeated]", true)]
#[test_case("[ambig-sub-ambiguous-rhs]", true)]
#[test_case("[ambig-multi-rightmost]", true)]
#[test_case("[ambig-pair-via-third]", true)]
#[test_case("[ambig-text-substitution]", true)]
#[test_case("[unambig-text-substitution]", false)]
#[test_case("[ambig-conjugation]", true)]
#[test_case("[unambig-conjugation]", false)]
#[test_case("[ambig-unconjugated-text]", true)]
#[test_case("[ambig-inserted-text]", true)]
#[test_case("[unambig-inserted-text]", false)]
#[test_case("[ambig-inserted-text-spanning]", true)]
#[test_case("[ambig-semantics-over-substitution]", true)]
#[test_case("[unambig-semantics-over-substitution]", false)]
#[test_case("[ambig-semantics-across-rules]", true)]
#[test_case("[ambig-inserted-semantic]", true)]
#[test_case("[unambig-inserted-semantic]", false)]
#[test_case("[ambig-semantics-sorted]", true)]
#[test_case("[ambig-empty-terminal]", true)]
fn test_classification(name: &str, expect_ambiguous: bool) {
    let mut grammar = coverage_grammar();
    let outcome = search(&mut grammar, SearchOptions::default()).unwrap();
    let root = sym(&grammar, name);
    assert_eq!(!outcome.for_root(root).is_empty(), expect_ambiguous);
}

/// Two raw pairs collapse onto one canonical trimmed pair; three distinct
/// reports remain.
#[test]
fn test_dedup_by_trimmed_trees() {
    let mut grammar = coverage_grammar();
    let outcome = search(
        &mut grammar,
        SearchOptions {
            find_all: true,
            ..SearchOptions::default()
        },
    )
    .unwrap();
    let root = sym(&grammar, "[ambig-dedup-by-trim]");
    assert_eq!(outcome.for_root(root).len(), 3);
}
