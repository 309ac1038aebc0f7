//! End-to-end searches over small grammars, one per ambiguity kind.

mod support;

use ambig::search::{FlatItem, SearchOptions};
use ambig::semantic::SemanticFunc;
use ambig::{Grammar, TextItem};

use support::run;

/// `s -> xPar | xDup` over `xPar -> x`, `x -> "x"`, `xDup -> "x"`.
#[test]
fn test_wrapped_terminal_pair() {
    let mut grammar = Grammar::new();
    let [s, x, x_dup, x_par] = grammar.with_names(["s", "x", "xDup", "xPar"]);
    grammar
        .rule(x)
        .word("x")
        .rule(x_dup)
        .word("x")
        .rule(x_par)
        .to([x])
        .rule(s)
        .to([x_par])
        .rule(s)
        .to([x_dup]);

    let outcome = run(&mut grammar, SearchOptions::default());
    let reported = outcome.for_root(s);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].terminals, " x");
}

/// A terminal rule against a two-deep wrapper: the pair reports once, and
/// the trimmed trees differ in depth, not in terminals.
#[test]
fn test_depth_difference() {
    let mut grammar = Grammar::new();
    let [s, x, x_par, x_par_par] = grammar.with_names(["s", "x", "xPar", "xParPar"]);
    grammar
        .rule(x)
        .word("x")
        .rule(x_par)
        .to([x])
        .rule(x_par_par)
        .to([x_par])
        .rule(s)
        .word("x")
        .rule(s)
        .to([x_par_par]);

    let outcome = run(&mut grammar, SearchOptions::default());
    let reported = outcome.for_root(s);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].terminals, " x");
    // The direct derivation trims to a childless root; the wrapped one
    // keeps its rule chain.
    let (first, second) = (&reported[0].first, &reported[0].second);
    let shallow = if first.tree.children.is_empty() {
        first
    } else {
        second
    };
    let deep = if first.tree.children.is_empty() {
        second
    } else {
        first
    };
    assert!(shallow.tree.children.is_empty());
    assert_eq!(deep.tree.children.len(), 1);
    assert_ne!(shallow.tree, deep.tree);
}

/// Three mutually ambiguous rules: one report by default, three with
/// find-all.
#[test]
fn test_find_all_reports_every_pair() {
    let build = || {
        let mut grammar = Grammar::new();
        let [s, x, x_dup] = grammar.with_names(["s", "x", "xDup"]);
        grammar
            .rule(x)
            .word("x")
            .rule(x_dup)
            .word("x")
            .rule(s)
            .to([x])
            .rule(s)
            .to([x_dup])
            .rule(s)
            .word("x");
        (grammar, s)
    };

    let (mut grammar, s) = build();
    let outcome = run(&mut grammar, SearchOptions::default());
    assert_eq!(outcome.for_root(s).len(), 1);

    let (mut grammar, s) = build();
    let outcome = run(
        &mut grammar,
        SearchOptions {
            find_all: true,
            ..SearchOptions::default()
        },
    );
    assert_eq!(outcome.for_root(s).len(), 3);
}

/// Text substitution: both rules surface "y" for the token "x".
#[test]
fn test_text_substitution() {
    // Without semantics, the pair is ambiguous outright.
    let mut grammar = Grammar::new();
    let [s, x_to_y, x_to_y_dup] = grammar.with_names(["s", "xToY", "xToYDup"]);
    grammar
        .rule(x_to_y)
        .word_with_text("x", TextItem::str("y"))
        .rule(x_to_y_dup)
        .word_with_text("x", TextItem::str("y"))
        .rule(s)
        .to([x_to_y])
        .rule(s)
        .to([x_to_y_dup]);
    let outcome = run(&mut grammar, SearchOptions::default());
    assert_eq!(outcome.for_root(s).len(), 1);

    // Distinct semantics do not block ambiguity when the text agrees.
    let sem_a = SemanticFunc::argument("a", 0.0);
    let sem_b = SemanticFunc::argument("b", 0.0);
    let mut grammar = Grammar::new();
    let [s, x_to_y, x_to_y_dup] = grammar.with_names(["s", "xToY", "xToYDup"]);
    grammar
        .rule(x_to_y)
        .rhs_semantic(vec![sem_a.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(x_to_y_dup)
        .rhs_semantic(vec![sem_b.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(s)
        .to([x_to_y])
        .rule(s)
        .to([x_to_y_dup]);
    let outcome = run(&mut grammar, SearchOptions::default());
    assert_eq!(outcome.for_root(s).len(), 1);
}

/// Conjugation via person-number: equal properties report, distinct
/// properties with distinguishing semantics do not.
#[test]
fn test_person_number_conjugation() {
    let verb_text = || TextItem::table([("pl", "x"), ("threeSg", "y")]);
    let sem_a = SemanticFunc::argument("a", 0.0);
    let sem_b = SemanticFunc::argument("b", 0.0);

    let mut grammar = Grammar::new();
    let [s, verb, v_first, v_second] = grammar.with_names(["s", "verb", "vFirst", "vSecond"]);
    grammar
        .rule(verb)
        .word_with_text("be", verb_text())
        .rule(v_first)
        .person_number("pl")
        .to([verb])
        .rule(v_second)
        .person_number("pl")
        .to([verb])
        .rule(s)
        .to([v_first])
        .rule(s)
        .to([v_second]);
    let outcome = run(&mut grammar, SearchOptions::default());
    assert_eq!(outcome.for_root(s).len(), 1);

    let mut grammar = Grammar::new();
    let [s, verb, v_first, v_second] = grammar.with_names(["s", "verb", "vFirst", "vSecond"]);
    grammar
        .rule(verb)
        .word_with_text("be", verb_text())
        .rule(v_first)
        .rhs_semantic(vec![sem_a.node()])
        .person_number("pl")
        .to([verb])
        .rule(v_second)
        .rhs_semantic(vec![sem_b.node()])
        .person_number("threeSg")
        .to([verb])
        .rule(s)
        .to([v_first])
        .rule(s)
        .to([v_second]);
    let outcome = run(&mut grammar, SearchOptions::default());
    assert!(outcome.for_root(s).is_empty());
}

/// Inserted text spanning rules: "x" plus inserted "y" equals the
/// substituted "x y" only after adjacent strings merge.
#[test]
fn test_inserted_text_concatenation() {
    let sem_a = SemanticFunc::argument("a", 0.0);
    let sem_b = SemanticFunc::argument("b", 0.0);

    let mut grammar = Grammar::new();
    let [s, x, xy_term] = grammar.with_names(["s", "x", "xyTerm"]);
    grammar
        .rule(x)
        .word("x")
        .rule(xy_term)
        .word_with_text("x", TextItem::str("x y"))
        .rule(s)
        .rhs_semantic(vec![sem_a.node()])
        .insert(1, vec![TextItem::str("y")])
        .to([x])
        .rule(s)
        .rhs_semantic(vec![sem_b.node()])
        .to([xy_term]);

    let outcome = run(&mut grammar, SearchOptions::default());
    let reported = outcome.for_root(s);
    assert_eq!(reported.len(), 1);
    assert_eq!(
        reported[0].first.flattened,
        vec![FlatItem::Text(TextItem::str("x y"))]
    );
    assert_eq!(reported[0].first.flattened, reported[0].second.flattened);
}
