//! The built-in test grammar. Every root whose name starts with
//! `[ambig-` must report at least one ambiguous pair, and every
//! `[unambig-` root must report none. The scenarios cover terminal and
//! nonterminal ambiguity at equal and unequal depths, recursion, text
//! substitution, conjugation, insertions, and semantic equivalence.

use ambig_grammar::{Grammar, TextItem};
use ambig_semantic::SemanticFunc;

/// Builds the coverage grammar.
pub fn coverage_grammar() -> Grammar {
    let mut grammar = Grammar::new();

    let sem_a = SemanticFunc::argument("a", 0.0);
    let sem_a2 = SemanticFunc::argument("a2", 0.0);
    let sem_a3 = SemanticFunc::argument("a3", 0.0);
    let sem_b = SemanticFunc::argument("b", 0.0);
    let sem_m = SemanticFunc::argument("m", 0.0);
    let sem_f = SemanticFunc::new("f", 0.5, 0, 9, false);

    // Shared leaf and wrapper symbols.
    let [x, x_dup, x_par, x_par_par] = grammar.with_names(["x", "xDup", "xPar", "xParPar"]);
    let [y, y_dup, y_par, yz, xyz] = grammar.with_names(["y", "yDup", "yPar", "yz", "xyz"]);
    grammar
        .rule(x)
        .word("x")
        .rule(x_dup)
        .word("x")
        .rule(x_par)
        .to([x])
        .rule(x_par_par)
        .to([x_par])
        .rule(y)
        .word("y")
        .rule(y_dup)
        .word("y")
        .rule(y_par)
        .to([y])
        .rule(yz)
        .word("y z")
        .rule(xyz)
        .word("x y z");

    // Terminal symbols at equal depths.
    let [terminal_equal] = grammar.with_names(["[ambig-terminal-equal-depth]"]);
    grammar.rule(terminal_equal).word("x").rule(terminal_equal).word("x");

    // Terminal symbols at different depths.
    let [terminal_unequal] = grammar.with_names(["[ambig-terminal-unequal-depth]"]);
    grammar
        .rule(terminal_unequal)
        .word("x")
        .rule(terminal_unequal)
        .to([x]);

    // Nonterminals at equal depths.
    let [nonterminal_equal] = grammar.with_names(["[ambig-nonterminal-equal-depth]"]);
    grammar
        .rule(nonterminal_equal)
        .to([x])
        .rule(nonterminal_equal)
        .to([x_dup]);

    // Nonterminals at different depths.
    let [nonterminal_unequal] = grammar.with_names(["[ambig-nonterminal-unequal-depth]"]);
    grammar
        .rule(nonterminal_unequal)
        .to([x])
        .rule(nonterminal_unequal)
        .to([x_par_par]);

    // Ambiguity between two binary rules.
    let [binary] = grammar.with_names(["[ambig-binary]"]);
    grammar.rule(binary).to([x, y_par]).rule(binary).to([x_par, y]);

    // The same number of terminals on both sides.
    let [same_count] = grammar.with_names(["[ambig-same-terminal-count]"]);
    grammar
        .rule(same_count)
        .to([x, y])
        .rule(same_count)
        .to([x_dup, y_dup]);

    // Different numbers of terminals joining to the same sequence.
    let [count_differs] = grammar.with_names(["[ambig-terminal-count-differs]"]);
    grammar
        .rule(count_differs)
        .to([xyz])
        .rule(count_differs)
        .to([x, yz]);

    // Two raw pairs trim to one canonical pair; a third survives.
    let [dedup, mixed_par, mixed_par_dup] = grammar.with_names([
        "[ambig-dedup-by-trim]",
        "mixedPar",
        "mixedParDup",
    ]);
    grammar
        .rule(mixed_par)
        .to([x_par])
        .rule(mixed_par)
        .to([x])
        .rule(mixed_par_dup)
        .to([x_par])
        .rule(mixed_par_dup)
        .to([x])
        .rule(dedup)
        .to([mixed_par])
        .rule(dedup)
        .to([mixed_par_dup]);

    // One derivation ambiguous against two rules.
    let [reused] = grammar.with_names(["[ambig-reused-path]"]);
    grammar
        .rule(reused)
        .to([x])
        .rule(reused)
        .to([x_dup])
        .rule(reused)
        .to([x_par]);

    // Multiple ambiguities from one pair of start rules.
    let [multiple, w, w_dup] = grammar.with_names([
        "[ambig-multiple-from-one-pair]",
        "w",
        "wDup",
    ]);
    grammar
        .rule(w)
        .word("x")
        .rule(w)
        .to([x, y])
        .rule(w_dup)
        .word("x")
        .rule(w_dup)
        .to([x_dup, y_dup])
        .rule(multiple)
        .to([w])
        .rule(multiple)
        .to([w_dup]);

    // Left recursion against right recursion.
    let [left_right, lrec, rrec] = grammar.with_names([
        "[ambig-left-right-recursion]",
        "lrec",
        "rrec",
    ]);
    grammar
        .rule(lrec)
        .to([lrec, x])
        .rule(lrec)
        .to([x])
        .rule(rrec)
        .to([x, rrec])
        .rule(rrec)
        .to([x])
        .rule(left_right)
        .to([lrec])
        .rule(left_right)
        .to([rrec]);

    // Recursion inside the RHS.
    let [rhs_recursion, rec, rec_dup] = grammar.with_names([
        "[ambig-recursion-in-rhs]",
        "rec",
        "recDup",
    ]);
    grammar
        .rule(rec)
        .to([x, rec])
        .rule(rec)
        .to([x])
        .rule(rec_dup)
        .to([x, rec_dup])
        .rule(rec_dup)
        .to([x])
        .rule(rhs_recursion)
        .to([rec])
        .rule(rhs_recursion)
        .to([rec_dup]);

    // A recursive start rule, repeated.
    let [rec_start] = grammar.with_names(["[ambig-recursive-start-repeated]"]);
    grammar
        .rule(rec_start)
        .to([x])
        .rule(rec_start)
        .to([rec_start, x])
        .rule(rec_start)
        .to([rec_start, x]);

    // A sub-ambiguous RHS producing multiple instances.
    let [sub_ambig, amb, amb_dup] = grammar.with_names([
        "[ambig-sub-ambiguous-rhs]",
        "amb",
        "ambDup",
    ]);
    grammar
        .rule(amb)
        .to([x])
        .rule(amb)
        .to([x_dup])
        .rule(amb_dup)
        .to([x])
        .rule(amb_dup)
        .to([x_dup])
        .rule(sub_ambig)
        .to([amb])
        .rule(sub_ambig)
        .to([amb_dup]);

    // One rule ambiguous with two others at different rightmost symbols.
    let [multi_rightmost, mixed] = grammar.with_names(["[ambig-multi-rightmost]", "mixed"]);
    grammar
        .rule(mixed)
        .to([x])
        .rule(mixed)
        .to([y])
        .rule(multi_rightmost)
        .to([mixed])
        .rule(multi_rightmost)
        .to([x_dup])
        .rule(multi_rightmost)
        .to([y_dup]);

    // Two rules, each ambiguous only against a third.
    let [via_third] = grammar.with_names(["[ambig-pair-via-third]"]);
    grammar
        .rule(via_third)
        .word("x")
        .rule(via_third)
        .word("y")
        .rule(via_third)
        .to([mixed]);

    // Text substitution: equal substituted text, distinct semantics.
    let [text_sub, unambig_text_sub] = grammar.with_names([
        "[ambig-text-substitution]",
        "[unambig-text-substitution]",
    ]);
    grammar
        .rule(text_sub)
        .rhs_semantic(vec![sem_a.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(text_sub)
        .rhs_semantic(vec![sem_b.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(unambig_text_sub)
        .rhs_semantic(vec![sem_a.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(unambig_text_sub)
        .rhs_semantic(vec![sem_b.node()])
        .word_with_text("x", TextItem::str("z"));

    // Conjugated text via person-number.
    let [conjugation, unambig_conjugation, verb, v_pl, v_pl_dup, v_three] = grammar.with_names([
        "[ambig-conjugation]",
        "[unambig-conjugation]",
        "verb",
        "vPl",
        "vPlDup",
        "vThree",
    ]);
    grammar
        .rule(verb)
        .word_with_text("be", TextItem::table([("pl", "x"), ("threeSg", "y")]))
        .rule(v_pl)
        .rhs_semantic(vec![sem_a.node()])
        .person_number("pl")
        .to([verb])
        .rule(v_pl_dup)
        .rhs_semantic(vec![sem_b.node()])
        .person_number("pl")
        .to([verb])
        .rule(v_three)
        .rhs_semantic(vec![sem_b.node()])
        .person_number("threeSg")
        .to([verb])
        .rule(conjugation)
        .to([v_pl])
        .rule(conjugation)
        .to([v_pl_dup])
        .rule(unambig_conjugation)
        .to([v_pl])
        .rule(unambig_conjugation)
        .to([v_three]);

    // Unconjugated text: nothing governs the table, so comparison is deep.
    let [unconjugated, v_raw, v_raw_dup] = grammar.with_names([
        "[ambig-unconjugated-text]",
        "vRaw",
        "vRawDup",
    ]);
    grammar
        .rule(v_raw)
        .rhs_semantic(vec![sem_a.node()])
        .to([verb])
        .rule(v_raw_dup)
        .rhs_semantic(vec![sem_b.node()])
        .to([verb])
        .rule(unconjugated)
        .to([v_raw])
        .rule(unconjugated)
        .to([v_raw_dup]);

    // Inserted text, equal on both sides, distinct semantics.
    let [inserted_text, unambig_inserted_text] = grammar.with_names([
        "[ambig-inserted-text]",
        "[unambig-inserted-text]",
    ]);
    grammar
        .rule(inserted_text)
        .rhs_semantic(vec![sem_a.node()])
        .insert(0, vec![TextItem::str("y")])
        .to([x])
        .rule(inserted_text)
        .rhs_semantic(vec![sem_b.node()])
        .insert(0, vec![TextItem::str("y")])
        .to([x])
        .rule(unambig_inserted_text)
        .rhs_semantic(vec![sem_a.node()])
        .insert(0, vec![TextItem::str("y")])
        .to([x])
        .rule(unambig_inserted_text)
        .rhs_semantic(vec![sem_b.node()])
        .insert(0, vec![TextItem::str("z")])
        .to([x]);

    // Inserted text spanning rules: "x" + inserted "y" equals "x y" only
    // after adjacent strings merge.
    let [spanning, xy_term] = grammar.with_names(["[ambig-inserted-text-spanning]", "xyTerm"]);
    grammar
        .rule(xy_term)
        .word_with_text("x", TextItem::str("x y"))
        .rule(spanning)
        .rhs_semantic(vec![sem_a.node()])
        .insert(1, vec![TextItem::str("y")])
        .to([x])
        .rule(spanning)
        .rhs_semantic(vec![sem_b.node()])
        .to([xy_term]);

    // Semantics deciding over substituted text.
    let [sem_over_sub, unambig_sem_over_sub] = grammar.with_names([
        "[ambig-semantics-over-substitution]",
        "[unambig-semantics-over-substitution]",
    ]);
    grammar
        .rule(sem_over_sub)
        .rhs_semantic(vec![sem_m.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(sem_over_sub)
        .rhs_semantic(vec![sem_m.node()])
        .word_with_text("x", TextItem::str("z"))
        .rule(unambig_sem_over_sub)
        .rhs_semantic(vec![sem_a.node()])
        .word_with_text("x", TextItem::str("y"))
        .rule(unambig_sem_over_sub)
        .rhs_semantic(vec![sem_b.node()])
        .word_with_text("x", TextItem::str("z"));

    // A semantic assembled across rules equals one attached whole.
    let [sem_across, a_term] = grammar.with_names(["[ambig-semantics-across-rules]", "aTerm"]);
    grammar
        .rule(a_term)
        .rhs_semantic(vec![sem_a.node()])
        .word("x")
        .rule(sem_across)
        .lhs_semantic(vec![sem_f.node()])
        .to([a_term])
        .rule(sem_across)
        .rhs_semantic(vec![sem_f.node_with(vec![sem_a.node()])])
        .word("x");

    // Inserted semantics.
    let [inserted_sem, unambig_inserted_sem, a_term_z] = grammar.with_names([
        "[ambig-inserted-semantic]",
        "[unambig-inserted-semantic]",
        "aTermZ",
    ]);
    grammar
        .rule(a_term_z)
        .rhs_semantic(vec![sem_a.node()])
        .word_with_text("x", TextItem::str("z"))
        .rule(inserted_sem)
        .lhs_semantic(vec![sem_f.node()])
        .inserted_semantic(vec![sem_a2.node()])
        .to([a_term])
        .rule(inserted_sem)
        .rhs_semantic(vec![sem_f.node_with(vec![sem_a.node(), sem_a2.node()])])
        .word("x")
        .rule(unambig_inserted_sem)
        .lhs_semantic(vec![sem_f.node()])
        .inserted_semantic(vec![sem_a2.node()])
        .to([a_term])
        .rule(unambig_inserted_sem)
        .lhs_semantic(vec![sem_f.node()])
        .inserted_semantic(vec![sem_a3.node()])
        .to([a_term_z]);

    // Equal semantics reached in different orders; the canonical sort
    // makes them comparable.
    let [sem_sorted] = grammar.with_names(["[ambig-semantics-sorted]"]);
    grammar
        .rule(sem_sorted)
        .rhs_semantic(vec![sem_a.node(), sem_b.node()])
        .word_with_text("x", TextItem::str("p"))
        .rule(sem_sorted)
        .rhs_semantic(vec![sem_b.node(), sem_a.node()])
        .word_with_text("x", TextItem::str("q"));

    // Semantics on empty terminals.
    let [empty_terminal] = grammar.with_names(["[ambig-empty-terminal]"]);
    grammar
        .rule(empty_terminal)
        .rhs_semantic(vec![sem_a.node()])
        .word("")
        .rule(empty_terminal)
        .rhs_semantic(vec![sem_a.node()])
        .word("");

    grammar.stamp_semantic_capabilities();
    grammar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_grammar_shape() {
        let grammar = coverage_grammar();
        let marked = grammar
            .nonterminals()
            .filter(|&(sym, _)| {
                let name = grammar.sym_source().name_of(sym);
                name.starts_with("[ambig-") || name.starts_with("[unambig-")
            })
            .collect::<Vec<_>>();
        assert_eq!(marked.len(), 31);
        for (sym, rules) in marked {
            assert!(
                rules.len() >= 2,
                "test symbol {} needs at least two rules",
                grammar.sym_source().name_of(sym)
            );
        }
    }
}
