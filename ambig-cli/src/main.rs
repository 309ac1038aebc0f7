//! Command-line front end for the ambiguity detector.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use log::info;

use ambig_search::{search, SearchOptions, DEFAULT_TREE_SYM_LIMIT};

#[derive(Debug, Parser)]
#[command(name = "ambig", about = "Detects ambiguity in a compiled grammar")]
struct Cli {
    /// Path to a compiled grammar in JSON form.
    #[arg(long, conflicts_with = "use_test_rules")]
    grammar: Option<PathBuf>,

    /// Hard cap on grammar symbols per derivation.
    #[arg(long, default_value_t = DEFAULT_TREE_SYM_LIMIT)]
    tree_sym_limit: usize,

    /// Store only fully-reduced derivations.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    complete_trees: bool,

    /// Report every distinct ambiguous pair, not just the first per root.
    #[arg(long)]
    find_all: bool,

    /// Force-complete every derivation's semantics to find latent illegal
    /// semantics.
    #[arg(long)]
    semantic_check: bool,

    /// Search the built-in test grammar and verify its classifications.
    #[arg(long)]
    use_test_rules: bool,

    /// Suppress ambiguity reports.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.use_test_rules && cli.tree_sym_limit < DEFAULT_TREE_SYM_LIMIT {
        bail!(
            "--tree-sym-limit must be at least {} with --use-test-rules",
            DEFAULT_TREE_SYM_LIMIT
        );
    }

    let mut grammar = if cli.use_test_rules {
        ambig_examples::coverage_grammar()
    } else {
        let path = cli
            .grammar
            .as_deref()
            .context("either --grammar or --use-test-rules is required")?;
        ambig_load::load_path(path)
            .with_context(|| format!("failed to load grammar from {}", path.display()))?
    };

    let opts = SearchOptions {
        tree_sym_limit: cli.tree_sym_limit,
        complete_trees: cli.complete_trees,
        find_all: cli.find_all,
        semantic_check: cli.semantic_check,
        test_coverage: cli.use_test_rules,
    };

    let outcome = search(&mut grammar, opts)?;
    let mut count = 0usize;
    for ambiguity in outcome.ambiguities() {
        count += 1;
        if !cli.quiet {
            println!(
                "{}",
                ambig_search::compare::DisplayAmbiguity {
                    ambiguity,
                    source: grammar.sym_source(),
                }
            );
        }
    }
    info!("{} ambiguous pairs reported", count);
    Ok(())
}
