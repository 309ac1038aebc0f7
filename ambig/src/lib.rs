pub use ambig_examples as examples;
pub use ambig_grammar::*;
pub use ambig_load as load;
pub use ambig_search as search;
pub use ambig_search::{Driver, SearchOptions};
pub use ambig_semantic as semantic;
pub use ambig_symbol::{Symbol, SymbolSource};
