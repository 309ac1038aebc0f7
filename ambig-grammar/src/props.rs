//! Grammatical properties rules attach to the derivations below them.

use std::fmt;
use std::rc::Rc;

/// The grammatical-property triple a nonterminal rule imposes on the
/// terminal rules produced below its RHS.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GramProps {
    /// Grammatical case, e.g. nominative or objective.
    pub case: Option<String>,
    /// A tense the rule requires of verbs below it.
    pub tense: Option<String>,
    /// A tense the rule accepts when a terminal already carries it.
    pub accepted_tense: Option<String>,
}

impl GramProps {
    /// A triple requiring the given case.
    pub fn case(case: impl Into<String>) -> Rc<Self> {
        Rc::new(GramProps {
            case: Some(case.into()),
            ..Self::default()
        })
    }

    /// A triple requiring the given tense.
    pub fn tense(tense: impl Into<String>) -> Rc<Self> {
        Rc::new(GramProps {
            tense: Some(tense.into()),
            ..Self::default()
        })
    }

    /// A triple accepting, but not requiring, the given tense.
    pub fn accepted_tense(tense: impl Into<String>) -> Rc<Self> {
        Rc::new(GramProps {
            accepted_tense: Some(tense.into()),
            ..Self::default()
        })
    }
}

/// A person-number property, propagated to conjugate a verb below the rule
/// that declares it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PersonNumber(Rc<str>);

impl PersonNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'a> From<&'a str> for PersonNumber {
    fn from(value: &'a str) -> Self {
        PersonNumber(Rc::from(value))
    }
}

impl fmt::Display for PersonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
