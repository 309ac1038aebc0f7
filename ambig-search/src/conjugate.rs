//! The conjugator: resolves an inflection table against the grammatical
//! properties in effect along a derivation.

use crate::error::SearchError;
use crate::local_prelude::*;
use crate::person_number::PnList;

/// Conjugates a text value. Resolution order, first hit wins: the
/// governing tense, an accepted tense matching the token's own, the
/// governing case, then the newest person-number property.
///
/// When no governing property has been seen along the derivation, which
/// happens because enumeration can start below the normal start symbol,
/// the table passes through unchanged. A governing property that matches
/// no form at all is a fatal error.
pub fn conjugate(
    item: &TextItem,
    person_numbers: &PnList,
    props: Option<&GramProps>,
    input_tense: Option<&str>,
) -> Result<TextItem, SearchError> {
    match item {
        TextItem::Str(_) => Ok(item.clone()),
        TextItem::Seq(items) => items
            .iter()
            .map(|item| conjugate(item, person_numbers, props, input_tense))
            .collect::<Result<Vec<_>, _>>()
            .map(TextItem::Seq),
        TextItem::Inflections(table) => {
            let mut governed = false;
            if let Some(props) = props {
                if let Some(tense) = &props.tense {
                    governed = true;
                    if let Some(form) = table.get(tense) {
                        return Ok(TextItem::str(form));
                    }
                }
                if let (Some(accepted), Some(input)) = (&props.accepted_tense, input_tense) {
                    if accepted == input {
                        if let Some(form) = table.get(input) {
                            return Ok(TextItem::str(form));
                        }
                    }
                }
                if let Some(case) = &props.case {
                    governed = true;
                    if let Some(form) = table.get(case) {
                        return Ok(TextItem::str(form));
                    }
                }
            }
            if let Some(entry) = person_numbers.first() {
                governed = true;
                if let Some(form) = table.get(entry.person_number.as_str()) {
                    return Ok(TextItem::str(form));
                }
            }
            if governed {
                Err(SearchError::Conjugation {
                    text: table.to_string(),
                    context: describe(props, person_numbers),
                })
            } else {
                Ok(item.clone())
            }
        }
    }
}

fn describe(props: Option<&GramProps>, person_numbers: &PnList) -> String {
    let mut parts = vec![];
    if let Some(props) = props {
        if let Some(tense) = &props.tense {
            parts.push(format!("tense {}", tense));
        }
        if let Some(case) = &props.case {
            parts.push(format!("case {}", case));
        }
    }
    if let Some(entry) = person_numbers.first() {
        parts.push(format!("person-number {}", entry.person_number));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuation::ContList;
    use crate::person_number;

    fn verb() -> TextItem {
        TextItem::table([("pl", "are"), ("threeSg", "is"), ("past", "were")])
    }

    #[test]
    fn test_required_tense_wins() {
        let props = GramProps::tense("past");
        let out = conjugate(&verb(), &PnList::new(), Some(&props), None).unwrap();
        assert_eq!(out, TextItem::str("were"));
    }

    #[test]
    fn test_accepted_tense_requires_matching_input() {
        let props = GramProps::accepted_tense("past");
        let with_input = conjugate(&verb(), &PnList::new(), Some(&props), Some("past")).unwrap();
        assert_eq!(with_input, TextItem::str("were"));

        // Input in another tense is not an error; nothing governs here.
        let without = conjugate(&verb(), &PnList::new(), Some(&props), None).unwrap();
        assert_eq!(without, verb());
    }

    #[test]
    fn test_person_number_resolves_verbs() {
        let list = person_number::push(&PnList::new(), "threeSg".into(), &ContList::new());
        let out = conjugate(&verb(), &list, None, None).unwrap();
        assert_eq!(out, TextItem::str("is"));
    }

    #[test]
    fn test_missing_property_passes_through() {
        let out = conjugate(&verb(), &PnList::new(), None, None).unwrap();
        assert_eq!(out, verb());
    }

    #[test]
    fn test_governed_without_form_is_fatal() {
        let props = GramProps::tense("future");
        let pronoun = TextItem::table([("nom", "I"), ("obj", "me")]);
        assert!(conjugate(&pronoun, &PnList::new(), Some(&props), None).is_err());
    }
}
