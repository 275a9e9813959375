//! Multipart conditions and the compact `key=v1|v2, key2=v3` syntax.

use crate::error::{DatagenError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

/// A condition deciding when a multipart rule applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Every listed property must take one of its alternative values.
    Predicate(IndexMap<String, Vec<String>>),
    /// All children must match.
    And(Vec<Condition>),
    /// Any child must match.
    Or(Vec<Condition>),
}

impl Condition {
    /// Parse a single predicate such as `"north=true, east=side|up"`.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(DatagenError::malformed(text, "condition is empty"));
        }

        let mut properties = IndexMap::new();
        for clause in text.split(',') {
            let clause = clause.trim();
            if clause.is_empty() {
                return Err(DatagenError::malformed(text, "empty clause"));
            }

            let (key, values) = clause.split_once('=').ok_or_else(|| {
                DatagenError::malformed(text, format!("clause '{}' is missing '='", clause))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(DatagenError::malformed(
                    text,
                    format!("clause '{}' has no property name", clause),
                ));
            }
            if values.contains('=') {
                return Err(DatagenError::malformed(
                    text,
                    format!("clause '{}' has more than one '='", clause),
                ));
            }

            let alternatives = values
                .split('|')
                .map(str::trim)
                .map(|value| {
                    if value.is_empty() {
                        Err(DatagenError::malformed(
                            text,
                            format!("property '{}' has an empty value", key),
                        ))
                    } else {
                        Ok(value.to_string())
                    }
                })
                .collect::<Result<Vec<_>>>()?;

            if properties.insert(key.to_string(), alternatives).is_some() {
                return Err(DatagenError::malformed(
                    text,
                    format!("property '{}' appears more than once", key),
                ));
            }
        }

        Ok(Condition::Predicate(properties))
    }

    /// Parse each text into its own predicate and require all of them.
    ///
    /// A single text still produces an `AND` node.
    pub fn all<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse_children(texts, "AND").map(Condition::And)
    }

    /// Parse each text into its own predicate and require any of them.
    ///
    /// A single text still produces an `OR` node.
    pub fn any<I, S>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse_children(texts, "OR").map(Condition::Or)
    }

    fn parse_children<I, S>(texts: I, operator: &'static str) -> Result<Vec<Condition>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let children = texts
            .into_iter()
            .map(|text| Self::parse(text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        if children.is_empty() {
            return Err(DatagenError::EmptyCombinator(operator));
        }
        Ok(children)
    }

    /// Build the `when` object for this condition.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        match self {
            Condition::Predicate(properties) => {
                for (key, alternatives) in properties {
                    object.insert(key.clone(), Value::String(alternatives.join("|")));
                }
            }
            Condition::And(children) => {
                object.insert("AND".to_string(), Self::children_json(children));
            }
            Condition::Or(children) => {
                object.insert("OR".to_string(), Self::children_json(children));
            }
        }
        Value::Object(object)
    }

    fn children_json(children: &[Condition]) -> Value {
        Value::Array(children.iter().map(Condition::to_json).collect())
    }

    /// Check if the condition matches the given block properties.
    ///
    /// A property missing from `properties` never matches.
    pub fn matches(&self, properties: &HashMap<String, String>) -> bool {
        match self {
            Condition::Predicate(expected) => expected.iter().all(|(key, alternatives)| {
                properties
                    .get(key)
                    .map(|value| alternatives.iter().any(|alt| alt == value))
                    .unwrap_or(false)
            }),
            Condition::And(children) => children.iter().all(|c| c.matches(properties)),
            Condition::Or(children) => children.iter().any(|c| c.matches(properties)),
        }
    }
}

impl FromStr for Condition {
    type Err = DatagenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_single_clause() {
        let cond = Condition::parse("north=true").unwrap();
        assert_eq!(cond.to_json(), json!({ "north": "true" }));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let cond = Condition::parse("  north = up | side ,east=false ").unwrap();
        match &cond {
            Condition::Predicate(properties) => {
                assert_eq!(properties["north"], vec!["up", "side"]);
                assert_eq!(properties["east"], vec!["false"]);
            }
            _ => panic!("Expected Predicate"),
        }
        assert_eq!(cond.to_json(), json!({ "north": "up|side", "east": "false" }));
    }

    #[test]
    fn test_parse_keeps_clause_order() {
        let cond = Condition::parse("west=a, north=b, east=c").unwrap();
        assert_eq!(
            serde_json::to_string(&cond.to_json()).unwrap(),
            r#"{"west":"a","north":"b","east":"c"}"#
        );
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", "   ", "north", "=true", "north=", "north=a||b", "north=a,", "a=b=c", "a=1,a=2"] {
            assert!(
                matches!(
                    Condition::parse(text),
                    Err(DatagenError::MalformedCondition { .. })
                ),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_from_str() {
        let cond: Condition = "facing=north".parse().unwrap();
        assert_eq!(cond, Condition::parse("facing=north").unwrap());
    }

    #[test]
    fn test_all_wraps_in_and() {
        let cond = Condition::all(["north=true", "east=false"]).unwrap();
        assert_eq!(
            cond.to_json(),
            json!({ "AND": [{ "north": "true" }, { "east": "false" }] })
        );
    }

    #[test]
    fn test_single_text_combinator_keeps_wrapper() {
        let all = Condition::all(["north=true"]).unwrap();
        assert_eq!(all.to_json(), json!({ "AND": [{ "north": "true" }] }));

        let any = Condition::any(["north=true"]).unwrap();
        assert_eq!(any.to_json(), json!({ "OR": [{ "north": "true" }] }));
    }

    #[test]
    fn test_empty_combinator_is_rejected() {
        let all = Condition::all(Vec::<&str>::new()).unwrap_err();
        assert!(matches!(all, DatagenError::EmptyCombinator("AND")));
        assert_eq!(all.to_string(), "AND needs at least one condition");

        let any = Condition::any(Vec::<String>::new()).unwrap_err();
        assert!(matches!(any, DatagenError::EmptyCombinator("OR")));
    }

    #[test]
    fn test_nested_combinators_serialize_recursively() {
        let cond = Condition::Or(vec![
            Condition::all(["north=true", "east=true"]).unwrap(),
            Condition::parse("up=true").unwrap(),
        ]);
        assert_eq!(
            cond.to_json(),
            json!({
                "OR": [
                    { "AND": [{ "north": "true" }, { "east": "true" }] },
                    { "up": "true" }
                ]
            })
        );
    }

    #[test]
    fn test_matches_predicate_alternatives() {
        let cond = Condition::parse("facing=north|south").unwrap();
        assert!(cond.matches(&props(&[("facing", "north")])));
        assert!(cond.matches(&props(&[("facing", "south")])));
        assert!(!cond.matches(&props(&[("facing", "east")])));
        assert!(!cond.matches(&props(&[])));
    }

    #[test]
    fn test_matches_combinators() {
        let any = Condition::any(["north=false", "east=false"]).unwrap();
        assert!(any.matches(&props(&[("north", "true"), ("east", "false")])));
        assert!(!any.matches(&props(&[("north", "true"), ("east", "true")])));

        let all = Condition::all(["north=true, east=true", "west=false"]).unwrap();
        assert!(all.matches(&props(&[("north", "true"), ("east", "true"), ("west", "false")])));
        assert!(!all.matches(&props(&[("north", "true"), ("east", "true"), ("west", "true")])));
    }
}
