use regex::Regex;
use serde_json::Value;

/// Match strategy for a single header value.
#[derive(Debug, Clone)]
pub enum ValueMatch {
    Exact(String),
    Contains(String),
    OneOf(Vec<String>),
    Pattern(Regex),
    Present,
}

impl ValueMatch {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        ValueMatch::Exact(value.into())
    }

    pub fn contains<S: Into<String>>(value: S) -> Self {
        ValueMatch::Contains(value.into())
    }

    pub fn one_of<S: Into<String>, I: IntoIterator<Item = S>>(values: I) -> Self {
        ValueMatch::OneOf(values.into_iter().map(|v| v.into()).collect())
    }

    pub fn matches(&self, actual: &str) -> bool {
        match self {
            ValueMatch::Exact(expected) => actual == expected,
            ValueMatch::Contains(fragment) => actual.contains(fragment.as_str()),
            ValueMatch::OneOf(values) => values.iter().any(|v| v == actual),
            ValueMatch::Pattern(pattern) => pattern.is_match(actual),
            ValueMatch::Present => true,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ValueMatch::Exact(expected) => format!("exactly '{}'", expected),
            ValueMatch::Contains(fragment) => format!("containing '{}'", fragment),
            ValueMatch::OneOf(values) => format!("one of {:?}", values),
            ValueMatch::Pattern(pattern) => format!("matching /{}/", pattern.as_str()),
            ValueMatch::Present => String::from("present"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    Exactly(usize),
    AtMost(usize),
}

impl LengthBound {
    fn holds(self, len: usize) -> bool {
        match self {
            LengthBound::Exactly(expected) => len == expected,
            LengthBound::AtMost(limit) => len <= limit,
        }
    }

    fn describe(self) -> String {
        match self {
            LengthBound::Exactly(expected) => format!("exactly {}", expected),
            LengthBound::AtMost(limit) => format!("at most {}", limit),
        }
    }
}

/// Match strategy for a response body. A contract may stack several of
/// these; each is checked independently.
#[derive(Debug, Clone)]
pub enum BodyMatch {
    /// Structural containment: the observed JSON must contain every field
    /// the expected value names, extra fields are fine.
    JsonSubset(Value),
    /// Exact JSON equality.
    JsonExact(Value),
    /// The array at `pointer` must contain at least one element that
    /// structurally contains `element`.
    ArrayContains { pointer: String, element: Value },
    /// Every element of the array at `pointer` must structurally contain
    /// `element` (filter-style assertions).
    EachContains { pointer: String, element: Value },
    /// Length predicate on the array or string at `pointer`.
    Length { pointer: String, bound: LengthBound },
    /// The field at `pointer` must exist, whatever its value.
    Exists(String),
    /// Raw substring check, for XML or text bodies.
    Contains(String),
    /// The body must be empty.
    Absent,
}

impl BodyMatch {
    /// Checks the match against a raw body, appending human-readable
    /// mismatch descriptions to `diffs`.
    pub fn check(&self, raw_body: &str, diffs: &mut Vec<String>) {
        match self {
            BodyMatch::Contains(fragment) => {
                if !raw_body.contains(fragment.as_str()) {
                    diffs.push(format!("body does not contain '{}'", fragment));
                }
            }
            BodyMatch::Absent => {
                if !raw_body.is_empty() {
                    diffs.push(format!("expected an empty body, got {} bytes", raw_body.len()));
                }
            }
            _ => match serde_json::from_str::<Value>(raw_body) {
                Ok(actual) => self.check_json(&actual, diffs),
                Err(e) => diffs.push(format!("body is not valid JSON: {}", e)),
            },
        }
    }

    fn check_json(&self, actual: &Value, diffs: &mut Vec<String>) {
        match self {
            BodyMatch::JsonSubset(expected) => {
                json_contains(expected, actual, "$", diffs);
            }
            BodyMatch::JsonExact(expected) => {
                if expected != actual {
                    diffs.push(format!("$: expected {}, got {}", expected, actual));
                }
            }
            BodyMatch::ArrayContains { pointer, element } => {
                match lookup_array(actual, pointer, diffs) {
                    Some(items) => {
                        if !items.iter().any(|item| contains_quietly(element, item)) {
                            diffs.push(format!(
                                "{}: no element contains {}",
                                pointer, element
                            ));
                        }
                    }
                    None => {}
                }
            }
            BodyMatch::EachContains { pointer, element } => {
                if let Some(items) = lookup_array(actual, pointer, diffs) {
                    for (index, item) in items.iter().enumerate() {
                        if !contains_quietly(element, item) {
                            diffs.push(format!(
                                "{}[{}]: does not contain {}",
                                pointer, index, element
                            ));
                        }
                    }
                }
            }
            BodyMatch::Length { pointer, bound } => match actual.pointer(pointer) {
                Some(Value::Array(items)) => {
                    if !bound.holds(items.len()) {
                        diffs.push(format!(
                            "{}: expected length {}, got {}",
                            pointer,
                            bound.describe(),
                            items.len()
                        ));
                    }
                }
                Some(Value::String(text)) => {
                    if !bound.holds(text.chars().count()) {
                        diffs.push(format!(
                            "{}: expected length {}, got {}",
                            pointer,
                            bound.describe(),
                            text.chars().count()
                        ));
                    }
                }
                Some(other) => diffs.push(format!(
                    "{}: expected an array or string, got {}",
                    pointer, other
                )),
                None => diffs.push(format!("{}: not found in body", pointer)),
            },
            BodyMatch::Exists(pointer) => {
                if actual.pointer(pointer).is_none() {
                    diffs.push(format!("{}: not found in body", pointer));
                }
            }
            BodyMatch::Contains(_) | BodyMatch::Absent => unreachable!("handled on the raw body"),
        }
    }
}

/// Structural containment over JSON values.
///
/// Objects: every expected key must be present and contained. Arrays of
/// primitives compare exactly. Arrays containing objects use
/// contains-at-least-one semantics per expected element. Scalars compare
/// exactly.
pub fn json_contains(expected: &Value, actual: &Value, path: &str, diffs: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(expected_fields), Value::Object(actual_fields)) => {
            for (key, expected_value) in expected_fields {
                let child_path = format!("{}.{}", path, key);
                match actual_fields.get(key) {
                    Some(actual_value) => {
                        json_contains(expected_value, actual_value, &child_path, diffs)
                    }
                    None => diffs.push(format!("{}: missing, expected {}", child_path, expected_value)),
                }
            }
        }
        (Value::Array(expected_items), Value::Array(actual_items)) => {
            if expected_items.iter().any(|item| item.is_object()) {
                for (index, expected_item) in expected_items.iter().enumerate() {
                    if !actual_items
                        .iter()
                        .any(|actual_item| contains_quietly(expected_item, actual_item))
                    {
                        diffs.push(format!(
                            "{}[{}]: no array element contains {}",
                            path, index, expected_item
                        ));
                    }
                }
            } else if expected_items != actual_items {
                diffs.push(format!(
                    "{}: expected {}, got {}",
                    path,
                    Value::Array(expected_items.clone()),
                    Value::Array(actual_items.clone())
                ));
            }
        }
        _ => {
            if expected != actual {
                diffs.push(format!("{}: expected {}, got {}", path, expected, actual));
            }
        }
    }
}

fn contains_quietly(expected: &Value, actual: &Value) -> bool {
    let mut diffs = Vec::new();
    json_contains(expected, actual, "$", &mut diffs);
    diffs.is_empty()
}

fn lookup_array<'a>(
    actual: &'a Value,
    pointer: &str,
    diffs: &mut Vec<String>,
) -> Option<&'a Vec<Value>> {
    match actual.pointer(pointer) {
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            diffs.push(format!("{}: expected an array, got {}", pointer, other));
            None
        }
        None => {
            diffs.push(format!("{}: not found in body", pointer));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn diffs_for(matcher: &BodyMatch, body: &str) -> Vec<String> {
        let mut diffs = Vec::new();
        matcher.check(body, &mut diffs);
        diffs
    }

    #[test]
    fn object_containment_ignores_extra_fields() {
        let matcher = BodyMatch::JsonSubset(json!({"title": "QA check"}));
        let body = r#"{"id": 12, "title": "QA check", "doneStatus": true}"#;
        assert!(diffs_for(&matcher, body).is_empty());
    }

    #[test]
    fn object_containment_reports_the_missing_field() {
        let matcher = BodyMatch::JsonSubset(json!({"title": "QA check", "description": "x"}));
        let diffs = diffs_for(&matcher, r#"{"title": "QA check"}"#);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].contains("$.description"));
    }

    #[test]
    fn primitive_arrays_compare_exactly() {
        let matcher = BodyMatch::JsonSubset(json!({"errorMessages": ["a", "b"]}));
        assert!(diffs_for(&matcher, r#"{"errorMessages": ["a", "b"]}"#).is_empty());
        assert!(!diffs_for(&matcher, r#"{"errorMessages": ["b", "a"]}"#).is_empty());
        assert!(!diffs_for(&matcher, r#"{"errorMessages": ["a"]}"#).is_empty());
    }

    #[test]
    fn array_contains_needs_only_one_partial_match() {
        let matcher = BodyMatch::ArrayContains {
            pointer: String::from("/todos"),
            element: json!({"id": 3, "title": "process payments"}),
        };
        let body = r#"{"todos": [
            {"id": 1, "title": "other", "doneStatus": true},
            {"id": 3, "title": "process payments", "doneStatus": false, "description": ""}
        ]}"#;
        assert!(diffs_for(&matcher, body).is_empty());

        let missing = r#"{"todos": [{"id": 1, "title": "other"}]}"#;
        assert!(!diffs_for(&matcher, missing).is_empty());
    }

    #[test]
    fn each_contains_flags_every_offending_element() {
        let matcher = BodyMatch::EachContains {
            pointer: String::from("/todos"),
            element: json!({"doneStatus": true}),
        };
        let body = r#"{"todos": [
            {"id": 1, "doneStatus": true},
            {"id": 2, "doneStatus": false},
            {"id": 3, "doneStatus": false}
        ]}"#;
        assert_eq!(diffs_for(&matcher, body).len(), 2);
    }

    #[test]
    fn length_bounds_cover_arrays_and_strings() {
        let exact = BodyMatch::Length {
            pointer: String::from("/todos"),
            bound: LengthBound::Exactly(2),
        };
        let at_most = BodyMatch::Length {
            pointer: String::from("/title"),
            bound: LengthBound::AtMost(50),
        };
        let body = r#"{"todos": [1, 2], "title": "short"}"#;
        assert!(diffs_for(&exact, body).is_empty());
        assert!(diffs_for(&at_most, body).is_empty());

        let over = BodyMatch::Length {
            pointer: String::from("/todos"),
            bound: LengthBound::AtMost(1),
        };
        assert!(!diffs_for(&over, body).is_empty());
    }

    #[test]
    fn exists_checks_presence_not_value() {
        let matcher = BodyMatch::Exists(String::from("/challengeStatus"));
        assert!(diffs_for(&matcher, r#"{"challengeStatus": {}}"#).is_empty());
        assert!(diffs_for(&matcher, r#"{"challengeStatus": null}"#).is_empty());
        assert!(!diffs_for(&matcher, r#"{"other": 1}"#).is_empty());
    }

    #[test]
    fn raw_contains_works_on_xml_bodies() {
        let matcher = BodyMatch::Contains(String::from("<title>XML format</title>"));
        assert!(diffs_for(&matcher, "<todo><title>XML format</title></todo>").is_empty());
        assert!(!diffs_for(&matcher, "<todo/>").is_empty());
    }

    #[test]
    fn header_value_strategies() {
        assert!(ValueMatch::exact("application/json").matches("application/json"));
        assert!(!ValueMatch::exact("application/json").matches("application/json; charset=utf-8"));
        assert!(ValueMatch::contains("application/json")
            .matches("application/json; charset=utf-8"));
        assert!(ValueMatch::one_of(vec!["a", "b"]).matches("b"));
        assert!(ValueMatch::Present.matches("anything"));
        assert!(ValueMatch::Pattern(Regex::new(r"^application/(json|xml)$").unwrap())
            .matches("application/xml"));
    }

    #[test]
    fn invalid_json_is_a_diff_not_a_panic() {
        let matcher = BodyMatch::JsonSubset(json!({"a": 1}));
        let diffs = diffs_for(&matcher, "<not json>");
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].contains("not valid JSON"));
    }
}
