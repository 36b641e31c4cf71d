use crate::data::ObservedResponse;
use crate::scenario::Contract;

/// Outcome of validating one response against its contract. A mismatch is
/// terminal for the scenario; nothing here retries or corrects.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub pass: bool,
    pub diffs: Vec<String>,
}

impl Verdict {
    fn from_diffs(diffs: Vec<String>) -> Self {
        Self {
            pass: diffs.is_empty(),
            diffs,
        }
    }
}

/// Compares expected against actual: exact status, subset headers, stacked
/// body predicates. Every mismatch becomes one diff line.
pub fn validate(expected: &Contract, actual: &ObservedResponse) -> Verdict {
    let mut diffs = Vec::new();

    if actual.status != expected.status {
        diffs.push(format!(
            "status: expected {}, got {}",
            expected.status, actual.status
        ));
    }

    for (name, value_match) in &expected.headers {
        match actual.header(name) {
            Some(actual_value) => {
                if !value_match.matches(actual_value) {
                    diffs.push(format!(
                        "header '{}': expected {}, got '{}'",
                        name,
                        value_match.describe(),
                        actual_value
                    ));
                }
            }
            None => diffs.push(format!(
                "header '{}': missing, expected {}",
                name,
                value_match.describe()
            )),
        }
    }

    for body_match in &expected.body {
        body_match.check(&actual.body, &mut diffs);
    }

    Verdict::from_diffs(diffs)
}
