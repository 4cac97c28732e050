// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixture harness.
//!
//! A [`Suite`] holds named checks, each running one engine on a literal
//! instance and comparing the JSON form of the result with an expected JSON
//! fragment. Comparison is by [`diff`]: every key present in the expected
//! value must match, extra keys in the actual value are ignored, and arrays
//! must match element by element.

pub mod fixtures;
pub mod instance;

pub use instance::Instance;

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

/// Outcome of one check: `Err` carries a human-readable explanation.
pub type CheckResult = Result<(), String>;

pub struct Check {
    pub name: String,
    pub family: &'static str,
    func: fn() -> CheckResult,
}

/// Results of running a suite.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub passed: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl Report {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}

/// A set of checks run together.
#[derive(Default)]
pub struct Suite {
    checks: Vec<Check>,
}

impl Suite {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn add(&mut self, family: &'static str, name: &str, func: fn() -> CheckResult) {
        self.checks.push(Check {
            name: name.to_string(),
            family,
            func,
        });
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Run every check whose name or family contains `filter` (all when `None`).
    pub fn run(&self, filter: Option<&str>) -> Report {
        let mut report = Report::default();
        let selected = self.checks.iter().filter(|check| match filter {
            Some(pattern) => check.name.contains(pattern) || check.family.contains(pattern),
            None => true,
        });
        for check in selected {
            match (check.func)() {
                Ok(()) => {
                    info!("{} / {}: passed", check.family, check.name);
                    report.passed.push(check.name.clone());
                }
                Err(reason) => {
                    warn!("{} / {}: {}", check.family, check.name, reason);
                    report.failed.push((check.name.clone(), reason));
                }
            }
        }
        report
    }
}

/// Differences between `expected` and `actual`, one line per mismatch.
///
/// ```
/// use algo_trace::harness::diff;
/// use serde_json::json;
///
/// let actual = json!({"accepted": true, "final_state": "q2", "steps": []});
/// assert!(diff(&json!({"accepted": true}), &actual).is_empty());
/// assert_eq!(diff(&json!({"final_state": "q1"}), &actual).len(), 1);
/// ```
pub fn diff(expected: &Value, actual: &Value) -> Vec<String> {
    let mut differences = Vec::new();
    diff_at("$", expected, actual, &mut differences);
    differences
}

fn diff_at(path: &str, expected: &Value, actual: &Value, out: &mut Vec<String>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, value) in expected {
                let at = format!("{}.{}", path, key);
                match actual.get(key) {
                    Some(found) => diff_at(&at, value, found, out),
                    None => out.push(format!("{}: missing, expected {}", at, value)),
                }
            }
        }
        (Value::Array(expected), Value::Array(actual)) if expected.len() == actual.len() => {
            for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
                diff_at(&format!("{}[{}]", path, i), e, a, out);
            }
        }
        _ if expected != actual => out.push(format!("{}: expected {}, got {}", path, expected, actual)),
        _ => {}
    }
}

/// Serialize `actual` and compare it with `expected`.
pub fn expect_json<T: Serialize>(actual: &T, expected: Value) -> CheckResult {
    let actual = serde_json::to_value(actual).map_err(|e| e.to_string())?;
    let differences = diff(&expected, &actual);
    if differences.is_empty() {
        Ok(())
    } else {
        Err(differences.join("; "))
    }
}
