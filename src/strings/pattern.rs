// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Regular-expression search.
//!
//! An invalid pattern is not an error: it yields `valid == false` with the
//! compiler's message and no matches.

use log::debug;
use regex::Regex;
use serde::Serialize;

/// A match, with character (not byte) offsets; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternSearch {
    pub valid: bool,
    pub message: Option<String>,
    pub matches: Vec<PatternMatch>,
}

/// Find all non-overlapping matches of `pattern` in `text`.
///
/// ```
/// use algo_trace::strings::regex_search;
///
/// let found = regex_search("cat hat bat", "[ch]at");
/// assert!(found.valid);
/// assert_eq!(found.matches.len(), 2);
/// assert_eq!(found.matches[1].start, 4);
/// ```
pub fn regex_search(text: &str, pattern: &str) -> PatternSearch {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!("rejected pattern {:?}: {}", pattern, e);
            return PatternSearch {
                valid: false,
                message: Some(e.to_string()),
                matches: Vec::new(),
            };
        }
    };

    let matches = re
        .find_iter(text)
        .map(|m| {
            let start = text[..m.start()].chars().count();
            let text = m.as_str().to_string();
            PatternMatch {
                start,
                end: start + text.chars().count(),
                text,
            }
        })
        .collect();

    PatternSearch {
        valid: true,
        message: None,
        matches,
    }
}
