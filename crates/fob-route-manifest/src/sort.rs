//! Route-pattern aware ordering.
//!
//! Each `/`-separated segment gets a digit score, the scores are concatenated
//! into one number and the rank is `(segments - 1) / number`. Higher ranks sort
//! first, so literal segments outrank parameters and parameters outrank the
//! `*` wildcard. Equal ranks keep their discovery order.

use std::cmp::Ordering;

fn segment_score(segment: &str) -> &'static str {
    if segment == "*" {
        return "100000000000";
    }
    let Some(param) = segment.strip_prefix(':') else {
        return "1";
    };
    if param.contains('?') {
        "1111"
    } else if param.contains('.') {
        "11"
    } else {
        "111"
    }
}

/// Rank of a single route pattern; larger is more specific.
pub fn rank(pattern: &str) -> f64 {
    let mut digits = String::new();
    let mut segments = 0usize;
    for segment in pattern.split('/') {
        digits.push_str(segment_score(segment));
        segments += 1;
    }

    let value: f64 = digits.parse().unwrap_or(f64::INFINITY);
    (segments - 1) as f64 / value
}

/// Stable, descending-rank sort of route patterns.
pub fn sort_routes<S: AsRef<str>>(routes: &mut [S]) {
    routes.sort_by(|a, b| {
        rank(b.as_ref())
            .partial_cmp(&rank(a.as_ref()))
            .unwrap_or(Ordering::Equal)
    });
}
