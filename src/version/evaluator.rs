//! Update decision on top of release comparison

use std::cmp::Ordering;

use crate::version::compare::compare_releases;

/// Outcome of a single update evaluation.
///
/// `candidate` carries the newer version only when an update is actually
/// available; "already latest" and "could not determine" both leave it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub has_update: bool,
    pub candidate: Option<String>,
}

impl Evaluation {
    fn no_update() -> Self {
        Self {
            has_update: false,
            candidate: None,
        }
    }
}

/// Decide whether `latest` is an update over `current`.
///
/// An absent `latest` means no update can be claimed without a reference
/// point. Otherwise an update is reported exactly when `current` compares
/// strictly less than `latest`.
pub fn evaluate(current: &str, latest: Option<&str>) -> Evaluation {
    let Some(latest) = latest else {
        return Evaluation::no_update();
    };

    match compare_releases(current, latest) {
        Ordering::Less => Evaluation {
            has_update: true,
            candidate: Some(latest.to_string()),
        },
        Ordering::Equal | Ordering::Greater => Evaluation::no_update(),
    }
}
