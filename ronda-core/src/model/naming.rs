//! Descriptive intersection names.
//!
//! The incident street names are deduplicated and sorted before
//! formatting, so re-runs on the same input narrate byte-identically.

use itertools::Itertools;

use crate::StreetNodeId;

/// Formats an intersection name from the sorted, deduplicated names of
/// its incident streets.
pub(crate) fn intersection_name(id: StreetNodeId, names: &[&str]) -> String {
    match names {
        [] => format!("Point {id}"),
        [only] => format!("End of {only}"),
        [a, b] => format!("Corner of {a} and {b}"),
        [head @ .., last] => {
            format!("Junction of {} and {last}", head.iter().join(", "))
        }
    }
}
