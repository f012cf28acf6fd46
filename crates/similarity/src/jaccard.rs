//! Set-overlap similarity for categorical movie attributes.

use std::collections::BTreeSet;

/// Jaccard similarity = |intersection| / |union|
///
/// Two empty sets have similarity 0.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
