//! Set arithmetic behind the add/remove commands. One algorithm serves both
//! directions: `diff_set(existing, requested)` yields the genuinely new
//! elements to append, `diff_set(requested, existing)` yields the survivors
//! of a removal.

/// Returns the elements of `candidate` that are structurally absent from
/// `reference`, preserving `candidate`'s order.
///
/// Comparison is pairwise and exact; nothing is sorted or deduplicated, so a
/// candidate list that already contains duplicates propagates them into the
/// result. Collections stay in the single-digit-to-tens range and this runs
/// only at configuration-edit time, so the quadratic scan is fine.
pub fn diff_set<T: PartialEq + Clone>(reference: &[T], candidate: &[T]) -> Vec<T> {
    candidate
        .iter()
        .filter(|item| !reference.contains(item))
        .cloned()
        .collect()
}
