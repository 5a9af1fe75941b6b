//! Accomplishment aggregation.

use rxqa_model::{FieldName, FieldTags, TagSet};

/// Merge one submission's detections into the accumulated accomplishments.
///
/// Returns the updated map and a snapshot of `existing` taken before the
/// merge. Every field is present in the updated map, even when it has no
/// tags yet.
pub fn aggregate(existing: &FieldTags, new: &FieldTags) -> (FieldTags, FieldTags) {
    let previous = existing.clone();
    let updated = FieldName::ALL
        .into_iter()
        .map(|field| {
            let mut tags = existing.get(&field).cloned().unwrap_or_default();
            if let Some(detected) = new.get(&field) {
                tags.extend(detected.iter().cloned());
            }
            (field, tags)
        })
        .collect();
    (updated, previous)
}

/// Tags of `field` present in `current` but not in `previous`.
pub fn newly_earned(current: &FieldTags, previous: &FieldTags, field: FieldName) -> TagSet {
    let Some(tags) = current.get(&field) else {
        return TagSet::new();
    };
    match previous.get(&field) {
        Some(before) => tags.difference(before).cloned().collect(),
        None => tags.clone(),
    }
}
