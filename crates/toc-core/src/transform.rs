//! Ordering, id assignment and duplicate detection.

use std::collections::HashMap;

use log::debug;
use toc_core_common::OutputRecord;

/// Orders records by name and assigns 1-based `UniqueId`s in that order.
///
/// The sort is stable, so records sharing a name keep their input order.
/// Every record whose name occurs more than once is marked directed,
/// whatever its own azimuth was.
///
/// # Examples
///
/// ```
/// use toc_core::transform::transform;
/// use toc_core_common::OutputRecord;
///
/// let records = ["b", "a", "b"]
///     .into_iter()
///     .map(|name| OutputRecord { name: name.to_string(), ..OutputRecord::default() })
///     .collect();
///
/// let out = transform(records);
/// let ids: Vec<_> = out.iter().map(|r| (r.name.as_str(), r.unique_id, r.is_directed)).collect();
/// assert_eq!(ids, vec![("a", 1, 0), ("b", 2, 1), ("b", 3, 1)]);
/// ```
#[must_use]
pub fn transform(mut records: Vec<OutputRecord>) -> Vec<OutputRecord> {
    records.sort_by(|a, b| a.name.cmp(&b.name));

    for (index, record) in records.iter_mut().enumerate() {
        record.unique_id = index + 1;
    }

    mark_shared_names_directed(&mut records);
    records
}

/// Forces `IsDirected = 1` on every record whose name is shared.
fn mark_shared_names_directed(records: &mut [OutputRecord]) {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for record in records.iter() {
        *occurrences.entry(record.name.as_str()).or_default() += 1;
    }

    let shared: Vec<bool> = records
        .iter()
        .map(|r| occurrences.get(r.name.as_str()).is_some_and(|&n| n > 1))
        .collect();

    for (record, shared) in records.iter_mut().zip(shared) {
        if shared && record.is_directed == 0 {
            debug!("Marking '{}' directed, name is shared", record.name);
            record.is_directed = 1;
        }
    }
}
