// SPDX-License-Identifier: Apache-2.0

use flotilla_model::RecordIdentity;
use std::collections::HashMap;

/// Deduplicates by identity key, keeping the record with the highest
/// ordering key per identity; the first-seen record wins ties. Output is
/// ordered newest first, then by arrival, so equal inputs always produce
/// equal output.
#[must_use]
pub fn merge_by_identity<R, I>(batches: I) -> Vec<R>
where
    R: RecordIdentity,
    I: IntoIterator<Item = Vec<R>>,
{
    let mut picked: Vec<R> = Vec::new();
    let mut by_identity: HashMap<String, usize> = HashMap::new();
    for batch in batches {
        for record in batch {
            match by_identity.get(record.identity_key()) {
                Some(&index) => {
                    if record.ordering_key() > picked[index].ordering_key() {
                        picked[index] = record;
                    }
                }
                None => {
                    by_identity.insert(record.identity_key().to_string(), picked.len());
                    picked.push(record);
                }
            }
        }
    }
    picked.sort_by(|a, b| b.ordering_key().cmp(&a.ordering_key()));
    picked
}
