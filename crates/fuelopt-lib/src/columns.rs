//! Header resolution shared by the aircraft and route CSV readers.

use std::collections::BTreeMap;

use csv::StringRecord;

/// Normalize header strings for robust matching.
fn normalize(s: &str) -> String {
    s.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Mapping of canonical field name to its column index in a CSV file.
#[derive(Debug, Clone)]
pub(crate) struct ColumnMap {
    index: BTreeMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolve each canonical field against the headers using its synonyms.
    ///
    /// Returns the list of missing canonical fields on failure.
    pub(crate) fn resolve(
        headers: &StringRecord,
        synonyms: &[(&'static str, &[&str])],
    ) -> std::result::Result<Self, Vec<&'static str>> {
        let normalized_headers: Vec<String> = headers.iter().map(normalize).collect();
        let mut index = BTreeMap::new();

        for (canon, alts) in synonyms {
            'outer: for alt in *alts {
                let alt_n = normalize(alt);
                for (i, h) in normalized_headers.iter().enumerate() {
                    if h == &alt_n {
                        index.insert(*canon, i);
                        break 'outer;
                    }
                }
            }
        }

        let missing: Vec<&'static str> = synonyms
            .iter()
            .map(|(canon, _)| *canon)
            .filter(|c| !index.contains_key(c))
            .collect();

        if missing.is_empty() {
            Ok(Self { index })
        } else {
            Err(missing)
        }
    }

    /// Fetch a trimmed field value from a record.
    pub(crate) fn get<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.index
            .get(field)
            .and_then(|&i| record.get(i))
            .map(str::trim)
    }
}

/// Join header names for error messages.
pub(crate) fn available(headers: &StringRecord) -> String {
    headers.iter().collect::<Vec<_>>().join(", ")
}
