use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Turns one tokenized row into a header-keyed record.
///
/// Fields are zipped against the header in order and truncated to the
/// shorter of the two, so a short row leaves trailing columns absent and a
/// long row drops its extra fields.
pub trait RecordParser {
    type Output;

    fn parse(headers: &[String], record: &csv::StringRecord) -> Self::Output;
}

impl<S: BuildHasher + Default> RecordParser for HashMap<String, String, S> {
    type Output = Self;

    #[inline]
    fn parse(headers: &[String], record: &csv::StringRecord) -> Self::Output {
        let mut map = HashMap::with_capacity_and_hasher(headers.len(), S::default());
        headers.iter().zip(record.iter()).for_each(|(header, field)| {
            map.insert(header.clone(), field.to_string());
        });
        map
    }
}

impl RecordParser for BTreeMap<String, String> {
    type Output = Self;

    #[inline]
    fn parse(headers: &[String], record: &csv::StringRecord) -> Self::Output {
        headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.clone(), field.to_string()))
            .collect()
    }
}
