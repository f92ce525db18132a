//! Positional id filters for batched store operations

use super::StoreError;
use crate::core::TrackId;

/// `<column> IN (?1, ?2, ...)` with the ids bound positionally
///
/// Ids never appear inside the SQL text, so quotes or other characters in
/// an id cannot change the meaning of the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFilter {
    selection: String,
    args: Vec<String>,
}

impl IdFilter {
    /// Build a filter over `column` for the given ids, preserving their order
    pub fn new(column: &str, ids: &[TrackId]) -> Result<Self, StoreError> {
        if ids.is_empty() {
            return Err(StoreError::EmptyFilter);
        }

        Ok(Self {
            selection: format!("{} IN ({})", column, placeholders(ids.len())),
            args: ids.iter().map(|id| id.0.clone()).collect(),
        })
    }

    /// The SQL selection expression
    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// Values for the placeholders, in placeholder order
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// `?1,?2,...,?n`
fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_placeholder_per_id() {
        let ids = vec![TrackId::from("a"), TrackId::from("b"), TrackId::from("c")];
        let filter = IdFilter::new("id", &ids).unwrap();

        assert_eq!(filter.selection(), "id IN (?1,?2,?3)");
        assert_eq!(filter.args(), &["a", "b", "c"]);
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_single_id() {
        let filter = IdFilter::new("id", &[TrackId::from("1")]).unwrap();
        assert_eq!(filter.selection(), "id IN (?1)");
    }

    #[test]
    fn test_ids_never_reach_selection_text() {
        let ids = vec![TrackId::from("x') OR 1=1 --")];
        let filter = IdFilter::new("id", &ids).unwrap();
        assert!(!filter.selection().contains("OR"));
        assert_eq!(filter.args()[0], "x') OR 1=1 --");
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert!(matches!(
            IdFilter::new("id", &[]),
            Err(StoreError::EmptyFilter)
        ));
    }
}
