//! Typed access to one document collection.
//!
//! A `Gateway<T>` is bound to a single collection at construction and
//! never crosses into another one. Filters are conjunctions of top-level
//! field equalities; callers key single-document operations on the
//! record identifier so at most one document can match.

use serde_json::{Map, Value};

use super::GatewayError;

/// Conjunction of `field == value` clauses. The empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// Matches every document in the collection.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: &str, value: impl Into<String>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: &str, value: impl Into<String>) -> Self {
        self.clauses.push((field.to_string(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Seed document for an upsert that matched nothing: the filter's
    /// equality fields become fields of the new document.
    pub fn to_document(&self) -> Value {
        let fields: Map<String, Value> = self
            .clauses
            .iter()
            .map(|(field, value)| (field.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(fields)
    }
}

/// Key-filtered access to one collection, decoded into `T`.
pub trait Gateway<T>: Send + Sync {
    /// First document matching `filter`; `NotFound` when none does.
    fn find_one(&self, filter: &Filter) -> Result<T, GatewayError>;

    /// Every matching document in the store's natural order.
    fn find(&self, filter: &Filter) -> Result<Vec<T>, GatewayError>;

    /// `$set` semantics: overlay the fields of `value` onto the matched
    /// document, or insert a new one when nothing matches.
    fn upsert(&self, filter: &Filter, value: &T) -> Result<(), GatewayError>;

    /// Remove the first matching document. Zero matches is not an error.
    fn delete_one(&self, filter: &Filter) -> Result<(), GatewayError>;
}

/// Overlay the top-level fields of `update` onto `target`.
///
/// Fields present in `update` replace those in `target`; fields only in
/// `target` survive. Returns `false` when either side is not an object.
pub fn overlay(target: &mut Value, update: Value) -> bool {
    match (target, update) {
        (Value::Object(target), Value::Object(update)) => {
            for (field, value) in update {
                target.insert(field, value);
            }
            true
        }
        _ => false,
    }
}

/// Collection and field names are interpolated into SQL, so they are
/// restricted to ASCII alphanumerics and underscores.
pub(crate) fn validate_name(kind: &'static str, name: &str) -> Result<(), GatewayError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GatewayError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_replaces_present_and_keeps_absent_fields() {
        let mut stored = json!({ "practiceId": "P1", "name": "Old", "ein": "12-3" });
        assert!(overlay(&mut stored, json!({ "name": "New" })));
        assert_eq!(stored, json!({ "practiceId": "P1", "name": "New", "ein": "12-3" }));
    }

    #[test]
    fn overlay_rejects_non_objects() {
        let mut stored = json!({ "a": "1" });
        assert!(!overlay(&mut stored, json!("scalar")));
        assert_eq!(stored, json!({ "a": "1" }));
    }

    #[test]
    fn filter_seeds_upsert_document() {
        let filter = Filter::eq("taskId", "T1").and("practiceId", "P1");
        assert_eq!(filter.clauses().len(), 2);
        assert_eq!(filter.to_document(), json!({ "taskId": "T1", "practiceId": "P1" }));
        assert!(Filter::all().is_empty());
        assert_eq!(Filter::all().to_document(), json!({}));
    }

    #[test]
    fn names_are_restricted() {
        assert!(validate_name("collection", "practice_collection2").is_ok());
        assert!(validate_name("collection", "").is_err());
        assert!(validate_name("field", "name; DROP TABLE x").is_err());
        assert!(validate_name("field", "a.b").is_err());
    }
}
