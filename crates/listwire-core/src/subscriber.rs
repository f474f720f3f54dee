//! Subscriber records as they travel to the remote list service.

use crate::GroupId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Custom field values keyed by field name (`name`, `last_name`, ...).
pub type SubscriberFields = BTreeMap<String, String>;

/// A contact addressed by email.
///
/// `fields` distinguishes "not supplied" (`None`, omitted from the payload)
/// from "supplied but empty" (`Some` of an empty map, sent as `{}`).
/// `groups` is a set: joining a group twice keeps one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<SubscriberFields>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupId>,
}

impl Subscriber {
    /// Creates a subscriber with no fields and no groups.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            fields: None,
            groups: Vec::new(),
        }
    }

    /// Replaces the field mapping.
    #[must_use]
    pub fn with_fields(mut self, fields: SubscriberFields) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Sets a single field, creating the mapping if needed.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .get_or_insert_with(SubscriberFields::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a group membership.
    #[must_use]
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.join_group(group_id);
        self
    }

    /// Adds a group membership in place. Returns false if already a member.
    pub fn join_group(&mut self, group_id: GroupId) -> bool {
        if self.groups.contains(&group_id) {
            return false;
        }
        self.groups.push(group_id);
        true
    }

    /// Copy of this record with every group membership removed.
    #[must_use]
    pub fn without_groups(&self) -> Self {
        Self {
            email: self.email.clone(),
            fields: self.fields.clone(),
            groups: Vec::new(),
        }
    }

    /// Checks group membership.
    #[must_use]
    pub fn is_member_of(&self, group_id: &GroupId) -> bool {
        self.groups.contains(group_id)
    }
}

/// Body of a bulk import: every record lands in one group in one request.
///
/// Borrows the records when sending and owns them when read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBatch<'a> {
    pub subscribers: Cow<'a, [Subscriber]>,
}

impl<'a> ImportBatch<'a> {
    /// Wraps records without copying them.
    #[must_use]
    pub const fn borrowed(subscribers: &'a [Subscriber]) -> Self {
        Self {
            subscribers: Cow::Borrowed(subscribers),
        }
    }

    /// Returns the records, copying them only if borrowed.
    #[must_use]
    pub fn into_subscribers(self) -> Vec<Subscriber> {
        self.subscribers.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_omitted() {
        let subscriber = Subscriber::new("a@x.com");
        assert_eq!(serde_json::to_value(&subscriber).unwrap(), json!({"email": "a@x.com"}));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let subscriber = Subscriber::new("a@x.com").with_fields(SubscriberFields::new());
        assert_eq!(
            serde_json::to_value(&subscriber).unwrap(),
            json!({"email": "a@x.com", "fields": {}})
        );
    }

    #[test]
    fn test_join_group_is_idempotent() {
        let mut subscriber = Subscriber::new("a@x.com");
        assert!(subscriber.join_group(GroupId::from("g1")));
        assert!(!subscriber.join_group(GroupId::from("g1")));
        assert!(subscriber.join_group(GroupId::from("g2")));
        assert_eq!(subscriber.groups, vec![GroupId::from("g1"), GroupId::from("g2")]);
        assert!(subscriber.is_member_of(&GroupId::from("g2")));
    }

    #[test]
    fn test_with_field_builds_mapping() {
        let subscriber = Subscriber::new("a@x.com")
            .with_field("name", "John")
            .with_field("last_name", "Doe");
        let fields = subscriber.fields.unwrap();
        assert_eq!(fields.get("name").map(String::as_str), Some("John"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_import_record_without_groups_deserializes() {
        let batch: ImportBatch = serde_json::from_value(json!({
            "subscribers": [
                {"email": "subscriber1@email.com", "fields": {"name": "Subscriber", "last_name": "One"}},
                {"email": "subscriber2@email.com"}
            ]
        }))
        .unwrap();

        assert_eq!(batch.subscribers.len(), 2);
        assert!(batch.subscribers[0].groups.is_empty());
        assert!(batch.subscribers[1].fields.is_none());
        assert_eq!(batch.into_subscribers()[0].email, "subscriber1@email.com");
    }

    #[test]
    fn test_borrowed_batch_serializes_records_in_order() {
        let records = vec![Subscriber::new("a@x.com").with_field("name", "A"), Subscriber::new("b@x.com")];
        let batch = ImportBatch::borrowed(&records);
        assert_eq!(batch.subscribers.len(), 2);
        assert_eq!(
            serde_json::to_value(&batch).unwrap(),
            json!({"subscribers": [{"email": "a@x.com", "fields": {"name": "A"}}, {"email": "b@x.com"}]})
        );
    }

    #[test]
    fn test_without_groups_keeps_email_and_fields() {
        let subscriber = Subscriber::new("a@x.com")
            .with_field("name", "A")
            .in_group(GroupId::from("g1"));
        let stripped = subscriber.without_groups();
        assert!(stripped.groups.is_empty());
        assert_eq!(stripped.email, "a@x.com");
        assert_eq!(stripped.fields, subscriber.fields);
    }
}
