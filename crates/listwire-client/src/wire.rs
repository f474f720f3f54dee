//! Request and response bodies exchanged with the MailerLite API.

use listwire_core::GroupId;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

/// Statuses accepted by group creation and single-subscriber upserts.
pub(crate) const OK_OR_CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// Statuses accepted by bulk import. 201 is not among them.
pub(crate) const OK_ONLY: &[StatusCode] = &[StatusCode::OK];

#[derive(Debug, Serialize)]
pub(crate) struct CreateGroupRequest<'a> {
    pub name: &'a str,
}

/// MailerLite wraps every resource in a `data` member.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: GroupId,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<GroupId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => GroupId(s),
        RawId::Number(n) => GroupId(n.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_record_accepts_string_id() {
        let envelope: DataEnvelope<GroupRecord> =
            serde_json::from_value(json!({"data": {"id": "g123", "name": "Newsletter"}})).unwrap();
        assert_eq!(envelope.data.id, GroupId::from("g123"));
    }

    #[test]
    fn test_group_record_accepts_numeric_id() {
        let envelope: DataEnvelope<GroupRecord> =
            serde_json::from_value(json!({"data": {"id": 1234567}})).unwrap();
        assert_eq!(envelope.data.id, GroupId::from("1234567"));
    }

    #[test]
    fn test_group_record_requires_id() {
        let result = serde_json::from_value::<DataEnvelope<GroupRecord>>(json!({"data": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_bulk_accepts_fewer_statuses() {
        assert!(OK_OR_CREATED.contains(&StatusCode::CREATED));
        assert!(!OK_ONLY.contains(&StatusCode::CREATED));
    }
}
