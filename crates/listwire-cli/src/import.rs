//! Group resolution and subscriber import.

use listwire_config::{ImportConfig, MailerLiteConfig};
use listwire_core::{GroupId, ImportBatch, ListwireError, ListwireResult, Subscriber, SubscriberListService};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Where imported subscribers go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupTarget {
    /// A group that already exists remotely.
    Existing(GroupId),
    /// A group to create by name before importing.
    Create(String),
}

impl GroupTarget {
    /// Picks the target from configuration.
    ///
    /// Precedence: `import.group_id`, then `mailerlite.default_group_id`,
    /// then creating `import.group_name`.
    pub fn resolve(import: &ImportConfig, mailerlite: &MailerLiteConfig) -> ListwireResult<Self> {
        if let Some(id) = import.group_id.clone().or_else(|| mailerlite.default_group_id.clone()) {
            return Ok(Self::Existing(id));
        }

        match import.group_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(Self::Create(name.to_string())),
            _ => Err(ListwireError::configuration(
                "one of import.group_id, mailerlite.default_group_id or import.group_name is required",
            )),
        }
    }
}

impl fmt::Display for GroupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(id) => write!(f, "group {}", id),
            Self::Create(name) => write!(f, "new group '{}'", name),
        }
    }
}

/// Outcome of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub group_id: GroupId,
    pub group_created: bool,
    pub submitted: usize,
    pub failed: usize,
}

impl ImportSummary {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Records(Vec<Subscriber>),
    Batch(ImportBatch<'static>),
}

/// Parses subscriber records: a bare JSON array or `{"subscribers": [...]}`.
pub fn parse_subscribers(json: &str) -> ListwireResult<Vec<Subscriber>> {
    let subscribers = match serde_json::from_str::<ImportFile>(json)? {
        ImportFile::Records(records) => records,
        ImportFile::Batch(batch) => batch.into_subscribers(),
    };

    if subscribers.is_empty() {
        return Err(ListwireError::configuration("import file contains no subscribers"));
    }
    Ok(subscribers)
}

/// Reads and parses an import file.
pub async fn read_subscribers(path: &Path) -> ListwireResult<Vec<Subscriber>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ListwireError::Io(format!("{}: {}", path.display(), e)))?;
    parse_subscribers(&contents)
}

/// Resolves the group, then submits the subscribers.
///
/// Every record lands in the resolved group only: `groups` listed in the
/// import file are dropped in both modes. Bulk mode sends one request and
/// fails as a whole. Single mode sends one request per subscriber and counts
/// failures instead of stopping.
pub async fn run_import(
    service: &dyn SubscriberListService,
    target: GroupTarget,
    subscribers: &[Subscriber],
    single: bool,
) -> ListwireResult<ImportSummary> {
    if subscribers.is_empty() {
        return Err(ListwireError::configuration("no subscribers to import"));
    }

    let (group_id, group_created) = match target {
        GroupTarget::Existing(id) => (id, false),
        GroupTarget::Create(name) => (service.try_create_group(&name).await?, true),
    };

    let subscribers = without_listed_groups(subscribers);
    info!(%group_id, group_created, count = subscribers.len(), single, "Starting import");

    let failed = if single {
        let mut failed = 0;
        for subscriber in &subscribers {
            let result = service
                .try_add_subscriber_to_group(&subscriber.email, &group_id, subscriber.fields.clone())
                .await;
            if let Err(e) = result {
                warn!(email = %subscriber.email, status = ?e.status(), "Subscriber not added: {}", e);
                failed += 1;
            }
        }
        failed
    } else {
        service
            .try_bulk_add_subscribers_to_group(&subscribers, &group_id)
            .await?;
        0
    };

    Ok(ImportSummary {
        group_id,
        group_created,
        submitted: subscribers.len(),
        failed,
    })
}

fn without_listed_groups(subscribers: &[Subscriber]) -> Vec<Subscriber> {
    let listed = subscribers.iter().filter(|s| !s.groups.is_empty()).count();
    if listed > 0 {
        warn!(records = listed, "Ignoring groups listed in the import file");
    }
    subscribers.iter().map(Subscriber::without_groups).collect()
}
