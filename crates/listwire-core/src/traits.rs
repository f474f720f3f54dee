//! Service seam between the import tooling and a concrete list provider.

use crate::{GroupId, ListwireResult, Subscriber, SubscriberFields};
use async_trait::async_trait;

/// Operations a remote subscriber-list service offers.
///
/// Every method is one request against the remote service. Nothing is
/// retried or cached; a non-accepted status is returned as
/// [`ListwireError::Rejected`](crate::ListwireError::Rejected).
#[async_trait]
pub trait SubscriberListService: Send + Sync {
    /// Creates a named group and returns its server-assigned ID.
    async fn try_create_group(&self, group_name: &str) -> ListwireResult<GroupId>;

    /// Adds (or updates) one subscriber and places it in `group_id`.
    async fn try_add_subscriber_to_group(
        &self,
        email: &str,
        group_id: &GroupId,
        fields: Option<SubscriberFields>,
    ) -> ListwireResult<()>;

    /// Imports a batch of subscribers into `group_id` in a single request.
    async fn try_bulk_add_subscribers_to_group(
        &self,
        subscribers: &[Subscriber],
        group_id: &GroupId,
    ) -> ListwireResult<()>;

    /// Adds a subscriber with its own group memberships plus any
    /// provider-level default group.
    async fn try_add_subscriber(&self, subscriber: Subscriber) -> ListwireResult<()>;
}
