//! Mailbox-facing endpoints: message listing, reading, replying, and
//! per-mailbox forwarding rules.

use serde::Serialize;

use mbx_core::entities::{ForwardingRule, Mailbox, Message, MessageSummary};

use crate::client::{ApiClient, Navigator};
use crate::error::ApiError;
use mbx_auth::IdentityBroker;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub body: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingRuleRequest {
    pub recipient_email: String,
    pub is_enabled: bool,
}

impl<B: IdentityBroker, N: Navigator> ApiClient<B, N> {
    /// List the mailboxes visible to the current session.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn mailboxes(&self) -> Result<Vec<Mailbox>, ApiError> {
        self.get_json("/mailboxes").await
    }

    /// List message summaries for one mailbox.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn messages(&self, mailbox_id: i64) -> Result<Vec<MessageSummary>, ApiError> {
        self.get_json(&format!("/mailboxes/{mailbox_id}/messages"))
            .await
    }

    /// Fetch one full message.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn message(&self, mailbox_id: i64, message_id: i64) -> Result<Message, ApiError> {
        self.get_json(&format!("/mailboxes/{mailbox_id}/messages/{message_id}"))
            .await
    }

    /// Reply to a message.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn reply(
        &self,
        mailbox_id: i64,
        message_id: i64,
        body: &ReplyRequest,
    ) -> Result<Message, ApiError> {
        self.post_json(
            &format!("/mailboxes/{mailbox_id}/messages/{message_id}/reply"),
            body,
        )
        .await
    }

    /// List forwarding rules for one mailbox.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn forwarding_rules(&self, mailbox_id: i64) -> Result<Vec<ForwardingRule>, ApiError> {
        self.get_json(&format!("/mailboxes/{mailbox_id}/forwarding"))
            .await
    }

    /// Create a forwarding rule.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn create_forwarding_rule(
        &self,
        mailbox_id: i64,
        rule: &ForwardingRuleRequest,
    ) -> Result<ForwardingRule, ApiError> {
        self.post_json(&format!("/mailboxes/{mailbox_id}/forwarding"), rule)
            .await
    }

    /// Update a forwarding rule in place.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn update_forwarding_rule(
        &self,
        mailbox_id: i64,
        rule_id: i64,
        rule: &ForwardingRuleRequest,
    ) -> Result<ForwardingRule, ApiError> {
        self.put_json(&format!("/mailboxes/{mailbox_id}/forwarding/{rule_id}"), rule)
            .await
    }

    /// Delete a forwarding rule.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete_forwarding_rule(
        &self,
        mailbox_id: i64,
        rule_id: i64,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/mailboxes/{mailbox_id}/forwarding/{rule_id}"))
            .await
    }
}
