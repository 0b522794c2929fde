//! Administration endpoints. The server enforces the SYSTEM_ADMIN
//! requirement; a 403 from any of these surfaces as [`ApiError::Forbidden`].

use serde::Serialize;

use mbx_core::Role;
use mbx_core::entities::{AdminUser, AuditEntry, Mailbox, WhitelistedSender};

use crate::client::{ApiClient, Navigator};
use crate::error::ApiError;
use mbx_auth::IdentityBroker;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMailboxRequest {
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_mb: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMailboxRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistSenderRequest {
    pub domain: String,
}

impl<B: IdentityBroker, N: Navigator> ApiClient<B, N> {
    /// List all users.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get_json("/admin/users").await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_create_user(&self, user: &CreateUserRequest) -> Result<AdminUser, ApiError> {
        self.post_json("/admin/users", user).await
    }

    /// Trigger a password reset for a user.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_reset_password(&self, user_id: &str) -> Result<(), ApiError> {
        self.post_empty(&format!("/admin/users/{user_id}/reset-password"))
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/admin/users/{user_id}")).await
    }

    /// List all mailboxes, including unassigned ones.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_mailboxes(&self) -> Result<Vec<Mailbox>, ApiError> {
        self.get_json("/admin/mailboxes").await
    }

    /// Provision a mailbox.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_create_mailbox(
        &self,
        mailbox: &CreateMailboxRequest,
    ) -> Result<Mailbox, ApiError> {
        self.post_json("/admin/mailboxes", mailbox).await
    }

    /// Assign a mailbox to a user.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_assign_mailbox(
        &self,
        mailbox_id: i64,
        assignment: &AssignMailboxRequest,
    ) -> Result<Mailbox, ApiError> {
        self.post_json(&format!("/admin/mailboxes/{mailbox_id}/assign"), assignment)
            .await
    }

    /// Delete a mailbox.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_delete_mailbox(&self, mailbox_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/mailboxes/{mailbox_id}")).await
    }

    /// List whitelisted sender domains.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_whitelisted_senders(&self) -> Result<Vec<WhitelistedSender>, ApiError> {
        self.get_json("/admin/whitelist/senders").await
    }

    /// Whitelist a sender domain.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_whitelist_sender(
        &self,
        sender: &WhitelistSenderRequest,
    ) -> Result<WhitelistedSender, ApiError> {
        self.post_json("/admin/whitelist/senders", sender).await
    }

    /// Remove a sender domain from the whitelist.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_remove_whitelisted_sender(&self, domain: &str) -> Result<(), ApiError> {
        self.delete(&format!("/admin/whitelist/senders/{domain}"))
            .await
    }

    /// Fetch the audit log.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn admin_audit_log(&self) -> Result<Vec<AuditEntry>, ApiError> {
        self.get_json("/admin/audit-log").await
    }
}
