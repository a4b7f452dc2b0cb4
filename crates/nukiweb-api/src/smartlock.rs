// Smartlock endpoints
//
// `GET /smartlock` for the device list, and the three write endpoints
// that answer `204 No Content` on success.

use serde::Serialize;
use tracing::{debug, warn};

use crate::client::NukiWebClient;
use crate::error::Error;
use crate::models::{ActionRequest, Smartlock, SmartlockId};

impl NukiWebClient {
    /// List every smartlock visible to the token, in server order.
    ///
    /// `GET /smartlock`
    pub async fn list_smartlocks(&self) -> Result<Vec<Smartlock>, Error> {
        let smartlocks: Vec<Smartlock> = self.get("smartlock").await?;
        debug!(count = smartlocks.len(), "listed smartlocks");
        Ok(smartlocks)
    }

    /// Trigger a lock action (lock, unlock, unlatch, ...).
    ///
    /// `POST /smartlock/{id}/action` with `{"action": n, "option": m}`
    pub async fn post_action(
        &self,
        smartlock_id: SmartlockId,
        action: u8,
        option: u8,
    ) -> Result<(), Error> {
        debug!(smartlock_id, action, option, "posting action");
        self.post_no_content(
            &format!("smartlock/{smartlock_id}/action"),
            &ActionRequest { action, option },
        )
        .await
        .inspect_err(|e| warn!(smartlock_id, action, error = %e, "action rejected"))
    }

    /// Submit a partial update of the `config` block.
    ///
    /// `POST /smartlock/{id}/config`
    pub async fn update_config<B: Serialize + Sync + ?Sized>(
        &self,
        smartlock_id: SmartlockId,
        fields: &B,
    ) -> Result<(), Error> {
        debug!(smartlock_id, "updating config");
        self.post_no_content(&format!("smartlock/{smartlock_id}/config"), fields)
            .await
            .inspect_err(|e| warn!(smartlock_id, error = %e, "config update rejected"))
    }

    /// Submit a partial update of the `advancedConfig` block.
    ///
    /// `POST /smartlock/{id}/advanced/config`
    pub async fn update_advanced_config<B: Serialize + Sync + ?Sized>(
        &self,
        smartlock_id: SmartlockId,
        fields: &B,
    ) -> Result<(), Error> {
        debug!(smartlock_id, "updating advanced config");
        self.post_no_content(&format!("smartlock/{smartlock_id}/advanced/config"), fields)
            .await
            .inspect_err(|e| warn!(smartlock_id, error = %e, "advanced config update rejected"))
    }

    /// Probe the token by listing smartlocks.
    ///
    /// Best effort: any failure, whatever its cause, yields `false`.
    pub async fn validate_token(&self) -> bool {
        match self.list_smartlocks().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "token validation failed");
                false
            }
        }
    }
}
