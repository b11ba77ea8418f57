// Settings reconciler: submit field edits, adopt the server's answer.

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::Dashboard;
use crate::error::CoreError;
use crate::model::{RawInput, SettingField, SettingPayload, SettingValue};
use crate::ui::messages;

impl Dashboard {
    /// A settings widget changed. Sends the new value (or the default
    /// sentinel if the field was marked for reset) and adopts whatever the
    /// server reports as accepted.
    pub async fn field_changed(
        &self,
        name: &str,
        raw: RawInput,
    ) -> Result<SettingValue, CoreError> {
        let payload = self
            .inner
            .state
            .lock()
            .await
            .field_mut(name)?
            .take_payload(&raw);
        self.submit(name, payload).await
    }

    /// Restore one field to the server default.
    pub async fn reset_field(&self, name: &str) -> Result<SettingValue, CoreError> {
        let raw = {
            let mut state = self.inner.state.lock().await;
            let field = state.field_mut(name)?;
            field.mark_default();
            field.current_input()
        };
        self.field_changed(name, raw).await
    }

    /// Restore every field to its default. Each field is submitted as an
    /// independent request; one failure does not stop the others.
    pub async fn reset_all_settings(&self) -> Vec<(String, Result<SettingValue, CoreError>)> {
        let changes: Vec<(String, RawInput)> = {
            let mut state = self.inner.state.lock().await;
            state
                .fields
                .iter_mut()
                .map(|field| {
                    field.mark_default();
                    (field.name().to_owned(), field.current_input())
                })
                .collect()
        };
        info!(fields = changes.len(), "resetting all settings to defaults");

        join_all(changes.into_iter().map(|(name, raw)| async move {
            let result = self.field_changed(&name, raw).await;
            (name, result)
        }))
        .await
    }

    pub async fn setting(&self, name: &str) -> Option<SettingField> {
        let state = self.inner.state.lock().await;
        state.fields.iter().find(|f| f.name() == name).cloned()
    }

    pub async fn settings(&self) -> Vec<SettingField> {
        self.inner.state.lock().await.fields.clone()
    }

    async fn submit(&self, name: &str, payload: SettingPayload) -> Result<SettingValue, CoreError> {
        debug!(field = name, ?payload, "submitting setting");
        match self.inner.client.put_setting(name, &payload).await {
            Ok(resp) => {
                let accepted = self
                    .inner
                    .state
                    .lock()
                    .await
                    .field_mut(name)?
                    .reconcile(&resp.accepted);
                info!(field = name, %accepted, "setting updated");

                self.inner.ui.set_field_value(name, &accepted);
                self.post_settings_message(messages::SETTINGS_UPDATED, true)
                    .await;
                Ok(accepted)
            }
            Err(e) => {
                warn!(field = name, error = %e, "settings update failed");
                if let Ok(field) = self.inner.state.lock().await.field_mut(name) {
                    field.abandon();
                }
                self.post_settings_message(messages::SETTINGS_FAILED, false)
                    .await;
                self.inner.status_loop.run_now();
                Err(e.into())
            }
        }
    }

    /// Show a settings message, replacing any clear still pending from an
    /// earlier acknowledgment. With `self_clearing` the message is erased
    /// after the display period; otherwise it stays until the next one.
    ///
    /// Posting, arming, and the clear itself all run under the `ack_clear`
    /// lock.
    async fn post_settings_message(&self, text: &str, self_clearing: bool) {
        let mut pending = self.inner.ack_clear.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        self.inner.ui.set_settings_message(text);

        if self_clearing {
            let dashboard = self.clone();
            let delay = self.inner.config.settings_ack_display;
            *pending = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _pending = dashboard.inner.ack_clear.lock().await;
                dashboard.inner.ui.set_settings_message("");
            }));
        }
    }
}
