//! Runs transforms and records them for identified callers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::history_service::map_history_error;
use crate::domain::ports::{HistoryRepository, SpellingOracle, TransformCommand};
use crate::domain::text::{TransformKind, TransformText};
use crate::domain::{Error, Identity, NewHistoryEntry};

/// [`TransformCommand`] writing one history entry per identified call.
pub struct TextTransformService<R: ?Sized> {
    history: Arc<R>,
    oracle: Arc<dyn SpellingOracle>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> TextTransformService<R> {
    /// Record into `history`, correcting spelling with `oracle` and
    /// timestamping with `clock`.
    pub fn new(history: Arc<R>, oracle: Arc<dyn SpellingOracle>, clock: Arc<dyn Clock>) -> Self {
        Self {
            history,
            oracle,
            clock,
        }
    }
}

#[async_trait]
impl<R> TransformCommand for TextTransformService<R>
where
    R: HistoryRepository + ?Sized,
{
    async fn transform(
        &self,
        caller: &Identity,
        kind: TransformKind,
        text: &TransformText,
    ) -> Result<String, Error> {
        let result = kind.apply(text.as_str(), self.oracle.as_ref());

        if let Identity::Identified(user) = caller {
            let entry = self
                .history
                .append(&NewHistoryEntry {
                    user_id: user.id(),
                    original_text: text.as_str().to_owned(),
                    result_text: result.clone(),
                    kind,
                    created_at: self.clock.utc(),
                })
                .await
                .map_err(map_history_error)?;
            debug!(user_id = %user.id(), entry_id = entry.id.get(), %kind, "history recorded");
        }

        Ok(result)
    }
}
