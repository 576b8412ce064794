//! Driving port for running a text transformation.
use async_trait::async_trait;

use crate::domain::text::{TransformKind, TransformText};
use crate::domain::{Error, Identity};

/// Runs transformations and records them for identified callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransformCommand: Send + Sync {
    /// Transform `text` and, for an identified caller, record the result in
    /// their history before returning it.
    async fn transform(
        &self,
        caller: &Identity,
        kind: TransformKind,
        text: &TransformText,
    ) -> Result<String, Error>;
}
