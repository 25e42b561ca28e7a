use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use domain_timesheet::{
    model::vo::{ApprovalType, SignatureRef},
    service::SignatureStore,
};
use uuid::Uuid;

/// Signature images on the local file system, keyed by content hash.
///
/// A reference is the path relative to `root`: `<timesheet id>/<kind>-<blake3 hex>.png`.
pub struct FileSignatureStore {
    root: PathBuf,
}

impl FileSignatureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, reference: &SignatureRef) -> anyhow::Result<PathBuf> {
        let relative = Path::new(reference.as_str());
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("Illegal signature reference: {reference}");
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl SignatureStore for FileSignatureStore {
    async fn put(
        &self,
        timesheet_id: Uuid,
        kind: ApprovalType,
        image: &[u8],
    ) -> anyhow::Result<SignatureRef> {
        let hash = blake3::hash(image).to_hex();
        let reference = SignatureRef(format!("{timesheet_id}/{kind}-{hash}.png"));
        let path = self.resolve(&reference)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, image)
            .await
            .with_context(|| format!("Could not write signature: {}", path.display()))?;
        tracing::debug!("Stored {kind} signature of timesheet {timesheet_id} at {reference}.");
        Ok(reference)
    }

    async fn get(&self, reference: &SignatureRef) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("Could not read signature: {}", path.display()))
    }

    async fn delete(&self, reference: &SignatureRef) -> anyhow::Result<()> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e)
                .with_context(|| format!("Could not delete signature: {}", path.display())),
            _ => Ok(()),
        }
    }
}
