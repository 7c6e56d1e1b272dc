//! Reload Cache Use Case

use std::sync::Arc;

use crate::domain::repository::CacheReload;
use crate::error::AuthResult;

pub struct ReloadCacheUseCase<D>
where
    D: CacheReload,
{
    caches: Arc<D>,
}

impl<D> ReloadCacheUseCase<D>
where
    D: CacheReload,
{
    pub fn new(caches: Arc<D>) -> Self {
        Self { caches }
    }

    /// Re-read all reference tables. Sessions keep the access they were
    /// issued with; only new logins see the reloaded data.
    pub async fn execute(&self) -> AuthResult<()> {
        if let Err(e) = self.caches.reinit_cache().await {
            tracing::error!(error = %e, "Reference cache reload failed, keeping previous data");
            return Err(e);
        }

        tracing::info!("Reference caches reloaded");
        Ok(())
    }
}
