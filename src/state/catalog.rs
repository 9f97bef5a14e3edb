use std::sync::Arc;

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinError,
};

use crate::catalog::{Book, Catalog, CatalogClient, CatalogError};

/// Where the current fetch cycle stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Ready(Arc<Catalog>),
    Failed,
}

impl Phase {
    /// The canonical set, empty unless ready.
    pub fn books(&self) -> &[Book] {
        match self {
            Phase::Ready(catalog) => catalog.books(),
            Phase::Loading | Phase::Failed => &[],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("A fetch cycle is already running")]
    InProgress,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Fetch cycle task failed: {0}")]
    Task(#[from] JoinError),
}

/// Holds the published canonical set and runs fetch cycles, one at a time.
///
/// A fetch cycle runs on its own task, so it always reaches `Ready` or
/// `Failed` even when the caller stops waiting for it.
pub struct CatalogStore {
    inner: Arc<CatalogStoreInner>,
}

struct CatalogStoreInner {
    client: CatalogClient,
    phase: RwLock<Phase>,
    fetch_guard: Arc<Mutex<()>>,
}

impl CatalogStore {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            inner: Arc::new(CatalogStoreInner {
                client,
                phase: RwLock::new(Phase::Loading),
                fetch_guard: Arc::new(Mutex::new(())),
            }),
        }
    }

    pub async fn phase(&self) -> Phase {
        self.inner.phase.read().await.clone()
    }

    /// Replaces the published state with the outcome of a fetch cycle.
    pub async fn publish(
        &self,
        result: Result<Catalog, CatalogError>,
    ) -> Result<Arc<Catalog>, CatalogError> {
        self.inner.publish(result).await
    }

    /// Runs a fetch cycle and publishes its outcome.
    ///
    /// Rejected with [`RefreshError::InProgress`] while another cycle runs.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self) -> Result<Arc<Catalog>, RefreshError> {
        let guard = self
            .inner
            .fetch_guard
            .clone()
            .try_lock_owned()
            .map_err(|_| RefreshError::InProgress)?;

        let inner = self.inner.clone();
        let cycle = tokio::spawn(async move {
            let _guard = guard;

            *inner.phase.write().await = Phase::Loading;

            let result = inner.client.fetch_catalog().await;

            inner.publish(result).await
        });

        Ok(cycle.await??)
    }
}

impl CatalogStoreInner {
    async fn publish(
        &self,
        result: Result<Catalog, CatalogError>,
    ) -> Result<Arc<Catalog>, CatalogError> {
        let (next, outcome) = match result {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);

                (Phase::Ready(catalog.clone()), Ok(catalog))
            }
            Err(err) => {
                tracing::error!(%err, "Fetch cycle failed");

                (Phase::Failed, Err(err))
            }
        };

        *self.phase.write().await = next;

        outcome
    }
}
