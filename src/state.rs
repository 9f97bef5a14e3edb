use std::{ops::Deref, sync::Arc};

use crate::{error::ErrorVerbosity, traits::StateProvider, view::Renderer};

mod catalog;

pub use catalog::{CatalogStore, Phase, RefreshError};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, catalog: CatalogStore, renderer: Renderer) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                catalog,
                renderer,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    catalog: CatalogStore,
    renderer: Renderer,
}

impl ApiStateInner {
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

impl StateProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
