//! Handler state injected into every request's depot.

use std::sync::Arc;

use jiff::Timestamp;
use storefront_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) started_at: Timestamp,
}

impl State {
    /// Wrap `app` for injection, stamping the process start time.
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            app,
            started_at: Timestamp::now(),
        })
    }
}
