//! Liveness check

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Liveness check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,

    /// Crate version of the running server
    pub version: String,

    /// Whole seconds since the server state was built
    pub uptime_seconds: i64,
}

/// Liveness Handler
///
/// Reports that the process is serving, with its version and uptime. Touches no storage.
#[endpoint(tags("health"), summary = "Liveness check")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uptime_seconds = Timestamp::now().duration_since(state.started_at).as_secs();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    }))
}
