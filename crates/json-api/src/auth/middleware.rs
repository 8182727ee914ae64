//! Identity middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use storefront_app::{auth::AuthServiceError, domain::owners::GuestToken};

use crate::{auth::Identity, extensions::*, state::State};

/// Header carrying the client-generated guest token.
pub(crate) const GUEST_TOKEN_HEADER: &str = "x-guest-token";

/// Resolve the caller from `Authorization: Bearer` or, failing that, `X-Guest-Token`.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let identity = match resolve_identity(req, depot).await {
        Ok(identity) => identity,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

/// Reject callers that are not admin users. Runs after [`handler`].
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.identity_or_401() {
        Ok(identity) if identity.is_admin() => {}
        Ok(_) => {
            res.render(StatusError::forbidden().brief("Admin access required"));
            ctrl.skip_rest();

            return;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

async fn resolve_identity(req: &Request, depot: &Depot) -> Result<Identity, StatusError> {
    if req.headers().contains_key(AUTHORIZATION) {
        let token = extract_bearer_token(req).ok_or_else(|| {
            StatusError::unauthorized().brief("Missing or invalid Authorization header")
        })?;

        let state = depot.obtain_or_500::<Arc<State>>()?;

        return match state.app.auth.authenticate_bearer(token).await {
            Ok(user) => Ok(user.into()),
            Err(AuthServiceError::NotFound) => {
                Err(StatusError::unauthorized().brief("Invalid API token"))
            }
            Err(source) => {
                error!("failed to validate api token: {source}");

                Err(StatusError::internal_server_error())
            }
        };
    }

    let Some(guest) = req.header::<String>(GUEST_TOKEN_HEADER) else {
        return Err(
            StatusError::unauthorized().brief("Missing Authorization or X-Guest-Token header")
        );
    };

    GuestToken::parse(guest)
        .map(Identity::Guest)
        .map_err(|source| StatusError::unauthorized().brief(source.to_string()))
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
