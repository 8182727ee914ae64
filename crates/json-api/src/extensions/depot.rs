//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::{auth::UserUuid, domain::owners::Owner};

use crate::auth::Identity;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    fn identity_or_401(&self) -> Result<&Identity, StatusError>;

    /// Cart and order owner of the caller.
    fn owner_or_401(&self) -> Result<Owner, StatusError>;

    /// Registered user behind the request; guests are rejected.
    fn user_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&Identity, StatusError> {
        self.obtain::<Identity>()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn owner_or_401(&self) -> Result<Owner, StatusError> {
        self.identity_or_401().map(Identity::owner)
    }

    fn user_or_401(&self) -> Result<UserUuid, StatusError> {
        self.identity_or_401()?
            .user_uuid()
            .ok_or_else(|| StatusError::unauthorized().brief("A registered user is required"))
    }
}
