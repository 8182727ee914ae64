//! Resolved caller identity.

use storefront_app::{
    auth::{AuthenticatedUser, UserUuid},
    domain::owners::{GuestToken, Owner},
};

/// Who is calling: a registered user (bearer token) or a guest (`X-Guest-Token`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Identity {
    User { uuid: UserUuid, is_admin: bool },
    Guest(GuestToken),
}

impl Identity {
    /// The owner carts and orders are scoped to.
    pub(crate) fn owner(&self) -> Owner {
        match self {
            Self::User { uuid, .. } => Owner::User(*uuid),
            Self::Guest(token) => Owner::Guest(token.clone()),
        }
    }

    pub(crate) fn user_uuid(&self) -> Option<UserUuid> {
        match self {
            Self::User { uuid, .. } => Some(*uuid),
            Self::Guest(_) => None,
        }
    }

    pub(crate) fn is_admin(&self) -> bool {
        matches!(self, Self::User { is_admin: true, .. })
    }

    /// Caller class for logs and spans. Never includes the token or uuid.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::User { is_admin: true, .. } => "admin",
            Self::User { .. } => "user",
            Self::Guest(_) => "guest",
        }
    }
}

impl From<AuthenticatedUser> for Identity {
    fn from(user: AuthenticatedUser) -> Self {
        Self::User {
            uuid: user.uuid,
            is_admin: user.is_admin,
        }
    }
}
