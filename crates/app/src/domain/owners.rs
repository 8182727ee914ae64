//! Cart and order ownership.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;
use uuid::Uuid;

use crate::auth::UserUuid;

/// Maximum accepted length of a guest token.
pub const GUEST_TOKEN_MAX_LEN: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnerError {
    #[error("guest token must be 1 to {GUEST_TOKEN_MAX_LEN} visible ASCII characters")]
    InvalidGuestToken,

    #[error("exactly one of user or guest owner must be present")]
    AmbiguousOwner,
}

/// Opaque client-generated token identifying an unauthenticated shopper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuestToken(String);

impl GuestToken {
    /// Validate and wrap a client-supplied token.
    ///
    /// # Errors
    ///
    /// Returns [`OwnerError::InvalidGuestToken`] for empty, overlong, or non-printable input.
    pub fn parse(token: impl Into<String>) -> Result<Self, OwnerError> {
        let token = token.into();

        let valid = !token.is_empty()
            && token.len() <= GUEST_TOKEN_MAX_LEN
            && token.bytes().all(|byte| byte.is_ascii_graphic());

        if valid {
            Ok(Self(token))
        } else {
            Err(OwnerError::InvalidGuestToken)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GuestToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Who a cart or order belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    User(UserUuid),
    Guest(GuestToken),
}

impl Owner {
    /// Rebuild an owner from the `(user_uuid, guest_token)` column pair.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one column is set.
    pub fn from_columns(user: Option<Uuid>, guest: Option<String>) -> Result<Self, OwnerError> {
        match (user, guest) {
            (Some(user), None) => Ok(Self::User(UserUuid::from_uuid(user))),
            (None, Some(guest)) => GuestToken::parse(guest).map(Self::Guest),
            (Some(_), Some(_)) | (None, None) => Err(OwnerError::AmbiguousOwner),
        }
    }

    /// The `user_uuid` column value.
    #[must_use]
    pub fn user_uuid(&self) -> Option<Uuid> {
        match self {
            Self::User(user) => Some(user.into_uuid()),
            Self::Guest(_) => None,
        }
    }

    /// The `guest_token` column value.
    #[must_use]
    pub fn guest_token(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Guest(token) => Some(token.as_str()),
        }
    }
}

impl Display for Owner {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::User(user) => write!(f, "user:{user}"),
            Self::Guest(_) => f.write_str("guest"),
        }
    }
}

pub(crate) fn try_get_owner(row: &sqlx::postgres::PgRow) -> Result<Owner, sqlx::Error> {
    use sqlx::Row;

    Owner::from_columns(row.try_get("user_uuid")?, row.try_get("guest_token")?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "user_uuid".to_string(),
            source: Box::new(e),
        }
    })
}
