//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    auth::{
        AuthServiceError, AuthenticatedUser, IssuedUser, NewUser, generate_api_token,
        hash_api_token, repository::PgAuthRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Create a user together with its first API token.
    ///
    /// The raw token is returned once and never stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed, already registered, or the insert fails.
    pub async fn create_user(&self, user: NewUser) -> Result<IssuedUser, AuthServiceError> {
        if !is_plausible_email(&user.email) {
            return Err(AuthServiceError::InvalidData);
        }

        let token = generate_api_token();

        let mut tx = self.db.begin().await?;

        let user = self.repository.create_user(&mut tx, user).await?;

        self.repository
            .create_api_token(&mut tx, user.uuid, &hash_api_token(&token))
            .await?;

        tx.commit().await?;

        Ok(IssuedUser { user, token })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let token_hash = hash_api_token(bearer_token);

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &token_hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // last_used_at is best-effort.
        if let Err(source) = self.repository.touch_api_token(&mut tx, &token_hash).await {
            warn!("failed to record api token use: {source}");

            return Ok(user);
        }

        tx.commit().await?;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the user owning the given bearer token.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}

fn is_plausible_email(email: &str) -> bool {
    let trimmed = email.trim();

    trimmed.len() == email.len()
        && trimmed
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{auth::UserUuid, test::TestContext};

    use super::*;

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("shopper@example.com"));
        assert!(!is_plausible_email("shopper"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email(" shopper@example.com"));
    }

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx
            .auth
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: "admin@example.com".to_string(),
                is_admin: true,
            })
            .await?;

        let user = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(user.uuid, issued.user.uuid);
        assert!(user.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("sf_unknown").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: "shopper@example.com".to_string(),
                is_admin: false,
            })
            .await?;

        let result = ctx
            .auth
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: "Shopper@Example.com".to_string(),
                is_admin: false,
            })
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
