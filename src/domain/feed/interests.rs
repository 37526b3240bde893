use crate::domain::content::UserInterestRepository;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

/// Caller identity as resolved by the auth layer, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity(String);

impl UserIdentity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
#[error("interest lookup failed: {0}")]
pub struct InterestLookupError(pub String);

/// Maps an optional caller identity to the categories they declared interest in
#[async_trait]
pub trait InterestResolver: Send + Sync {
    /// Empty for anonymous callers, malformed identities and users with no
    /// recorded interests. Only storage failures are reported as errors.
    async fn resolve(
        &self,
        user: Option<&UserIdentity>,
    ) -> Result<BTreeSet<Uuid>, InterestLookupError>;
}

/// Resolver backed by the stored interest profiles
pub struct ProfileInterestResolver {
    repository: Arc<dyn UserInterestRepository>,
}

impl ProfileInterestResolver {
    pub fn new(repository: Arc<dyn UserInterestRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl InterestResolver for ProfileInterestResolver {
    async fn resolve(
        &self,
        user: Option<&UserIdentity>,
    ) -> Result<BTreeSet<Uuid>, InterestLookupError> {
        let Some(user) = user else {
            return Ok(BTreeSet::new());
        };

        let user_id = match Uuid::parse_str(user.as_str()) {
            Ok(id) => id,
            Err(_) => {
                tracing::debug!(identity = %user.as_str(), "Malformed user identity, no interests");
                return Ok(BTreeSet::new());
            }
        };

        let category_ids = self
            .repository
            .find_category_ids(user_id)
            .await
            .map_err(|e| InterestLookupError(e.to_string()))?;

        Ok(category_ids.into_iter().collect())
    }
}
