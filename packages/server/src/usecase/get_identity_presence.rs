//! UseCase: identity 単位のプレゼンス取得

use std::sync::Arc;

use crate::domain::{Identity, IdentityPresence, PresenceRepository};

pub struct GetIdentityPresenceUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetIdentityPresenceUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, identity: &Identity) -> IdentityPresence {
        self.repository.presence_of(identity).await
    }
}
