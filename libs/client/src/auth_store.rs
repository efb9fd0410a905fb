//! Session and profile state

use std::sync::Arc;

use async_trait::async_trait;
use common::models::{Identity, User};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::api::JobBoardApi;

/// Read access to the signed-in user's internal id
#[async_trait]
pub trait ProfileAccessor: Send + Sync {
    async fn profile_id(&self) -> Option<Uuid>;
}

/// Point-in-time view of the auth store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSnapshot {
    pub is_authenticated: bool,
    /// Claims reported by the session check
    pub identity: Option<Identity>,
    /// Local user record for the identity
    pub profile: Option<User>,
    pub loading: bool,
}

pub struct AuthStore {
    api: Arc<dyn JobBoardApi>,
    state: RwLock<AuthSnapshot>,
}

impl AuthStore {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Self {
        Self {
            api,
            state: RwLock::new(AuthSnapshot::default()),
        }
    }

    /// Check the session and, when signed in, load the profile
    pub async fn mount(&self) {
        self.state.write().await.loading = true;

        let identity = match self.api.check_auth().await {
            Ok(status) => {
                let mut state = self.state.write().await;
                state.is_authenticated = status.is_authenticated;
                state.identity = status.user;
                if state.is_authenticated {
                    state.identity.clone()
                } else {
                    None
                }
            }
            Err(e) => {
                warn!("Error while checking the auth: {}", e);
                None
            }
        };

        if let Some(identity) = identity {
            self.load_profile(&identity.sub).await;
        }

        self.state.write().await.loading = false;
    }

    /// Fetch the profile for an external subject id
    pub async fn load_profile(&self, auth0_id: &str) {
        match self.api.user_profile(auth0_id).await {
            Ok(user) => {
                self.state.write().await.profile = Some(user);
            }
            Err(e) => warn!("Error getting user profile for {}: {}", auth0_id, e),
        }
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl ProfileAccessor for AuthStore {
    async fn profile_id(&self) -> Option<Uuid> {
        self.state.read().await.profile.as_ref().map(|user| user.id)
    }
}
