use serde::{Deserialize, Serialize};
use tower_sessions::Session;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const EMAIL_KEY: &str = "email";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
}

impl UserProfile {
    pub fn guest() -> Self {
        Self {
            email: "guest".to_string(),
        }
    }

    /// Reads the signed-in user's profile from the session, if any.
    pub async fn from_session(session: &Session) -> Option<Self> {
        match session.get::<String>(EMAIL_KEY).await {
            Ok(email) => email.map(|email| Self { email }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read email from session");
                None
            }
        }
    }

    pub fn name(&self) -> String {
        self.email.split('@').next().unwrap_or("User").to_string()
    }

    pub fn initials(&self) -> String {
        let initials: String = self.name().chars().take(2).collect::<String>().to_uppercase();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}
