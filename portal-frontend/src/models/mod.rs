pub mod health;
pub mod user;

pub use health::{HealthError, HealthStatus};
pub use user::UserProfile;
