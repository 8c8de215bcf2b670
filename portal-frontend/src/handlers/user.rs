use crate::models::UserProfile;
use askama::Template;
use axum::response::IntoResponse;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: UserProfile,
    pub current_page: &'static str,
}

pub async fn dashboard_handler(session: Session) -> impl IntoResponse {
    let user = UserProfile::from_session(&session)
        .await
        .unwrap_or_else(UserProfile::guest);

    DashboardTemplate {
        user,
        current_page: "dashboard",
    }
}
