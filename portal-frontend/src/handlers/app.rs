use askama::Template;
use axum::response::IntoResponse;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {}
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {}
}
