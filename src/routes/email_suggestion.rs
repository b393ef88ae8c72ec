use actix_web::{web, Responder};

use crate::domain::EmailSuggestion;

#[derive(serde::Deserialize)]
pub struct Parameters {
    email: String,
}

/// Typo check the page calls once the email input has been quiet for a while.
/// Answers `null` when there is nothing to suggest.
#[tracing::instrument(name = "checking email for typos", skip_all)]
pub async fn email_suggestion(parameters: web::Query<Parameters>) -> impl Responder {
    web::Json(EmailSuggestion::check(&parameters.email))
}
