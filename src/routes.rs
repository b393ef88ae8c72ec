mod contact_card;
mod email_suggestion;
mod signup;

pub use contact_card::*;
pub use email_suggestion::*;
pub use signup::*;

use actix_web::{HttpResponse, Responder};

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
}
