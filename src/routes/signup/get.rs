use actix_web::{http::StatusCode, web, Responder};
use tera::Tera;

use super::render_page;
use super::SignupPageError;
use crate::{config::SignupConfig, domain::FormState};

pub async fn signup_form(
    templates: web::Data<Tera>,
    config: web::Data<SignupConfig>,
) -> Result<impl Responder, SignupPageError> {
    let page = render_page(
        &templates,
        &config,
        StatusCode::OK,
        &FormState::default(),
        None,
        None,
    )?;
    Ok(page)
}
