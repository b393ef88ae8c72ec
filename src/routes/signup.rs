mod get;
mod post;

pub use get::*;
pub use post::*;

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use anyhow::Context;
use tera::Tera;

use crate::{
    config::SignupConfig,
    domain::{ContactMethod, FormState},
    signup_controller::SignupError,
    success_panel::SuccessPanel,
};

#[derive(serde::Serialize)]
struct FormView<'a> {
    preferred_name: &'a str,
    email: &'a str,
    whatsapp_number: &'a str,
    whatsapp: bool,
    telegram: bool,
    telegram_id: &'a str,
}

impl<'a> From<&'a FormState> for FormView<'a> {
    fn from(form: &'a FormState) -> Self {
        Self {
            preferred_name: &form.preferred_name,
            email: &form.email,
            whatsapp_number: &form.whatsapp_number,
            whatsapp: form.preferences().contains(&ContactMethod::Whatsapp),
            telegram: form.preferences().contains(&ContactMethod::Telegram),
            telegram_id: &form.telegram_id,
        }
    }
}

/// Inline error under the heading. A sign-in link replaces the text for
/// duplicate accounts.
#[derive(serde::Serialize)]
struct ErrorView {
    message: String,
    sign_in_url: Option<String>,
}

impl From<&SignupError> for ErrorView {
    fn from(e: &SignupError) -> Self {
        let sign_in_url = match e {
            SignupError::DuplicateAccount { sign_in_url } => Some(sign_in_url.clone()),
            _ => None,
        };
        Self {
            message: e.to_string(),
            sign_in_url,
        }
    }
}

fn render_page(
    templates: &Tera,
    config: &SignupConfig,
    status: StatusCode,
    form: &FormState,
    error: Option<&SignupError>,
    panel: Option<SuccessPanel>,
) -> Result<HttpResponse, anyhow::Error> {
    let mut context = tera::Context::new();
    context.insert("form", &FormView::from(form));
    context.insert("error", &error.map(ErrorView::from));
    let success_panel = panel
        .map(|panel| panel.render(templates))
        .transpose()
        .context("failed to render the success panel.")?;
    context.insert("success_panel", &success_panel);
    context.insert("debounce_milliseconds", &config.debounce_milliseconds);

    let html = templates
        .render("signup.html", &context)
        .context("failed to render the signup page.")?;

    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(html))
}
