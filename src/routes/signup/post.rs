use std::fmt::Debug;

use actix_web::{http::StatusCode, web, Responder, ResponseError};
use tera::Tera;

use super::render_page;
use crate::{
    config::SignupConfig,
    domain::{ContactMethod, Field, FormState, ValidationError},
    signup_controller::{SignupController, SignupError, SubmissionOutcome},
    subscription_client::SubscriptionClient,
    success_panel::SuccessPanel,
    util::error_chain_fmt,
};

#[derive(serde::Deserialize)]
pub struct FormData {
    #[serde(default)]
    preferred_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    whatsapp_number: String,
    // checkboxes only appear in the body when ticked
    whatsapp: Option<String>,
    telegram: Option<String>,
    #[serde(default)]
    telegram_id: String,
}

impl FormData {
    // a ticked checkbox posts the platform it stands for
    fn preferences(&self) -> Result<Vec<ContactMethod>, ValidationError> {
        [&self.whatsapp, &self.telegram]
            .into_iter()
            .flatten()
            .map(|value| {
                ContactMethod::parse(value).map_err(|e| {
                    tracing::warn!("rejected checkbox value: {e}");
                    ValidationError::InvalidContactMethod
                })
            })
            .collect()
    }
}

impl TryFrom<FormData> for FormState {
    type Error = ValidationError;

    fn try_from(data: FormData) -> Result<Self, Self::Error> {
        let preferences = data.preferences()?;
        let mut form = FormState::default();
        form.set(Field::PreferredName, data.preferred_name);
        form.set(Field::Email, data.email);
        form.set(Field::WhatsappNumber, data.whatsapp_number);
        form.set(Field::TelegramId, data.telegram_id);
        for method in preferences {
            form.toggle_preference(method, true);
        }
        Ok(form)
    }
}

#[tracing::instrument(
    name = "signing up for the free broadcast",
    skip_all,
    fields(email = %form.email)
)]
pub async fn signup(
    form: web::Form<FormData>,
    client: web::Data<SubscriptionClient>,
    config: web::Data<SignupConfig>,
    templates: web::Data<Tera>,
) -> Result<impl Responder, SignupPageError> {
    let posted = match FormState::try_from(form.0) {
        Ok(posted) => posted,
        Err(e) => {
            let e = SignupError::from(e);
            let page = render_page(
                &templates,
                &config,
                status_for(&e),
                &FormState::default(),
                Some(&e),
                None,
            )?;
            return Ok(page);
        }
    };

    let mut controller = SignupController::new(client.get_ref().clone(), config.get_ref().clone());
    controller.fill(posted);

    let page = match controller.submit().await {
        SubmissionOutcome::Success(preferences) => render_page(
            &templates,
            &config,
            StatusCode::OK,
            controller.form(),
            None,
            SuccessPanel::for_preferences(&preferences, &config),
        )?,
        SubmissionOutcome::Error(e) => render_page(
            &templates,
            &config,
            status_for(&e),
            controller.form(),
            Some(&e),
            None,
        )?,
        SubmissionOutcome::Idle | SubmissionOutcome::Loading => render_page(
            &templates,
            &config,
            StatusCode::OK,
            controller.form(),
            None,
            None,
        )?,
    };

    Ok(page)
}

fn status_for(e: &SignupError) -> StatusCode {
    match e {
        SignupError::Validation(_) => StatusCode::BAD_REQUEST,
        SignupError::DuplicateAccount { .. } => StatusCode::CONFLICT,
        SignupError::Rejected | SignupError::Server(_) | SignupError::Network => {
            StatusCode::BAD_GATEWAY
        }
    }
}

#[derive(thiserror::Error)]
pub enum SignupPageError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for SignupPageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignupPageError {
    fn status_code(&self) -> StatusCode {
        match self {
            SignupPageError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
