use std::{fmt::Debug, time::Duration};

use reqwest::StatusCode;

use crate::{
    domain::{ChannelPreference, FormState},
    util::error_chain_fmt,
};

/// `message` the service sends back once the free plan exists.
pub const SUCCESS_MESSAGE: &str = "Free subscription created successfully";

#[derive(Clone, Debug)]
pub struct SubscriptionClient {
    client: reqwest::Client,
    base_url: String,
}

impl SubscriptionClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn from_config(config: &crate::config::Config) -> reqwest::Result<Self> {
        let api_config = &config.subscription_api;
        Self::new(&api_config.base_url, api_config.timeout())
    }

    /// An unparsable base url surfaces as [`ApiError::Network`] on the first call.
    #[tracing::instrument(
        name = "requesting free plan signup",
        skip_all,
        fields(channel_preference = %request.channel_preference.as_str())
    )]
    pub async fn free_plan_signup(
        &self,
        request: &FreePlanSignupRequest<'_>,
    ) -> Result<ApiMessage, ApiError> {
        let url = format!("{}/subscriptions/free-plan-signup", self.base_url);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Network)?;
        tracing::info!("subscription service responded with {status}.");

        if !status.is_success() {
            // error bodies are advisory, a missing or foreign shape just has no message
            let body = serde_json::from_slice::<ApiMessage>(&body).unwrap_or_default();
            return Err(ApiError::HttpStatus { status, body });
        }

        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FreePlanSignupRequest<'a> {
    pub preferred_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub channel_preference: ChannelPreference,
    pub telegram_id: &'a str,
}

impl<'a> FreePlanSignupRequest<'a> {
    pub fn new(form: &'a FormState, channel_preference: ChannelPreference) -> Self {
        Self {
            preferred_name: &form.preferred_name,
            email: &form.email,
            phone_number: &form.whatsapp_number,
            channel_preference,
            telegram_id: form.telegram_id_for(channel_preference),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn is_success(&self) -> bool {
        self.message.as_deref() == Some(SUCCESS_MESSAGE)
    }
}

#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("failed to reach the subscription service.")]
    Network(#[source] reqwest::Error),
    #[error("subscription service responded with {status}.")]
    HttpStatus { status: StatusCode, body: ApiMessage },
    #[error("failed to decode the subscription service response.")]
    Decode(#[source] serde_json::Error),
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
