use std::time::Duration;

use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Config {
    pub web: WebConfig,
    pub subscription_api: SubscriptionApiConfig,
    pub signup: SignupConfig,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Remote service that owns the subscriptions.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct SubscriptionApiConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl SubscriptionApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Everything the signup page shows or links to.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct SignupConfig {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub debounce_milliseconds: u64,
    pub sign_in_url: String,
    pub whatsapp_contact_number: String,
    pub whatsapp_contact_name: String,
    pub telegram_channel_url: String,
    pub vcard_path: String,
}

impl SignupConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_milliseconds)
    }
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            debounce_milliseconds: 600,
            sign_in_url: "https://app.profit365.com/sign-in".into(),
            whatsapp_contact_number: "+1 365-9989-385".into(),
            whatsapp_contact_name: "P365 Stocks & Crypto".into(),
            telegram_channel_url: "https://t.me/p365education_bot".into(),
            vcard_path: "/contact.vcf".into(),
        }
    }
}

/// Reads `config.yaml`, then lets `APP_`-prefixed variables override it,
/// e.g. `APP_SUBSCRIPTION_API__BASE_URL`.
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Config>()
}
