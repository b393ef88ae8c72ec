use super::ValidationError;

/// A messaging platform the subscriber can tick on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactMethod {
    Whatsapp,
    Telegram,
}

impl ContactMethod {
    /// Checkbox values are the lowercase platform names.
    pub fn parse(s: &str) -> Result<ContactMethod, String> {
        match s {
            "whatsapp" => Ok(ContactMethod::Whatsapp),
            "telegram" => Ok(ContactMethod::Telegram),
            other => Err(format!("`{other}` is not a supported contact method.")),
        }
    }
}

/// What the subscription service is told about the selected platforms.
#[derive(serde::Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelPreference {
    Whatsapp,
    Telegram,
    Both,
}

impl ChannelPreference {
    pub fn derive(preferences: &[ContactMethod]) -> Result<ChannelPreference, ValidationError> {
        let whatsapp = preferences.contains(&ContactMethod::Whatsapp);
        let telegram = preferences.contains(&ContactMethod::Telegram);

        match (whatsapp, telegram) {
            (true, true) => Ok(ChannelPreference::Both),
            (true, false) => Ok(ChannelPreference::Whatsapp),
            (false, true) => Ok(ChannelPreference::Telegram),
            (false, false) => Err(ValidationError::InvalidContactMethod),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelPreference::Whatsapp => "whatsapp",
            ChannelPreference::Telegram => "telegram",
            ChannelPreference::Both => "both",
        }
    }
}
