use super::{ChannelPreference, ContactMethod, ValidationError};

/// Text inputs of the signup form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    PreferredName,
    Email,
    WhatsappNumber,
    TelegramId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub preferred_name: String,
    pub email: String,
    pub whatsapp_number: String,
    preferences: Vec<ContactMethod>,
    pub telegram_id: String,
}

impl FormState {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::PreferredName => self.preferred_name = value,
            Field::Email => self.email = value,
            Field::WhatsappNumber => self.set_whatsapp_number(&value),
            Field::TelegramId => self.telegram_id = value,
        }
    }

    /// The phone widget may hand over digits without the country `+`.
    /// An empty input stays empty so it is still caught as missing.
    pub fn set_whatsapp_number(&mut self, value: &str) {
        self.whatsapp_number = if value.is_empty() || value.starts_with('+') {
            value.to_owned()
        } else {
            format!("+{value}")
        };
    }

    pub fn toggle_preference(&mut self, method: ContactMethod, checked: bool) {
        if checked {
            if !self.preferences.contains(&method) {
                self.preferences.push(method);
            }
        } else {
            self.preferences.retain(|m| *m != method);
        }
    }

    pub fn preferences(&self) -> &[ContactMethod] {
        &self.preferences
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Local checks run before any request, in the order the user sees them.
    pub fn validate(&self) -> Result<ChannelPreference, ValidationError> {
        if self.email.is_empty() || self.whatsapp_number.is_empty() {
            return Err(ValidationError::MissingRequiredField);
        }
        if self.preferences.is_empty() {
            return Err(ValidationError::NoContactMethod);
        }
        ChannelPreference::derive(&self.preferences)
    }

    /// Telegram handle is only forwarded when Telegram is part of the choice.
    pub fn telegram_id_for(&self, channel: ChannelPreference) -> &str {
        match channel {
            ChannelPreference::Whatsapp => "",
            ChannelPreference::Telegram | ChannelPreference::Both => &self.telegram_id,
        }
    }
}
