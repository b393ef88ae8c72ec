use tera::Tera;

use crate::{config::SignupConfig, domain::ContactMethod};

/// What the page shows once a signup went through, one block per platform.
#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SuccessPanel {
    pub whatsapp: Option<WhatsappContact>,
    pub telegram: Option<TelegramChannel>,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WhatsappContact {
    pub contact_number: String,
    pub contact_name: String,
    pub vcard_path: String,
    pub download_name: String,
}

#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TelegramChannel {
    pub channel_url: String,
}

impl SuccessPanel {
    /// `None` for an empty list: nothing is rendered at all.
    pub fn for_preferences(
        preferences: &[ContactMethod],
        config: &SignupConfig,
    ) -> Option<SuccessPanel> {
        if preferences.is_empty() {
            return None;
        }

        let whatsapp = preferences
            .contains(&ContactMethod::Whatsapp)
            .then(|| WhatsappContact {
                contact_number: config.whatsapp_contact_number.clone(),
                contact_name: config.whatsapp_contact_name.clone(),
                vcard_path: config.vcard_path.clone(),
                download_name: config
                    .vcard_path
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_owned(),
            });
        let telegram = preferences
            .contains(&ContactMethod::Telegram)
            .then(|| TelegramChannel {
                channel_url: config.telegram_channel_url.clone(),
            });

        Some(SuccessPanel { whatsapp, telegram })
    }

    pub fn render(&self, templates: &Tera) -> Result<String, tera::Error> {
        let mut context = tera::Context::new();
        context.insert("panel", self);
        templates.render("success_panel.html", &context)
    }
}
