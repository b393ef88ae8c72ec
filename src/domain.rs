mod contact_method;
mod email_suggestion;
mod form_state;
mod validation_error;

pub use contact_method::{ChannelPreference, ContactMethod};
pub use email_suggestion::*;
pub use form_state::{Field, FormState};
pub use validation_error::ValidationError;
