use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::watch;

use crate::{
    config::SignupConfig,
    debounce::Debouncer,
    domain::{ContactMethod, EmailSuggestion, Field, FormState, ValidationError},
    subscription_client::{ApiError, FreePlanSignupRequest, SubscriptionClient},
};

/// Sent by the subscription service when the email or phone is taken.
pub const DUPLICATE_ACCOUNT_MESSAGE: &str =
    "A user with this email or phone number already exists. Please sign in to manage your subscription.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Idle,
    Loading,
    Success(Vec<ContactMethod>),
    Error(SignupError),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SignupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A user with this email or phone number already exists. Sign in to your dashboard.")]
    DuplicateAccount { sign_in_url: String },
    #[error("Failed to create subscription. Please try again.")]
    Rejected,
    #[error("{0}")]
    Server(String),
    #[error("An error occurred. Please try again.")]
    Network,
}

impl SignupError {
    fn from_api_error(e: ApiError, sign_in_url: &str) -> Self {
        match e {
            ApiError::HttpStatus { body, .. } => match body.message {
                Some(message) if message == DUPLICATE_ACCOUNT_MESSAGE => {
                    SignupError::DuplicateAccount {
                        sign_in_url: sign_in_url.to_owned(),
                    }
                }
                Some(message) if !message.is_empty() => SignupError::Server(message),
                _ => SignupError::Network,
            },
            ApiError::Network(_) => SignupError::Network,
            // a 2xx we cannot read is not the success marker
            ApiError::Decode(_) => SignupError::Rejected,
        }
    }
}

/// Drives the signup form: field edits, the debounced email typo check and
/// the one request made per valid submit.
pub struct SignupController {
    client: SubscriptionClient,
    config: SignupConfig,
    form: FormState,
    outcome: Arc<watch::Sender<SubmissionOutcome>>,
    suggestion: Arc<watch::Sender<Option<EmailSuggestion>>>,
    email_check: Debouncer,
    // bumped whenever the email changes; a check only publishes for its own value
    email_generation: Arc<AtomicU64>,
}

impl SignupController {
    pub fn new(client: SubscriptionClient, config: SignupConfig) -> Self {
        let email_check = Debouncer::new(config.debounce());
        Self {
            client,
            config,
            form: FormState::default(),
            outcome: Arc::new(watch::Sender::new(SubmissionOutcome::Idle)),
            suggestion: Arc::new(watch::Sender::new(None)),
            email_check,
            email_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        self.outcome.borrow().clone()
    }

    pub fn subscribe_outcome(&self) -> watch::Receiver<SubmissionOutcome> {
        self.outcome.subscribe()
    }

    /// Submit control is disabled while this is true.
    pub fn is_loading(&self) -> bool {
        matches!(*self.outcome.borrow(), SubmissionOutcome::Loading)
    }

    pub fn suggestion(&self) -> Option<EmailSuggestion> {
        self.suggestion.borrow().clone()
    }

    pub fn subscribe_suggestion(&self) -> watch::Receiver<Option<EmailSuggestion>> {
        self.suggestion.subscribe()
    }

    /// A keystroke in one of the text inputs. Email edits restart the typo check.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        if field == Field::Email {
            self.schedule_email_check();
        }
    }

    pub fn toggle_preference(&mut self, method: ContactMethod, checked: bool) {
        self.form.toggle_preference(method, checked);
    }

    /// Replaces every field at once, as a browser autofill or a posted form does.
    /// No typo check is scheduled.
    pub fn fill(&mut self, form: FormState) {
        self.cancel_email_check();
        self.suggestion.send_replace(None);
        self.form = form;
    }

    /// Copies the suggested address into the email field.
    pub fn accept_suggestion(&mut self) -> bool {
        match self.suggestion.send_replace(None) {
            Some(suggestion) => {
                self.cancel_email_check();
                self.form.email = suggestion.suggested_mail;
                true
            }
            None => false,
        }
    }

    /// Stops the pending check and invalidates one that already woke up.
    fn cancel_email_check(&mut self) -> u64 {
        self.email_check.cancel();
        self.email_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn schedule_email_check(&mut self) {
        let generation = self.cancel_email_check();
        self.suggestion.send_replace(None);

        let email = self.form.email.clone();
        let suggestion = self.suggestion.clone();
        let current = self.email_generation.clone();
        self.email_check.schedule(move || {
            let found = EmailSuggestion::check(&email);
            publish_suggestion(&suggestion, &current, generation, found);
        });
    }

    #[tracing::instrument(
        name = "submitting the signup form",
        skip(self),
        fields(email = %self.form.email, channel_preference = tracing::field::Empty)
    )]
    pub async fn submit(&mut self) -> SubmissionOutcome {
        let outcome = match self.try_submit().await {
            Ok(preferences) => {
                tracing::info!("free plan signup succeeded.");
                SubmissionOutcome::Success(preferences)
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "free plan signup failed.");
                SubmissionOutcome::Error(e)
            }
        };
        // replaces Loading on every completed path; a dropped call is reset by the guard
        self.outcome.send_replace(outcome.clone());
        outcome
    }

    async fn try_submit(&mut self) -> Result<Vec<ContactMethod>, SignupError> {
        let channel_preference = self.form.validate()?;
        tracing::Span::current().record("channel_preference", channel_preference.as_str());

        let loading = LoadingGuard::start(self.outcome.clone());

        let request = FreePlanSignupRequest::new(&self.form, channel_preference);
        let response = self.client.free_plan_signup(&request).await;
        loading.disarm();

        match response {
            Ok(body) if body.is_success() => {
                let preferences = self.form.preferences().to_vec();
                self.form.reset();
                Ok(preferences)
            }
            Ok(body) => {
                tracing::error!(
                    "unexpected success body from subscription service: {:?}",
                    body.message
                );
                Err(SignupError::Rejected)
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "subscription service call failed."
                );
                Err(SignupError::from_api_error(e, &self.config.sign_in_url))
            }
        }
    }
}

/// Holds the outcome at `Loading` while a request is in flight. If the submit
/// future is dropped before the reply arrives the outcome falls back to `Idle`.
struct LoadingGuard {
    outcome: Arc<watch::Sender<SubmissionOutcome>>,
    armed: bool,
}

impl LoadingGuard {
    fn start(outcome: Arc<watch::Sender<SubmissionOutcome>>) -> Self {
        outcome.send_replace(SubmissionOutcome::Loading);
        Self {
            outcome,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("signup request abandoned before a reply arrived.");
            self.outcome.send_replace(SubmissionOutcome::Idle);
        }
    }
}

/// Publishes `found` unless the email changed after the check was scheduled.
fn publish_suggestion(
    suggestion: &watch::Sender<Option<EmailSuggestion>>,
    current: &AtomicU64,
    generation: u64,
    found: Option<EmailSuggestion>,
) -> bool {
    suggestion.send_if_modified(|slot| {
        if current.load(Ordering::SeqCst) != generation {
            return false;
        }
        if let Some(s) = &found {
            tracing::debug!("suggesting `{}`.", s.suggested_mail);
        }
        *slot = found;
        true
    })
}
