/// Rejections decided locally, before anything is sent.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequiredField,
    #[error("Please select at least one contact method.")]
    NoContactMethod,
    #[error("Invalid contact method selection.")]
    InvalidContactMethod,
}
