use crate::errors::{StoreError, StoreResult};
use crate::models::{ContactRequest, Property, PropertyInterest};
use crate::store::{limits, ListingStore, OrderSpec};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Inputs of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    PropertyInterest,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::PropertyInterest,
        ContactField::Message,
    ];

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ContactField::Name | ContactField::Email | ContactField::Message
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Nome Completo",
            ContactField::Email => "Email",
            ContactField::Phone => "Telefono",
            ContactField::PropertyInterest => "Proprietà di Interesse",
            ContactField::Message => "Messaggio",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Required fields missing: {0:?}")]
    MissingFields(Vec<ContactField>),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("This form has already been submitted")]
    AlreadySubmitted,

    #[error("No submission is in progress")]
    NotSubmitting,

    #[error("Unknown property of interest: {0}")]
    UnknownInterest(String),

    #[error("Submission failed: {0}")]
    Store(#[from] StoreError),
}

/// Where the form is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Fields are editable; `error` holds the message of the last failed
    /// attempt, if any
    Editing { error: Option<String> },
    /// One create-call is in flight; the submit trigger is disabled
    Submitting,
    /// Terminal
    Submitted,
}

/// Raw form input, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub property_interest: String,
    pub message: String,
}

impl ContactFields {
    fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::PropertyInterest => &self.property_interest,
            ContactField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::PropertyInterest => &mut self.property_interest,
            ContactField::Message => &mut self.message,
        }
    }
}

fn optional(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Contact form: Editing → Submitting → Submitted, back to Editing only when
/// the create-call fails.
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: ContactFields,
    state: SubmissionState,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: ContactFields::default(),
            state: SubmissionState::Editing { error: None },
        }
    }

    /// Form opened from a property page, interest already filled in
    pub fn with_preselected(property_id: impl Into<String>) -> Self {
        let mut form = Self::new();
        form.fields.property_interest = property_id.into();
        form
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Message to show next to the form, if the last attempt failed
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Editing { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Whether the submit trigger is enabled
    pub fn can_submit(&self) -> bool {
        matches!(self.state, SubmissionState::Editing { .. })
    }

    fn ensure_editing(&self) -> Result<(), ContactError> {
        match self.state {
            SubmissionState::Editing { .. } => Ok(()),
            SubmissionState::Submitting => Err(ContactError::AlreadySubmitting),
            SubmissionState::Submitted => Err(ContactError::AlreadySubmitted),
        }
    }

    /// Edit one field. Rejected once a submission has started.
    pub fn set_field(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), ContactError> {
        self.ensure_editing()?;
        *self.fields.get_mut(field) = value.into();
        Ok(())
    }

    /// Check required fields and build the request without touching state
    pub fn validate(&self) -> Result<ContactRequest, ContactError> {
        let missing: Vec<ContactField> = ContactField::ALL
            .into_iter()
            .filter(|field| field.is_required() && optional(self.fields.get(*field)).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        let email = self.fields.email.trim();
        if !looks_like_email(email) {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }

        Ok(ContactRequest {
            name: self.fields.name.trim().to_string(),
            email: email.to_string(),
            phone: optional(&self.fields.phone).map(str::to_string),
            property_interest: optional(&self.fields.property_interest)
                .map(|interest| PropertyInterest::from(interest.to_string())),
            message: self.fields.message.trim().to_string(),
        })
    }

    /// Editing → Submitting. Returns the snapshot to send; on validation
    /// failure the form stays in Editing with the error shown and nothing is
    /// sent.
    pub fn begin_submit(&mut self) -> Result<ContactRequest, ContactError> {
        self.ensure_editing()?;

        match self.validate() {
            Ok(request) => {
                self.state = SubmissionState::Submitting;
                Ok(request)
            }
            Err(err) => {
                debug!("Contact submit blocked: {}", err);
                self.state = SubmissionState::Editing {
                    error: Some(err.to_string()),
                };
                Err(err)
            }
        }
    }

    /// Submitting → Submitted on success, Submitting → Editing (fields kept,
    /// error shown) on failure
    pub fn complete_submit(&mut self, outcome: StoreResult<()>) -> Result<(), ContactError> {
        match self.state {
            SubmissionState::Submitting => {}
            SubmissionState::Submitted => return Err(ContactError::AlreadySubmitted),
            SubmissionState::Editing { .. } => return Err(ContactError::NotSubmitting),
        }

        match outcome {
            Ok(()) => {
                self.state = SubmissionState::Submitted;
                Ok(())
            }
            Err(err) => {
                warn!("Contact submission failed: {}", err);
                self.state = SubmissionState::Editing {
                    error: Some(err.to_string()),
                };
                Err(ContactError::Store(err))
            }
        }
    }

    /// Validate, send exactly one create-call, and record its outcome
    pub async fn submit(&mut self, store: &dyn ListingStore) -> Result<(), ContactError> {
        let request = self.begin_submit()?;
        let outcome = store.create(&request).await;
        self.complete_submit(outcome)?;
        info!("Contact request submitted by {}", request.email);
        Ok(())
    }
}

/// Entry of the "property of interest" selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestOption {
    pub value: String,
    pub label: String,
}

/// Selector entries: a general enquiry plus one per known property.
/// Empty when there are no properties, in which case the selector is hidden.
pub fn interest_options(properties: &[Property]) -> Vec<InterestOption> {
    if properties.is_empty() {
        return Vec::new();
    }

    std::iter::once(InterestOption {
        value: PropertyInterest::GENERAL.to_string(),
        label: "Richiesta Generale".to_string(),
    })
    .chain(properties.iter().map(|p| InterestOption {
        value: p.id.clone(),
        label: format!("{} - {}", p.display_title(), p.display_location()),
    }))
    .collect()
}

/// The contact page: a fresh form plus the interest selector fed by the
/// latest listings
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    form: ContactForm,
    options: Vec<InterestOption>,
}

impl ContactPage {
    /// Fetch the listings behind the selector. A failed fetch leaves the
    /// selector empty and the form usable.
    pub async fn load(store: &dyn ListingStore) -> Self {
        let options = match store.list(&OrderSpec::newest_first(), limits::CONTACT).await {
            Ok(properties) => interest_options(&properties),
            Err(err) => {
                warn!("Could not load listings for the contact page: {}", err);
                Vec::new()
            }
        };
        debug!("Contact page ready with {} interest options", options.len());

        Self {
            form: ContactForm::new(),
            options,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn options(&self) -> &[InterestOption] {
        &self.options
    }

    /// Pick an entry of the selector by value. An empty value clears the
    /// choice; anything not offered is rejected and the form is untouched.
    pub fn select_interest(&mut self, value: &str) -> Result<(), ContactError> {
        let value = value.trim();
        if !value.is_empty() && !self.options.iter().any(|option| option.value == value) {
            return Err(ContactError::UnknownInterest(value.to_string()));
        }
        self.form.set_field(ContactField::PropertyInterest, value)
    }
}
