//! Controlled form with validation on submit.

use crate::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    Email,
    Message,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "firstName" => Some(Self::FirstName),
            "email" => Some(Self::Email),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub first_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::FirstName => self.first_name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub email: String,
    pub message: String,
    pub errors: FormErrors,
    pub submitted: bool,
}

impl UiState for FormState {}

impl FormState {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// The submit button stays disabled until both are filled in.
    pub fn can_submit(&self) -> bool {
        !self.first_name.is_empty() && !self.email.is_empty()
    }

    pub fn success_message(&self) -> Option<String> {
        self.submitted.then(|| {
            format!(
                "Thank you, {}! We received your message.",
                self.first_name
            )
        })
    }
}

pub fn validate(state: &FormState) -> FormErrors {
    let mut errors = FormErrors::default();
    if state.first_name.trim().is_empty() {
        errors.first_name = Some("First name is required");
    }
    if state.email.is_empty() {
        errors.email = Some("Email is required");
    } else if !state.email.contains('@') {
        errors.email = Some("Please enter a valid email");
    }
    if state.message.trim().is_empty() {
        errors.message = Some("Message cannot be empty");
    }
    errors
}

#[derive(Debug, Clone)]
pub enum FormIntent {
    Change { field: Field, value: String },
    Submit,
    /// Close the success notice. Field values are kept.
    Dismiss,
}

impl Intent for FormIntent {}

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormState;
    type Intent = FormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Change { field, value } => {
                let mut next = state;
                match field {
                    Field::FirstName => next.first_name = value,
                    Field::Email => next.email = value,
                    Field::Message => next.message = value,
                }
                next
            }
            FormIntent::Submit => {
                let errors = validate(&state);
                if errors.is_empty() {
                    FormState {
                        errors,
                        submitted: true,
                        ..state
                    }
                } else {
                    FormState { errors, ..state }
                }
            }
            FormIntent::Dismiss => FormState {
                submitted: false,
                ..state
            },
        }
    }
}
