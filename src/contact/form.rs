use crate::contact::relay::{MailRelay, OutboundMail};
use crate::foundation::error::{FolioError, FolioResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Required-field checks a browser form would enforce before submit.
    pub fn validate(&self) -> FolioResult<()> {
        for field in Field::ALL {
            if self.get(field).trim().is_empty() {
                return Err(FolioError::validation(format!("{} is required", field.as_str())));
            }
        }
        if !self.email.contains('@') {
            return Err(FolioError::validation("email must contain '@'"));
        }
        Ok(())
    }
}

/// A submission that has left the form and awaits the relay's verdict.
#[derive(Debug)]
#[must_use = "a pending submission must be settled"]
pub struct PendingSubmit {
    mail: OutboundMail,
}

impl PendingSubmit {
    pub fn mail(&self) -> &OutboundMail {
        &self.mail
    }
}

/// Contact form state: three fields, a tri-state status and an in-flight flag.
#[derive(Debug)]
pub struct ContactForm {
    recipient: String,
    fields: ContactFields,
    status: SubmitStatus,
    submitting: bool,
}

impl ContactForm {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            fields: ContactFields::default(),
            status: SubmitStatus::Idle,
            submitting: false,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate, mark in flight and reset the status to idle.
    ///
    /// Validation errors leave the form untouched.
    pub fn begin_submit(&mut self) -> FolioResult<PendingSubmit> {
        if self.submitting {
            return Err(FolioError::validation("a submission is already in flight"));
        }
        self.fields.validate()?;
        self.submitting = true;
        self.status = SubmitStatus::Idle;
        Ok(PendingSubmit {
            mail: OutboundMail::compose(&self.fields, &self.recipient),
        })
    }

    /// Apply the relay outcome. The in-flight flag is cleared on every path.
    pub fn settle(&mut self, pending: PendingSubmit, outcome: FolioResult<()>) -> SubmitStatus {
        drop(pending);
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.fields = ContactFields::default();
                self.status = SubmitStatus::Success;
            }
            Err(e) => {
                tracing::warn!("contact submission failed: {e}");
                self.status = SubmitStatus::Error;
            }
        }
        self.status
    }

    /// Submit through `relay` and settle in one step.
    pub fn submit(&mut self, relay: &mut dyn MailRelay) -> FolioResult<SubmitStatus> {
        let pending = self.begin_submit()?;
        let outcome = relay.send(pending.mail());
        Ok(self.settle(pending, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new("me@example.com");
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Message, "Hi");
        form
    }

    #[test]
    fn missing_field_is_rejected_without_state_change() {
        let mut form = filled();
        form.set_field(Field::Message, "   ");
        let err = form.begin_submit().unwrap_err();
        assert!(err.to_string().contains("message is required"));
        assert!(!form.is_submitting());
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn email_needs_at_sign() {
        let mut form = filled();
        form.set_field(Field::Email, "ada.example.com");
        assert!(form.begin_submit().is_err());
    }

    #[test]
    fn in_flight_window_is_observable() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(pending.mail().to_email, "me@example.com");
        assert!(form.begin_submit().is_err());

        assert_eq!(form.settle(pending, Ok(())), SubmitStatus::Success);
        assert!(!form.is_submitting());
        assert_eq!(form.fields(), &ContactFields::default());
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = filled();
        let mut relay = |_: &OutboundMail| -> FolioResult<()> { Err(FolioError::relay("503")) };
        assert_eq!(form.submit(&mut relay).unwrap(), SubmitStatus::Error);
        assert!(!form.is_submitting());
        assert_eq!(form.field(Field::Name), "Ada");
        assert_eq!(form.field(Field::Message), "Hi");
    }

    #[test]
    fn retry_after_failure_resets_status_to_idle_while_in_flight() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        form.settle(pending, Err(FolioError::relay("down")));
        assert_eq!(form.status(), SubmitStatus::Error);

        let pending = form.begin_submit().unwrap();
        assert_eq!(form.status(), SubmitStatus::Idle);
        form.settle(pending, Ok(()));
        assert_eq!(form.status(), SubmitStatus::Success);
    }
}
