use tracing::{error, warn};

use visitor_types::api::{CreateMessageRequest, Message};

use crate::sync::VisitorBook;

/// Blocking notice shown when either field is blank.
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Blocking notice shown when a submission fails on the network.
pub const SUBMIT_FAILED: &str = "Failed to submit your message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Both calls succeeded; the fields were cleared.
    Submitted(Message),
    /// Validation failed before any network call.
    Invalid(Notice),
    /// A call failed; the fields keep their text for a retry.
    Failed(Notice),
}

/// The "leave a message" form.
#[derive(Debug)]
pub struct MessageForm {
    pub name: String,
    pub content: String,
    state: FormState,
}

impl Default for MessageForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            content: String::new(),
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            FormState::Submitting => "Submitting...",
            _ => "Submit Message",
        }
    }

    /// Count the visit, then post the message.
    ///
    /// If the increment lands and the post fails, the counter stays
    /// incremented; there is no compensating call.
    pub async fn submit(&mut self, book: &VisitorBook) -> SubmitOutcome {
        self.state = FormState::Validating;
        if self.name.trim().is_empty() || self.content.trim().is_empty() {
            self.state = FormState::Idle;
            return SubmitOutcome::Invalid(Notice(FILL_ALL_FIELDS.into()));
        }

        self.state = FormState::Submitting;
        let outcome = self.send(book).await;
        self.state = FormState::Idle;
        outcome
    }

    async fn send(&mut self, book: &VisitorBook) -> SubmitOutcome {
        if let Err(e) = book.increment_visitor_count().await {
            error!("Error submitting message: {}", e);
            return SubmitOutcome::Failed(Notice(SUBMIT_FAILED.into()));
        }

        let req = CreateMessageRequest::new(self.name.clone(), self.content.clone());
        match book.create_message(&req).await {
            Ok(message) => {
                self.name.clear();
                self.content.clear();
                SubmitOutcome::Submitted(message)
            }
            Err(e) => {
                warn!("Visitor count was incremented but the message was not saved");
                error!("Error submitting message: {}", e);
                SubmitOutcome::Failed(Notice(SUBMIT_FAILED.into()))
            }
        }
    }
}
