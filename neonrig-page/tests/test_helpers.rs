/// Test helpers for the contact flow
use async_trait::async_trait;
use neonrig_page::contact::{SubmissionOutcome, SubmitTransport};
use std::cell::RefCell;

/// A request the transport saw
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub endpoint: String,
    pub body: String,
}

/// Transport that answers from a script instead of the network
pub struct ScriptedTransport {
    responses: RefCell<Vec<SubmissionOutcome>>,
    pub sent: RefCell<Vec<SentRequest>>,
}

impl ScriptedTransport {
    /// Answers are handed out in order
    pub fn new(responses: Vec<SubmissionOutcome>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: RefCell::new(responses),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn replying(status: u16) -> Self {
        Self::new(vec![SubmissionOutcome::from_status(status)])
    }
}

#[async_trait(?Send)]
impl SubmitTransport for ScriptedTransport {
    async fn post_json(&self, endpoint: &str, body: String) -> SubmissionOutcome {
        self.sent.borrow_mut().push(SentRequest {
            endpoint: endpoint.to_string(),
            body,
        });
        self.responses
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| SubmissionOutcome::Unreachable("script exhausted".to_string()))
    }
}
