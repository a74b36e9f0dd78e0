//! Contact form submission and the submit button's feedback states

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ContactConfig;
use crate::error::Result;

/// Named form fields, encoded once as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: BTreeMap<String, String>,
}

impl FormPayload {
    /// Empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; a repeated name keeps the last value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of field `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field was collected
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as a JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (name, value) in iter {
            payload.insert(name, value);
        }
        payload
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The endpoint answered with a 2xx status
    Delivered,
    /// The endpoint answered with any other status
    Rejected {
        /// HTTP status code
        status: u16,
    },
    /// No response: network failure, CORS, bad URL
    Unreachable(String),
}

impl SubmissionOutcome {
    /// Classify an HTTP status
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmissionOutcome::Delivered
        } else {
            SubmissionOutcome::Rejected { status }
        }
    }

    /// Only [`SubmissionOutcome::Delivered`] counts
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Delivered)
    }
}

/// Sends an encoded form somewhere. `fetch` in the browser, scripted in tests.
#[async_trait(?Send)]
pub trait SubmitTransport {
    /// POST `body` as JSON to `endpoint`
    async fn post_json(&self, endpoint: &str, body: String) -> SubmissionOutcome;
}

/// Encode `payload` and send it through `transport`
pub async fn submit<T: SubmitTransport + ?Sized>(
    transport: &T,
    endpoint: &str,
    payload: &FormPayload,
) -> Result<SubmissionOutcome> {
    let body = payload.to_json()?;
    let outcome = transport.post_json(endpoint, body).await;

    match &outcome {
        SubmissionOutcome::Delivered => log::info!("Contact form delivered to {}", endpoint),
        SubmissionOutcome::Rejected { status } => {
            log::warn!("Contact form rejected by {} with status {}", endpoint, status)
        }
        SubmissionOutcome::Unreachable(reason) => {
            log::warn!("Contact form could not reach {}: {}", endpoint, reason)
        }
    }

    Ok(outcome)
}

/// Submit button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPhase {
    /// Original label, no inline background
    Idle,
    /// Waiting for the endpoint
    Pending,
    /// Last submission was delivered
    Succeeded,
    /// Last submission was rejected or never arrived
    Failed,
}

/// What the button should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLook {
    /// Label
    pub text: String,
    /// Inline background; `None` clears it
    pub background: Option<String>,
}

/// Feedback state machine for the submit button.
///
/// Every transition bumps a generation counter. `settle` and `revert` take the token
/// handed out by the previous transition and are ignored once a newer transition has
/// happened, so a slow response or an old revert timer never overwrites a later
/// submission's state.
#[derive(Debug, Clone)]
pub struct ContactButton {
    original_text: String,
    config: ContactConfig,
    phase: ButtonPhase,
    generation: u64,
}

impl ContactButton {
    /// `original_text` is what the button shows when idle
    pub fn new(original_text: impl Into<String>, config: ContactConfig) -> Self {
        Self {
            original_text: original_text.into(),
            config,
            phase: ButtonPhase::Idle,
            generation: 0,
        }
    }

    /// A submission started; returns the token for its `settle`
    pub fn begin(&mut self) -> u64 {
        self.transition(ButtonPhase::Pending)
    }

    /// A submission finished. Returns the token for the revert timer, or `None` if a
    /// newer submission has started since `token` was issued.
    pub fn settle(&mut self, token: u64, outcome: &SubmissionOutcome) -> Option<u64> {
        if token != self.generation {
            log::debug!("Ignoring stale submission result (token {}, now {})", token, self.generation);
            return None;
        }
        let phase = if outcome.is_success() {
            ButtonPhase::Succeeded
        } else {
            ButtonPhase::Failed
        };
        Some(self.transition(phase))
    }

    /// Return to idle if nothing happened since `token`. Returns whether it did.
    pub fn revert(&mut self, token: u64) -> bool {
        if token != self.generation {
            return false;
        }
        self.transition(ButtonPhase::Idle);
        true
    }

    fn transition(&mut self, phase: ButtonPhase) -> u64 {
        self.phase = phase;
        self.generation += 1;
        self.generation
    }

    /// Current phase
    pub fn phase(&self) -> ButtonPhase {
        self.phase
    }

    /// Number of transitions so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Milliseconds the success or error look stays up, as a `setTimeout` delay.
    /// Delays past `i32::MAX` saturate instead of wrapping negative.
    pub fn revert_timeout_ms(&self) -> i32 {
        i32::try_from(self.config.revert_delay_ms).unwrap_or(i32::MAX)
    }

    /// Text and background for the current phase
    pub fn look(&self) -> ButtonLook {
        let (text, background) = match self.phase {
            ButtonPhase::Idle => (&self.original_text, None),
            ButtonPhase::Pending => (&self.config.pending_text, Some(&self.config.pending_color)),
            ButtonPhase::Succeeded => (&self.config.success_text, Some(&self.config.success_color)),
            ButtonPhase::Failed => (&self.config.error_text, Some(&self.config.error_color)),
        };
        ButtonLook {
            text: text.clone(),
            background: background.cloned(),
        }
    }
}
