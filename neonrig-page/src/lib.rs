//! NeonRig Page - interaction glue for the site's static markup
//!
//! Smooth in-page scrolling, one-way reveal-on-scroll, a looping marquee and the contact
//! form. The decisions live in plain modules; [`dom`] only applies them to the document.

#![warn(missing_docs)]

pub mod config;
pub mod contact;
pub mod error;
pub mod marquee;
pub mod reveal;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::{ContactConfig, PageConfig, RevealConfig};
pub use contact::{
    submit, ButtonLook, ButtonPhase, ContactButton, FormPayload, SubmissionOutcome, SubmitTransport,
};
pub use error::{PageError, Result};
pub use reveal::RevealTracker;
pub use scroll::{anchor_action, AnchorAction};
