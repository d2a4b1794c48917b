//! Registration with one-time-passcode confirmation.
//!
//! Event-driven: the machine decides, the effect executes, and
//! [`RegistrationFlow`] feeds effect facts back into the machine until no
//! command remains. Within one flow the registrar call and the verification
//! call are strictly sequential because a verifier command is only
//! decidable from `AwaitingOtp`, which only the registrar fact reaches - no
//! locking involved.

mod commands;
mod effects;
mod events;
mod machine;

pub use commands::RegistrationCommand;
pub use effects::{RegistrationDeps, RegistrationEffect};
pub use events::RegistrationEvent;
pub use machine::{RegistrationMachine, RegistrationState};

use std::sync::Arc;

use anyhow::Result;

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::guard::Route;
use crate::machine::{Effect, Machine};
use crate::models::RegistrationDraft;
use crate::notify::Notice;
use crate::session::SessionStore;

/// Drives one registration session end to end.
///
/// The caller owns the pacing: it feeds form submissions, passcode entries
/// and dismissals, and renders the machine state plus any pending notices
/// after each call. While a call is in flight the caller is suspended on
/// the future, which is exactly the "form disabled" window.
pub struct RegistrationFlow {
    machine: RegistrationMachine,
    effect: RegistrationEffect,
    deps: RegistrationDeps,
    notices: Vec<Notice>,
}

impl RegistrationFlow {
    pub fn new(backend: Arc<dyn AuthBackend>, sessions: SessionStore) -> Self {
        Self {
            machine: RegistrationMachine::new(),
            effect: RegistrationEffect,
            deps: RegistrationDeps { backend, sessions },
            notices: Vec::new(),
        }
    }

    /// Submit the signup form.
    pub async fn submit(&mut self, draft: RegistrationDraft, confirmation: &str) -> Result<()> {
        self.dispatch(RegistrationEvent::SubmitRequested {
            draft,
            confirmation: confirmation.to_string(),
        })
        .await
    }

    /// Enter a passcode against the open challenge.
    pub async fn enter_code(&mut self, code: &str) -> Result<()> {
        self.dispatch(RegistrationEvent::CodeEntered {
            code: code.trim().to_string(),
        })
        .await
    }

    /// Dismiss the passcode dialog, abandoning the draft and the challenge.
    /// No cancellation is sent to the remote side.
    pub async fn dismiss(&mut self) -> Result<()> {
        self.dispatch(RegistrationEvent::Dismissed).await
    }

    pub fn state(&self) -> RegistrationState {
        self.machine.state()
    }

    /// Where the authenticated user should land, once known.
    pub fn destination(&self) -> Option<Route> {
        self.machine.destination()
    }

    /// Drain pending notices for rendering.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    async fn dispatch(&mut self, event: RegistrationEvent) -> Result<()> {
        let mut event = event;
        loop {
            let before = self.machine.state();
            let command = self.machine.decide(&event);
            if let Some(notice) = notice_for(&event, before, self.machine.state()) {
                self.notices.push(notice);
            }

            let Some(command) = command else {
                return Ok(());
            };
            event = self.effect.execute(command, &self.deps).await?;
        }
    }
}

/// Terminal outcomes become transient notices. Network failures and
/// application rejections carry different messages by design of the event
/// set; server-reported reasons are shown verbatim.
fn notice_for(
    event: &RegistrationEvent,
    before: RegistrationState,
    after: RegistrationState,
) -> Option<Notice> {
    match event {
        RegistrationEvent::SubmitRequested {
            draft,
            confirmation,
        } if after == RegistrationState::Entering => draft
            .validate(confirmation)
            .err()
            .map(|err| Notice::error(err.to_string())),

        RegistrationEvent::RegistrarAccepted { .. } => {
            Some(Notice::success("Registration successful"))
        }

        RegistrationEvent::RegistrarRejected { reason } => Some(Notice::error(
            reason
                .clone()
                .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
        )),

        RegistrationEvent::RegistrarUnreachable { .. }
        | RegistrationEvent::VerifierUnreachable { .. } => {
            Some(Notice::error("Network error. Please try again."))
        }

        RegistrationEvent::CodeEntered { .. }
            if before == RegistrationState::AwaitingOtp
                && after == RegistrationState::AwaitingOtp =>
        {
            Some(Notice::error(AuthError::ChallengeMismatch.to_string()))
        }

        RegistrationEvent::TokenIssued { .. } => {
            Some(Notice::success("Authentication successful"))
        }

        RegistrationEvent::VerificationRejected { reason } => Some(Notice::error(
            reason
                .clone()
                .unwrap_or_else(|| AuthError::ChallengeMismatch.to_string()),
        )),

        RegistrationEvent::StatusUnavailable { .. } => Some(Notice::error(
            "Could not verify user status. Please try again.",
        )),

        _ => None,
    }
}
