use tracing::debug;

use super::commands::RegistrationCommand;
use super::events::RegistrationEvent;
use crate::guard::Route;
use crate::machine::Machine;
use crate::models::{OtpChallenge, RegistrationDraft};

/// Where one registration session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// Collecting form input.
    Entering,
    /// Registrar call in flight; the form is disabled.
    Submitting,
    /// Challenge open, waiting for the user to enter the passcode.
    AwaitingOtp,
    /// Verifier call in flight.
    Verifying,
    /// Token issued and stored.
    Authenticated,
}

/// Decides how registration reacts to each event.
///
/// Pure: all IO happens in the effect. The machine owns the draft and the
/// challenge for the lifetime of the session; both are discarded on failure
/// or abandonment, and the challenge is consumed the moment a token is
/// issued so a replayed entry can never authorize a second one. Sequencing
/// falls out of the states: a verifier command is only decidable from
/// `AwaitingOtp`, which only the registrar fact reaches.
pub struct RegistrationMachine {
    state: RegistrationState,
    draft: Option<RegistrationDraft>,
    challenge: Option<OtpChallenge>,
    destination: Option<Route>,
}

impl RegistrationMachine {
    pub fn new() -> Self {
        Self {
            state: RegistrationState::Entering,
            draft: None,
            challenge: None,
            destination: None,
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    /// Where the authenticated user should land, once the status lookup has
    /// settled it.
    pub fn destination(&self) -> Option<Route> {
        self.destination
    }

    pub fn challenge(&self) -> Option<&OtpChallenge> {
        self.challenge.as_ref()
    }

    /// Back to a blank form. The draft and challenge are abandoned.
    fn reset(&mut self) {
        self.state = RegistrationState::Entering;
        self.draft = None;
        self.challenge = None;
    }
}

impl Default for RegistrationMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine for RegistrationMachine {
    type Event = RegistrationEvent;
    type Command = RegistrationCommand;

    fn decide(&mut self, event: &RegistrationEvent) -> Option<RegistrationCommand> {
        use RegistrationState::*;

        match (self.state, event) {
            (Entering, RegistrationEvent::SubmitRequested { draft, confirmation }) => {
                if draft.validate(confirmation).is_err() {
                    // Submission stays blocked; no registrar call goes out.
                    return None;
                }
                self.draft = Some(draft.clone());
                self.state = Submitting;
                Some(RegistrationCommand::CallRegistrar {
                    draft: draft.clone(),
                })
            }

            (Submitting, RegistrationEvent::RegistrarAccepted { otp }) => {
                self.challenge = Some(OtpChallenge::new(otp.clone()));
                self.state = AwaitingOtp;
                None
            }

            (Submitting, RegistrationEvent::RegistrarRejected { .. })
            | (Submitting, RegistrationEvent::RegistrarUnreachable { .. }) => {
                // The form is cleared; the user starts over.
                self.reset();
                None
            }

            (AwaitingOtp, RegistrationEvent::CodeEntered { code }) => {
                let challenge = self.challenge.as_ref()?;
                if !challenge.matches(code) {
                    debug!("passcode mismatch; challenge stays open");
                    return None;
                }
                let email = self.draft.as_ref()?.email.clone();
                self.state = Verifying;
                Some(RegistrationCommand::CallVerifier {
                    email,
                    code: code.clone(),
                })
            }

            (Verifying, RegistrationEvent::TokenIssued { token }) => {
                if let Some(challenge) = self.challenge.as_mut() {
                    challenge.consume();
                }
                // The draft served its purpose; only the consumed challenge
                // marker stays behind.
                self.draft = None;
                self.state = Authenticated;
                Some(RegistrationCommand::LookupStatus {
                    token: token.clone(),
                })
            }

            (Verifying, RegistrationEvent::VerificationRejected { .. })
            | (Verifying, RegistrationEvent::VerifierUnreachable { .. }) => {
                // Challenge stays open; the user may retry.
                self.state = AwaitingOtp;
                None
            }

            (Authenticated, RegistrationEvent::StatusResolved { is_new_user }) => {
                self.destination = Some(if *is_new_user {
                    Route::Onboarding
                } else {
                    Route::Dashboard
                });
                None
            }

            (Authenticated, RegistrationEvent::StatusUnavailable { .. }) => {
                // Session stays valid; default landing flow.
                self.destination = Some(Route::Dashboard);
                None
            }

            (AwaitingOtp, RegistrationEvent::Dismissed) => {
                self.reset();
                None
            }

            // Everything else is out of order for the current state and is
            // ignored: late facts, replayed entries, re-entrant submits.
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RegistrationDraft {
        RegistrationDraft::new("Al", "al@x.com", "Abcdef1!")
    }

    fn submit() -> RegistrationEvent {
        RegistrationEvent::SubmitRequested {
            draft: draft(),
            confirmation: "Abcdef1!".to_string(),
        }
    }

    #[test]
    fn test_invalid_draft_never_reaches_the_registrar() {
        let mut machine = RegistrationMachine::new();
        let command = machine.decide(&RegistrationEvent::SubmitRequested {
            draft: RegistrationDraft::new("Al", "al@x.com", "weak"),
            confirmation: "weak".to_string(),
        });

        assert!(command.is_none());
        assert_eq!(machine.state(), RegistrationState::Entering);
    }

    #[test]
    fn test_valid_submit_calls_registrar_once() {
        let mut machine = RegistrationMachine::new();

        let command = machine.decide(&submit());
        assert!(matches!(
            command,
            Some(RegistrationCommand::CallRegistrar { .. })
        ));
        assert_eq!(machine.state(), RegistrationState::Submitting);

        // Re-entrant submit while the call is in flight is ignored.
        assert!(machine.decide(&submit()).is_none());
        assert_eq!(machine.state(), RegistrationState::Submitting);
    }

    #[test]
    fn test_registrar_rejection_clears_the_form() {
        let mut machine = RegistrationMachine::new();
        machine.decide(&submit());

        machine.decide(&RegistrationEvent::RegistrarRejected {
            reason: Some("Email already registered".to_string()),
        });

        assert_eq!(machine.state(), RegistrationState::Entering);
        assert!(machine.challenge().is_none());
    }

    #[test]
    fn test_mismatched_code_keeps_the_challenge_open() {
        let mut machine = RegistrationMachine::new();
        machine.decide(&submit());
        machine.decide(&RegistrationEvent::RegistrarAccepted {
            otp: "482913".to_string(),
        });
        assert_eq!(machine.state(), RegistrationState::AwaitingOtp);

        let command = machine.decide(&RegistrationEvent::CodeEntered {
            code: "000000".to_string(),
        });
        assert!(command.is_none());
        assert_eq!(machine.state(), RegistrationState::AwaitingOtp);

        // Retry with the right code still works.
        let command = machine.decide(&RegistrationEvent::CodeEntered {
            code: "482913".to_string(),
        });
        assert!(matches!(
            command,
            Some(RegistrationCommand::CallVerifier { .. })
        ));
        assert_eq!(machine.state(), RegistrationState::Verifying);
    }

    #[test]
    fn test_token_issuance_consumes_the_challenge() {
        let mut machine = RegistrationMachine::new();
        machine.decide(&submit());
        machine.decide(&RegistrationEvent::RegistrarAccepted {
            otp: "482913".to_string(),
        });
        machine.decide(&RegistrationEvent::CodeEntered {
            code: "482913".to_string(),
        });

        let command = machine.decide(&RegistrationEvent::TokenIssued {
            token: "tok-1".to_string(),
        });
        assert!(matches!(
            command,
            Some(RegistrationCommand::LookupStatus { .. })
        ));
        assert_eq!(machine.state(), RegistrationState::Authenticated);
        assert!(machine.challenge().is_some_and(OtpChallenge::is_consumed));

        // A replayed entry against the consumed challenge issues nothing.
        let command = machine.decide(&RegistrationEvent::CodeEntered {
            code: "482913".to_string(),
        });
        assert!(command.is_none());
        assert_eq!(machine.state(), RegistrationState::Authenticated);
    }

    #[test]
    fn test_verifier_rejection_returns_to_awaiting() {
        let mut machine = RegistrationMachine::new();
        machine.decide(&submit());
        machine.decide(&RegistrationEvent::RegistrarAccepted {
            otp: "482913".to_string(),
        });
        machine.decide(&RegistrationEvent::CodeEntered {
            code: "482913".to_string(),
        });

        machine.decide(&RegistrationEvent::VerificationRejected { reason: None });
        assert_eq!(machine.state(), RegistrationState::AwaitingOtp);
        assert!(machine.challenge().is_some_and(|c| !c.is_consumed()));
    }

    #[test]
    fn test_status_lookup_routes_the_destination() {
        let mut machine = RegistrationMachine::new();
        machine.decide(&submit());
        machine.decide(&RegistrationEvent::RegistrarAccepted {
            otp: "482913".to_string(),
        });
        machine.decide(&RegistrationEvent::CodeEntered {
            code: "482913".to_string(),
        });
        machine.decide(&RegistrationEvent::TokenIssued {
            token: "tok-1".to_string(),
        });

        machine.decide(&RegistrationEvent::StatusResolved { is_new_user: true });
        assert_eq!(machine.destination(), Some(Route::Onboarding));
    }

    #[test]
    fn test_dismissal_abandons_draft_and_challenge() {
        let mut machine = RegistrationMachine::new();
        machine.decide(&submit());
        machine.decide(&RegistrationEvent::RegistrarAccepted {
            otp: "482913".to_string(),
        });

        let command = machine.decide(&RegistrationEvent::Dismissed);
        assert!(command.is_none());
        assert_eq!(machine.state(), RegistrationState::Entering);
        assert!(machine.challenge().is_none());
    }
}
