use crate::models::RegistrationDraft;

/// Registration events: requests from the form and facts from the
/// collaborators.
///
/// Application-level failures arrive as facts so the machine can route
/// recovery; a rejection and a transport failure are separate events
/// because they must never be conflated in messaging.
#[derive(Debug, Clone)]
pub enum RegistrationEvent {
    /// The signup form was submitted.
    SubmitRequested {
        draft: RegistrationDraft,
        confirmation: String,
    },

    /// Registrar accepted the draft and produced passcode material.
    RegistrarAccepted { otp: String },

    /// Registrar declined, with the server-reported reason when it gave one.
    RegistrarRejected { reason: Option<String> },

    /// Registrar could not be reached.
    RegistrarUnreachable { message: String },

    /// The user entered a passcode into the challenge dialog.
    CodeEntered { code: String },

    /// Verifier exchanged the confirmed passcode for a long-lived token.
    TokenIssued { token: String },

    /// Verifier declined the passcode.
    VerificationRejected { reason: Option<String> },

    /// Verifier could not be reached.
    VerifierUnreachable { message: String },

    /// Status lookup answered whether this identity is first-time.
    StatusResolved { is_new_user: bool },

    /// Status lookup failed; the session stays valid.
    StatusUnavailable { message: String },

    /// The challenge dialog was dismissed before verification.
    Dismissed,
}
