use crate::models::RegistrationDraft;

/// Registration commands - IO the machine asks the effect to perform.
#[derive(Debug, Clone)]
pub enum RegistrationCommand {
    /// Submit the draft to the registrar.
    CallRegistrar { draft: RegistrationDraft },

    /// Exchange the confirmed passcode for a token.
    CallVerifier { email: String, code: String },

    /// Ask whether the authenticated identity is first-time.
    LookupStatus { token: String },
}
