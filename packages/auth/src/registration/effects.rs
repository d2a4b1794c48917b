use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::commands::RegistrationCommand;
use super::events::RegistrationEvent;
use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::machine::Effect;
use crate::session::{Session, SessionStore};

/// Collaborators the registration effect executes against.
#[derive(Clone)]
pub struct RegistrationDeps {
    pub backend: Arc<dyn AuthBackend>,
    pub sessions: SessionStore,
}

/// The IO half of the registration machine.
///
/// Remote failures come back as fact events, never as silent errors: a
/// rejection and an unreachable service produce different facts so the
/// machine and the notices can tell them apart.
pub struct RegistrationEffect;

#[async_trait]
impl Effect<RegistrationCommand, RegistrationDeps> for RegistrationEffect {
    type Event = RegistrationEvent;

    async fn execute(
        &self,
        command: RegistrationCommand,
        deps: &RegistrationDeps,
    ) -> Result<RegistrationEvent> {
        match command {
            RegistrationCommand::CallRegistrar { draft } => {
                debug!(email = %draft.email, "submitting registration");

                match deps
                    .backend
                    .register(&draft.display_name, &draft.email, &draft.password)
                    .await
                {
                    Ok(receipt) => {
                        info!(email = %draft.email, "registrar accepted; challenge open");
                        Ok(RegistrationEvent::RegistrarAccepted { otp: receipt.otp })
                    }
                    Err(AuthError::Unreachable(message)) => {
                        warn!(%message, "registrar unreachable");
                        Ok(RegistrationEvent::RegistrarUnreachable { message })
                    }
                    Err(AuthError::Rejected { reason }) => {
                        info!("registrar rejected the draft");
                        Ok(RegistrationEvent::RegistrarRejected { reason })
                    }
                    Err(other) => Err(other.into()),
                }
            }

            RegistrationCommand::CallVerifier { email, code } => {
                debug!(%email, "confirming passcode");

                match deps.backend.verify(&email, &code).await {
                    Ok(token) => {
                        // The issued token replaces any prior session before
                        // the machine moves on.
                        deps.sessions.replace(Session::bearer(token.clone()));
                        info!("passcode confirmed; session replaced");
                        Ok(RegistrationEvent::TokenIssued { token })
                    }
                    Err(AuthError::Unreachable(message)) => {
                        warn!(%message, "verifier unreachable");
                        Ok(RegistrationEvent::VerifierUnreachable { message })
                    }
                    Err(AuthError::Rejected { reason }) => {
                        info!("verifier rejected the passcode");
                        Ok(RegistrationEvent::VerificationRejected { reason })
                    }
                    Err(other) => Err(other.into()),
                }
            }

            RegistrationCommand::LookupStatus { token } => {
                match deps.backend.is_new_user(&token).await {
                    Ok(is_new_user) => Ok(RegistrationEvent::StatusResolved { is_new_user }),
                    Err(err) => {
                        warn!(error = %err, "user status lookup failed; defaulting destination");
                        Ok(RegistrationEvent::StatusUnavailable {
                            message: err.to_string(),
                        })
                    }
                }
            }
        }
    }
}
