//! Marketdesk authentication core.
//!
//! The one part of the product with non-trivial state: registration with
//! one-time-passcode confirmation, interchangeable login strategies, the
//! process-wide session slot, and the guard that admits navigation into the
//! protected area.
//!
//! Architecture (machine/effect pattern):
//!   form or menu input → event → machine decides → command → effect calls a
//!   remote collaborator → fact event → machine decides → ...
//!
//! Remote collaborators (registrar, verifier, authenticator, federated
//! provider) sit behind the contracts in [`backend`]; the HTTP
//! implementation lives in the `api-client` crate.

pub mod backend;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod machine;
pub mod models;
pub mod notify;
pub mod registration;
pub mod session;
pub mod validator;

pub use error::AuthError;
pub use notify::{Notice, Severity};
