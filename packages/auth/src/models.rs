//! Domain records for the auth core.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::AuthError;
use crate::validator;

lazy_static! {
    // Syntactic check only; deliverability is the registrar's problem.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap();
}

/// Draft identity held in memory while the passcode challenge is open.
///
/// Never persisted; discarded on success or abandonment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationDraft {
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the draft invariants: a usable name, a syntactically valid
    /// email, and a password the rule engine fully accepts against the
    /// submitted confirmation.
    pub fn validate(&self, confirmation: &str) -> Result<(), AuthError> {
        if self.display_name.trim().chars().count() < 2 {
            return Err(AuthError::Validation(
                "Name must be at least 2 characters".to_string(),
            ));
        }
        if !EMAIL_REGEX.is_match(&self.email) {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }
        if !validator::validate(&self.password, confirmation).all_pass() {
            return Err(AuthError::Validation(
                "Password does not satisfy every requirement".to_string(),
            ));
        }
        Ok(())
    }
}

/// Short-lived verification state bound to one registration draft.
///
/// Exactly one live challenge exists per draft, owned by the registration
/// machine that spawned it. Single-use: once consumed it can never match
/// again, so a replayed entry cannot authorize a second token issuance.
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub id: Uuid,
    code: String,
    pub issued_at: DateTime<Utc>,
    consumed: bool,
}

impl OtpChallenge {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            issued_at: Utc::now(),
            consumed: false,
        }
    }

    /// An entry matches only while the challenge is still open.
    pub fn matches(&self, entry: &str) -> bool {
        !self.consumed && self.code == entry
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Mark the challenge used.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

/// A pre-provisioned identity bundled for evaluation.
///
/// Functionally identical to direct login with the same pair; exists purely
/// to shortcut manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub label: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

/// All demo accounts are pre-created and verified on the backend; no
/// registration required.
pub const DEMO_ACCOUNTS: [DemoAccount; 5] = [
    DemoAccount {
        label: "Test User",
        email: "test@example.com",
        password: "TestPass123!",
    },
    DemoAccount {
        label: "Demo User",
        email: "demo@example.com",
        password: "DemoPass123!",
    },
    DemoAccount {
        label: "Admin User",
        email: "admin@example.com",
        password: "AdminPass123!",
    },
    DemoAccount {
        label: "Finance Analyst",
        email: "finance@example.com",
        password: "FinancePass123!",
    },
    DemoAccount {
        label: "Investor",
        email: "investor@example.com",
        password: "InvestorPass123!",
    },
];
