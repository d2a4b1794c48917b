//! Password rule engine for the signup form.
//!
//! Pure and stateless, cheap enough to re-evaluate on every keystroke. Each
//! rule is reported independently so the form can render partial credit
//! instead of short-circuiting at the first failure. This is advisory
//! feedback only: the registrar performs the authoritative check and may
//! reject for reasons the client cannot see, like an already-registered
//! email.

/// Characters the `special` rule accepts.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Outcome of evaluating the full rule set against the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleReport {
    /// Password is at least 8 characters long.
    pub length: bool,
    /// Contains at least one uppercase letter.
    pub upper: bool,
    /// Contains at least one lowercase letter.
    pub lower: bool,
    /// Contains at least one digit.
    pub digit: bool,
    /// Contains at least one of [`SPECIAL_CHARACTERS`].
    pub special: bool,
    /// Confirmation is non-empty and byte-equal to the password.
    pub matches: bool,
}

impl RuleReport {
    /// True when every rule holds. Submission is permitted only then.
    pub fn all_pass(&self) -> bool {
        self.length && self.upper && self.lower && self.digit && self.special && self.matches
    }
}

/// Evaluate the full rule set for a password/confirmation pair.
pub fn validate(password: &str, confirmation: &str) -> RuleReport {
    RuleReport {
        length: password.chars().count() >= 8,
        upper: password.chars().any(|c| c.is_ascii_uppercase()),
        lower: password.chars().any(|c| c.is_ascii_lowercase()),
        digit: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        matches: !confirmation.is_empty() && password == confirmation,
    }
}

/// The individual rules, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Length,
    Upper,
    Lower,
    Digit,
    Special,
    Match,
}

impl Rule {
    /// Hint text shown next to the rule.
    pub fn hint(&self) -> &'static str {
        match self {
            Rule::Length => "Be at least 8 characters long.",
            Rule::Upper => "Include at least one uppercase letter (A-Z).",
            Rule::Lower => "Include at least one lowercase letter (a-z).",
            Rule::Digit => "Include at least one number (0-9).",
            Rule::Special => "Include at least one special character (!@#$%^&*(),.?\":{}|<>).",
            Rule::Match => "Passwords match.",
        }
    }
}

/// How a rule should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleState {
    /// The driving field has not received input yet.
    Neutral,
    Pass,
    Fail,
}

/// Render states for the rule list.
///
/// A rule stays neutral until its driving field has received input, then
/// shows pass/fail. The match rule is driven by the confirmation field,
/// independent of whether the password field was touched.
pub fn display(password: &str, confirmation: &str) -> [(Rule, RuleState); 6] {
    let report = validate(password, confirmation);
    let touched = !password.is_empty();
    let confirm_touched = !confirmation.is_empty();

    [
        (Rule::Length, state(report.length, touched)),
        (Rule::Upper, state(report.upper, touched)),
        (Rule::Lower, state(report.lower, touched)),
        (Rule::Digit, state(report.digit, touched)),
        (Rule::Special, state(report.special, touched)),
        (Rule::Match, state(report.matches, confirm_touched)),
    ]
}

fn state(pass: bool, touched: bool) -> RuleState {
    if !touched {
        RuleState::Neutral
    } else if pass {
        RuleState::Pass
    } else {
        RuleState::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_boundary() {
        assert!(!validate("Abcde1!", "Abcde1!").length); // 7 chars
        assert!(validate("Abcdef1!", "Abcdef1!").length); // 8 chars
        assert!(validate("Abcdefgh1!", "Abcdefgh1!").length);
    }

    #[test]
    fn test_character_class_rules() {
        let report = validate("abcdefgh", "");
        assert!(report.lower);
        assert!(!report.upper);
        assert!(!report.digit);
        assert!(!report.special);

        let report = validate("ABCDEFGH", "");
        assert!(report.upper);
        assert!(!report.lower);

        let report = validate("Abc123!?", "");
        assert!(report.digit);
        assert!(report.special);
    }

    #[test]
    fn test_every_special_character_counts() {
        for c in SPECIAL_CHARACTERS.chars() {
            let password = format!("pw{c}");
            assert!(
                validate(&password, "").special,
                "character {c:?} should satisfy the special rule"
            );
        }
        assert!(!validate("pw-_=+", "").special);
    }

    #[test]
    fn test_match_requires_non_empty_equal_confirmation() {
        assert!(!validate("Abcdef1!", "").matches);
        assert!(!validate("Abcdef1!", "Abcdef1").matches);
        assert!(validate("Abcdef1!", "Abcdef1!").matches);

        // Changing either side afterwards breaks the match.
        assert!(!validate("Abcdef1!x", "Abcdef1!").matches);
        assert!(!validate("Abcdef1!", "Abcdef1!x").matches);
    }

    #[test]
    fn test_all_rules_pass_permits_submission() {
        let report = validate("Abcdef1!", "Abcdef1!");
        assert!(report.length);
        assert!(report.upper);
        assert!(report.lower);
        assert!(report.digit);
        assert!(report.special);
        assert!(report.matches);
        assert!(report.all_pass());
    }

    #[test]
    fn test_any_failing_rule_blocks_submission() {
        assert!(!validate("abcdef1!", "abcdef1!").all_pass()); // no uppercase
        assert!(!validate("ABCDEF1!", "ABCDEF1!").all_pass()); // no lowercase
        assert!(!validate("Abcdefg!", "Abcdefg!").all_pass()); // no digit
        assert!(!validate("Abcdefg1", "Abcdefg1").all_pass()); // no special
        assert!(!validate("Abc1!", "Abc1!").all_pass()); // too short
        assert!(!validate("Abcdef1!", "").all_pass()); // unconfirmed
    }

    #[test]
    fn test_rules_stay_neutral_until_touched() {
        for (_, state) in display("", "") {
            assert_eq!(state, RuleState::Neutral);
        }
    }

    #[test]
    fn test_password_touch_does_not_touch_match_rule() {
        let states = display("Abcdef1!", "");
        for (rule, state) in states {
            match rule {
                Rule::Match => assert_eq!(state, RuleState::Neutral),
                _ => assert_eq!(state, RuleState::Pass),
            }
        }
    }

    #[test]
    fn test_confirmation_touch_drives_match_rule() {
        let states = display("Abcdef1!", "Abcdef");
        assert!(states
            .iter()
            .any(|(rule, state)| *rule == Rule::Match && *state == RuleState::Fail));

        let states = display("Abcdef1!", "Abcdef1!");
        assert!(states
            .iter()
            .any(|(rule, state)| *rule == Rule::Match && *state == RuleState::Pass));
    }
}
