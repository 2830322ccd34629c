//! Form validation helpers for the account screen.

use once_cell::sync::Lazy;
use regex::Regex;

/// Special characters the strength meter gives credit for.
pub const SPECIAL_CHARACTERS: &str = "$@#&!";

/// Minimum length before a password earns its first point.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Coarse strength buckets shown next to the password meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Maps a 0..=5 score onto a bucket. Zero and one both read as weak.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => StrengthLevel::Weak,
            2 => StrengthLevel::Fair,
            3 => StrengthLevel::Good,
            4 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }
}

fn character_classes() -> &'static Vec<Regex> {
    static CHARACTER_CLASSES: Lazy<Vec<Regex>> = Lazy::new(|| {
        vec![
            Regex::new("[a-z]").unwrap(),
            Regex::new("[A-Z]").unwrap(),
            Regex::new("[0-9]").unwrap(),
            Regex::new("[$@#&!]").unwrap(),
        ]
    });

    &CHARACTER_CLASSES
}

/// Scores a password 0..=5: one point for length, one per character class.
///
/// Length counts characters rather than bytes so non-ASCII passwords are not
/// short-changed.
pub fn password_score(password: &str) -> u8 {
    let mut score = 0;
    if password.chars().count() >= MIN_PASSWORD_LEN {
        score += 1;
    }
    for class in character_classes().iter() {
        if class.is_match(password) {
            score += 1;
        }
    }
    score
}

/// Convenience wrapper mapping a password straight to its bucket.
pub fn password_strength(password: &str) -> StrengthLevel {
    StrengthLevel::from_score(password_score(password))
}

/// Loose shape check for email addresses: something@something.something,
/// no whitespace. Deliverability is not our problem.
pub fn looks_like_email(value: &str) -> bool {
    static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    EMAIL.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_scores_zero() {
        assert_eq!(password_score(""), 0);
        assert_eq!(password_strength(""), StrengthLevel::Weak);
    }

    #[test]
    fn each_rule_contributes_one_point() {
        assert_eq!(password_score("pass"), 1); // lowercase only
        assert_eq!(password_score("password"), 2); // + length
        assert_eq!(password_score("Password"), 3); // + uppercase
        assert_eq!(password_score("Password1"), 4); // + digit
        assert_eq!(password_score("Passw0rd!"), 5); // + special
    }

    #[test]
    fn score_buckets_match_labels() {
        assert_eq!(StrengthLevel::from_score(1).label(), "Weak");
        assert_eq!(StrengthLevel::from_score(2).label(), "Fair");
        assert_eq!(StrengthLevel::from_score(3).label(), "Good");
        assert_eq!(StrengthLevel::from_score(4).label(), "Strong");
        assert_eq!(StrengthLevel::from_score(5).label(), "Very Strong");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Eight characters, more than eight bytes.
        assert_eq!(password_score("pässwörd"), 2);
    }

    #[test]
    fn only_listed_specials_count() {
        assert_eq!(password_score("%"), 0);
        assert_eq!(password_score("!"), 1);
    }

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("rita@example.com"));
        assert!(looks_like_email("bill.crowther@pundits.co.uk"));
        assert!(!looks_like_email("not-an-email"));
        assert!(!looks_like_email("spaced out@example.com"));
        assert!(!looks_like_email("missing@tld"));
        assert!(!looks_like_email("@example.com"));
    }
}
