//! Rule-based password strength scoring for backup passwords.

use serde::Serialize;

/// Characters that satisfy the special-character requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Minimum length for the `min_length` requirement.
pub const MIN_LENGTH: usize = 12;

/// Length at which a password that meets every requirement becomes Strong.
pub const STRONG_LENGTH: usize = 16;

/// Anything shorter is Very Weak regardless of character classes.
const FLOOR_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum StrengthLabel {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::VeryWeak => "Very Weak",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }
}

impl std::fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five independent checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequirements {
    pub min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_number: bool,
    pub has_special: bool,
}

impl PasswordRequirements {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// Number of requirements satisfied (0-5).
    pub fn met(&self) -> usize {
        [
            self.min_length,
            self.has_uppercase,
            self.has_lowercase,
            self.has_number,
            self.has_special,
        ]
        .iter()
        .filter(|&&ok| ok)
        .count()
    }

    /// Checklist text for each failed requirement, in display order.
    pub fn unmet(&self) -> Vec<&'static str> {
        [
            (self.min_length, "At least 12 characters"),
            (self.has_uppercase, "Contains uppercase letter (A-Z)"),
            (self.has_lowercase, "Contains lowercase letter (a-z)"),
            (self.has_number, "Contains number (0-9)"),
            (self.has_special, "Contains special character (!@#$%...)"),
        ]
        .into_iter()
        .filter_map(|(ok, text)| (!ok).then_some(text))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrengthResult {
    /// 0 (Very Weak) to 4 (Strong).
    pub score: u8,
    pub label: StrengthLabel,
    /// CSS color token for the meter.
    pub color: &'static str,
    /// Meter fill, 20-100.
    pub percentage: u8,
    pub requirements: PasswordRequirements,
}

impl PasswordStrengthResult {
    fn classify(label: StrengthLabel, requirements: PasswordRequirements) -> Self {
        let (score, color, percentage) = match label {
            StrengthLabel::VeryWeak => (0, "hsl(var(--destructive))", 20),
            StrengthLabel::Weak => (1, "hsl(0 84% 60%)", 40),
            StrengthLabel::Fair => (2, "hsl(38 92% 50%)", 60),
            StrengthLabel::Good => (3, "hsl(142 76% 36%)", 80),
            StrengthLabel::Strong => (4, "hsl(142 86% 28%)", 100),
        };
        Self {
            score,
            label,
            color,
            percentage,
            requirements,
        }
    }

    /// Whether the score reaches `min_score`.
    pub fn meets(&self, min_score: u8) -> bool {
        self.score >= min_score
    }
}

/// Score a password. Total: every string, including the empty one, gets a result.
pub fn check_password_strength(password: &str) -> PasswordStrengthResult {
    let requirements = PasswordRequirements::evaluate(password);
    let met = requirements.met();
    let length = password.chars().count();
    let length_bonus = length >= STRONG_LENGTH;

    let label = if met == 0 || length < FLOOR_LENGTH {
        StrengthLabel::VeryWeak
    } else if met <= 2 {
        StrengthLabel::Weak
    } else if met == 3 {
        StrengthLabel::Fair
    } else if met == 4 {
        StrengthLabel::Good
    } else if length_bonus {
        StrengthLabel::Strong
    } else {
        // All five met but short of the bonus length
        StrengthLabel::Good
    };

    PasswordStrengthResult::classify(label, requirements)
}
