//! Keyword triage rules.
//!
//! Rules are plain data: an ordered list of keyword sets, each mapped to an outcome, plus a
//! default outcome when nothing matches. The same [`Classifier::standard`] rule set backs both
//! the offline catbot and the demo backend, so a result never depends on connectivity.

use super::types::{Priority, TriageResult};

/// Keywords that mark a description as an emergency.
pub const EMERGENCY_KEYWORDS: &[&str] = &["chest", "breath", "unconscious", "severe pain"];

/// Outcome for descriptions that hit an emergency keyword.
pub const EMERGENCY_OUTCOME: TriageOutcome = TriageOutcome {
    priority: Priority::High,
    speciality: "Cardiologist",
    message: "High priority – contact emergency desk immediately.",
};

/// Outcome for everything else.
pub const ROUTINE_OUTCOME: TriageOutcome = TriageOutcome {
    priority: Priority::Normal,
    speciality: "General Physician",
    message: "You should book an appointment within the next 1–2 days.",
};

/// The rules shipped with the portal.
pub const STANDARD_RULES: &[TriageRule] = &[TriageRule {
    keywords: EMERGENCY_KEYWORDS,
    outcome: EMERGENCY_OUTCOME,
}];

/// A fixed triage outcome; the suggested action follows from the priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageOutcome {
    pub priority: Priority,
    pub speciality: &'static str,
    pub message: &'static str,
}

impl TriageOutcome {
    pub fn to_result(&self) -> TriageResult {
        TriageResult::new(self.priority, self.speciality, self.message)
    }
}

/// Matches when the lowercased text contains any of `keywords` (all lowercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageRule {
    pub keywords: &'static [&'static str],
    pub outcome: TriageOutcome,
}

impl TriageRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// First-match keyword classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    rules: &'static [TriageRule],
    default: TriageOutcome,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl Classifier {
    pub const fn new(rules: &'static [TriageRule], default: TriageOutcome) -> Self {
        Self { rules, default }
    }

    /// The portal's rule set.
    pub const fn standard() -> Self {
        Self::new(STANDARD_RULES, ROUTINE_OUTCOME)
    }

    /// Classify a symptom description.
    ///
    /// Returns `None` for empty or whitespace-only text; any other string yields a result.
    pub fn classify(&self, text: &str) -> Option<TriageResult> {
        if text.trim().is_empty() {
            return None;
        }

        let lowered = text.to_lowercase();
        let outcome = self.rules.iter().find(|r| r.matches(&lowered)).map(|r| &r.outcome).unwrap_or(&self.default);

        Some(outcome.to_result())
    }
}

/// Classify with the standard rules.
pub fn classify(text: &str) -> Option<TriageResult> {
    Classifier::standard().classify(text)
}
