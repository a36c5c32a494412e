//! Leg failures and the commentary trail that collects them.

use std::fmt;

use serde::Serialize;

/// Which leg of a route a failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    Sea,
    Rail,
    DropOff,
    ThroughRail,
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegKind::Sea => f.write_str("sea"),
            LegKind::Rail => f.write_str("rail"),
            LegKind::DropOff => f.write_str("drop-off"),
            LegKind::ThroughRail => f.write_str("through-rail"),
        }
    }
}

/// Why a leg could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// No table record matches the leg's keys at all
    NoRoute,
    /// A record matches but has no price for the container type
    Unpriced,
    /// Rail records exist for the city but no station serves the port
    NoCompatibleStation,
    /// A compatible rail record lacks a tariff component
    IncompletePricing,
    /// The fee is quoted individually on request
    OnRequest,
}

/// One unpriced leg, with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegFailure {
    pub leg: LegKind,
    pub cause: FailureCause,
    pub message: String,
}

impl LegFailure {
    pub fn new(leg: LegKind, cause: FailureCause, message: impl Into<String>) -> Self {
        Self {
            leg,
            cause,
            message: message.into(),
        }
    }
}

impl fmt::Display for LegFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered, append-only record of why legs went unpriced.
///
/// Holds at most one entry per (leg, cause): a second failure for the same
/// reason is dropped, so a quote never repeats itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Commentary {
    entries: Vec<LegFailure>,
}

impl Commentary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure. Returns false if one with the same leg and cause
    /// was already recorded.
    pub fn push(&mut self, failure: LegFailure) -> bool {
        let duplicate = self
            .entries
            .iter()
            .any(|e| e.leg == failure.leg && e.cause == failure.cause);
        if duplicate {
            return false;
        }
        self.entries.push(failure);
        true
    }

    /// Append the failure, if any.
    pub fn record(&mut self, failure: Option<&LegFailure>) {
        if let Some(failure) = failure {
            self.push(failure.clone());
        }
    }

    pub fn entries(&self) -> &[LegFailure] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry concerns `leg`.
    pub fn mentions(&self, leg: LegKind) -> bool {
        self.entries.iter().any(|e| e.leg == leg)
    }

    /// All messages joined into one paragraph.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
