use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

/// Severity buckets, declared in display order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

pub const SEVERITIES: &[Severity] = &[
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
];

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// Best effort mapping of the risk labels the scan service emits.
    ///
    /// Only the first word is considered so `"High (Medium)"` style labels
    /// resolve to their risk part. Informational and unknown labels count as
    /// low.
    pub fn from_label(label: &str) -> Self {
        let first = label
            .split(|c: char| c.is_whitespace() || c == '(')
            .find(|part| !part.is_empty())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match first.as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum ScanLevel {
    /// Spider only.
    #[default]
    Passive,
    /// Spider followed by an active scan.
    Active,
    /// Active scan plus the service's extended checks.
    Extended,
}

impl From<ScanLevel> for u8 {
    fn from(value: ScanLevel) -> Self {
        match value {
            ScanLevel::Passive => 1,
            ScanLevel::Active => 2,
            ScanLevel::Extended => 3,
        }
    }
}

impl TryFrom<u8> for ScanLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ScanLevel::Passive),
            2 => Ok(ScanLevel::Active),
            3 => Ok(ScanLevel::Extended),
            other => Err(format!("scan level must be 1, 2 or 3 (got {other})")),
        }
    }
}

impl Display for ScanLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Finding {
    pub name: String,
    pub risk: Severity,
    pub urls: Vec<String>,
    pub params: Vec<String>,
    pub solution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_suggestion: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub target: String,
    pub level: ScanLevel,
    pub summary: BTreeMap<Severity, u32>,
    pub vulnerabilities: Vec<Finding>,
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ScanResult {
    pub fn count(&self, severity: Severity) -> u32 {
        self.summary.get(&severity).copied().unwrap_or_default()
    }

    pub fn total(&self) -> u32 {
        self.summary.values().sum()
    }
}

/// A summary with every severity present and zeroed.
pub fn empty_summary() -> BTreeMap<Severity, u32> {
    SEVERITIES.iter().map(|severity| (*severity, 0)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Scanning,
    Done,
}

/// Published state of one scan attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanSession {
    pub target: String,
    pub level: ScanLevel,
    pub status: SessionStatus,
    pub progress: u8,
    pub result: Option<ScanResult>,
    pub error: Option<String>,
    pub validation_error: Option<String>,
}

impl ScanSession {
    pub fn is_scanning(&self) -> bool {
        self.status == SessionStatus::Scanning
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}
