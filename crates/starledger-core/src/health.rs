//! Chain health: the structured result of a full-chain validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which layer of the chain a diagnostic concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    /// The ledger container itself (empty chain, missing slots).
    #[serde(rename = "Application")]
    Application,

    /// Linkage between blocks, heights, and the height counter.
    #[serde(rename = "Blockchain Validation")]
    BlockchainValidation,

    /// A single block's content hash.
    #[serde(rename = "Block Validation")]
    BlockValidation,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Application => "Application",
            DiagnosticCategory::BlockchainValidation => "Blockchain Validation",
            DiagnosticCategory::BlockValidation => "Block Validation",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected integrity violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The layer the violation belongs to.
    pub category: DiagnosticCategory,

    /// Human-readable description.
    pub message: String,

    /// Chain position of the offending block, None for chain-level issues.
    pub height: Option<u64>,
}

impl Diagnostic {
    pub fn application(height: Option<u64>, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Application,
            message: message.into(),
            height,
        }
    }

    pub fn blockchain(height: Option<u64>, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::BlockchainValidation,
            message: message.into(),
            height,
        }
    }

    pub fn block(height: u64, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::BlockValidation,
            message: message.into(),
            height: Some(height),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.height {
            Some(height) => write!(f, "[{}] block {}: {}", self.category, height, self.message),
            None => write!(f, "[{}] {}", self.category, self.message),
        }
    }
}

/// The health status of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainHealth {
    /// Every check passed.
    Healthy,

    /// At least one violation was found.
    Corrupted {
        /// Diagnostics in detection order (chain-level first, then newest to oldest).
        diagnostics: Vec<Diagnostic>,
    },
}

impl ChainHealth {
    /// Build from accumulated diagnostics.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            ChainHealth::Healthy
        } else {
            ChainHealth::Corrupted { diagnostics }
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ChainHealth::Healthy)
    }

    /// All diagnostics (empty when healthy).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ChainHealth::Healthy => &[],
            ChainHealth::Corrupted { diagnostics } => diagnostics,
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            ChainHealth::Healthy => Vec::new(),
            ChainHealth::Corrupted { diagnostics } => diagnostics,
        }
    }

    /// Lowest block position named by any diagnostic: the first bad block.
    pub fn first_bad_height(&self) -> Option<u64> {
        self.diagnostics().iter().filter_map(|d| d.height).min()
    }

    /// Whether some diagnostic of `category` names `height`.
    pub fn reports(&self, category: DiagnosticCategory, height: Option<u64>) -> bool {
        self.diagnostics()
            .iter()
            .any(|d| d.category == category && d.height == height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(DiagnosticCategory::Application.to_string(), "Application");
        assert_eq!(
            DiagnosticCategory::BlockchainValidation.to_string(),
            "Blockchain Validation"
        );
        assert_eq!(DiagnosticCategory::BlockValidation.to_string(), "Block Validation");
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&DiagnosticCategory::BlockValidation).unwrap();
        assert_eq!(json, "\"Block Validation\"");
    }

    #[test]
    fn test_empty_diagnostics_are_healthy() {
        let health = ChainHealth::from_diagnostics(Vec::new());
        assert!(health.is_healthy());
        assert!(health.diagnostics().is_empty());
        assert_eq!(health.first_bad_height(), None);
    }

    #[test]
    fn test_first_bad_height() {
        let health = ChainHealth::from_diagnostics(vec![
            Diagnostic::blockchain(None, "height counter out of sync"),
            Diagnostic::block(5, "hash mismatch"),
            Diagnostic::blockchain(Some(2), "previous hash mismatch"),
        ]);

        assert!(!health.is_healthy());
        assert_eq!(health.first_bad_height(), Some(2));
        assert!(health.reports(DiagnosticCategory::BlockValidation, Some(5)));
        assert!(!health.reports(DiagnosticCategory::BlockValidation, Some(2)));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::block(1, "content hash mismatch");
        assert_eq!(d.to_string(), "[Block Validation] block 1: content hash mismatch");

        let d = Diagnostic::application(None, "chain is empty");
        assert_eq!(d.to_string(), "[Application] chain is empty");
    }
}
