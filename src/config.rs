use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::detection::HEURISTIC_COUNT;

pub const DEFAULT_TRUSTED_DOMAINS: &[&str] = &["google.com", "facebook.com", "cybersec.com"];

pub const DEFAULT_SUSPICIOUS_SUFFIXES: &[&str] =
    &[".exe", ".gq", ".tk", ".cf", ".config", ".ml", ".boot"];

pub const DEFAULT_SUSPICIOUS_CHARS: &[char] = &['@', ' ', '%', '&', '!'];

pub const DEFAULT_SCORE_THRESHOLD: u32 = 3;
pub const DEFAULT_LENGTH_THRESHOLD: usize = 200;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Tunables for a [`UrlScanner`](crate::scanner::UrlScanner).
///
/// Every field has a default, so a YAML file only needs to list the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Registrable domains that typo-squatting candidates are compared against.
    pub trusted_domains: Vec<String>,
    /// Minimum heuristic score for a URL to be flagged.
    pub score_threshold: u32,
    /// URLs longer than this many characters trip the length heuristic.
    pub length_threshold: usize,
    /// Similarity (0.0..=1.0) at which a domain counts as a typo-squat.
    pub similarity_threshold: f64,
    /// Matched against the end of the whole lowercased URL, not just the TLD.
    pub suspicious_suffixes: Vec<String>,
    /// Any of these anywhere in the raw URL trips the character heuristic.
    pub suspicious_chars: Vec<char>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            trusted_domains: DEFAULT_TRUSTED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            length_threshold: DEFAULT_LENGTH_THRESHOLD,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            suspicious_suffixes: DEFAULT_SUSPICIOUS_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suspicious_chars: DEFAULT_SUSPICIOUS_CHARS.to_vec(),
        }
    }
}

impl ScannerConfig {
    pub fn with_trusted_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file '{path}'"))?;
        let config: ScannerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse configuration file '{path}'"))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write configuration file '{path}'"))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            bail!(
                "similarity_threshold must be within 0.0..=1.0, got {}",
                self.similarity_threshold
            );
        }

        if let Some(pos) = self
            .trusted_domains
            .iter()
            .position(|d| d.trim().is_empty())
        {
            bail!("trusted_domains[{pos}] is empty");
        }

        if let Some(pos) = self
            .suspicious_suffixes
            .iter()
            .position(|s| s.is_empty())
        {
            bail!("suspicious_suffixes[{pos}] is empty");
        }

        if self.score_threshold as usize > HEURISTIC_COUNT {
            log::warn!(
                "score_threshold {} exceeds the {} available heuristics, score-based flagging is disabled",
                self.score_threshold,
                HEURISTIC_COUNT
            );
        }

        Ok(())
    }
}
