use crate::config::ScannerConfig;
use crate::detection::{contains_punycode, HeuristicReport, TypoSquatDetector, TypoSquatMatch};
use crate::domain_utils::DomainUtils;
use lazy_static::lazy_static;
use serde::Serialize;
use std::fmt;

lazy_static! {
    static ref DEFAULT_SCANNER: UrlScanner = UrlScanner::new(ScannerConfig::default());
}

/// Why a URL received its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    TypoSquatting { trusted: String },
    Punycode,
    HeuristicScore { score: u32 },
    LooksSafe,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::TypoSquatting { .. } => write!(f, "typo-squatting match"),
            Reason::Punycode => write!(f, "punycode detected"),
            Reason::HeuristicScore { score } => write!(f, "heuristic score: {score}"),
            Reason::LooksSafe => write!(f, "looks safe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_suspicious: bool,
    pub reason: Reason,
}

impl Verdict {
    fn suspicious(reason: Reason) -> Self {
        Self {
            is_suspicious: true,
            reason,
        }
    }

    fn safe() -> Self {
        Self {
            is_suspicious: false,
            reason: Reason::LooksSafe,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_suspicious {
            "PHISHING"
        } else {
            "SAFE"
        }
    }

    pub fn reason_text(&self) -> String {
        self.reason.to_string()
    }
}

/// Everything the scanner looked at for a single URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub url: String,
    /// Host as written in the URL; this is what the detectors see.
    pub hostname: String,
    /// Host after WHATWG parsing (punycode labels, canonical IPv4).
    pub normalized_host: Option<String>,
    pub registrable_domain: String,
    pub heuristics: HeuristicReport,
    pub closest_trusted: Option<TypoSquatMatch>,
    pub verdict: Verdict,
}

/// Stateless URL classifier. Holds only read-only configuration, so one
/// instance can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct UrlScanner {
    config: ScannerConfig,
    typo_squatting: TypoSquatDetector,
}

impl Default for UrlScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl UrlScanner {
    pub fn new(config: ScannerConfig) -> Self {
        let typo_squatting =
            TypoSquatDetector::new(&config.trusted_domains, config.similarity_threshold);
        Self {
            config,
            typo_squatting,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Classify `url`. Typo-squatting wins over punycode, which wins over
    /// the heuristic score.
    pub fn scan(&self, url: &str) -> Verdict {
        let domain = DomainUtils::registrable_domain(url);
        let verdict = self.decide(url, &domain, || {
            HeuristicReport::evaluate(url, &self.config)
        });
        log::debug!(
            "{} -> {} ({}), domain '{}'",
            url,
            verdict.label(),
            verdict.reason,
            domain
        );
        verdict
    }

    pub fn explain(&self, url: &str) -> ScanReport {
        let hostname = DomainUtils::extract_hostname(url);
        let registrable_domain = DomainUtils::registrable_domain(url);
        let heuristics = HeuristicReport::evaluate(url, &self.config);
        let verdict = self.decide(url, &registrable_domain, || heuristics);

        ScanReport {
            url: url.to_string(),
            hostname,
            normalized_host: DomainUtils::normalized_hostname(url),
            closest_trusted: self.typo_squatting.closest(&registrable_domain),
            registrable_domain,
            heuristics,
            verdict,
        }
    }

    fn decide<F>(&self, url: &str, domain: &str, heuristics: F) -> Verdict
    where
        F: FnOnce() -> HeuristicReport,
    {
        if let Some(hit) = self.typo_squatting.check(domain) {
            return Verdict::suspicious(Reason::TypoSquatting {
                trusted: hit.trusted,
            });
        }

        if contains_punycode(url) {
            return Verdict::suspicious(Reason::Punycode);
        }

        let report = heuristics();
        if report.score >= self.config.score_threshold {
            return Verdict::suspicious(Reason::HeuristicScore {
                score: report.score,
            });
        }

        Verdict::safe()
    }
}

/// Scan with the built-in trusted domains and thresholds.
pub fn scan_url(url: &str) -> Verdict {
    DEFAULT_SCANNER.scan(url)
}
