use crate::domain_utils::DomainUtils;
use rapidfuzz::distance::indel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypoSquatMatch {
    pub trusted: String,
    pub similarity: f64,
}

/// Flags registrable domains that are close to, but not equal to, a
/// trusted domain.
#[derive(Debug, Clone)]
pub struct TypoSquatDetector {
    trusted_domains: Vec<String>,
    threshold: f64,
}

impl TypoSquatDetector {
    pub fn new(trusted_domains: &[String], threshold: f64) -> Self {
        Self {
            trusted_domains: trusted_domains
                .iter()
                .map(|d| DomainUtils::canonicalize_domain(d))
                .collect(),
            threshold,
        }
    }

    pub fn trusted_domains(&self) -> &[String] {
        &self.trusted_domains
    }

    /// First trusted domain, in list order, whose similarity to `domain`
    /// reaches the threshold. Exact matches are skipped.
    pub fn check(&self, domain: &str) -> Option<TypoSquatMatch> {
        if domain.is_empty() {
            return None;
        }

        self.candidates(domain)
            .find(|candidate| candidate.similarity >= self.threshold)
    }

    /// Most similar non-identical trusted domain, regardless of threshold.
    pub fn closest(&self, domain: &str) -> Option<TypoSquatMatch> {
        if domain.is_empty() {
            return None;
        }

        self.candidates(domain)
            .fold(None, |best: Option<TypoSquatMatch>, candidate| match best {
                Some(b) if b.similarity >= candidate.similarity => Some(b),
                _ => Some(candidate),
            })
    }

    fn candidates<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = TypoSquatMatch> + 'a {
        self.trusted_domains
            .iter()
            .filter(move |trusted| trusted.as_str() != domain)
            .map(move |trusted| TypoSquatMatch {
                trusted: trusted.clone(),
                similarity: similarity(domain, trusted),
            })
    }
}

/// Indel-normalized similarity: `1 - indel_distance / (len_a + len_b)`,
/// counted in characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}
