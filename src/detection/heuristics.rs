use crate::config::ScannerConfig;
use crate::domain_utils::DomainUtils;
use serde::Serialize;

/// Hostname is a dotted-quad IPv4 literal. Octets are not range checked.
pub fn is_ip_domain(url: &str) -> bool {
    DomainUtils::is_dotted_quad(&DomainUtils::extract_hostname(url))
}

/// Whole lowercased URL ends with one of `suffixes`.
///
/// This looks at the end of the full string, so a path such as
/// `/setup.exe` counts as well as a `.tk` hostname.
pub fn has_suspicious_suffix(url: &str, suffixes: &[String]) -> bool {
    let url_lower = url.to_lowercase();
    suffixes
        .iter()
        .any(|suffix| url_lower.ends_with(&suffix.to_lowercase()))
}

pub fn contains_suspicious_chars(url: &str, chars: &[char]) -> bool {
    url.chars().any(|c| chars.contains(&c))
}

/// Length is counted in characters, not bytes.
pub fn is_long_url(url: &str, threshold: usize) -> bool {
    url.chars().count() > threshold
}

pub fn contains_punycode(url: &str) -> bool {
    url.to_lowercase().contains("xn--")
}

/// Outcome of every score heuristic for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeuristicReport {
    pub ip_host: bool,
    pub suspicious_suffix: bool,
    pub suspicious_chars: bool,
    pub long_url: bool,
    pub punycode: bool,
    pub score: u32,
}

impl HeuristicReport {
    pub fn evaluate(url: &str, config: &ScannerConfig) -> Self {
        let ip_host = is_ip_domain(url);
        let suspicious_suffix = has_suspicious_suffix(url, &config.suspicious_suffixes);
        let suspicious_chars = contains_suspicious_chars(url, &config.suspicious_chars);
        let long_url = is_long_url(url, config.length_threshold);
        let punycode = contains_punycode(url);

        let score = [ip_host, suspicious_suffix, suspicious_chars, long_url, punycode]
            .iter()
            .filter(|&&hit| hit)
            .count() as u32;

        Self {
            ip_host,
            suspicious_suffix,
            suspicious_chars,
            long_url,
            punycode,
            score,
        }
    }

    /// Names of the heuristics that fired, in evaluation order.
    pub fn triggered(&self) -> Vec<&'static str> {
        [
            (self.ip_host, "ip-host"),
            (self.suspicious_suffix, "suspicious-suffix"),
            (self.suspicious_chars, "suspicious-chars"),
            (self.long_url, "long-url"),
            (self.punycode, "punycode"),
        ]
        .into_iter()
        .filter_map(|(hit, name)| hit.then_some(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_suffixes() -> Vec<String> {
        ScannerConfig::default().suspicious_suffixes
    }

    #[test]
    fn test_ip_domain() {
        assert!(is_ip_domain("192.168.0.1/phish"));
        assert!(is_ip_domain("http://10.0.0.1:8080/login"));
        assert!(is_ip_domain("http://999.999.999.999/"));
        assert!(!is_ip_domain("google.com"));
        assert!(!is_ip_domain(""));
        assert!(!is_ip_domain("http://[::1]/"));
        // Shorthand and integer IPv4 forms are not dotted quads as written
        assert!(!is_ip_domain("http://10.1/"));
        assert!(!is_ip_domain("http://0x7f.1/"));
        assert!(!is_ip_domain("http://2130706433/"));
    }

    #[test]
    fn test_suspicious_suffix_matches_whole_url() {
        let suffixes = default_suffixes();
        assert!(has_suspicious_suffix("free-prizes.tk", &suffixes));
        assert!(has_suspicious_suffix("HTTP://EXAMPLE.GQ", &suffixes));
        assert!(has_suspicious_suffix(
            "https://example.com/download/setup.exe",
            &suffixes
        ));
        assert!(!has_suspicious_suffix("https://free.tk/index.html", &suffixes));
        assert!(!has_suspicious_suffix("google.com", &suffixes));
    }

    #[test]
    fn test_suspicious_chars() {
        let chars = ScannerConfig::default().suspicious_chars;
        assert!(contains_suspicious_chars("http://user@evil.com", &chars));
        assert!(contains_suspicious_chars("http://a.com/?a=1&b=2", &chars));
        assert!(contains_suspicious_chars("http://a.com/%2e%2e", &chars));
        assert!(contains_suspicious_chars("http://a.com/win!", &chars));
        assert!(contains_suspicious_chars("http://a.com/a b", &chars));
        assert!(!contains_suspicious_chars("https://example.com/path", &chars));
    }

    #[test]
    fn test_long_url_threshold_is_exclusive() {
        let exactly = "a".repeat(200);
        let over = "a".repeat(201);
        assert!(!is_long_url(&exactly, 200));
        assert!(is_long_url(&over, 200));
        assert!(is_long_url("abcdef", 5));
        // Multi-byte characters count once each
        assert!(!is_long_url(&"é".repeat(150), 200));
    }

    #[test]
    fn test_punycode_case_insensitive() {
        assert!(contains_punycode("xn--google-yva.com"));
        assert!(contains_punycode("https://XN--80AK6AA92E.com"));
        assert!(!contains_punycode("google.com"));
    }

    #[test]
    fn test_report_score() {
        let config = ScannerConfig::default();

        let report = HeuristicReport::evaluate("google.com-login.info", &config);
        assert_eq!(report.score, 0);
        assert!(report.triggered().is_empty());

        let report = HeuristicReport::evaluate("192.168.0.1/phish", &config);
        assert!(report.ip_host);
        assert_eq!(report.score, 1);
        assert_eq!(report.triggered(), vec!["ip-host"]);

        let report = HeuristicReport::evaluate("http://user@10.0.0.1/update.exe", &config);
        assert_eq!(report.score, 3);
        assert_eq!(
            report.triggered(),
            vec!["ip-host", "suspicious-suffix", "suspicious-chars"]
        );
    }

    #[test]
    fn test_report_respects_length_threshold() {
        let mut config = ScannerConfig::default();
        config.length_threshold = 10;
        let report = HeuristicReport::evaluate("https://example.com", &config);
        assert!(report.long_url);
        assert_eq!(report.score, 1);
    }
}
