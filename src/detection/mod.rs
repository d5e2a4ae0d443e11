pub mod heuristics;
pub mod typo_squatting;

pub use heuristics::{
    contains_punycode, contains_suspicious_chars, has_suspicious_suffix, is_ip_domain,
    is_long_url, HeuristicReport,
};
pub use typo_squatting::{TypoSquatDetector, TypoSquatMatch};

/// Number of independent predicates summed into a heuristic score.
pub const HEURISTIC_COUNT: usize = 5;
