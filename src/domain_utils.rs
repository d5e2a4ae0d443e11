use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use url::Url;

lazy_static! {
    // Dotted quad without octet range checks: "999.999.999.999" matches.
    static ref DOTTED_QUAD: Regex = Regex::new(r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$").unwrap();
}

/// Hostname and registrable-domain helpers for untrusted URL strings.
///
/// None of these fail: anything that cannot be parsed comes back as an
/// empty string.
pub struct DomainUtils;

impl DomainUtils {
    /// Lowercased hostname exactly as written in the URL, scheme optional.
    ///
    /// No IDNA or IPv4 normalization happens here: Unicode labels keep
    /// their characters and `10.1` stays `10.1`.
    pub fn extract_hostname(url: &str) -> String {
        let trimmed = url.trim();
        let rest = match trimmed.split_once("://") {
            Some((scheme, rest)) if Self::is_scheme(scheme) => rest,
            _ => trimmed,
        };

        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host_port = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host)| host);

        let host = if host_port.starts_with('[') {
            match host_port.find(']') {
                Some(end) => &host_port[..=end],
                None => host_port,
            }
        } else {
            host_port.split(':').next().unwrap_or_default()
        };

        host.to_lowercase()
    }

    /// Host as a browser would resolve it (punycode labels, canonical IPv4).
    pub fn normalized_hostname(url: &str) -> Option<String> {
        let trimmed = url.trim();
        let candidate = match trimmed.split_once("://") {
            Some((scheme, _)) if Self::is_scheme(scheme) => Cow::Borrowed(trimmed),
            _ => Cow::Owned(format!("http://{trimmed}")),
        };

        match Url::parse(&candidate) {
            Ok(parsed) => parsed.host_str().map(|host| host.to_string()),
            Err(e) => {
                log::debug!("URL parser rejected '{}': {}", url, e);
                None
            }
        }
    }

    /// Registrable domain (domain + ICANN public suffix) of the hostname.
    ///
    /// Private-section suffixes such as `github.io` are not treated as
    /// registry boundaries. IP literals are returned unchanged.
    pub fn registrable_domain(url: &str) -> String {
        let hostname = Self::extract_hostname(url);
        let host = hostname.trim_end_matches('.');
        if host.is_empty() {
            return String::new();
        }

        if Self::is_ip_literal(host) {
            return host.to_string();
        }

        let Some(suffix) = Self::icann_suffix(host) else {
            return String::new();
        };
        if suffix.len() >= host.len() {
            return String::new();
        }

        let labels = &host[..host.len() - suffix.len() - 1];
        match labels.rsplit('.').next() {
            Some(label) if !label.is_empty() => format!("{label}.{suffix}"),
            _ => String::new(),
        }
    }

    /// True for dotted-quad hostnames, including out-of-range octets.
    pub fn is_dotted_quad(host: &str) -> bool {
        DOTTED_QUAD.is_match(host)
    }

    /// Canonicalize domain (lowercase, strip trailing dot and www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.trim().trim_end_matches('.').to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }

    /// Longest public suffix of `host` from the ICANN section of the list.
    ///
    /// A private match like `us.com` is walked back one label at a time
    /// until an ICANN rule (or the default `*` rule) applies.
    fn icann_suffix(host: &str) -> Option<&str> {
        let mut candidate = host;
        loop {
            let suffix = psl::suffix(candidate.as_bytes())?;
            let suffix_len = suffix.as_bytes().len();
            let suffix_str = &candidate[candidate.len() - suffix_len..];

            if suffix.typ() != Some(psl::Type::Private) {
                return Some(suffix_str);
            }

            let (_, parent) = suffix_str.split_once('.')?;
            candidate = parent;
        }
    }

    fn is_ip_literal(host: &str) -> bool {
        host.starts_with('[') || Self::is_dotted_quad(host)
    }

    fn is_scheme(scheme: &str) -> bool {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    }
}
