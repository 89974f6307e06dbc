use crate::dns_protocol::DnsProtocol;
use std::fmt;
use std::str::FromStr;

/// One `[domain=]protocol://host:port` entry from the upstream list.
///
/// `domain` is stored lower-cased without a trailing root dot. An empty
/// domain is the wildcard route. A leading dot (`.example.com`) scopes the
/// route to strict subdomains; without it only the exact name matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSpec {
    pub domain: String,
    pub protocol: DnsProtocol,
}

impl UpstreamSpec {
    pub fn is_wildcard(&self) -> bool {
        self.domain.is_empty()
    }
}

/// Normalizes a query or route name for suffix comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Candidate route keys for `name`, most specific first: the full name,
/// then every suffix starting at a label separator (`.b.example.com`,
/// `.example.com`, `.com`).
///
/// `name` must already be normalized.
pub fn suffix_candidates(name: &str) -> impl Iterator<Item = &str> {
    std::iter::once(name).chain(name.match_indices('.').map(move |(idx, _)| &name[idx..]))
}

impl FromStr for UpstreamSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (domain, endpoint) = match s.split_once('=') {
            Some((domain, endpoint)) => (domain, endpoint),
            None => ("", s),
        };

        if endpoint.is_empty() {
            return Err(format!("Upstream '{}' has no server address", s));
        }

        Ok(Self {
            domain: normalize_name(domain),
            protocol: endpoint.parse()?,
        })
    }
}

impl fmt::Display for UpstreamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            write!(f, "{}", self.protocol)
        } else {
            write!(f, "{}={}", self.domain, self.protocol)
        }
    }
}
