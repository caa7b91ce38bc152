//! Peer management
//!
//! Peers are known only by a canonical `host:port` authority. Registration
//! accepts `http://` URLs (`http://10.0.0.5:5000`) or bare authorities
//! (`10.0.0.5:5000`) and rejects anything else with a structured error.
//! Peers are always polled over plain HTTP, so other schemes, `https`
//! included, are refused.

use std::collections::HashSet;
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;
use thiserror::Error;

/// Peer address parse errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeerAddressError {
    #[error("address is empty")]
    Empty,
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("address has no host")]
    MissingHost,
    #[error("invalid host '{0}'")]
    InvalidHost(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error("unexpected path '{0}'")]
    UnexpectedPath(String),
}

const HTTP_PORT: u16 = 80;

/// Canonical network location of a peer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerAddress {
    host: String,
    port: u16,
}

impl PeerAddress {
    /// Parse a schemed URL or bare authority into its canonical form.
    ///
    /// Hosts are lowercased and a missing port falls back to 80.
    pub fn parse(input: &str) -> Result<Self, PeerAddressError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PeerAddressError::Empty);
        }

        let rest = match input.split_once("://") {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("http") => rest,
            Some((scheme, _)) => {
                return Err(PeerAddressError::UnsupportedScheme(scheme.to_string()))
            }
            None => input,
        };

        let (authority, path) = match rest.find(&['/', '?', '#'][..]) {
            Some(pos) => rest.split_at(pos),
            None => (rest, ""),
        };
        if !path.is_empty() && path != "/" {
            return Err(PeerAddressError::UnexpectedPath(path.to_string()));
        }

        let (host, port) = split_authority(authority)?;
        let port = match port {
            Some(p) => parse_port(p)?,
            None => HTTP_PORT,
        };

        Ok(Self { host, port })
    }

    /// `host:port`, with IPv6 hosts bracketed
    pub fn authority(&self) -> String {
        self.to_string()
    }
}

fn split_authority(authority: &str) -> Result<(String, Option<&str>), PeerAddressError> {
    if authority.is_empty() {
        return Err(PeerAddressError::MissingHost);
    }

    if let Some(bracketed) = authority.strip_prefix('[') {
        let (host, after) = bracketed
            .split_once(']')
            .ok_or_else(|| PeerAddressError::InvalidHost(authority.to_string()))?;
        let ip: Ipv6Addr = host
            .parse()
            .map_err(|_| PeerAddressError::InvalidHost(host.to_string()))?;
        let port = match after {
            "" => None,
            _ => Some(
                after
                    .strip_prefix(':')
                    .ok_or_else(|| PeerAddressError::InvalidPort(after.to_string()))?,
            ),
        };
        return Ok((ip.to_string(), port));
    }

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };

    if host.is_empty() {
        return Err(PeerAddressError::MissingHost);
    }
    let valid_host = host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));
    if !valid_host {
        return Err(PeerAddressError::InvalidHost(host.to_string()));
    }

    Ok((host.to_ascii_lowercase(), port))
}

fn parse_port(port: &str) -> Result<u16, PeerAddressError> {
    match port.parse::<u16>() {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(PeerAddressError::InvalidPort(port.to_string())),
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for PeerAddress {
    type Err = PeerAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Registered peers, deduplicated by authority and kept in registration
/// order. Entries never expire.
#[derive(Debug, Default, Clone)]
pub struct PeerSet {
    order: Vec<PeerAddress>,
    known: HashSet<PeerAddress>,
}

impl PeerSet {
    /// Create an empty peer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer; returns false if it was already known
    pub fn add(&mut self, addr: PeerAddress) -> bool {
        if self.known.contains(&addr) {
            return false;
        }
        self.known.insert(addr.clone());
        self.order.push(addr);
        true
    }

    /// Peers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PeerAddress> {
        self.order.iter()
    }

    /// Canonical authorities in registration order
    pub fn authorities(&self) -> Vec<String> {
        self.order.iter().map(PeerAddress::authority).collect()
    }
}
