// Which sources exist, which need a key, and how to build them

use crate::alienvault::{self, AlienVault};
use crate::commoncrawl::{self, CommonCrawl};
use crate::shodan::{self, Shodan};
use crate::source::Source;
use crate::urlscan::{self, UrlScan};
use crate::wayback::{self, Wayback};
use std::sync::Arc;

/// The sources urlsift knows about, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    AlienVault,
    Wayback,
    CommonCrawl,
    UrlScan,
    Shodan,
}

impl SourceKind {
    pub const ALL: [SourceKind; 5] = [
        SourceKind::AlienVault,
        SourceKind::Wayback,
        SourceKind::CommonCrawl,
        SourceKind::UrlScan,
        SourceKind::Shodan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::AlienVault => "alienvault",
            SourceKind::Wayback => "wayback",
            SourceKind::CommonCrawl => "commoncrawl",
            SourceKind::UrlScan => "urlscan",
            SourceKind::Shodan => "shodan",
        }
    }

    pub fn activation(&self) -> Activation {
        match self {
            SourceKind::UrlScan | SourceKind::Shodan => Activation::RequiresCredential,
            _ => Activation::Always,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Always,
    RequiresCredential,
}

/// API keys for the optional sources. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub urlscan: Option<String>,
    pub shodan: Option<String>,
}

impl Credentials {
    fn for_kind(&self, kind: SourceKind) -> Option<String> {
        let key = match kind {
            SourceKind::UrlScan => self.urlscan.as_ref(),
            SourceKind::Shodan => self.shodan.as_ref(),
            _ => None,
        };
        key.map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }
}

/// Base URL for every source.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub alienvault: String,
    pub wayback: String,
    pub commoncrawl: String,
    pub urlscan: String,
    pub shodan: String,
}

impl Endpoints {
    /// Point every source at one host, e.g. a local mock server.
    pub fn all_at(base_url: &str) -> Self {
        Self {
            alienvault: base_url.to_string(),
            wayback: base_url.to_string(),
            commoncrawl: base_url.to_string(),
            urlscan: base_url.to_string(),
            shodan: base_url.to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            alienvault: alienvault::DEFAULT_BASE_URL.to_string(),
            wayback: wayback::DEFAULT_BASE_URL.to_string(),
            commoncrawl: commoncrawl::DEFAULT_BASE_URL.to_string(),
            urlscan: urlscan::DEFAULT_BASE_URL.to_string(),
            shodan: shodan::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// One configured source: what it is and the credential it was given, if any.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub kind: SourceKind,
    pub credential: Option<String>,
}

impl SourceSpec {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn activation(&self) -> Activation {
        self.kind.activation()
    }

    pub fn is_active(&self) -> bool {
        match self.activation() {
            Activation::Always => true,
            Activation::RequiresCredential => self.credential.is_some(),
        }
    }

    /// Build the fetcher, or `None` when the credential requirement is unmet.
    pub fn build(&self, endpoints: &Endpoints) -> Option<Arc<dyn Source>> {
        if !self.is_active() {
            return None;
        }

        let source: Arc<dyn Source> = match (self.kind, self.credential.as_deref()) {
            (SourceKind::AlienVault, _) => {
                Arc::new(AlienVault::with_base_url(&endpoints.alienvault))
            }
            (SourceKind::Wayback, _) => Arc::new(Wayback::with_base_url(&endpoints.wayback)),
            (SourceKind::CommonCrawl, _) => {
                Arc::new(CommonCrawl::with_base_url(&endpoints.commoncrawl))
            }
            (SourceKind::UrlScan, Some(key)) => {
                Arc::new(UrlScan::with_base_url(&endpoints.urlscan, key))
            }
            (SourceKind::Shodan, Some(key)) => {
                Arc::new(Shodan::with_base_url(&endpoints.shodan, key))
            }
            (SourceKind::UrlScan | SourceKind::Shodan, None) => return None,
        };
        Some(source)
    }
}

/// Every known source, in dispatch order, with whatever keys were supplied.
pub fn source_specs(credentials: &Credentials) -> Vec<SourceSpec> {
    SourceKind::ALL
        .iter()
        .map(|&kind| SourceSpec {
            kind,
            credential: credentials.for_kind(kind),
        })
        .collect()
}

/// Build the active fetchers, preserving catalog order.
pub fn active_sources(specs: &[SourceSpec], endpoints: &Endpoints) -> Vec<Arc<dyn Source>> {
    specs.iter().filter_map(|spec| spec.build(endpoints)).collect()
}
