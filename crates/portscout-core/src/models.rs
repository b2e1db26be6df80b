use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the device directory. Read-only after load, unique by code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub code: String,
    pub name: String,
    pub manufacturer: String,
}

/// Device directory keyed by device code.
pub type DeviceMap = BTreeMap<String, Device>;

/// Port model - the star of the show
///
/// One distributable game port as it lives in the catalog, with the download
/// counter already joined in from the stats feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique, filename-like identifier ("2048.zip")
    pub name: String,
    pub attr: PortAttr,
    pub source: PortSource,
    /// From the stats feed; ports missing from it count as 0
    pub download_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortAttr {
    pub title: String,
    pub desc: String,
    pub desc_md: Option<String>,
    /// "Ready to run": no extra user-supplied files needed
    pub rtr: bool,
    pub exp: bool,
    pub porter: Vec<String>,
    pub genres: Vec<String>,
    /// "device:firmware" compatibility entries; empty means available everywhere
    pub avail: Vec<String>,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSource {
    pub repo: RepoSource,
    pub date_added: String,
}

/// Which repository a port was published from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RepoSource {
    Main,
    Multiverse,
}

impl std::fmt::Display for RepoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoSource::Main => write!(f, "main"),
            RepoSource::Multiverse => write!(f, "multiverse"),
        }
    }
}

impl Port {
    /// Port name with the `.zip` suffix stripped, for display and URLs.
    pub fn display_name(&self) -> &str {
        self.name.strip_suffix(".zip").unwrap_or(&self.name)
    }

    /// Markdown description when the feed has one, plain description otherwise.
    pub fn description(&self) -> &str {
        self.attr.desc_md.as_deref().unwrap_or(&self.attr.desc)
    }
}

/// A port that passed the current filter, annotated with the device codes
/// (or the `"ALL"` sentinel) it satisfies under that filter.
///
/// Holds the port's index into the catalog slice the filter ran over rather
/// than a copy of the port. The annotation is transient: it is computed from
/// scratch on every filter pass and never carried over from a previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredPort {
    pub index: usize,
    pub supported: Vec<String>,
}
