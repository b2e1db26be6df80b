// Catalog loading and derived directories - bridges the feed wire shapes
// with the domain models
use portscout_api::{DeviceEntry, FeedClient, PortEntry};
use std::collections::BTreeMap;

use crate::models::{Device, DeviceMap, Port, PortAttr, PortSource, RepoSource};

/// Owns everything fetched at startup: the device directory, the port list
/// and the genre list derived from it.
///
/// The port list is fetched once per run and never replaced; the only
/// mutation downstream is the transient `supported` annotation, which lives
/// on `FilteredPort` and not here.
#[derive(Debug, Default)]
pub struct CatalogStore {
    pub devices: DeviceMap,
    pub ports: Vec<Port>,
    pub genres: Vec<String>,
}

impl CatalogStore {
    /// Assemble a store from whatever the loaders managed to fetch.
    ///
    /// Either half may be missing; an empty directory just means the
    /// dependent UI (device checkboxes, cards) stays empty.
    pub fn new(devices: Option<DeviceMap>, ports: Option<Vec<Port>>) -> Self {
        let ports = ports.unwrap_or_default();
        let genres = collect_genres(&ports);
        Self {
            devices: devices.unwrap_or_default(),
            ports,
            genres,
        }
    }

    /// Fetch both halves of the catalog. Each fetch fails soft on its own.
    pub async fn load(client: &FeedClient) -> Self {
        let devices = load_devices(client).await;
        let ports = load_catalog(client).await;
        Self::new(devices, ports)
    }

    /// Manufacturer names, sorted, unique. Backs the device checkbox tree.
    pub fn manufacturers(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .devices
            .values()
            .map(|d| d.manufacturer.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Devices of one manufacturer, in device-code order.
    pub fn devices_of(&self, manufacturer: &str) -> Vec<&Device> {
        self.devices
            .values()
            .filter(|d| d.manufacturer == manufacturer)
            .collect()
    }
}

/// Fetch the device directory, or `None` if the feed is unavailable.
///
/// Fail-soft by contract: network and parse errors are logged and swallowed
/// here, never propagated. No retry.
pub async fn load_devices(client: &FeedClient) -> Option<DeviceMap> {
    match client.fetch_devices().await {
        Ok(entries) => Some(
            entries
                .into_iter()
                .map(|(code, entry)| (code.clone(), device_from_entry(code, entry)))
                .collect(),
        ),
        Err(e) => {
            tracing::error!("failed to fetch device directory: {}", e);
            None
        }
    }
}

/// Fetch the port catalog and the stats feed, join download counts by port
/// name (missing stats count as 0), or `None` if either feed is unavailable.
pub async fn load_catalog(client: &FeedClient) -> Option<Vec<Port>> {
    let ports = match client.fetch_ports().await {
        Ok(feed) => feed.ports,
        Err(e) => {
            tracing::error!("failed to fetch port catalog: {}", e);
            return None;
        }
    };
    let stats = match client.fetch_stats().await {
        Ok(feed) => feed.ports,
        Err(e) => {
            tracing::error!("failed to fetch port stats: {}", e);
            return None;
        }
    };

    Some(join_stats(ports, &stats))
}

/// Join the download counters onto the catalog entries by name.
pub fn join_stats(
    ports: BTreeMap<String, PortEntry>,
    stats: &BTreeMap<String, u64>,
) -> Vec<Port> {
    ports
        .into_values()
        .map(|entry| {
            let count = stats.get(&entry.name).copied().unwrap_or(0);
            port_from_entry(entry, count)
        })
        .collect()
}

/// Convert a feed entry to the domain model.
fn port_from_entry(entry: PortEntry, download_count: u64) -> Port {
    let repo = match entry.source.repo.as_str() {
        "multiverse" => RepoSource::Multiverse,
        _ => RepoSource::Main,
    };

    Port {
        name: entry.name,
        attr: PortAttr {
            title: entry.attr.title,
            desc: entry.attr.desc,
            desc_md: entry.attr.desc_md,
            rtr: entry.attr.rtr,
            exp: entry.attr.exp,
            porter: entry.attr.porter,
            genres: entry.attr.genres,
            avail: entry.attr.avail,
            screenshot: entry.attr.image.screenshot,
        },
        source: PortSource {
            repo,
            date_added: entry.source.date_added,
        },
        download_count,
    }
}

fn device_from_entry(code: String, entry: DeviceEntry) -> Device {
    Device {
        code,
        name: entry.name,
        manufacturer: entry.manufacturer,
    }
}

/// Unique genres across the catalog, in first-seen order.
fn collect_genres(ports: &[Port]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut genres = Vec::new();
    for port in ports {
        for genre in &port.attr.genres {
            if seen.insert(genre.clone()) {
                genres.push(genre.clone());
            }
        }
    }
    genres
}
