use serde::Deserialize;
use std::collections::BTreeMap;

/// One entry of the device directory feed, keyed by device code.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    pub name: String,
    pub manufacturer: String,
}

/// Top-level shape of the port catalog feed.
#[derive(Debug, Clone, Deserialize)]
pub struct PortsFeed {
    pub ports: BTreeMap<String, PortEntry>,
}

/// One port as published in the catalog feed.
///
/// The feeds carry more keys than we care about (screenshots in multiple
/// sizes, file lists, md5 sums). serde skips whatever isn't declared here.
#[derive(Debug, Clone, Deserialize)]
pub struct PortEntry {
    pub name: String,
    pub attr: PortAttrEntry,
    pub source: SourceEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortAttrEntry {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub desc_md: Option<String>,
    #[serde(default)]
    pub rtr: bool,
    #[serde(default)]
    pub exp: bool,
    #[serde(default)]
    pub porter: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// "device:firmware" compatibility strings
    #[serde(default)]
    pub avail: Vec<String>,
    #[serde(default)]
    pub image: ImageEntry,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    pub repo: String,
    #[serde(default)]
    pub date_added: String,
}

/// Download counters feed, keyed by port name.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsFeed {
    pub ports: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_ports_feed() {
        let json = r#"{
            "ports": {
                "2048.zip": {
                    "name": "2048.zip",
                    "attr": {
                        "title": "2048",
                        "desc": "Slide the tiles.",
                        "desc_md": null,
                        "rtr": true,
                        "exp": false,
                        "porter": ["someone"],
                        "genres": ["puzzle"],
                        "avail": ["rg351p:jelos", "ALL:arkos"],
                        "image": { "screenshot": "screenshot.png" }
                    },
                    "source": { "repo": "main", "date_added": "2023-08-05" }
                }
            }
        }"#;

        let feed: PortsFeed = serde_json::from_str(json).unwrap();
        let port = &feed.ports["2048.zip"];
        assert_eq!(port.attr.title, "2048");
        assert!(port.attr.rtr);
        assert_eq!(port.attr.avail.len(), 2);
        assert_eq!(port.attr.image.screenshot.as_deref(), Some("screenshot.png"));
        assert_eq!(port.source.repo, "main");
    }

    #[test]
    fn missing_optional_attrs_default() {
        let json = r#"{
            "name": "bare.zip",
            "attr": { "title": "Bare" },
            "source": { "repo": "multiverse" }
        }"#;

        let port: PortEntry = serde_json::from_str(json).unwrap();
        assert!(!port.attr.rtr);
        assert!(port.attr.avail.is_empty());
        assert!(port.attr.genres.is_empty());
        assert!(port.attr.image.screenshot.is_none());
        assert_eq!(port.source.date_added, "");
    }

    #[test]
    fn deserializes_stats_feed() {
        let json = r#"{ "ports": { "2048.zip": 1234, "other.zip": 0 } }"#;
        let stats: StatsFeed = serde_json::from_str(json).unwrap();
        assert_eq!(stats.ports["2048.zip"], 1234);
    }

    #[test]
    fn deserializes_device_directory() {
        let json = r#"{
            "rg351p": { "name": "RG351P", "manufacturer": "Anbernic" },
            "x55": { "name": "X55", "manufacturer": "Powkiddy" }
        }"#;
        let devices: BTreeMap<String, DeviceEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(devices["rg351p"].manufacturer, "Anbernic");
        assert_eq!(devices.len(), 2);
    }
}
