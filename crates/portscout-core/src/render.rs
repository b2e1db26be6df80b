// Card view-model construction: pure Port -> PortCard, no filtering logic
use crate::models::{DeviceMap, Port, RepoSource};

const MAIN_IMAGE_BASE: &str =
    "https://raw.githubusercontent.com/PortsMaster/PortMaster-New/main/ports";
const MULTIVERSE_IMAGE_BASE: &str =
    "https://raw.githubusercontent.com/PortsMaster-MV/PortMaster-MV-New/main/ports";
const PLACEHOLDER_IMAGE: &str =
    "https://raw.githubusercontent.com/PortsMaster/PortMaster-Website/main/no.image.png";

/// Display names for firmware codes found in `avail` entries.
pub fn firmware_display_name(code: &str) -> &str {
    match code {
        "ALL" => "All Firmwares",
        "jelos" => "JELOS",
        "rocknix" => "ROCKNIX",
        "arkos" => "ArkOS",
        "emuelec" => "EmuELEC",
        "amberelec" => "AmberELEC",
        "arkos (wummle)" => "ArkOS (Wummle)",
        other => other,
    }
}

/// One porter credit with its profile link.
#[derive(Debug, Clone, PartialEq)]
pub struct PorterLink {
    pub name: String,
    pub url: String,
}

/// Everything a card shows, precomputed. The view layer only does layout.
#[derive(Debug, Clone)]
pub struct PortCard {
    pub name: String,
    pub title: String,
    pub description: String,
    pub ready_to_run: bool,
    pub experimental: bool,
    pub multiverse: bool,
    pub porters: Vec<PorterLink>,
    /// "Device Name: Firmware Name" lines for the supported devices
    pub device_details: Vec<String>,
    pub date_added: String,
    pub download_count: u64,
    pub image_url: String,
    pub detail_url: String,
}

impl PortCard {
    pub fn build(port: &Port, supported: &[String], devices: &DeviceMap) -> Self {
        let details = device_details(port, supported, devices);

        Self {
            name: port.display_name().to_string(),
            title: port.attr.title.clone(),
            description: port.description().to_string(),
            ready_to_run: port.attr.rtr,
            experimental: port.attr.exp,
            multiverse: port.source.repo == RepoSource::Multiverse,
            porters: port
                .attr
                .porter
                .iter()
                .map(|name| PorterLink {
                    name: name.clone(),
                    url: porter_url(name),
                })
                .collect(),
            detail_url: detail_url(port.display_name(), &details),
            device_details: details,
            date_added: port.source.date_added.clone(),
            download_count: port.download_count,
            image_url: image_url(port),
        }
    }
}

/// Resolve the screenshot URL. The base depends on which repo published the
/// port; ports without a screenshot get the fixed placeholder.
pub fn image_url(port: &Port) -> String {
    let Some(image) = port.attr.screenshot.as_deref() else {
        return PLACEHOLDER_IMAGE.to_string();
    };
    let base = match port.source.repo {
        RepoSource::Main => MAIN_IMAGE_BASE,
        RepoSource::Multiverse => MULTIVERSE_IMAGE_BASE,
    };
    format!(
        "{}/{}/{}",
        base,
        urlencoding::encode(port.display_name()),
        urlencoding::encode(image)
    )
}

/// Detail-page URL for a card, carrying the supported-device summary.
pub fn detail_url(name: &str, device_details: &[String]) -> String {
    let mut url = format!("detail.html?name={}", urlencoding::encode(name));
    if !device_details.is_empty() {
        url.push_str("&devices=");
        url.push_str(&urlencoding::encode(&device_details.join(",")).into_owned());
    }
    url
}

/// Profile-page URL for a porter.
pub fn porter_url(porter: &str) -> String {
    format!("profile.html?porter={}", urlencoding::encode(porter))
}

/// "Device Name: Firmware Name" lines for each supported device code, in
/// `supported` order. Codes without a directory entry (notably the "ALL"
/// sentinel) produce no line.
pub fn device_details(port: &Port, supported: &[String], devices: &DeviceMap) -> Vec<String> {
    let mut details = Vec::new();
    for code in supported {
        for entry in &port.attr.avail {
            let mut parts = entry.splitn(2, ':');
            let device_code = parts.next().unwrap_or("");
            let firmware = parts.next().unwrap_or("");
            if device_code == code {
                if let Some(device) = devices.get(device_code) {
                    details.push(format!(
                        "{}: {}",
                        device.name,
                        firmware_display_name(firmware)
                    ));
                }
            }
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Device, PortAttr, PortSource};

    fn port(name: &str, repo: RepoSource, screenshot: Option<&str>) -> Port {
        Port {
            name: name.to_string(),
            attr: PortAttr {
                title: name.trim_end_matches(".zip").to_string(),
                desc: "plain desc".to_string(),
                desc_md: None,
                rtr: true,
                exp: false,
                porter: vec!["Some Porter".to_string()],
                genres: vec![],
                avail: vec!["rg351p:jelos".to_string(), "rg351p:arkos".to_string()],
                screenshot: screenshot.map(String::from),
            },
            source: PortSource {
                repo,
                date_added: "2024-02-03".to_string(),
            },
            download_count: 7,
        }
    }

    fn device_map() -> DeviceMap {
        DeviceMap::from([(
            "rg351p".to_string(),
            Device {
                code: "rg351p".to_string(),
                name: "RG351P".to_string(),
                manufacturer: "Anbernic".to_string(),
            },
        )])
    }

    #[test]
    fn image_url_uses_main_base() {
        let url = image_url(&port("my game.zip", RepoSource::Main, Some("shot 1.png")));
        assert_eq!(
            url,
            format!("{}/my%20game/shot%201.png", MAIN_IMAGE_BASE)
        );
    }

    #[test]
    fn image_url_uses_multiverse_base() {
        let url = image_url(&port("g.zip", RepoSource::Multiverse, Some("s.png")));
        assert!(url.starts_with(MULTIVERSE_IMAGE_BASE));
    }

    #[test]
    fn missing_screenshot_falls_back_to_placeholder() {
        let url = image_url(&port("g.zip", RepoSource::Main, None));
        assert_eq!(url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn detail_url_encodes_name_and_devices() {
        let details = vec!["RG351P: JELOS".to_string()];
        let url = detail_url("my game", &details);
        assert_eq!(url, "detail.html?name=my%20game&devices=RG351P%3A%20JELOS");
    }

    #[test]
    fn detail_url_without_devices_omits_parameter() {
        assert_eq!(detail_url("g", &[]), "detail.html?name=g");
    }

    #[test]
    fn porter_url_is_encoded() {
        assert_eq!(
            porter_url("A Porter"),
            "profile.html?porter=A%20Porter"
        );
    }

    #[test]
    fn device_details_resolve_names_per_supported_code() {
        let p = port("g.zip", RepoSource::Main, None);
        let supported = vec!["rg351p".to_string()];
        assert_eq!(
            device_details(&p, &supported, &device_map()),
            vec!["RG351P: JELOS", "RG351P: ArkOS"]
        );
    }

    #[test]
    fn all_sentinel_produces_no_detail_line() {
        let p = port("g.zip", RepoSource::Main, None);
        let supported = vec!["ALL".to_string()];
        assert!(device_details(&p, &supported, &device_map()).is_empty());
    }

    #[test]
    fn card_collects_badges_and_links() {
        let p = port("g.zip", RepoSource::Multiverse, Some("s.png"));
        let supported = vec!["rg351p".to_string()];
        let card = PortCard::build(&p, &supported, &device_map());
        assert_eq!(card.name, "g");
        assert!(card.multiverse);
        assert!(card.ready_to_run);
        assert_eq!(card.porters[0].url, "profile.html?porter=Some%20Porter");
        assert_eq!(card.download_count, 7);
        assert!(card.detail_url.contains("devices="));
    }

    #[test]
    fn unknown_firmware_code_passes_through() {
        assert_eq!(firmware_display_name("jelos"), "JELOS");
        assert_eq!(firmware_display_name("somethingelse"), "somethingelse");
    }
}
