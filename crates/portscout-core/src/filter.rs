// The filter engine: reconciles search, device compatibility, genre
// selection and sort order into the list of cards to show
use chrono::NaiveDate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{FilteredPort, Port};

/// Everything the user can toggle, in one persistable struct.
///
/// Serialized field names match the session-state payload of the original
/// PortMaster website, so the stored JSON stays recognizable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default, rename = "searchQuery")]
    pub search_query: String,
    #[serde(default, rename = "readyToRun")]
    pub ready_to_run: bool,
    #[serde(default, rename = "filesNeeded")]
    pub files_needed: bool,
    #[serde(default, rename = "Newest")]
    pub newest: bool,
    #[serde(default, rename = "Downloaded")]
    pub downloaded: bool,
    #[serde(default, rename = "AZ")]
    pub az: bool,
    /// device code -> checkbox state
    #[serde(default)]
    pub devices: BTreeMap<String, bool>,
    /// genre name -> checkbox state
    #[serde(default)]
    pub genres: BTreeMap<String, bool>,
}

impl FilterState {
    pub fn selected_devices(&self) -> Vec<&str> {
        self.devices
            .iter()
            .filter(|(_, &checked)| checked)
            .map(|(code, _)| code.as_str())
            .collect()
    }

    pub fn selected_genres(&self) -> Vec<&str> {
        self.genres
            .iter()
            .filter(|(_, &checked)| checked)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn set_device(&mut self, code: &str, checked: bool) {
        self.devices.insert(code.to_string(), checked);
    }

    pub fn set_genre(&mut self, name: &str, checked: bool) {
        self.genres.insert(name.to_string(), checked);
    }
}

/// The filtered, annotated, ordered view of the catalog plus the count shown
/// in the "N Ports Available" line.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub ports: Vec<FilteredPort>,
    pub total: usize,
}

/// Run one filter pass over the catalog.
///
/// Pure function of catalog + state: the `supported` annotations are computed
/// from scratch on every call, never accumulated across calls. The outcome
/// indexes into the catalog slice instead of copying ports out of it.
///
/// With a search query, candidates are the fuzzy title matches in rank order
/// and that order is kept; the sort toggles only apply without a query, each
/// as a full stable re-sort in the fixed order newest, a-z, downloaded, so
/// the last applied toggle decides the visible order when several are
/// checked.
pub fn filter_ports(catalog: &[Port], state: &FilterState) -> FilterOutcome {
    let query = state.search_query.trim().to_lowercase();
    let selected_devices = state.selected_devices();
    let selected_genres = state.selected_genres();

    let candidates: Vec<usize> = if query.is_empty() {
        (0..catalog.len()).collect()
    } else {
        search_titles(catalog, &query)
    };

    let mut results: Vec<FilteredPort> = Vec::new();
    for index in candidates {
        let port = &catalog[index];
        let Some(supported) =
            availability_tags(port, state.ready_to_run, state.files_needed, &selected_devices)
        else {
            continue;
        };

        if !selected_genres.is_empty()
            && !port
                .attr
                .genres
                .iter()
                .any(|g| selected_genres.contains(&g.as_str()))
        {
            continue;
        }

        results.push(FilteredPort { index, supported });
    }

    if query.is_empty() {
        if state.newest {
            results.sort_by(|a, b| {
                parse_date(&catalog[b.index].source.date_added)
                    .cmp(&parse_date(&catalog[a.index].source.date_added))
            });
        }
        if state.az {
            results.sort_by(|a, b| {
                catalog[a.index]
                    .attr
                    .title
                    .to_lowercase()
                    .cmp(&catalog[b.index].attr.title.to_lowercase())
            });
        }
        if state.downloaded {
            results.sort_by(|a, b| {
                catalog[b.index]
                    .download_count
                    .cmp(&catalog[a.index].download_count)
            });
        }
    }

    let total = results.len();
    FilterOutcome {
        ports: results,
        total,
    }
}

/// Availability check for one port. Returns the `supported` tags when the
/// port is included, `None` when it is filtered out.
///
/// With neither mode flag set nothing passes: the page deliberately shows no
/// ports until the user picks ready-to-run or files-needed. Otherwise the
/// flag matching the port's `rtr` value must be on, and the port is included
/// when its `avail` list is empty (universally available, tagged "ALL"), when
/// an entry matches a selected device, when an entry names the "ALL" wildcard
/// device, or unconditionally when no device is selected at all.
fn availability_tags(
    port: &Port,
    ready_to_run: bool,
    files_needed: bool,
    selected: &[&str],
) -> Option<Vec<String>> {
    let branch_enabled = if port.attr.rtr {
        ready_to_run
    } else {
        files_needed
    };
    if !branch_enabled {
        return None;
    }

    let mut tags: Vec<String> = Vec::new();
    let mut included = false;

    if port.attr.avail.is_empty() {
        push_tag(&mut tags, "ALL");
        included = true;
    }
    for entry in &port.attr.avail {
        let device = entry.split(':').next().unwrap_or(entry);
        if selected.contains(&device) {
            push_tag(&mut tags, device);
            included = true;
        }
        if device == "ALL" {
            push_tag(&mut tags, "ALL");
            included = true;
        }
    }
    if selected.is_empty() {
        included = true;
    }

    included.then_some(tags)
}

fn push_tag(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Fuzzy-match port titles against the query; returns catalog indices, best
/// match first.
///
/// Matching and ranking are delegated to SkimMatcherV2; titles and query are
/// lowercased so the match is case-insensitive regardless of the matcher's
/// smart-case rules.
fn search_titles(catalog: &[Port], query: &str) -> Vec<usize> {
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = catalog
        .iter()
        .enumerate()
        .filter_map(|(index, port)| {
            matcher
                .fuzzy_match(&port.attr.title.to_lowercase(), query)
                .map(|score| (score, index))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, index)| index).collect()
}

fn parse_date(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}
