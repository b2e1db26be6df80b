// TUI application state and event handling
use portscout_cache::SessionStore;
use portscout_core::state::save_filter_state;
use portscout_core::{filter_ports, CatalogStore, FilterState, FilteredPort, Port};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating results
    Searching, // Typing in search box
    Filtering, // Navigating the filter panel
}

/// One row of the filter panel. The checkbox rows mirror the website's
/// dropdowns: availability modes, sort toggles, devices grouped under their
/// manufacturer, genres.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEntry {
    Section(String),
    ReadyToRun,
    FilesNeeded,
    SortNewest,
    SortAz,
    SortDownloaded,
    Device { code: String, label: String },
    Genre(String),
}

impl PanelEntry {
    pub fn is_section(&self) -> bool {
        matches!(self, PanelEntry::Section(_))
    }

    pub fn label(&self) -> &str {
        match self {
            PanelEntry::Section(name) => name,
            PanelEntry::ReadyToRun => "Ready to Run",
            PanelEntry::FilesNeeded => "Files Needed",
            PanelEntry::SortNewest => "Sort: Newest",
            PanelEntry::SortAz => "Sort: A-Z",
            PanelEntry::SortDownloaded => "Sort: Most Downloaded",
            PanelEntry::Device { label, .. } => label,
            PanelEntry::Genre(name) => name,
        }
    }
}

/// Build the filter panel rows from the loaded directories.
///
/// Runs once per load, like the website's dropdown builders; filter changes
/// only flip checkbox state, they never rebuild the panel.
pub fn build_filter_panel(catalog: &CatalogStore) -> Vec<PanelEntry> {
    let mut panel = vec![
        PanelEntry::Section("Availability".to_string()),
        PanelEntry::ReadyToRun,
        PanelEntry::FilesNeeded,
        PanelEntry::Section("Sort".to_string()),
        PanelEntry::SortNewest,
        PanelEntry::SortAz,
        PanelEntry::SortDownloaded,
    ];

    for manufacturer in catalog.manufacturers() {
        panel.push(PanelEntry::Section(manufacturer.clone()));
        for device in catalog.devices_of(&manufacturer) {
            panel.push(PanelEntry::Device {
                code: device.code.clone(),
                label: device.name.clone(),
            });
        }
    }

    if !catalog.genres.is_empty() {
        panel.push(PanelEntry::Section("Genres".to_string()));
        for genre in &catalog.genres {
            panel.push(PanelEntry::Genre(genre.clone()));
        }
    }

    panel
}

pub struct App {
    pub catalog: CatalogStore,
    pub state: FilterState,
    pub results: Vec<FilteredPort>,
    pub port_count: usize,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub show_filters: bool,
    pub filter_cursor: usize,
    pub panel: Vec<PanelEntry>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub error_message: Option<String>,
}

impl App {
    /// Build the app around the loaded catalog and the restored filter state.
    ///
    /// Passing the restored state here is what reflects a previous session
    /// back into the controls before anything renders: the panel checkboxes
    /// and the search box read from `state`, and the initial filter pass runs
    /// against it. That first pass snapshots the state to the session store
    /// like every later one, so a fresh session persists its defaults
    /// immediately.
    pub fn new(catalog: CatalogStore, state: FilterState, session: &SessionStore) -> Self {
        let panel = build_filter_panel(&catalog);
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        let mut app = Self {
            catalog,
            state,
            results: Vec::new(),
            port_count: 0,
            should_quit: false,
            input_mode: InputMode::Normal,
            show_filters: false,
            filter_cursor: 0,
            panel,
            selected_index: 0,
            list_state,
            error_message: None,
        };
        app.refilter_and_save(session);
        app
    }

    /// Run one filter pass and reset the result selection.
    pub fn apply_filters(&mut self) {
        let outcome = filter_ports(&self.catalog.ports, &self.state);
        self.results = outcome.ports;
        self.port_count = outcome.total;
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Filter pass + session snapshot, the pair every control change triggers.
    pub fn refilter_and_save(&mut self, session: &SessionStore) {
        self.apply_filters();
        save_filter_state(session, &self.state);
    }

    /// Flip the checkbox under the panel cursor. Section rows do nothing.
    pub fn toggle_current_entry(&mut self) -> bool {
        let Some(entry) = self.panel.get(self.filter_cursor) else {
            return false;
        };
        match entry {
            PanelEntry::Section(_) => false,
            PanelEntry::ReadyToRun => {
                self.state.ready_to_run = !self.state.ready_to_run;
                true
            }
            PanelEntry::FilesNeeded => {
                self.state.files_needed = !self.state.files_needed;
                true
            }
            PanelEntry::SortNewest => {
                self.state.newest = !self.state.newest;
                true
            }
            PanelEntry::SortAz => {
                self.state.az = !self.state.az;
                true
            }
            PanelEntry::SortDownloaded => {
                self.state.downloaded = !self.state.downloaded;
                true
            }
            PanelEntry::Device { code, .. } => {
                let code = code.clone();
                let checked = self.state.devices.get(&code).copied().unwrap_or(false);
                self.state.set_device(&code, !checked);
                true
            }
            PanelEntry::Genre(name) => {
                let name = name.clone();
                let checked = self.state.genres.get(&name).copied().unwrap_or(false);
                self.state.set_genre(&name, !checked);
                true
            }
        }
    }

    /// Checkbox state for a panel row; `None` for section rows.
    pub fn entry_checked(&self, entry: &PanelEntry) -> Option<bool> {
        match entry {
            PanelEntry::Section(_) => None,
            PanelEntry::ReadyToRun => Some(self.state.ready_to_run),
            PanelEntry::FilesNeeded => Some(self.state.files_needed),
            PanelEntry::SortNewest => Some(self.state.newest),
            PanelEntry::SortAz => Some(self.state.az),
            PanelEntry::SortDownloaded => Some(self.state.downloaded),
            PanelEntry::Device { code, .. } => {
                Some(self.state.devices.get(code).copied().unwrap_or(false))
            }
            PanelEntry::Genre(name) => {
                Some(self.state.genres.get(name).copied().unwrap_or(false))
            }
        }
    }

    pub fn next_filter(&mut self) {
        let mut cursor = self.filter_cursor;
        while cursor + 1 < self.panel.len() {
            cursor += 1;
            if !self.panel[cursor].is_section() {
                self.filter_cursor = cursor;
                return;
            }
        }
    }

    pub fn previous_filter(&mut self) {
        let mut cursor = self.filter_cursor;
        while cursor > 0 {
            cursor -= 1;
            if !self.panel[cursor].is_section() {
                self.filter_cursor = cursor;
                return;
            }
        }
    }

    pub fn next_result(&mut self) {
        if !self.results.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.results.len() - 1);
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn previous_result(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// The port under the result cursor, with its filter annotation.
    pub fn selected_port(&self) -> Option<(&Port, &FilteredPort)> {
        self.results
            .get(self.selected_index)
            .map(|f| (&self.catalog.ports[f.index], f))
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_filter_mode(&mut self) {
        self.input_mode = InputMode::Filtering;
        // land on the first toggleable row
        if self
            .panel
            .get(self.filter_cursor)
            .map(|e| e.is_section())
            .unwrap_or(true)
        {
            self.filter_cursor = 0;
            self.next_filter();
        }
    }

    pub fn toggle_filters(&mut self) {
        self.show_filters = !self.show_filters;
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
