// Filter-state persistence: one fixed key in the session store, overwritten
// on every filter pass, read once at startup
use portscout_cache::SessionStore;

use crate::filter::FilterState;

pub const FILTER_STATE_KEY: &str = "filterState";

/// Serialize the state and overwrite the stored value.
///
/// Storage failures are logged and swallowed: losing a session snapshot never
/// breaks filtering.
pub fn save_filter_state(store: &SessionStore, state: &FilterState) {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed to serialize filter state: {}", e);
            return;
        }
    };
    if let Err(e) = store.put(FILTER_STATE_KEY, &json) {
        tracing::warn!("failed to persist filter state: {}", e);
    }
}

/// Load the previously saved state, if any.
///
/// Absent or malformed storage yields `None`; the caller falls back to
/// `FilterState::default()` and carries on.
pub fn load_filter_state(store: &SessionStore) -> Option<FilterState> {
    let json = match store.get(FILTER_STATE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("failed to read filter state: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!("ignoring malformed saved filter state: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_state_loads_as_none() {
        let store = SessionStore::open_in_memory().unwrap();
        assert!(load_filter_state(&store).is_none());
    }

    #[test]
    fn state_round_trips() {
        let store = SessionStore::open_in_memory().unwrap();
        let mut state = FilterState {
            search_query: "doom".to_string(),
            ready_to_run: true,
            newest: true,
            ..Default::default()
        };
        state.set_device("rg351p", true);
        state.set_device("x55", false);
        state.set_genre("arcade", true);

        save_filter_state(&store, &state);
        assert_eq!(load_filter_state(&store), Some(state));
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let store = SessionStore::open_in_memory().unwrap();
        let first = FilterState {
            ready_to_run: true,
            ..Default::default()
        };
        let second = FilterState {
            files_needed: true,
            ..Default::default()
        };

        save_filter_state(&store, &first);
        save_filter_state(&store, &second);
        assert_eq!(load_filter_state(&store), Some(second));
    }

    #[test]
    fn malformed_stored_state_loads_as_none() {
        let store = SessionStore::open_in_memory().unwrap();
        store.put(FILTER_STATE_KEY, "{not json").unwrap();
        assert!(load_filter_state(&store).is_none());
    }

    #[test]
    fn stored_json_uses_original_key_names() {
        let store = SessionStore::open_in_memory().unwrap();
        save_filter_state(&store, &FilterState::default());
        let json = store.get(FILTER_STATE_KEY).unwrap().unwrap();
        assert!(json.contains("readyToRun"));
        assert!(json.contains("searchQuery"));
        assert!(json.contains("AZ"));
    }
}
