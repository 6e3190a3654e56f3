use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use shared::UserProfile;
use thiserror::Error;

/// Signed-in state kept across page reloads
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to persist session: {0}")]
    Storage(String),
}

/// Reads the stored session; a missing or unreadable entry means signed out
pub fn load(key: &str) -> Option<Session> {
    LocalStorage::get::<Session>(key).ok()
}

pub fn save(key: &str, session: &Session) -> Result<(), SessionError> {
    LocalStorage::set(key, session).map_err(|e| SessionError::Storage(e.to_string()))
}

pub fn clear(key: &str) {
    LocalStorage::delete(key);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_survives_reload() {
        let key = "aquatrack.session.test";
        let session = Session {
            token: Some("token-1".to_string()),
            user: Some(UserProfile {
                name: "Olena".to_string(),
                ..Default::default()
            }),
        };

        save(key, &session).unwrap();
        assert_eq!(load(key), Some(session));

        clear(key);
        assert_eq!(load(key), None);
    }
}
