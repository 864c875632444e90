use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

pub fn resolve_session_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("TREZO_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".trezo")
            } else {
                return Err(ClientError::session_store_failed(
                    "Could not resolve a home directory for the session file.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn session_file_path(home: &Path) -> PathBuf {
    home.join("session.json")
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open_default() -> ClientResult<Self> {
        Self::open_with_home_override(None)
    }

    pub fn open_at(home_override: &Path) -> ClientResult<Self> {
        Self::open_with_home_override(Some(home_override))
    }

    fn open_with_home_override(home_override: Option<&Path>) -> ClientResult<Self> {
        let session_home = resolve_session_home(home_override)?;
        fs::create_dir_all(&session_home)
            .map_err(|error| ClientError::session_store_failed(&error.to_string()))?;
        set_private_permissions_best_effort(&session_home, 0o700);
        Ok(Self {
            path: session_file_path(&session_home),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is "not signed in". A file that cannot be parsed is
    /// treated the same way so a corrupt write never locks the user out.
    pub fn load(&self) -> ClientResult<Option<SessionState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(ClientError::session_store_failed(&error.to_string())),
        };

        match serde_json::from_str::<SessionState>(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(error) => {
                log::warn!(
                    "discarding unreadable session file {}: {error}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    pub fn save(&self, state: &SessionState) -> ClientResult<()> {
        let body = serde_json::to_string_pretty(state)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        fs::write(&self.path, body)
            .map_err(|error| ClientError::session_store_failed(&error.to_string()))?;
        set_private_permissions_best_effort(&self.path, 0o600);
        Ok(())
    }

    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::session_store_failed(&error.to_string())),
        }
    }
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::session_store_failed(&error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(mode));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path, _mode: u32) {}

#[cfg(test)]
mod tests {
    use super::{SessionState, SessionStore};

    fn sample_state() -> SessionState {
        SessionState {
            token: "tok_abc".to_string(),
            username: "ana".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path()).unwrap();

        assert_eq!(store.load().unwrap(), None);
        store.save(&sample_state()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_state()));
    }

    #[test]
    fn clear_removes_state_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path()).unwrap();

        store.save(&sample_state()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn unreadable_session_file_loads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path()).unwrap();

        std::fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn missing_role_defaults_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path()).unwrap();

        std::fs::write(store.path(), r#"{"token":"t","username":"u"}"#).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(
            loaded,
            Some(SessionState {
                token: "t".to_string(),
                username: "u".to_string(),
                role: String::new(),
            })
        );
    }
}
