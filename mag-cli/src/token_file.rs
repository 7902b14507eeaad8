use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mag_client::{MagClientError, MagClientResult, TokenStore, parse_token};

/// Токен сессии в файле, аналог `localStorage` для CLI.
#[derive(Debug, Clone)]
pub(crate) struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

fn storage_error(action: &str, path: &Path, err: io::Error) -> MagClientError {
    MagClientError::Storage(format!("failed to {action} {}: {err}", path.display()))
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> MagClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(parse_token(&raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_error("read", &self.path, err)),
        }
    }

    fn save(&self, token: &str) -> MagClientResult<()> {
        fs::write(&self.path, token).map_err(|err| storage_error("write", &self.path, err))
    }

    fn clear(&self) -> MagClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error("remove", &self.path, err)),
        }
    }
}
