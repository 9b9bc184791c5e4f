use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::error::StoreError;
use crate::store::schema::SCHEMA_VERSION;

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const PROFILES_FILE: &str = "profiles.json";
pub const POSTS_FILE: &str = "posts.json";
pub const SESSION_FILE: &str = "session.json";

/// Directory of pretty-printed JSON documents, one file per collection.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("thundertype")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing files load as `T::default()`. An unparseable file is moved to
    /// `<name>.corrupt` first so the next save cannot destroy it. A file from a
    /// newer schema is refused outright.
    pub fn load<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.file_path(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => return self.set_aside(name, &e),
        };
        if let Some(found) = value.get("schema_version").and_then(Value::as_u64) {
            if found > u64::from(SCHEMA_VERSION) {
                return Err(StoreError::UnsupportedVersion {
                    file: name.to_string(),
                    found,
                });
            }
        }
        match serde_json::from_value(value) {
            Ok(data) => Ok(data),
            Err(e) => self.set_aside(name, &e),
        }
    }

    fn set_aside<T: Default>(&self, name: &str, err: &serde_json::Error) -> Result<T, StoreError> {
        let path = self.file_path(name);
        let aside = self.file_path(&format!("{name}.corrupt"));
        fs::rename(&path, &aside)?;
        warn!(
            file = %path.display(),
            moved_to = %aside.display(),
            error = %err,
            "set aside unparseable store file"
        );
        Ok(T::default())
    }

    /// Write to `<name>.tmp` then rename over the original.
    pub fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<(), StoreError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
