use crate::core::Storage;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// `localStorage` kept in one JSON file: `{ "<entry>": "<string value>" }`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the new contents are written to before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) if data.is_empty() => Ok(BTreeMap::new()),
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for LocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.read_all().await?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // 先寫暫存檔再 rename，中斷時原檔不會被截斷
        let data = serde_json::to_vec_pretty(&items)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, data).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        tracing::debug!("Wrote '{}' to {}", key, self.path.display());
        Ok(())
    }
}
