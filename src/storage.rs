#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

/// 勤務記録の一覧を保存するキー。
pub const HOURS_ENTRIES_KEY: &str = "hoursEntries";

/// 文字列をキーごとに保存するためのtrait。
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// キーに対応する値を取得する。存在しない場合は`None`を返す。
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// キーに値を保存する。既存の値は上書きする。
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// キーを削除する。存在しないキーの削除はエラーにしない。
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// キーごとに`<dir>/<key>.json`のファイルとして保存する。
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// 新しい`FileStore`を返す。
    ///
    /// ディレクトリは最初の書き込み時に作成する。
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {}", self.dir.display()))?;
        let path = self.path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Saved {} ({} bytes)", path.display(), value.len());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// メモリ上に保存する。
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
