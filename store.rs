use crate::*;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{io::ErrorKind, path::PathBuf};

/// Keeps the whole todo list in a single pretty-printed JSON file.
///
/// Every save overwrites the file in full without locking, so concurrent writers race
/// and the last one wins.
#[derive(Debug, Clone)]
pub struct TodoStore {
    path: PathBuf,
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Reads the list, a missing or blank file counts as an empty one
    pub async fn load(&self) -> Result<Vec<Todo>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(target: "store", "{} not found, starting empty", self.path.display());
                return Ok(vec![]);
            }
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(vec![]);
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Sorts the list into canonical order and overwrites the file with it
    pub async fn save(&self, todos: &mut [Todo]) -> Result {
        sort_todos(todos);
        let bytes = to_json(todos)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(target: "store", "saved {} todos to {}", todos.len(), self.path.display());
        Ok(())
    }
}

/// Serializes with 4-space indentation and unescaped unicode
fn to_json(todos: &[Todo]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128 * todos.len().max(1));
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    todos.serialize(&mut ser)?;
    Ok(buf)
}
