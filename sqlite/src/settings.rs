use serde::Deserialize;

pub const IN_MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone, Deserialize)]
pub struct SqliteSettings {
    /// Database file, created if missing. `:memory:` keeps the database in memory for the
    /// lifetime of the adapter.
    pub path: String,
    pub max_connections: u32,
}

impl SqliteSettings {
    pub fn in_memory() -> SqliteSettings {
        SqliteSettings {
            path: IN_MEMORY_PATH.into(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}
