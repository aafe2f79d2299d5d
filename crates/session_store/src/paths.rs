use std::path::{Path, PathBuf};

pub const STORE_DIR: &str = ".chat_widget";
pub const STORE_FILE_NAME: &str = "local_storage.json";

#[must_use]
pub fn default_store_path(cwd: &Path) -> PathBuf {
    cwd.join(STORE_DIR).join(STORE_FILE_NAME)
}
