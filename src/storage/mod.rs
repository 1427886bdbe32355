pub mod database;
pub mod gallery_db;
pub mod models;

pub use gallery_db::GalleryDatabase;
pub use models::{Project, ProjectCategory};

use std::fs;
use std::path::Path;

/// Ensure the directory holding the database exists
pub fn ensure_data_dir<P: AsRef<Path>>(db_path: P) -> std::io::Result<()> {
    if let Some(parent) = db_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
