use simple_txtar::Archive;
use std::fs;
use tempfile::TempDir;

/// Creates a temporary directory holding every file of a txtar archive.
/// The directory is removed when the returned handle is dropped.
pub fn temp_dir_from_archive(archive: &Archive) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    for file in archive.iter() {
        let file_path = temp_dir.path().join(&file.name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, &file.content)?;
    }
    Ok(temp_dir)
}
