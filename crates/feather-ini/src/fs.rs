use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Replaces the contents of `path` with `contents`. The data goes to a
/// temporary file in the same directory first and is then renamed over the
/// destination, so readers never see a half-written file.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let mut tmp = Builder::new().prefix(".feather-ini").tempfile_in(&parent)?;

    tmp.as_file_mut().write_all(contents)?;
    tmp.as_file_mut().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let perm = metadata.permissions().mode();
            let _ = fs::set_permissions(tmp.path(), fs::Permissions::from_mode(perm));
        }
    }

    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_contents() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("settings.ini");
        fs::write(&file_path, "[old]\nkey=value\n").unwrap();

        atomic_write(&file_path, b"[new]\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[new]\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("absent").join("settings.ini");

        assert!(atomic_write(&file_path, b"x=1\n").is_err());
        assert!(!file_path.exists());
    }
}
