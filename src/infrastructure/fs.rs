//! Script output
//!
//! Writes the rendered script with the tempfile + rename pattern so a
//! half-written script is never left behind.

use std::io::Write;
use std::path::Path;

use crate::error::DeployResult;

/// Write `script` to `path` atomically and make it executable on unix.
pub fn write_script(path: &Path, script: &str) -> DeployResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(script.as_bytes())?;
    temp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o755))?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
