use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::ortholog::OrthologMap;

/// Write `target\tsource` lines, ascending by source identifier
pub fn write_mapping<W: Write>(mut writer: W, orthologs: &OrthologMap) -> Result<()> {
    for (source, target) in orthologs {
        writeln!(writer, "{target}\t{source}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the mapping to `path` all-or-nothing.
///
/// The lines go to a temp file in the destination directory which is renamed
/// over `path` only after a successful flush. On error the temp file is
/// dropped (and deleted) and any existing `path` is left as it was.
pub fn write_mapping_file<P: AsRef<Path>>(path: P, orthologs: &OrthologMap) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    {
        let writer = BufWriter::new(temp.as_file());
        write_mapping(writer, orthologs)
            .with_context(|| format!("Failed to write {}", temp.path().display()))?;
    }
    temp.as_file().sync_all()?;
    set_output_permissions(&temp, path)?;

    temp.persist(path)
        .with_context(|| format!("Failed to move output into place at {}", path.display()))?;
    Ok(())
}

/// Give the temp file the mode of the file it replaces, or 0644 for a new one
#[cfg(unix)]
fn set_output_permissions(temp: &NamedTempFile, path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match std::fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(_) => std::fs::Permissions::from_mode(0o644),
    };
    temp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("Failed to set permissions on {}", temp.path().display()))
}

#[cfg(not(unix))]
fn set_output_permissions(_temp: &NamedTempFile, _path: &Path) -> Result<()> {
    Ok(())
}
