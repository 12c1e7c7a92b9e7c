use std::fs::{self, FileType, Metadata};
use std::io;
use std::path::Path;

use svcmerge_common::MergeError;

/// Returns the metadata of `path` if it is something we can stream through.
///
/// Symlinks are followed. Directories, sockets and block devices are refused.
pub fn check(path: &Path, display_name: &str) -> Result<Metadata, MergeError> {
    let metadata: Metadata =
        fs::metadata(path).map_err(|e| MergeError::open(display_name, e))?;

    if !is_streamable(&metadata.file_type()) {
        return Err(MergeError::InvalidFileType {
            path: path.to_path_buf(),
        });
    }

    Ok(metadata)
}

/// Like [`check`], but a missing path is fine and yields `None`.
pub fn check_optional(path: &Path, display_name: &str) -> Result<Option<Metadata>, MergeError> {
    match check(path, display_name) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(MergeError::Open { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn is_streamable(file_type: &FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;

    file_type.is_file() || file_type.is_fifo() || file_type.is_char_device()
}

#[cfg(not(unix))]
fn is_streamable(file_type: &FileType) -> bool {
    file_type.is_file()
}
