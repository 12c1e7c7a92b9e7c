use std::fmt;
use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use svcmerge_common::MergeError;
use svcmerge_common::interrupt::Interrupt;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{STDIO_NAME, filetype};

const MAX_LINK_HOPS: usize = 40;

/// Where the merged file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSpec {
    Stdout,
    Path(PathBuf),
}

impl From<&str> for OutputSpec {
    fn from(s: &str) -> Self {
        match s {
            STDIO_NAME => OutputSpec::Stdout,
            path => OutputSpec::Path(PathBuf::from(path)),
        }
    }
}

impl FromStr for OutputSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for OutputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSpec::Stdout => write!(f, "standard output"),
            OutputSpec::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl OutputSpec {
    /// Fails early when the destination exists but cannot be written as a stream.
    pub fn validate(&self) -> Result<(), MergeError> {
        if let OutputSpec::Path(path) = self {
            filetype::check_optional(path, &self.to_string())?;
        }
        Ok(())
    }

    /// Writes `lines`, each terminated by a newline.
    ///
    /// Regular files are replaced atomically: the text goes to a temporary file
    /// next to the destination which is renamed over it once complete. FIFOs and
    /// character devices are written in place. An interrupt raised before the
    /// rename discards the temporary file and leaves the destination untouched.
    pub fn write_lines(&self, lines: &[String], interrupt: &Interrupt) -> Result<(), MergeError> {
        let name: String = self.to_string();
        let text: String = join_lines(lines);

        interrupt.check()?;

        match self {
            OutputSpec::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .map_err(|e| MergeError::write(&name, e))
            }
            OutputSpec::Path(path) => match filetype::check_optional(path, &name)? {
                Some(metadata) if !metadata.is_file() => write_in_place(path, &text, &name),
                existing => replace_atomically(path, existing, &text, &name, interrupt),
            },
        }
    }
}

fn join_lines(lines: &[String]) -> String {
    let mut text: String = lines.join("\n");
    text.push('\n');
    text
}

fn write_in_place(path: &Path, text: &str, name: &str) -> Result<(), MergeError> {
    debug!("Writing {name} in place");

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| MergeError::open(name, e))?;

    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| MergeError::write(name, e))
}

fn replace_atomically(
    path: &Path,
    existing: Option<Metadata>,
    text: &str,
    name: &str,
    interrupt: &Interrupt,
) -> Result<(), MergeError> {
    // Replace the link target, not the link.
    let target: PathBuf = resolve_links(path).map_err(|e| MergeError::open(name, e))?;
    let dir: &Path = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    interrupt.begin_staging()?;
    let mut temp: NamedTempFile =
        NamedTempFile::new_in(dir).map_err(|e| MergeError::write(name, e))?;
    debug!("Staging {name} in {}", temp.path().display());

    temp.write_all(text.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| MergeError::write(name, e))?;

    match &existing {
        Some(metadata) => fs::set_permissions(temp.path(), metadata.permissions()),
        None => set_default_permissions(temp.path()),
    }
    .map_err(|e| MergeError::write(name, e))?;

    interrupt.check()?;

    temp.persist(&target)
        .map_err(|e| MergeError::write(name, e.error))?;
    Ok(())
}

/// Follows symlinks one hop at a time, so a dangling link still yields the
/// path it points to.
fn resolve_links(path: &Path) -> io::Result<PathBuf> {
    let mut target: PathBuf = path.to_path_buf();

    for _ in 0..MAX_LINK_HOPS {
        match fs::symlink_metadata(&target) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                let link: PathBuf = fs::read_link(&target)?;
                target = match target.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                };
            }
            Ok(_) => return Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(target),
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::other("too many levels of symbolic links"))
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dash_means_stdout() {
        assert_eq!("-".parse::<OutputSpec>().unwrap(), OutputSpec::Stdout);
        assert_eq!(OutputSpec::Stdout.to_string(), "standard output");
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services");
        let spec = OutputSpec::Path(path.clone());

        spec.write_lines(&lines(&["# header", "# EOF"]), &Interrupt::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# header\n# EOF\n");
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services");
        fs::write(&path, "old contents that are longer than the new ones\n").unwrap();

        let spec = OutputSpec::Path(path.clone());
        spec.write_lines(&lines(&["# EOF"]), &Interrupt::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# EOF\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn interrupt_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("services");
        fs::write(&path, "original\n").unwrap();

        let interrupt = Interrupt::new();
        interrupt.raise();

        let spec = OutputSpec::Path(path.clone());
        let err = spec.write_lines(&lines(&["# EOF"]), &interrupt).unwrap_err();

        assert!(matches!(err, MergeError::Interrupted));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn directory_destination_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let spec = OutputSpec::Path(dir.path().to_path_buf());

        assert!(matches!(spec.validate(), Err(MergeError::InvalidFileType { .. })));
    }

    #[test]
    fn staging_is_announced_for_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let interrupt = Interrupt::new();

        let spec = OutputSpec::Path(dir.path().join("services"));
        spec.write_lines(&lines(&["# EOF"]), &interrupt).unwrap();

        assert!(interrupt.is_staging());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_target_is_created() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("services");
        let real = dir.path().join("real.services");
        symlink("real.services", &link).unwrap();

        let spec = OutputSpec::Path(link.clone());
        spec.write_lines(&lines(&["# EOF"]), &Interrupt::new()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "# EOF\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn existing_symlink_target_is_replaced() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("services");
        let real = dir.path().join("real.services");
        fs::write(&real, "old\n").unwrap();
        symlink(&real, &link).unwrap();

        let spec = OutputSpec::Path(link.clone());
        spec.write_lines(&lines(&["# EOF"]), &Interrupt::new()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "# EOF\n");
    }

    #[cfg(unix)]
    #[test]
    fn character_device_is_written_in_place() {
        let spec = OutputSpec::Path(PathBuf::from("/dev/null"));
        spec.write_lines(&lines(&["# EOF"]), &Interrupt::new()).unwrap();
    }
}
