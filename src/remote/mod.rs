// Remote backup tool invocation
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::error::{Result, SnapkeepError};

/// Diagnostic substring the remote tool emits when an archive name is taken.
/// The only piece of free-text error output this program inspects.
const COLLISION_SIGNAL: &str = "archive already exists";

/// Structured result of a create invocation. A name collision is not an
/// error; the storer decides whether to retry under another name or
/// overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Collision,
}

/// Narrow interface over the external backup tool. Everything that shells
/// out or parses tool output lives behind this boundary.
pub trait Remote {
    /// Lazily enumerate all remote archive names.
    fn list_archives(&self) -> Result<Box<dyn Iterator<Item = Result<String>>>>;

    /// Snapshot `archive` (an entry under `root`) as `name`. Exclusions are
    /// paths relative to `root`.
    fn create_archive(
        &self,
        name: &str,
        root: &Path,
        archive: &str,
        excludes: &[PathBuf],
    ) -> Result<CreateOutcome>;

    /// Create `new` as a remote-side alias of the data already stored under
    /// `old`. No data is re-uploaded.
    fn link_archive(&self, new: &str, old: &str) -> Result<()>;

    fn delete_archive(&self, name: &str) -> Result<()>;
}

/// The real tool.
pub struct Tarsnap {
    binary: PathBuf,
}

impl Tarsnap {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Remote for Tarsnap {
    fn list_archives(&self) -> Result<Box<dyn Iterator<Item = Result<String>>>> {
        let child = Command::new(&self.binary)
            .arg("--list-archives")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()?;
        Ok(Box::new(ArchiveStream::new(child)))
    }

    fn create_archive(
        &self,
        name: &str,
        root: &Path,
        archive: &str,
        excludes: &[PathBuf],
    ) -> Result<CreateOutcome> {
        let mut cmd = Command::new(&self.binary);
        // -L follows symlinks, so entries under the root may be links to the
        // real data directories.
        cmd.arg("-L");
        for exclude in excludes {
            cmd.arg("--exclude").arg(exclude);
        }
        cmd.arg("-cf").arg(name).arg(archive);
        cmd.current_dir(root);

        let output = cmd
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?
            .wait_with_output()?;

        if output.status.success() {
            return Ok(CreateOutcome::Created);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains(COLLISION_SIGNAL) {
            Ok(CreateOutcome::Collision)
        } else {
            Err(SnapkeepError::RemoteTool(format!(
                "create-archive {} failed: {}",
                name,
                stderr.trim()
            )))
        }
    }

    fn link_archive(&self, new: &str, old: &str) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-cf").arg(new).arg(format!("@@{}", old));
        run_checked("link-archive", &mut cmd)
    }

    fn delete_archive(&self, name: &str) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-df").arg(name);
        run_checked("delete-archive", &mut cmd)
    }
}

fn run_checked(operation: &str, cmd: &mut Command) -> Result<()> {
    let status = cmd.stdin(Stdio::null()).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(SnapkeepError::RemoteTool(format!(
            "{} exited with {}",
            operation, status
        )))
    }
}

/// Streaming view of the `list-archives` output. The child process is
/// scoped to this value: when the consumer stops early, `Drop` drains the
/// remaining output and reaps the process so no zombie or broken pipe is
/// left behind.
struct ArchiveStream {
    child: Child,
    reader: Option<BufReader<ChildStdout>>,
    finished: bool,
}

impl ArchiveStream {
    fn new(mut child: Child) -> Self {
        let reader = child.stdout.take().map(BufReader::new);
        Self {
            child,
            reader,
            finished: false,
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        self.reader = None;
        let status = self.child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(SnapkeepError::RemoteTool(format!(
                "list-archives exited with {}",
                status
            )))
        }
    }
}

impl Iterator for ArchiveStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let mut line = String::new();
            let read = match self.reader.as_mut() {
                Some(reader) => reader.read_line(&mut line),
                None => Ok(0),
            };
            match read {
                // EOF: the exit status decides whether the listing was complete.
                Ok(0) => {
                    return match self.finish() {
                        Ok(()) => None,
                        Err(err) => Some(Err(err)),
                    };
                }
                Ok(_) => {
                    let name = line.trim_end_matches('\n');
                    if name.is_empty() {
                        continue;
                    }
                    return Some(Ok(name.to_string()));
                }
                Err(err) => {
                    let _ = self.finish();
                    return Some(Err(err.into()));
                }
            }
        }
    }
}

impl Drop for ArchiveStream {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Some(mut reader) = self.reader.take() {
            let _ = std::io::copy(&mut reader, &mut std::io::sink());
        }
        let _ = self.child.wait();
    }
}
