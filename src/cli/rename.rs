// rename command: remote-side relink with best-effort cleanup
use crate::error::Result;
use crate::remote::Remote;

/// Re-link `old` under `new`.
///
/// The alias must land; a failure there surfaces and nothing is deleted.
/// Losing the delete afterwards only leaves the old name behind, so that
/// failure is logged and swallowed.
pub fn execute(remote: &dyn Remote, old: &str, new: &str) -> Result<()> {
    remote.link_archive(new, old)?;
    if let Err(err) = remote.delete_archive(old) {
        tracing::warn!("failed to delete {} after renaming to {}: {}", old, new, err);
    }
    Ok(())
}
