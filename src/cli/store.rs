// store command: sequential batch snapshots, smallest archive first
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::Config;
use crate::error::{Result, SnapkeepError};
use crate::remote::{CreateOutcome, Remote};
use crate::sizing;

/// Run one store batch.
///
/// Explicitly named archives are validated against the root before any
/// remote call and processed in the given order. An empty list means
/// "everything under the root", ascending by on-disk size. Strictly
/// sequential: the first fatal failure stops the run, leaving earlier
/// snapshots in place and later ones unattempted.
pub fn execute(config: &Config, remote: &dyn Remote, archives: &[String], force: bool) -> Result<()> {
    let targets = if archives.is_empty() {
        sizing::ordered_candidates(&config.directory)?
    } else {
        for name in archives {
            if !config.directory.join(name).exists() {
                return Err(SnapkeepError::MissingArchive {
                    name: name.clone(),
                    root: config.directory.clone(),
                });
            }
        }
        archives.to_vec()
    };

    for archive in &targets {
        store_single(config, remote, archive, force)?;
    }

    tracing::info!("Done");
    Ok(())
}

fn store_single(config: &Config, remote: &dyn Remote, archive: &str, force: bool) -> Result<()> {
    let today = Local::now().date_naive().to_string();
    store_dated(config, remote, archive, &today, force)
}

/// Snapshot one archive as `<archive>_<date>`.
///
/// On a name collision the next candidate appends `.1`, `.2`, ... until the
/// create lands or a non-collision failure surfaces. With `force`, the
/// colliding archive is deleted and recreated under the same name instead.
/// The remote side is the sole arbiter of existence, so candidates are
/// probed by attempting the create, never by a pre-check.
pub(crate) fn store_dated(
    config: &Config,
    remote: &dyn Remote,
    archive: &str,
    today: &str,
    force: bool,
) -> Result<()> {
    let excludes: Vec<PathBuf> = config
        .exclusions_for(archive)
        .iter()
        .map(|exclude| Path::new(archive).join(exclude))
        .collect();

    // The only progress signal during a potentially long-running upload.
    tracing::info!("Archiving {}...", archive);

    let mut candidate = format!("{}_{}", archive, today);
    let mut attempt = 0u32;
    loop {
        match remote.create_archive(&candidate, &config.directory, archive, &excludes)? {
            CreateOutcome::Created => return Ok(()),
            CreateOutcome::Collision if force => {
                tracing::info!("{} already exists, overwriting", candidate);
                remote.delete_archive(&candidate)?;
                return match remote.create_archive(
                    &candidate,
                    &config.directory,
                    archive,
                    &excludes,
                )? {
                    CreateOutcome::Created => Ok(()),
                    CreateOutcome::Collision => Err(SnapkeepError::RemoteTool(format!(
                        "{} still exists after deletion",
                        candidate
                    ))),
                };
            }
            CreateOutcome::Collision => {
                attempt += 1;
                candidate = format!("{}_{}.{}", archive, today, attempt);
                tracing::info!("name taken, retrying as {}", candidate);
            }
        }
    }
}
