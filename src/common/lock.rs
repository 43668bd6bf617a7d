//! Single-instance lock file
//!
//! Exclusion comes from an advisory `flock` on the file, which the kernel
//! drops when the owner exits, so a crashed run never wedges later ones.
//! The file also carries the owner's PID for messages.

use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tokio::signal::unix::{SignalKind, signal};

use crate::ui::prelude::*;

#[derive(Debug)]
pub enum Acquire {
    Acquired(LockGuard),
    Held { pid: Option<i32> },
}

/// Removes the lock file when dropped, then releases the flock
pub struct LockGuard {
    path: PathBuf,
    _lock: Flock<File>,
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard").field("path", &self.path).finish()
    }
}

impl LockGuard {
    pub fn acquire(path: &Path) -> Result<Acquire> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating lock directory {}", parent.display()))?;
        }

        loop {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)
                .with_context(|| format!("opening lock {}", path.display()))?;

            let lock = match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(lock) => lock,
                Err((_, Errno::EWOULDBLOCK)) => {
                    return Ok(Acquire::Held {
                        pid: read_owner(path),
                    });
                }
                Err((_, errno)) => {
                    return Err(errno).with_context(|| format!("locking {}", path.display()));
                }
            };

            // Lost a race with the previous owner's unlink
            if !still_linked(path, &lock) {
                continue;
            }

            let previous = read_owner(path);
            if let Some(pid) = previous.filter(|&p| p != std::process::id() as i32) {
                emit(
                    Level::Warn,
                    "lock.stale",
                    &format!("Reclaiming stale lock {} (pid {pid})", path.display()),
                    Some(serde_json::json!({ "pid": pid })),
                );
            }

            let mut f: &File = &lock;
            f.set_len(0)
                .with_context(|| format!("truncating lock file {}", path.display()))?;
            writeln!(f, "{}", std::process::id())
                .with_context(|| format!("writing lock file {}", path.display()))?;

            return Ok(Acquire::Acquired(LockGuard {
                path: path.to_path_buf(),
                _lock: lock,
            }));
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn still_linked(path: &Path, file: &File) -> bool {
    match (fs::metadata(path), file.metadata()) {
        (Ok(on_disk), Ok(held)) => on_disk.dev() == held.dev() && on_disk.ino() == held.ino(),
        _ => false,
    }
}

fn read_owner(path: &Path) -> Option<i32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Run `work` while holding the lock at `path`.
///
/// Returns `Ok(None)` when another live instance holds the lock. On SIGINT,
/// SIGTERM or SIGHUP the lock is removed and the process exits with the
/// conventional 128+signal code.
pub async fn run_locked<T, F>(path: PathBuf, work: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    let guard = match LockGuard::acquire(&path)? {
        Acquire::Acquired(guard) => guard,
        Acquire::Held { pid } => {
            let owner = pid
                .map(|p| format!(" (pid {p})"))
                .unwrap_or_default();
            emit(
                Level::Info,
                "lock.held",
                &format!("Another hyprwall instance is running{owner}, nothing to do"),
                Some(serde_json::json!({ "pid": pid, "lock": path })),
            );
            return Ok(None);
        }
    };
    emit(
        Level::Debug,
        "lock.acquired",
        &format!("Acquired lock {}", guard.path().display()),
        None,
    );

    let task = tokio::task::spawn_blocking(work);

    let code = tokio::select! {
        res = task => {
            drop(guard);
            let value = res.context("wallpaper task panicked")??;
            return Ok(Some(value));
        }
        _ = sigint.recv() => 130,
        _ = sigterm.recv() => 143,
        _ = sighup.recv() => 129,
    };

    drop(guard);
    emit(
        Level::Warn,
        "lock.interrupted",
        "Interrupted, lock released",
        None,
    );
    std::process::exit(code);
}
