//! Filesystem access for the file server.
//!
//! The connection handler never touches `std::fs` directly. It goes through
//! the [`FileSystem`] trait, so tests can substitute failures the real
//! filesystem will not produce on demand.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use path_clean::PathClean;
use tokio::io::AsyncRead;

use crate::http::response::StatusCode;

/// A readable byte stream handed back by [`FileSystem::open`].
pub type FileReader = Box<dyn AsyncRead + Send + Unpin>;

/// What the handler needs to know about a path before opening it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub is_dir: bool,
    /// The "others can read" permission bit.
    pub world_readable: bool,
}

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;
    async fn open(&self, path: &Path) -> io::Result<FileReader>;
}

/// The real filesystem, through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            size: meta.len(),
            is_dir: meta.is_dir(),
            world_readable: world_readable(&meta),
        })
    }

    async fn open(&self, path: &Path) -> io::Result<FileReader> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::new(file))
    }
}

#[cfg(unix)]
fn world_readable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    meta.permissions().mode() & 0o004 != 0
}

// No permission bits for "others" outside unix; anything we can stat counts.
#[cfg(not(unix))]
fn world_readable(_meta: &std::fs::Metadata) -> bool {
    true
}

/// Maps a request target onto a path under `root`.
///
/// The target is cleaned as a rooted path first, so `..` segments stop at
/// `/` and the joined result stays lexically inside `root`. A bare `/`
/// becomes `/index.html`.
pub fn resolve_target(root: &Path, target: &str) -> PathBuf {
    let target = if target == "/" { "/index.html" } else { target };

    let rooted = Path::new("/").join(target.trim_start_matches('/')).clean();
    let relative = rooted.strip_prefix("/").unwrap_or(rooted.as_path());

    root.join(relative).clean()
}

/// Outcome of looking up a resolved path. Exactly one per request.
pub enum Resolution {
    Found { file: FileReader, stat: FileStat },
    Forbidden,
    NotFound,
    OpenFailed(io::Error),
}

impl Resolution {
    /// Status the handler answers with for this outcome.
    pub fn status(&self) -> StatusCode {
        match self {
            Resolution::Found { .. } => StatusCode::Ok,
            Resolution::Forbidden => StatusCode::Forbidden,
            Resolution::NotFound => StatusCode::NotFound,
            Resolution::OpenFailed(_) => StatusCode::InternalServerError,
        }
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Found { stat, .. } => f.debug_struct("Found").field("stat", stat).finish(),
            Resolution::Forbidden => f.write_str("Forbidden"),
            Resolution::NotFound => f.write_str("NotFound"),
            Resolution::OpenFailed(e) => f.debug_tuple("OpenFailed").field(e).finish(),
        }
    }
}

/// Checks existence, then permission, then opens.
pub async fn resolve<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Resolution {
    let stat = match fs.stat(path).await {
        Ok(stat) => stat,
        Err(e) => {
            return match e.kind() {
                io::ErrorKind::NotFound => Resolution::NotFound,
                io::ErrorKind::PermissionDenied => Resolution::Forbidden,
                _ => Resolution::OpenFailed(e),
            };
        }
    };

    if stat.is_dir {
        return Resolution::NotFound;
    }

    if !stat.world_readable {
        return Resolution::Forbidden;
    }

    match fs.open(path).await {
        Ok(file) => Resolution::Found { file, stat },
        Err(e) => Resolution::OpenFailed(e),
    }
}
