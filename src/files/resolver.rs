//! Maps request targets onto files under the document root.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::http::error::ProtocolError;
use crate::http::mime::{self, TEXT_HTML};

/// Index files tried, in order, for targets ending in `/`.
pub const INDEX_FILES: [&str; 2] = ["index.htm", "index.html"];

/// The fixed base directory every request target is resolved against.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

/// An opened file ready to be streamed into a response.
///
/// Owns the read handle; `read_body` consumes the resource so the handle is
/// closed as soon as the contents have been read, or on drop if they never are.
#[derive(Debug)]
pub struct ResolvedResource {
    /// Filesystem path that was opened
    pub path: PathBuf,
    /// Size of the file when it was opened
    pub byte_length: u64,
    /// Content type to advertise
    pub content_type: &'static str,
    /// Whether an index file stood in for a directory target
    pub is_directory_index: bool,
    file: File,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves and opens `target`.
    ///
    /// Directory targets try `index.htm` then `index.html` and are always
    /// served as `text/html`; otherwise the content type comes from
    /// `extension`. Unreadable files give `Forbidden`, anything else that
    /// fails to open (or opens as a directory) gives `NotFound`.
    pub async fn resolve(
        &self,
        target: &str,
        extension: Option<&str>,
    ) -> Result<ResolvedResource, ProtocolError> {
        let relative = contained_relative_path(target).ok_or(ProtocolError::Forbidden)?;
        let base = self.root.join(relative);

        if target.ends_with('/') {
            let mut last_err = ProtocolError::NotFound;
            for index in INDEX_FILES {
                match open(base.join(index)).await {
                    Ok((path, file, byte_length)) => {
                        return Ok(ResolvedResource {
                            path,
                            byte_length,
                            content_type: TEXT_HTML,
                            is_directory_index: true,
                            file,
                        });
                    }
                    Err(e) => last_err = e,
                }
            }
            return Err(last_err);
        }

        let (path, file, byte_length) = open(base).await?;
        Ok(ResolvedResource {
            path,
            byte_length,
            content_type: mime::content_type_for(extension),
            is_directory_index: false,
            file,
        })
    }
}

impl ResolvedResource {
    /// Reads the whole file, closing the handle afterwards.
    ///
    /// Short reads are retried until `byte_length` bytes have arrived or the
    /// file runs out, whichever comes first.
    pub async fn read_body(self) -> std::io::Result<Vec<u8>> {
        let capacity = usize::try_from(self.byte_length).unwrap_or(0);
        let mut body = Vec::with_capacity(capacity);
        self.file.take(self.byte_length).read_to_end(&mut body).await?;
        Ok(body)
    }
}

async fn open(path: PathBuf) -> Result<(PathBuf, File, u64), ProtocolError> {
    let file = File::open(&path).await.map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => ProtocolError::Forbidden,
        _ => ProtocolError::NotFound,
    })?;

    let metadata = file.metadata().await.map_err(|_| ProtocolError::NotFound)?;
    if metadata.is_dir() {
        return Err(ProtocolError::NotFound);
    }

    Ok((path, file, metadata.len()))
}

/// Turns a target into a path relative to the root, refusing anything that
/// could step outside it.
fn contained_relative_path(target: &str) -> Option<PathBuf> {
    let relative = target.strip_prefix('/')?;
    let path = Path::new(relative);

    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then(|| path.to_path_buf())
}
