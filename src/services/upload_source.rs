use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncRead;

/// A readable upload source together with the name it came from.
///
/// The name is only used to derive a default object key (its final path
/// component); it does not have to exist on disk.
#[derive(Debug)]
pub struct NamedBuffer<R> {
    name: PathBuf,
    reader: R,
}

impl<R: AsyncRead + Unpin + Send> NamedBuffer<R> {
    pub fn new(name: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}

impl NamedBuffer<File> {
    /// Open a local file, naming the buffer after its path
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        Ok(Self::new(path, file))
    }
}
