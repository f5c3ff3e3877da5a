// Persisting the generator's response body.

use crate::error::CoverError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_OUTPUT: &str = "test1.pdf";

/// Write `body` to `path` verbatim, replacing any existing file.
/// Returns the number of bytes written.
pub fn write_body(path: &Path, body: &[u8]) -> Result<u64, CoverError> {
    let wrap = |source| CoverError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(body).map_err(wrap)?;
    file.flush().map_err(wrap)?;
    debug!(path = %path.display(), bytes = body.len(), "cover written");
    Ok(body.len() as u64)
}
