use std::path::Path;

use tokio::{fs::File, io::AsyncWriteExt};

use crate::error::PersistError;
use crate::Record;

/// Writes the records as one pretty-printed JSON array, replacing any existing file.
pub async fn write_records(path: &Path, records: &[Record]) -> Result<(), PersistError> {
    let bytes = serde_json::to_vec_pretty(records)?;
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).await.map_err(write_err)?;
    file.write_all(&bytes).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    Ok(())
}
