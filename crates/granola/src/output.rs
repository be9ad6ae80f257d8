use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::source::FileSink;

/// Writes output files to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

#[async_trait]
impl FileSink for FsSink {
  async fn write_text_file(&self, path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, content).await?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote output file");
    Ok(())
  }
}
