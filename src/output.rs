// src/output.rs
// =============================================================================
// The record sink: writes page records as JSON Lines (one object per line).
//
// Runs as its own task, draining the channel the crawler sends into, so a
// slow disk never blocks fetching beyond the channel's capacity.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;

use crate::crawl::PageRecord;

pub type RecordWriter = Box<dyn AsyncWrite + Send + Unpin>;

// Opens `path` for writing, or stdout when no path is given
pub async fn open_output(path: Option<&Path>) -> Result<RecordWriter> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(tokio::io::stdout())),
    }
}

// Writes every record received until the channel closes
//
// Returns how many records were written.
pub async fn write_records<W>(mut records: mpsc::Receiver<PageRecord>, writer: W) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut writer = BufWriter::new(writer);
    let mut written = 0;

    while let Some(record) = records.recv().await {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        writer
            .write_all(&line)
            .await
            .context("Failed to write page record")?;
        written += 1;
    }

    writer.flush().await.context("Failed to flush page records")?;
    Ok(written)
}
