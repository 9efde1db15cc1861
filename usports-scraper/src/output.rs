use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use usports_stats::UsportsData;

/// The persisted result: assembled data plus when and for which season.
#[derive(Debug, Serialize)]
pub struct OutputDocument<'a> {
    #[serde(flatten)]
    pub data: &'a UsportsData,
    pub season: &'a str,
    pub generated_at: String,
}

impl<'a> OutputDocument<'a> {
    pub fn new(data: &'a UsportsData, season: &'a str) -> Self {
        Self {
            data,
            season,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

pub fn write_document(path: &Path, document: &OutputDocument<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
