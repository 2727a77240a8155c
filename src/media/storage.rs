use super::types::ImageConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Write sink for generated images: `<output_dir>/<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct GeneratedImageStore {
    output_dir: PathBuf,
    max_file_size: u64,
}

impl GeneratedImageStore {
    pub fn new(config: &ImageConfig) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output_dir),
            max_file_size: config.max_file_size_mb * 1_024 * 1_024,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Check the bytes are an image within the size limit, then write them.
    /// Returns the written path.
    pub async fn store(&self, data: &[u8]) -> Result<PathBuf> {
        if data.is_empty() {
            anyhow::bail!("image payload is empty");
        }
        if data.len() as u64 > self.max_file_size {
            anyhow::bail!(
                "image size {} exceeds maximum {} bytes",
                data.len(),
                self.max_file_size
            );
        }

        let mime = infer::get(data).map(|info| info.mime_type());
        let ext = match mime {
            Some(mime) => extension_for_image(mime)
                .with_context(|| format!("generated payload is {mime}, not an image"))?,
            None => anyhow::bail!("generated payload is not a recognizable image"),
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create image output directory: {}",
                    self.output_dir.display()
                )
            })?;

        let path = self.output_dir.join(format!("{}.{ext}", Uuid::new_v4().simple()));
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to write generated image: {}", path.display()))?;
        Ok(path)
    }
}

fn extension_for_image(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}
