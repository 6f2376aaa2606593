//! Filesystem-backed artifact store.

use std::path::{Path, PathBuf};

use cellini_core::{
    ConceptOutput, ContinuityControlOutput, PromptRefinementOutput, QaAgentOutput,
    VisualDirectorOutput,
};
use cellini_error::{CelliniResult, StorageError, StorageErrorKind};
use serde::Serialize;
use tracing::info;

/// The artifacts written for one generation.
#[derive(Debug, Clone)]
pub struct GenerationArtifacts<'a> {
    /// Remote job identifier; keys the artifact directory
    pub generation_id: &'a str,
    /// Result video URL; empty when generation produced none
    pub video_url: &'a str,
    /// The creative concept
    pub concept: &'a ConceptOutput,
    /// The visual plan
    pub visual_plan: &'a VisualDirectorOutput,
    /// The final prompt bundle
    pub final_prompt: &'a PromptRefinementOutput,
    /// Last quality audit, when one ran
    pub qa_output: Option<&'a QaAgentOutput>,
    /// Last continuity audit, when one ran
    pub continuity_output: Option<&'a ContinuityControlOutput>,
}

/// Filesystem artifact store.
///
/// Writes one directory per generation id under the base directory:
/// five pretty-printed JSON documents plus the downloaded `video.mp4`.
/// Generation ids are unique, so concurrent requests cannot collide.
pub struct AssetStore {
    base_dir: PathBuf,
    http: reqwest::Client,
}

impl AssetStore {
    /// Create a new store rooted at `base_dir`.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_dir))]
    pub fn new(base_dir: impl Into<PathBuf>) -> CelliniResult<Self> {
        let base_dir = base_dir.into();

        std::fs::create_dir_all(&base_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_dir.display(),
                e
            )))
        })?;

        info!(path = %base_dir.display(), "Created asset store");
        Ok(Self {
            base_dir,
            http: reqwest::Client::new(),
        })
    }

    /// Write all artifacts for one generation, then download the video.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered; the caller treats any
    /// error here as non-fatal.
    #[tracing::instrument(
        skip(self, artifacts),
        fields(generation_id = %artifacts.generation_id)
    )]
    pub async fn persist(&self, artifacts: &GenerationArtifacts<'_>) -> CelliniResult<()> {
        let dir = self.base_dir.join(artifacts.generation_id);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        info!(path = %dir.display(), "Created asset directory");

        write_json(&dir.join("concept.json"), artifacts.concept).await?;
        write_json(&dir.join("visual_plan.json"), artifacts.visual_plan).await?;
        write_json(&dir.join("final_prompt.json"), artifacts.final_prompt).await?;
        match artifacts.qa_output {
            Some(qa) => write_json(&dir.join("qa_output.json"), qa).await?,
            None => write_json(&dir.join("qa_output.json"), &serde_json::json!({})).await?,
        }
        match artifacts.continuity_output {
            Some(continuity) => {
                write_json(&dir.join("continuity_output.json"), continuity).await?
            }
            None => {
                write_json(&dir.join("continuity_output.json"), &serde_json::json!({})).await?
            }
        }

        if !artifacts.video_url.is_empty() {
            self.download_video(artifacts.video_url, &dir.join("video.mp4"))
                .await?;
        }

        Ok(())
    }

    /// Download the generated video into the artifact directory.
    async fn download_video(&self, url: &str, path: &Path) -> CelliniResult<()> {
        info!(url, "Downloading video");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Download(e.to_string())))?;

        if !response.status().is_success() {
            return Err(StorageError::new(StorageErrorKind::Download(format!(
                "HTTP {} fetching {}",
                response.status(),
                url
            )))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Download(e.to_string())))?;

        tokio::fs::write(path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::WriteFailed(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        info!(path = %path.display(), size = bytes.len(), "Video saved");
        Ok(())
    }
}

/// Pretty-print one artifact to disk.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> CelliniResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;

    tokio::fs::write(path, rendered).await.map_err(|e| {
        StorageError::new(StorageErrorKind::WriteFailed(format!(
            "{}: {}",
            path.display(),
            e
        )))
        .into()
    })
}
