//! Application shell holding the current snapshot

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::assembler::ReportAssembler;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::model::Snapshot;
use crate::render;

/// Keeps the last successful snapshot and serves the trigger surface
pub struct ReportApp {
    assembler: ReportAssembler,
    config: Arc<ReportConfig>,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl ReportApp {
    pub fn new(assembler: ReportAssembler, config: Arc<ReportConfig>) -> Self {
        Self {
            assembler,
            config,
            current: RwLock::new(None),
        }
    }

    /// App backed by the simulated sources
    pub fn simulated(config: Arc<ReportConfig>) -> Self {
        Self::new(ReportAssembler::simulated(config.clone()), config)
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The held snapshot, if a report was generated
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }

    async fn require_current(&self) -> Result<Arc<Snapshot>> {
        self.current().await.ok_or_else(|| {
            tracing::warn!("no report generated yet");
            ReportError::NoReportAvailable
        })
    }

    /// Generate a new snapshot and make it current.
    ///
    /// On failure the previous snapshot stays in place. Overlapping refreshes
    /// are not cancelled; the last one to finish wins.
    pub async fn refresh(&self, use_mock: bool) -> Result<Arc<Snapshot>> {
        let snapshot = match self.assembler.generate_report(use_mock).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed, keeping previous report");
                return Err(e);
            }
        };

        *self.current.write().await = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub async fn render_html(&self) -> Result<String> {
        render::render_html(&*self.require_current().await?)
    }

    pub async fn render_markdown(&self) -> Result<String> {
        Ok(render::render_markdown(&*self.require_current().await?))
    }

    /// Serialized snapshot for machine consumption
    pub async fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.require_current().await?)?)
    }

    /// Write `daily_report_YYYYMMDD.md` into `dir` and return its path
    pub async fn export_markdown(&self, dir: &Path) -> Result<PathBuf> {
        let snapshot = self.require_current().await?;

        let path = dir.join(render::export_filename(&snapshot));
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, render::render_markdown(&snapshot)).await?;

        tracing::info!(path = %path.display(), "report exported");
        Ok(path)
    }

    /// Export into the configured output directory
    pub async fn export_to_output_dir(&self) -> Result<PathBuf> {
        self.export_markdown(&self.config.output_dir).await
    }
}
