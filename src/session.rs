//! Upload session holding at most one live report

use crate::config::Config;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::descriptor::UploadedFile;
use crate::input::gate::{AcceptanceGate, Chance};
use crate::processing::analyzer::{AnalysisEngine, AnalysisReport};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// One user's upload flow: gate, simulated latency, analysis, replace.
///
/// Only one upload may be pending at a time. Nothing is cancellable once
/// started and nothing is retried.
pub struct AnalysisSession {
    engine: AnalysisEngine,
    gate: AcceptanceGate,
    upload_delay: Duration,
    uploading: AtomicBool,
    current: RwLock<Option<Arc<AnalysisReport>>>,
}

/// Clears the uploading flag however the upload ends
struct UploadGuard<'a>(&'a AtomicBool);

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AnalysisSession {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::from_parts(
            AnalysisEngine::new(&config.analysis)?,
            AcceptanceGate::new(&config.upload),
            Duration::from_millis(config.upload.simulated_delay_ms),
        ))
    }

    pub fn with_chance(config: &Config, chance: Box<dyn Chance>) -> Result<Self> {
        Ok(Self::from_parts(
            AnalysisEngine::new(&config.analysis)?,
            AcceptanceGate::with_chance(&config.upload, chance),
            Duration::from_millis(config.upload.simulated_delay_ms),
        ))
    }

    fn from_parts(engine: AnalysisEngine, gate: AcceptanceGate, upload_delay: Duration) -> Self {
        Self {
            engine,
            gate,
            upload_delay,
            uploading: AtomicBool::new(false),
            current: RwLock::new(None),
        }
    }

    /// Admit `file`, wait out the simulated upload and replace the live report.
    ///
    /// On rejection the previous report stays in place.
    pub async fn upload(&self, file: UploadedFile) -> Result<Arc<AnalysisReport>> {
        if self.uploading.swap(true, Ordering::SeqCst) {
            warn!("Ignoring '{}': another upload is in progress", file.name);
            return Err(ResumeAnalyzerError::UploadInProgress);
        }
        let _guard = UploadGuard(&self.uploading);

        if let Err(reason) = self.gate.check(&file).await {
            warn!("Rejected '{}': {}", file.name, reason);
            return Err(reason.into());
        }

        tokio::time::sleep(self.upload_delay).await;
        info!("Upload of '{}' complete, starting analysis", file.name);

        let report = Arc::new(self.engine.build_report(&file));
        *self.current.write().await = Some(Arc::clone(&report));
        Ok(report)
    }

    /// Analyse without the gate or the simulated delay
    pub async fn analyze_now(&self, file: &UploadedFile) -> Arc<AnalysisReport> {
        let report = Arc::new(self.engine.build_report(file));
        *self.current.write().await = Some(Arc::clone(&report));
        report
    }

    pub async fn current(&self) -> Option<Arc<AnalysisReport>> {
        self.current.read().await.clone()
    }

    /// Drop the live report, back to the pre-upload state
    pub async fn reset(&self) {
        *self.current.write().await = None;
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    pub fn gate(&self) -> &AcceptanceGate {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RejectReason;
    use crate::input::gate::FixedChance;

    fn session() -> AnalysisSession {
        AnalysisSession::with_chance(&Config::default(), Box::new(FixedChance(0.9))).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_replaces_report() {
        let session = session();
        assert!(session.current().await.is_none());

        let first = session
            .upload(UploadedFile::new("resume_john.pdf", 120_000, 1_700_000_000_000))
            .await
            .unwrap();
        assert_eq!(session.current().await.as_deref(), Some(first.as_ref()));

        let second = session
            .upload(UploadedFile::new("security_resume.pdf", 250_000, 1_700_000_000_000))
            .await
            .unwrap();
        assert_eq!(second.resume_type, "Security Engineer");
        assert_eq!(session.current().await.unwrap().resume_type, "Security Engineer");
        assert!(!session.is_uploading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_keeps_previous_report() {
        let session = session();
        let accepted = session
            .upload(UploadedFile::new("resume_john.pdf", 120_000, 1_700_000_000_000))
            .await
            .unwrap();

        let err = session
            .upload(UploadedFile::new("portfolio.pdf", 500, 0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResumeAnalyzerError::RejectedUpload(RejectReason::TooSmall { .. })
        ));
        assert_eq!(session.current().await.unwrap(), accepted);
        assert!(!session.is_uploading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_upload_refused() {
        let session = Arc::new(session());
        let background = {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                session
                    .upload(UploadedFile::new("resume_john.pdf", 120_000, 1_700_000_000_000))
                    .await
            })
        };

        // let the first upload reach its heuristic delay
        tokio::task::yield_now().await;
        while !session.is_uploading() {
            tokio::task::yield_now().await;
        }

        let second = session.upload(UploadedFile::new("cv.pdf", 60_000, 0)).await;
        assert!(matches!(second, Err(ResumeAnalyzerError::UploadInProgress)));

        assert!(background.await.unwrap().is_ok());
        assert!(!session.is_uploading());
    }

    #[tokio::test]
    async fn test_reset_clears_report() {
        let session = session();
        session.analyze_now(&UploadedFile::new("cv.pdf", 60_000, 0)).await;
        assert!(session.current().await.is_some());
        session.reset().await;
        assert!(session.current().await.is_none());
    }
}
