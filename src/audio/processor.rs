//! Audio-processing utility abstraction.
//!
//! This trait allows swapping implementations (real ffmpeg vs mock).

use crate::error::{LernfunkError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Trait for the external audio-processing utility.
///
/// Covers the three operations the renderer needs: lossless container
/// concatenation, re-encoding to the normalized output profile, and reading
/// a finished file's duration from its own metadata.
#[async_trait]
pub trait AudioProcessor: Send + Sync {
    /// Re-encode `input` into `output` with the fixed mono/48kbps/22050Hz profile.
    async fn reencode(&self, input: &Path, output: &Path) -> Result<()>;

    /// Concatenate `inputs` in order into `output` without transcoding.
    async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;

    /// Read the duration of a finished audio file in seconds.
    async fn duration_secs(&self, path: &Path) -> Result<f64>;
}

/// Implement AudioProcessor for Arc<T> to allow sharing across render tasks.
#[async_trait]
impl<T: AudioProcessor> AudioProcessor for Arc<T> {
    async fn reencode(&self, input: &Path, output: &Path) -> Result<()> {
        (**self).reencode(input, output).await
    }

    async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        (**self).concat(inputs, output).await
    }

    async fn duration_secs(&self, path: &Path) -> Result<f64> {
        (**self).duration_secs(path).await
    }
}

/// One recorded call on a [`MockProcessor`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorCall {
    Reencode { input: PathBuf, output: PathBuf },
    Concat { inputs: Vec<PathBuf>, output: PathBuf },
    Duration { path: PathBuf },
}

/// Mock processor for testing.
///
/// Records every call, copies bytes around instead of invoking ffmpeg, and
/// reports a fixed duration.
#[derive(Debug, Default)]
pub struct MockProcessor {
    duration: f64,
    fail_reencode: bool,
    calls: Mutex<Vec<ProcessorCall>>,
}

impl MockProcessor {
    /// Create a mock that reports a duration of 0.0 seconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the duration reported by `duration_secs`.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Configure the mock to fail on re-encode.
    pub fn with_reencode_failure(mut self) -> Self {
        self.fail_reencode = true;
        self
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<ProcessorCall> {
        self.lock_calls().clone()
    }

    fn record(&self, call: ProcessorCall) {
        self.lock_calls().push(call);
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<ProcessorCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AudioProcessor for MockProcessor {
    async fn reencode(&self, input: &Path, output: &Path) -> Result<()> {
        self.record(ProcessorCall::Reencode {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
        if self.fail_reencode {
            return Err(LernfunkError::AudioTool {
                program: "ffmpeg".to_string(),
                message: "mock re-encode failure".to_string(),
            });
        }
        tokio::fs::copy(input, output).await?;
        Ok(())
    }

    async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        self.record(ProcessorCall::Concat {
            inputs: inputs.to_vec(),
            output: output.to_path_buf(),
        });
        let mut joined = Vec::new();
        for input in inputs {
            joined.extend(tokio::fs::read(input).await?);
        }
        tokio::fs::write(output, joined).await?;
        Ok(())
    }

    async fn duration_secs(&self, path: &Path) -> Result<f64> {
        self.record(ProcessorCall::Duration {
            path: path.to_path_buf(),
        });
        Ok(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.mp3");
        let out = dir.path().join("out.mp3");
        tokio::fs::write(&a, b"aa").await.unwrap();
        tokio::fs::write(&b, b"bb").await.unwrap();

        let mock = MockProcessor::new().with_duration(3.5);
        mock.concat(&[a.clone(), b.clone()], &out).await.unwrap();
        mock.reencode(&out, &out).await.unwrap();
        let duration = mock.duration_secs(&out).await.unwrap();
        assert_eq!(duration, 3.5);

        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            ProcessorCall::Concat {
                inputs: vec![a, b],
                output: out.clone()
            }
        );
        assert!(matches!(calls[1], ProcessorCall::Reencode { .. }));
        assert!(matches!(calls[2], ProcessorCall::Duration { .. }));
    }

    #[tokio::test]
    async fn test_mock_concat_joins_bytes_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.mp3");
        let out = dir.path().join("out.mp3");
        tokio::fs::write(&a, b"first ").await.unwrap();
        tokio::fs::write(&b, b"second").await.unwrap();

        let mock = MockProcessor::new();
        mock.concat(&[a, b], &out).await.unwrap();
        assert_eq!(tokio::fs::read(&out).await.unwrap(), b"first second");
    }

    #[tokio::test]
    async fn test_mock_reencode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp3");
        tokio::fs::write(&input, b"x").await.unwrap();

        let mock = MockProcessor::new().with_reencode_failure();
        let result = mock.reencode(&input, &dir.path().join("out.mp3")).await;
        assert!(matches!(result, Err(LernfunkError::AudioTool { .. })));
    }

    #[test]
    fn test_processor_trait_is_object_safe() {
        let _processor: Box<dyn AudioProcessor> = Box::new(MockProcessor::new());
    }
}
