//! ffmpeg-backed implementation of the audio-processing utility.
//!
//! Re-encoding and concatenation shell out to `ffmpeg`; duration comes from
//! `ffprobe` reading the finished file's format metadata. Every invocation
//! runs under a bounded timeout.

use crate::audio::processor::AudioProcessor;
use crate::defaults;
use crate::error::{LernfunkError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Audio processor that drives the system `ffmpeg`/`ffprobe` binaries.
#[derive(Debug, Clone)]
pub struct FfmpegProcessor {
    timeout: Duration,
}

impl Default for FfmpegProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegProcessor {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::AUDIO_TOOL_TIMEOUT_SECS),
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<Output> {
        let mut command = Command::new(program);
        command.args(args);
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| LernfunkError::AudioToolTimeout {
                program: program.to_string(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| LernfunkError::AudioTool {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LernfunkError::AudioTool {
                program: program.to_string(),
                message: format!("{}: {}", output.status, stderr_tail(&stderr)),
            });
        }

        Ok(output)
    }
}

#[async_trait]
impl AudioProcessor for FfmpegProcessor {
    async fn reencode(&self, input: &Path, output: &Path) -> Result<()> {
        self.run("ffmpeg", &reencode_args(input, output)).await?;
        Ok(())
    }

    async fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        // ffmpeg's concat demuxer reads the segment list from a file
        let list = tempfile::Builder::new()
            .prefix("lernfunk-concat-")
            .suffix(".txt")
            .tempfile()?;
        tokio::fs::write(list.path(), concat_list(inputs)).await?;
        self.run("ffmpeg", &concat_args(list.path(), output)).await?;
        Ok(())
    }

    async fn duration_secs(&self, path: &Path) -> Result<f64> {
        let output = self.run("ffprobe", &ffprobe_args(path)).await?;
        parse_duration(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Arguments for re-encoding to the normalized mono/48kbps/22050Hz profile.
fn reencode_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-ac".to_string(),
        defaults::AUDIO_CHANNELS.to_string(),
        "-ab".to_string(),
        defaults::AUDIO_BITRATE.to_string(),
        "-ar".to_string(),
        defaults::AUDIO_SAMPLE_RATE.to_string(),
        output.display().to_string(),
    ]
}

/// Arguments for container-level concatenation (no transcoding).
fn concat_args(list: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        list.display().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        output.display().to_string(),
    ]
}

/// Arguments for reading a file's duration from its format metadata.
fn ffprobe_args(path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=noprint_wrappers=1:nokey=1".to_string(),
        path.display().to_string(),
    ]
}

/// Build the concat demuxer list file content.
fn concat_list(inputs: &[PathBuf]) -> String {
    inputs
        .iter()
        .map(|p| format!("file '{}'\n", p.display()))
        .collect()
}

/// Parse ffprobe's duration output.
fn parse_duration(stdout: &str) -> Result<f64> {
    let trimmed = stdout.trim();
    trimmed.parse::<f64>().map_err(|_| LernfunkError::AudioTool {
        program: "ffprobe".to_string(),
        message: format!("unparseable duration '{trimmed}'"),
    })
}

/// Keep error output readable: only the tail of ffmpeg's stderr matters.
fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    match trimmed.char_indices().nth_back(399) {
        Some((idx, _)) => format!("…{}", &trimmed[idx..]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reencode_args_use_fixed_profile() {
        let args = reencode_args(Path::new("/tmp/in.mp3"), Path::new("/tmp/out.mp3"));
        assert_eq!(args[0], "-y");
        assert_eq!(args[1..3], ["-i".to_string(), "/tmp/in.mp3".to_string()]);
        let ac = args.iter().position(|a| a == "-ac").unwrap();
        assert_eq!(args[ac + 1], "1");
        let ab = args.iter().position(|a| a == "-ab").unwrap();
        assert_eq!(args[ab + 1], "48k");
        let ar = args.iter().position(|a| a == "-ar").unwrap();
        assert_eq!(args[ar + 1], "22050");
        assert_eq!(args.last().unwrap(), "/tmp/out.mp3");
    }

    #[test]
    fn test_concat_args_copy_without_transcoding() {
        let args = concat_args(Path::new("/tmp/list.txt"), Path::new("/tmp/out.mp3"));
        assert!(args.windows(2).any(|w| w == ["-f", "concat"]));
        assert!(args.windows(2).any(|w| w == ["-c", "copy"]));
        assert!(args.windows(2).any(|w| w == ["-safe", "0"]));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp3");
    }

    #[test]
    fn test_concat_list_preserves_order() {
        let inputs = vec![
            PathBuf::from("/tmp/chunk-0.mp3"),
            PathBuf::from("/tmp/chunk-1.mp3"),
        ];
        let list = concat_list(&inputs);
        assert_eq!(list, "file '/tmp/chunk-0.mp3'\nfile '/tmp/chunk-1.mp3'\n");
    }

    #[test]
    fn test_ffprobe_args_query_format_duration() {
        let args = ffprobe_args(Path::new("/tmp/out.mp3"));
        assert!(args.windows(2).any(|w| w == ["-show_entries", "format=duration"]));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp3");
    }

    #[test]
    fn test_parse_duration_accepts_ffprobe_output() {
        assert_eq!(parse_duration("12.345\n").unwrap(), 12.345);
        assert_eq!(parse_duration("0.5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        let result = parse_duration("N/A\n");
        assert!(matches!(result, Err(LernfunkError::AudioTool { .. })));
    }

    #[test]
    fn test_stderr_tail_keeps_short_output() {
        assert_eq!(stderr_tail("boom\n"), "boom");
    }

    #[test]
    fn test_stderr_tail_truncates_long_output() {
        let long = "x".repeat(1000);
        let tail = stderr_tail(&long);
        assert!(tail.starts_with('…'));
        assert_eq!(tail.chars().count(), 401);
    }
}
