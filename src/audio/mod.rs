//! Audio rendering pipeline: chunking, synthesis, assembly, normalization.

pub mod chunker;
pub mod ffmpeg;
pub mod processor;
pub mod renderer;
pub mod story;
pub mod synth;

pub use chunker::chunk_text;
pub use ffmpeg::FfmpegProcessor;
pub use processor::{AudioProcessor, MockProcessor, ProcessorCall};
pub use renderer::{AudioRenderer, RenderedAudio};
pub use story::render_story_audio;
pub use synth::{MockSpeech, OpenAiSpeech, SpeechBackend, SpokenRequest};
