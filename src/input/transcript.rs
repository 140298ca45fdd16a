use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::pipeline::word_count;

#[derive(Debug, Deserialize)]
struct TranscriptFile {
    #[serde(default)]
    transcription: String,
    #[serde(default)]
    student_name: Option<String>,
    #[serde(default)]
    assignment: Option<String>,
}

/// The student's text as produced by the external transcription collaborator.
/// Read-only input to the engine; an empty transcription is valid and scores
/// at the floor rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub text: String,
    pub word_count: u32,
    pub student_name: Option<String>,
    pub assignment: Option<String>,
}

impl RawResponse {
    pub fn from_text(text: &str) -> Self {
        RawResponse {
            text: text.to_string(),
            word_count: word_count(text),
            student_name: None,
            assignment: None,
        }
    }
}

pub fn load_transcript(path: &Path) -> Result<RawResponse, InputError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: TranscriptFile = serde_json::from_str(&raw).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })?;

    if parsed.transcription.trim().is_empty() {
        tracing::warn!(path = %path.display(), "transcript has empty transcription; scoring at floor");
    }

    Ok(RawResponse {
        word_count: word_count(&parsed.transcription),
        text: parsed.transcription,
        student_name: parsed.student_name,
        assignment: parsed.assignment,
    })
}
