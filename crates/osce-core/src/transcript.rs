//! Transcript preprocessing: speaker-tag splitting, examinee/patient
//! isolation, and text normalization for matching.
//!
//! Items are only ever matched against examinee text. Patient turns are
//! kept separately because a few cross-reference heuristics consult them;
//! they never feed plain regex/keyword matching.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Speaker, Turn};

/// Accepted leading speaker tags, two spellings per role.
const SPEAKER_TAGS: [(&str, Speaker); 4] = [
    ("[ESTUDIANTE]", Speaker::Examinee),
    ("[STUDENT]", Speaker::Examinee),
    ("[PACIENTE]", Speaker::Patient),
    ("[PATIENT]", Speaker::Patient),
];

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize text for matching: lowercase, strip diacritics via canonical
/// decomposition, turn punctuation into spaces, collapse whitespace, trim.
/// Idempotent: normalizing normalized text is a no-op.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let spaced = NON_WORD.replace_all(&stripped, " ");
    MULTI_SPACE.replace_all(&spaced, " ").trim().to_string()
}

/// An ordered sequence of speaker-tagged turns.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

/// Role-separated, normalized view of a transcript, ready for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTranscript {
    pub examinee_turns: Vec<String>,
    pub patient_turns: Vec<String>,
    /// All examinee turns concatenated and normalized.
    pub examinee_text: String,
    /// All patient turns concatenated and normalized.
    pub patient_text: String,
}

impl Transcript {
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Parse raw text with inline speaker tags, one utterance per line.
    /// Tags are accepted with or without a trailing colon. Untagged lines
    /// are dropped — unless the whole transcript has no tag at all, in
    /// which case it is treated as a single examinee turn.
    pub fn parse(raw: &str) -> Self {
        let mut turns = Vec::new();
        for raw_line in raw.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((speaker, content)) = split_tagged_line(line) {
                if !content.is_empty() {
                    turns.push(Turn {
                        speaker,
                        text: content.to_string(),
                    });
                }
            }
        }

        // Permissive fallback for untagged input.
        if turns.is_empty() && !raw.trim().is_empty() {
            turns.push(Turn {
                speaker: Speaker::Examinee,
                text: raw.trim().to_string(),
            });
        }

        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Split turns by role and build the normalized text blobs.
    pub fn prepare(&self) -> PreparedTranscript {
        let mut examinee_turns = Vec::new();
        let mut patient_turns = Vec::new();
        for turn in &self.turns {
            match turn.speaker {
                Speaker::Examinee => examinee_turns.push(turn.text.clone()),
                Speaker::Patient => patient_turns.push(turn.text.clone()),
                Speaker::Unknown => {}
            }
        }
        let examinee_text = join_normalized(&examinee_turns);
        let patient_text = join_normalized(&patient_turns);
        PreparedTranscript {
            examinee_turns,
            patient_turns,
            examinee_text,
            patient_text,
        }
    }
}

fn split_tagged_line(line: &str) -> Option<(Speaker, &str)> {
    for (tag, speaker) in SPEAKER_TAGS {
        if let Some(rest) = line.strip_prefix(tag) {
            let content = rest.trim_start();
            let content = content.strip_prefix(':').unwrap_or(content).trim_start();
            return Some((speaker, content));
        }
    }
    None
}

fn join_normalized(turns: &[String]) -> String {
    let normalized: Vec<String> = turns
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect();
    normalized.join(" ")
}
