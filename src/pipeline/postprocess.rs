//! Post-processing: skill detection, preview truncation, result assembly.
//!
//! ## Order matters
//!
//! Skill detection runs on the *full* extracted text; only then is the text
//! cut down to the preview length. A skill mentioned on page three of a long
//! CV is still reported even though it is not in the returned preview.
//!
//! Lengths are counted in characters, not bytes, so a preview never splits a
//! multi-byte character and `text_length` matches what a reader would count.

use crate::output::{FileInfo, ResumeSummary};

/// The skill vocabulary, in reporting order.
pub const SKILL_VOCABULARY: [&str; 16] = [
    "Python",
    "SQL",
    "FastAPI",
    "Docker",
    "JavaScript",
    "React",
    "PostgreSQL",
    "Git",
    "MongoDB",
    "Redis",
    "AWS",
    "Linux",
    "Django",
    "Flask",
    "HTML",
    "CSS",
];

/// Appended to the preview when the text was truncated.
pub const ELLIPSIS: &str = "...";

/// Vocabulary terms contained in `text`, case-insensitively, in vocabulary
/// order, at most `max` of them.
///
/// This is literal substring containment: "PostgreSQL" also matches "SQL",
/// and "digital" matches "Git".
pub fn extract_skills(text: &str, max: usize) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .take(max)
        .collect()
}

/// Keep the first `limit` characters, appending [`ELLIPSIS`] if anything
/// was cut. Text within the limit is returned unchanged.
pub fn truncate_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            let mut preview = String::with_capacity(byte_idx + ELLIPSIS.len());
            preview.push_str(&text[..byte_idx]);
            preview.push_str(ELLIPSIS);
            preview
        }
        None => text.to_string(),
    }
}

/// Assemble the final summary. Total over its inputs.
pub fn finalize(
    raw_text: &str,
    file_info: FileInfo,
    filename: &str,
    file_size: u64,
    preview_chars: usize,
    max_skills: usize,
) -> ResumeSummary {
    let skills = extract_skills(raw_text, max_skills)
        .into_iter()
        .map(str::to_string)
        .collect();
    let text = truncate_preview(raw_text, preview_chars);
    let text_length = text.chars().count();

    ResumeSummary {
        text,
        text_length,
        skills,
        file_info,
        filename: filename.to_string(),
        file_size,
    }
}
