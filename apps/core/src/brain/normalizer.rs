//! Message normalization for pattern matching.

/// Lower-cases and trims a raw message.
///
/// The raw text is left untouched; callers that need the original casing or script
/// (language detection, echoing the message back into the prompt) keep their own copy.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
