//! Input sanitization for text arriving in request bodies.
//!
//! Angle brackets and control characters (other than newline and tab) are
//! removed, then surrounding whitespace is trimmed. Removal happens before
//! trimming, so the output never contains anything a second pass would
//! change: `sanitize_str(&sanitize_str(s)) == sanitize_str(s)`.

/// Types whose text content can be sanitized in place.
///
/// Request DTOs implement this by sanitizing each user-visible text field.
/// Secrets (passwords) are left untouched.
pub trait Sanitize {
    fn sanitize(self) -> Self;
}

fn is_stripped(c: char) -> bool {
    matches!(c, '<' | '>') || (c.is_control() && c != '\n' && c != '\t')
}

pub fn sanitize_str(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !is_stripped(*c)).collect();
    stripped.trim().to_string()
}

impl Sanitize for String {
    fn sanitize(self) -> Self {
        sanitize_str(&self)
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(self) -> Self {
        self.map(Sanitize::sanitize)
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(self) -> Self {
        self.into_iter().map(Sanitize::sanitize).collect()
    }
}
