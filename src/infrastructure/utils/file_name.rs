use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Reduces an uploaded file's original name to a safe single path
/// component with whitespace collapsed to underscores.
pub fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");

    WHITESPACE.replace_all(base, "_").into_owned()
}

/// Lower-cased extension of a file name, if any.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize_file_name("my holiday photo.png"), "my_holiday_photo.png");
        assert_eq!(sanitize_file_name("a \t b.jpg"), "a_b.jpg");
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_file_name("/tmp/x.jpeg"), "x.jpeg");
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("photo.PNG").as_deref(), Some("png"));
        assert_eq!(file_extension("noext"), None);
    }
}
