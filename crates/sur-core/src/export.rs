//! Lyrics export naming.

/// Suffix appended to every exported file name.
pub const EXPORT_SUFFIX: &str = "_Lyrics.txt";

/// Stem used when a title has no usable characters.
const FALLBACK_STEM: &str = "Untitled";

/// Characters that are not allowed in a file name on common platforms.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File name for exported lyrics: `Title_With_Underscores_Lyrics.txt`.
///
/// Whitespace runs become `_`; path separators, reserved characters and
/// control characters are dropped, as are leading and trailing dots.
///
/// # Examples
///
/// ```
/// use sur_core::export::export_file_name;
///
/// assert_eq!(export_file_name("Mo Prema"), "Mo_Prema_Lyrics.txt");
/// assert_eq!(export_file_name("../etc"), "etc_Lyrics.txt");
/// assert_eq!(export_file_name("  "), "Untitled_Lyrics.txt");
/// ```
pub fn export_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !RESERVED.contains(c) && !c.is_control() || c.is_whitespace())
        .collect();

    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = stem.trim_matches('.');

    if stem.is_empty() {
        format!("{FALLBACK_STEM}{EXPORT_SUFFIX}")
    } else {
        format!("{stem}{EXPORT_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_runs_become_underscore() {
        assert_eq!(export_file_name("Mo  Prema\tGita"), "Mo_Prema_Gita_Lyrics.txt");
        assert_eq!(export_file_name(" Barasha "), "Barasha_Lyrics.txt");
    }

    #[test]
    fn test_odia_title_kept() {
        assert_eq!(export_file_name("ବର୍ଷା ରାତି"), "ବର୍ଷା_ରାତି_Lyrics.txt");
    }

    #[test]
    fn test_reserved_characters_removed() {
        assert_eq!(export_file_name("a/b\\c:d*e?f\"g<h>i|j"), "abcdefghij_Lyrics.txt");
    }

    #[test]
    fn test_traversal_is_neutralized() {
        assert_eq!(export_file_name(".."), "Untitled_Lyrics.txt");
        assert_eq!(export_file_name("../../x"), "x_Lyrics.txt");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(export_file_name(""), "Untitled_Lyrics.txt");
        assert_eq!(export_file_name("***"), "Untitled_Lyrics.txt");
    }
}
