//! Output file naming.

use super::OutputFormat;

/// `{target}_urls.{ext}`, with the target made safe for use as a file name.
pub fn output_filename(target: &str, format: OutputFormat) -> String {
    format!("{}_urls.{}", sanitize_target(target), format.extension())
}

/// Replaces NUL, `/`, `\`, `:`, whitespace and control characters with `_`.
///
/// Plain domain names pass through unchanged; a URL target such as
/// `https://example.com/a` becomes `https___example.com_a`.
pub fn sanitize_target(target: &str) -> String {
    let out: String = target
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == ':' || c.is_control() || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Never produce "", "." or ".." as a path component.
    if out.trim_matches('.').is_empty() {
        return out.replace('.', "_") + "_";
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_unchanged() {
        assert_eq!(
            output_filename("sub.example.com", OutputFormat::Json),
            "sub.example.com_urls.json"
        );
    }

    #[test]
    fn url_target_is_flattened() {
        assert_eq!(
            sanitize_target("https://example.com/a\\b"),
            "https___example.com_a_b"
        );
    }

    #[test]
    fn control_chars_and_spaces() {
        assert_eq!(sanitize_target("a b\x00c"), "a_b_c");
    }

    #[test]
    fn dot_only_targets_are_not_path_components() {
        assert_eq!(sanitize_target(".."), "___");
        assert_eq!(sanitize_target(""), "_");
    }
}
