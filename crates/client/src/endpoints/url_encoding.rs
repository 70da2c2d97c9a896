//! Percent-encoding for URL path segments.
//!
//! App, owner, collection and record keys are interpolated into KV store
//! paths, so each is encoded as a single segment. Without this a `/` in a
//! collection name would produce a nested path and a `?` would start a query.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters percent-encoded in a URL path segment.
///
/// RFC 3986 reserved and unsafe characters, plus `%` so already-encoded
/// input is not decoded twice and `/` so a segment cannot split the path.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one URL path segment.
///
/// ```
/// use nsenv_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("nsenv_settings"), "nsenv_settings");
/// assert_eq!(encode_path_segment("team/settings"), "team%2Fsettings");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_segments_unchanged() {
        assert_eq!(encode_path_segment("search"), "search");
        assert_eq!(encode_path_segment("nobody"), "nobody");
        assert_eq!(encode_path_segment("my-app_v2.1"), "my-app_v2.1");
    }

    #[test]
    fn test_reserved_characters_encoded() {
        assert_eq!(encode_path_segment("a b"), "a%20b");
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("a?b"), "a%3Fb");
        assert_eq!(encode_path_segment("a#b"), "a%23b");
        assert_eq!(encode_path_segment("a%20b"), "a%2520b");
    }

    #[test]
    fn test_path_traversal_neutralized() {
        assert_eq!(encode_path_segment("../admin"), "..%2Fadmin");
    }

    #[test]
    fn test_unicode_encoded_as_utf8() {
        assert_eq!(encode_path_segment("café"), "caf%C3%A9");
    }
}
