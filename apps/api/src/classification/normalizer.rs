//! Resume text normalizer.
//!
//! Must stay byte-for-byte compatible with the cleaning applied when the
//! term-weighting transform was fit. The pass order is fixed:
//! URLs → RT/cc markers → hashtags → mentions → punctuation → non-ASCII,
//! then whitespace collapse and trim.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());
static REPLY_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:RT|cc)\b").unwrap());
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\S+").unwrap());
static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\S+").unwrap());
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r##"[!"#$%&'()*+,\-./:;<=>?@\[\\\]^_`{|}~]"##).unwrap());
// Anything outside printable ASCII, control characters included.
static NON_PRINTABLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\x20-\x7E]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Text that has been through `normalize`: printable ASCII only, single
/// spaces between tokens, no leading or trailing space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips URLs, reply markers, hashtags, mentions, punctuation and
/// non-ASCII characters, then collapses whitespace. Total over all input.
pub fn normalize(text: &str) -> NormalizedText {
    let text = URL.replace_all(text, " ");
    let text = REPLY_MARKER.replace_all(&text, " ");
    let text = HASHTAG.replace_all(&text, " ");
    let text = MENTION.replace_all(&text, " ");
    let text = PUNCTUATION.replace_all(&text, " ");
    let text = NON_PRINTABLE.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    NormalizedText(text.trim().to_string())
}
