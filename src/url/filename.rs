//! Local file names for downloaded assets

use crate::{UrlError, UrlResult};
use percent_encoding::percent_decode_str;
use url::Url;

/// Characters that are not allowed in a file name on common filesystems
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Device names Windows refuses as file stems
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Maximum file name length in bytes
const MAX_NAME_BYTES: usize = 255;

/// Makes a string safe to use as a single file name
///
/// # Rules
///
/// - Path separators, `: * ? " < > |` and control characters are removed
/// - Surrounding whitespace and trailing dots are trimmed
/// - Windows device names get a `_` suffix (`CON.txt` -> `CON_.txt`)
/// - The result is truncated to 255 bytes on a character boundary
///
/// Distinct inputs may sanitize to the same name; callers writing to that
/// name overwrite whatever was there.
///
/// # Examples
///
/// ```
/// use folio::url::sanitize_filename;
///
/// assert_eq!(sanitize_filename("War/Peace?.txt").unwrap(), "WarPeace.txt");
/// ```
pub fn sanitize_filename(name: &str) -> UrlResult<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !FORBIDDEN_CHARS.contains(c))
        .collect();

    let mut sanitized = cleaned.trim().trim_end_matches(&['.', ' '][..]).to_string();

    let (stem, extension) = match sanitized.split_once('.') {
        Some((stem, extension)) => (stem.to_string(), Some(extension.to_string())),
        None => (sanitized.clone(), None),
    };
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(&stem))
    {
        sanitized = match extension {
            Some(extension) => format!("{}_.{}", stem, extension),
            None => format!("{}_", stem),
        };
    }

    if sanitized.len() > MAX_NAME_BYTES {
        let mut cut = MAX_NAME_BYTES;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
    }

    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return Err(UrlError::EmptyFileName(name.to_string()));
    }

    Ok(sanitized)
}

/// Returns the remote file name of a URL: its last path segment plus query
///
/// The segment is percent-decoded so non-ASCII names stay readable, and the
/// query is kept so that `img.php?id=1` and `img.php?id=2` give different
/// names once sanitized. A URL ending in `/` gives `None`.
///
/// ```
/// use folio::url::file_name_from_url;
/// use url::Url;
///
/// let url = Url::parse("http://host/shots/239.jpg").unwrap();
/// assert_eq!(file_name_from_url(&url).as_deref(), Some("239.jpg"));
/// ```
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url
        .path_segments()?
        .last()
        .filter(|segment| !segment.is_empty())?;

    let mut name = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if let Some(query) = url.query().filter(|query| !query.is_empty()) {
        name.push('?');
        name.push_str(&percent_decode_str(query).decode_utf8_lossy());
    }

    Some(name)
}
