//! Local-file URL to Windows path conversion.
//!
//! The shell reports folder window locations as `file:///` URLs. This module
//! turns them back into native paths: forward slashes become backslashes and
//! percent escapes are decoded. Anything that is not a local-file URL (virtual
//! folders, `shell:` locations, network URLs) yields `None`.

/// Prefix every supported URL must start with.
pub const FILE_URL_PREFIX: &str = "file:///";

/// Windows path separator. Shell URLs always describe Windows paths, so this
/// does not follow the build target.
pub const PATH_SEPARATOR: char = '\\';

/// Convert a `file:///` URL into a native path string.
///
/// Returns `None` when the input lacks the local-file prefix or decodes to an
/// empty path. Malformed escapes (`%4`, `%zz`) are copied through literally.
pub fn url_to_path(url: &str) -> Option<String> {
    let rest = url.strip_prefix(FILE_URL_PREFIX)?;
    let chars: Vec<char> = rest.chars().collect();

    let mut out = String::with_capacity(rest.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '%' => match decode_escape(&chars[i..]) {
                Some(byte) => {
                    out.push(char::from(byte));
                    i += 3;
                }
                None => {
                    out.push('%');
                    i += 1;
                }
            },
            '/' => {
                out.push(PATH_SEPARATOR);
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Decode `%XX` at the start of `chars`, if both digits are present and hex.
fn decode_escape(chars: &[char]) -> Option<u8> {
    let hi = chars.get(1)?.to_digit(16)?;
    let lo = chars.get(2)?.to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
