//! Path Normalizer
//!
//! Turns local paths into the form a POSIX shell (Git Bash / MinTTY on
//! Windows) expects: escaped spaces, forward slashes, `/c` style drives.

/// Substitutions applied by [`to_unix_path`], checked in order at each
/// position of the input. Output is never re-scanned.
const UNIX_SUBSTITUTIONS: &[(&str, &str)] = &[(" ", "\\ "), ("\\", "/")];

/// Drive prefix rewritten by [`to_unix_path`] when it leads the path.
const WINDOWS_DRIVE: (&str, &str) = ("C:", "/c");

/// Convert a Windows style path into a shell safe Unix style path.
///
/// Surrounding whitespace is trimmed, a leading `C:` becomes `/c`, spaces
/// become `\ ` and backslashes become `/`. Every input token is replaced
/// once, so the backslash produced by space escaping survives.
///
/// ```
/// use deployto::to_unix_path;
///
/// assert_eq!(to_unix_path("C:\\Users\\a b"), "/c/Users/a\\ b");
/// ```
pub fn to_unix_path(path: &str) -> String {
    let trimmed = path.trim();
    let mut out = String::with_capacity(trimmed.len() + 8);

    let (drive, drive_replacement) = WINDOWS_DRIVE;
    let mut rest = match trimmed.strip_prefix(drive) {
        Some(stripped) => {
            out.push_str(drive_replacement);
            stripped
        }
        None => trimmed,
    };

    'scan: while let Some(c) = rest.chars().next() {
        for (from, to) in UNIX_SUBSTITUTIONS {
            if let Some(stripped) = rest.strip_prefix(from) {
                out.push_str(to);
                rest = stripped;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Rewrite a leading `X:/` drive prefix into `/x/`.
///
/// Only a single ASCII letter followed by `:/` at the very start matches
/// (case-insensitive). Anything else is returned unchanged.
///
/// ```
/// use deployto::clean_drive_letter;
///
/// assert_eq!(clean_drive_letter("D:/foo"), "/d/foo");
/// assert_eq!(clean_drive_letter("/already/unix"), "/already/unix");
/// ```
pub fn clean_drive_letter(path: &str) -> String {
    match path.as_bytes() {
        [letter, b':', b'/', ..] if letter.is_ascii_alphabetic() => {
            format!("/{}{}", letter.to_ascii_lowercase() as char, &path[2..])
        }
        _ => path.to_string(),
    }
}
