//! Path manipulation utilities for construct-setup
//!
//! Install paths are embedded in shell profiles, deferred commands and the
//! path-extension marker, so they are handled as forward-slash strings that
//! read the same on every platform. These helpers work lexically: they never
//! touch the filesystem and never resolve symlinks.

/// Normalize a path to forward-slash form, dropping `.` segments and folding
/// `..` segments into their parent.
///
/// A leading drive prefix (`C:`) is preserved. `..` never climbs above the root
/// of an absolute path.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let (prefix, rest) = split_drive(&path);
    let absolute = rest.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            part => parts.push(part),
        }
    }

    let mut out = String::from(prefix);
    if absolute {
        out.push('/');
    }
    out.push_str(&parts.join("/"));
    if out.is_empty() {
        ".".to_string()
    } else {
        out
    }
}

/// Join path segments onto `base` and normalize the result.
pub fn join(base: &str, segments: &[&str]) -> String {
    let mut joined = base.to_string();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment);
    }
    normalize(&joined)
}

/// Express `to` relative to the directory `from`.
///
/// Both paths are normalized first. Returns `.` when they are the same.
pub fn relative(from: &str, to: &str) -> String {
    let from = normalize(from);
    let to = normalize(to);
    let from_parts = components(&from);
    let to_parts = components(&to);

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_parts.len() - common];
    parts.extend(&to_parts[common..]);
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Convert a normalized path to backslash form for cmd.exe commands.
pub fn to_windows(path: &str) -> String {
    path.replace('/', "\\")
}

/// Wrap a path in double quotes if it has a space in it.
pub fn escape(path: &str) -> String {
    if path.contains(' ') {
        format!("\"{}\"", path)
    } else {
        path.to_string()
    }
}

/// Compare two paths the way a `PATH` lookup would: slash-insensitive,
/// ignoring a trailing separator, case-insensitive when `ignore_case`.
pub fn same_entry(a: &str, b: &str, ignore_case: bool) -> bool {
    let a = normalize(a.trim());
    let b = normalize(b.trim());
    if ignore_case {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b
    }
}

fn split_drive(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        path.split_at(2)
    } else {
        ("", path)
    }
}

fn components(path: &str) -> Vec<&str> {
    let (prefix, rest) = split_drive(path);
    let mut parts = Vec::new();
    if !prefix.is_empty() {
        parts.push(prefix);
    }
    if rest.starts_with('/') {
        parts.push("/");
    }
    parts.extend(rest.split('/').filter(|p| !p.is_empty() && *p != "."));
    parts
}
