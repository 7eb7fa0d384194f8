use std::io::{self, Read};

/// Read access to the resources below a content root.
///
/// Paths are relative to the root; a leading `/` is accepted and ignored.
/// Implementations must be safe for concurrent reads since a single accessor
/// is shared by every load of an editing session.
pub trait ResourceAccessor: Send + Sync {
    fn exists(&self, path: &str) -> bool;

    fn extension_of(&self, path: &str) -> Option<String> {
        extension_of(path).map(str::to_string)
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Strips the leading `/` and splits into segments.
///
/// Returns `None` for paths that would leave the root (`..`) or name nothing.
pub fn normalize(path: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Text after the last `.` of the final path segment.
pub fn extension_of(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next()?;
    let (_, extension) = file_name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension)
}
