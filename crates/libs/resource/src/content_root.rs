use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::resource::{normalize, ResourceAccessor};

/// Filesystem directory serving as the root of all resource paths.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let segments = normalize(path)?;
        let mut resolved = self.root.clone();
        resolved.extend(segments);
        Some(resolved)
    }
}

impl ResourceAccessor for ContentRoot {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map_or(false, |p| p.is_file())
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let resolved = self.resolve(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is outside of {}", path, self.root.display()),
            )
        })?;
        log::trace!("opening {}", resolved.display());
        let file = File::open(resolved)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_files_below_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("levels")).unwrap();
        fs::write(dir.path().join("levels/a.scene"), b"content").unwrap();

        let root = ContentRoot::new(dir.path());
        assert!(root.exists("/levels/a.scene"));
        assert!(root.exists("levels/a.scene"));
        assert!(!root.exists("/levels"));
        assert!(!root.exists("/levels/b.scene"));
        assert_eq!(Some("scene".to_string()), root.extension_of("/levels/a.scene"));

        let mut contents = Vec::new();
        root.open("/levels/a.scene")
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(b"content".to_vec(), contents);
    }

    #[test]
    fn never_escapes_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(dir.path().join("outside.go"), b"").unwrap();

        let root = ContentRoot::new(dir.path().join("content"));
        assert!(!root.exists("../outside.go"));
        let error = root.open("../outside.go").err().unwrap();
        assert_eq!(io::ErrorKind::NotFound, error.kind());
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = ContentRoot::new(dir.path());
        assert!(root.open("/missing.go").is_err());
    }
}
