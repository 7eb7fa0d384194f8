use std::{
    collections::HashMap,
    io::{self, Cursor, Read},
};

use crate::resource::{normalize, ResourceAccessor};

/// In-memory content root keyed by normalized path.
#[derive(Debug, Default, Clone)]
pub struct MemoryResources {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<B: Into<Vec<u8>>>(&mut self, path: &str, contents: B) -> &mut Self {
        match key(path) {
            Some(key) => {
                self.files.insert(key, contents.into());
            }
            None => log::warn!("ignoring resource with invalid path {:?}", path),
        }
        self
    }

    pub fn with<B: Into<Vec<u8>>>(mut self, path: &str, contents: B) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn key(path: &str) -> Option<String> {
    normalize(path).map(|segments| segments.join("/"))
}

impl ResourceAccessor for MemoryResources {
    fn exists(&self, path: &str) -> bool {
        key(path).map_or(false, |k| self.files.contains_key(&k))
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        match key(path).and_then(|k| self.files.get(&k)) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no resource at {}", path),
            )),
        }
    }
}
