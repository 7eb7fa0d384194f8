use std::{cell::RefCell, collections::HashSet, io::Read};

use asset::{read_to_string, LoadError, LoadResult, LoaderContext};
use serde::de::DeserializeOwned;

use crate::error::SceneError;

thread_local! {
    // References currently being loaded on this thread, outermost first.
    static LOADING: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

struct Loading;

impl Drop for Loading {
    fn drop(&mut self) {
        LOADING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

pub(crate) fn parse<T: DeserializeOwned>(contents: &mut dyn Read) -> Result<T, LoadError> {
    let text = read_to_string(contents)?;
    let value = serde_yaml::from_str(&text).map_err(SceneError::from)?;
    Ok(value)
}

/// Loads a resource referenced from another one. Fails instead of recursing
/// when `path` is already being loaded further up the same chain.
pub(crate) fn load_reference(context: &dyn LoaderContext, path: &str) -> LoadResult {
    let key = match resource::normalize(path) {
        Some(segments) => segments.join("/"),
        None => return context.load_node(path),
    };
    let cycle = LOADING.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.contains(&key) {
            true
        } else {
            stack.push(key);
            false
        }
    });
    if cycle {
        return Err(SceneError::ReferenceCycle(path.to_string()).into());
    }

    let _loading = Loading;
    context.load_node(path)
}

pub(crate) fn check_unique<'a>(ids: &mut HashSet<&'a str>, id: &'a str) -> Result<(), SceneError> {
    if ids.insert(id) {
        Ok(())
    } else {
        Err(SceneError::DuplicateId(id.to_string()))
    }
}
