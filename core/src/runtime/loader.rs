//! Bulk tape loading
//!
//! Loads a set of tape files in parallel. Loads are independent, so the set
//! fans out across the rayon pool; any failure aborts the batch with that
//! file's error.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::tape::{LoadError, load_file};
use crate::timeline::Timeline;

/// Load every tape in `paths`, in parallel, preserving input order.
pub fn load_all(paths: &[PathBuf]) -> Result<Vec<(PathBuf, Timeline)>, LoadError> {
    paths
        .par_iter()
        .map(|path| load_file(path).map(|timeline| (path.clone(), timeline)))
        .collect()
}
