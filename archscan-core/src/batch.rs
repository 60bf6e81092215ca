use crate::{classify_file, BinaryType};
use rayon::prelude::*;
use std::path::PathBuf;

/// The result for one file of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub path: PathBuf,
    pub binary_type: BinaryType,
}

/// Classifies every path on the current rayon pool. Results come back in the
/// order of `paths`; a file that fails to parse is reported as `Unknown`
/// without affecting the others.
pub fn classify_all(paths: &[PathBuf]) -> Vec<Classification> {
    log::info!(
        "classifying {} files on {} threads",
        paths.len(),
        rayon::current_num_threads()
    );
    paths
        .par_iter()
        .map(|path| Classification {
            path: path.clone(),
            binary_type: classify_file(path),
        })
        .collect()
}
