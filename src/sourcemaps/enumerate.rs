//! Pairs emitted scripts with their source maps.

use crate::types::{ArtifactCandidate, BuildManifest};

/// Outputs with any other suffix are never uploaded.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Appended to a bundle path to name its source map.
pub const MAP_SUFFIX: &str = ".map";

/// List the (bundle, source map) pairs of a build.
///
/// Purely a suffix test over the manifest keys; nothing touches the
/// filesystem. Calling it again on the same manifest yields the same pairs.
pub fn enumerate(manifest: &BuildManifest) -> impl Iterator<Item = ArtifactCandidate> + '_ {
    manifest
        .outputs
        .keys()
        .filter(|path| path.ends_with(SCRIPT_EXTENSION))
        .map(|path| ArtifactCandidate {
            bundle_path: path.clone(),
            source_map_path: format!("{}{}", path, MAP_SUFFIX),
        })
}
