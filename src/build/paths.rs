//! Source discovery and output path mirroring.

use std::path::{Path, PathBuf};

/// Extension of the documents picked up by the batch converter.
pub const SOURCE_EXTENSION: &str = "rst";

/// Extension of the generated pages.
pub const OUTPUT_EXTENSION: &str = "html";

/// Whether a path names a convertible source document.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Mirror a source file's relative directory under the output root and
/// swap the source extension for the output extension.
///
/// `docs/sub/b.rst` under root `docs` with output `out` becomes
/// `out/sub/b.html`.
pub fn destination_path(source_root: &Path, output_root: &Path, source_file: &Path) -> PathBuf {
    let relative = source_file.strip_prefix(source_root).unwrap_or(source_file);
    output_root.join(relative).with_extension(OUTPUT_EXTENSION)
}
