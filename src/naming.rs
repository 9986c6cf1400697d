//! Destination naming and collision resolution.
//!
//! A collected file keeps its base name, loses whatever extension it had and
//! gets the canonical one for its detected kind. When that name is taken in the
//! destination directory, `_1`, `_2`, ... is inserted before the extension
//! until a free name is found.

use crate::signature::ImageKind;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the desired file name for a source file of the given kind.
///
/// Returns `None` for [`ImageKind::Unknown`] or a path without a file name.
///
/// ```
/// use imgcollect::naming::canonical_file_name;
/// use imgcollect::signature::ImageKind;
/// use std::ffi::OsString;
/// use std::path::Path;
///
/// let name = canonical_file_name(Path::new("shots/holiday.dat"), ImageKind::Png);
/// assert_eq!(name, Some(OsString::from("holiday.png")));
/// ```
pub fn canonical_file_name(source: &Path, kind: ImageKind) -> Option<OsString> {
    let extension = kind.extension()?;
    let (stem, _) = split_extension(source.file_name()?);

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    Some(name)
}

/// Inserts `_{counter}` between the stem and the extension of `name`.
///
/// `photo.jpg` with counter 2 becomes `photo_2.jpg`.
pub fn suffixed_name(name: &OsStr, counter: u64) -> OsString {
    let (stem, extension) = split_extension(name);

    let mut suffixed = stem.to_os_string();
    suffixed.push(format!("_{}", counter));
    suffixed.push(extension);
    suffixed
}

/// Splits a file name at its last dot into a stem and an extension that keeps
/// the dot.
///
/// A leading dot counts too, so `.png` is all extension and has an empty stem.
fn split_extension(name: &OsStr) -> (&OsStr, OsString) {
    let path = Path::new(name);
    match path.extension() {
        Some(ext) => {
            let mut extension = OsString::from(".");
            extension.push(ext);
            (path.file_stem().unwrap_or(name), extension)
        }
        None if name.as_encoded_bytes().starts_with(b".") => (OsStr::new(""), name.to_os_string()),
        None => (name, OsString::new()),
    }
}

/// Hands out destination paths that do not collide with existing entries.
///
/// Besides checking the filesystem, the namer remembers every path it has
/// handed out, so a dry run (which never creates files) still plans distinct
/// names.
#[derive(Debug)]
pub struct DestinationNamer {
    dir: PathBuf,
    reserved: HashSet<PathBuf>,
}

impl DestinationNamer {
    /// Creates a namer for the given destination directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reserved: HashSet::new(),
        }
    }

    /// The destination directory this namer allocates into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the first free path for `desired` and reserves it.
    pub fn allocate(&mut self, desired: &OsStr) -> PathBuf {
        let mut candidate = self.dir.join(desired);
        let mut counter = 1;

        while self.is_taken(&candidate) {
            candidate = self.dir.join(suffixed_name(desired, counter));
            counter += 1;
        }

        self.reserved.insert(candidate.clone());
        candidate
    }

    fn is_taken(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken
        self.reserved.contains(path) || fs::symlink_metadata(path).is_ok()
    }
}
