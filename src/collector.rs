/// Tree walking and image collection.
///
/// The [`Collector`] walks a source tree, classifies every regular file by its
/// signature and copies JPEG and PNG files into a single flat destination
/// directory. Per-file failures are recorded and the walk continues; only
/// failures that make the whole run impossible are returned as errors.
use crate::config::CompiledFilters;
use crate::error::{CollectError, EntryError};
use crate::naming::{DestinationNamer, canonical_file_name};
use crate::signature::{ImageKind, classify_file};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Switches that change how a run behaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Plan names and report them without creating or copying anything.
    pub dry_run: bool,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
}

/// One collected (or, in a dry run, planned) image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: ImageKind,
    /// Bytes written, or the source size in a dry run.
    pub bytes: u64,
}

/// Progress notifications handed to the observer of [`Collector::collect_with`].
#[derive(Debug)]
pub enum CollectEvent<'a> {
    /// A regular file is about to be examined.
    Examining(&'a Path),
    /// An image was copied.
    Copied(&'a CopyRecord),
    /// An entry failed and was skipped.
    Failed(&'a EntryError),
}

/// Outcome of a completed walk.
#[derive(Debug, Default)]
pub struct CollectReport {
    pub copied: Vec<CopyRecord>,
    pub errors: Vec<EntryError>,
    /// Regular files that were filtered out or not recognised as images.
    pub skipped: usize,
}

impl CollectReport {
    /// Number of collected files per detected kind.
    pub fn count_by_kind(&self) -> BTreeMap<ImageKind, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.copied {
            *counts.entry(record.kind).or_insert(0) += 1;
        }
        counts
    }

    /// True when no entry failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Copies images found under a source tree into one destination directory.
#[derive(Debug)]
pub struct Collector {
    destination: PathBuf,
    filters: CompiledFilters,
    options: CollectOptions,
}

impl Collector {
    /// Creates a collector writing into `destination` with no filters.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            filters: CompiledFilters::default(),
            options: CollectOptions::default(),
        }
    }

    pub fn with_filters(mut self, filters: CompiledFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_options(mut self, options: CollectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn options(&self) -> CollectOptions {
        self.options
    }

    /// Walks `source` and collects every image found.
    ///
    /// # Errors
    ///
    /// Fails only if the source cannot be accessed or the destination directory
    /// cannot be created. Everything else ends up in [`CollectReport::errors`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imgcollect::Collector;
    /// use std::path::Path;
    ///
    /// let report = Collector::new("collected_images")
    ///     .collect(Path::new("/home/user/Downloads"))
    ///     .expect("collection failed");
    /// println!("Collected {} images", report.copied.len());
    /// ```
    pub fn collect(&self, source: &Path) -> Result<CollectReport, CollectError> {
        self.collect_with(source, |_| {})
    }

    /// Like [`Collector::collect`], reporting progress to `observer` as the walk
    /// goes.
    pub fn collect_with<F>(&self, source: &Path, mut observer: F) -> Result<CollectReport, CollectError>
    where
        F: FnMut(CollectEvent<'_>),
    {
        fs::metadata(source).map_err(|source_error| CollectError::SourceUnavailable {
            path: source.to_path_buf(),
            source: source_error,
        })?;

        self.prepare_destination()?;

        // Keep copies made during this run from being collected again.
        let pruned_destination = fs::canonicalize(&self.destination).ok();

        let walker = WalkDir::new(source)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry, pruned_destination.as_deref()));

        let mut namer = DestinationNamer::new(&self.destination);
        let mut report = CollectReport::default();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(walk_error) => {
                    let error = EntryError::Walk {
                        path: walk_error
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| source.to_path_buf()),
                        source: walk_error,
                    };
                    observer(CollectEvent::Failed(&error));
                    report.errors.push(error);
                    continue;
                }
            };

            // directories are descended into by the walker, symlinks are only
            // followed when configured
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
            if !self.filters.should_include(relative) {
                report.skipped += 1;
                continue;
            }

            observer(CollectEvent::Examining(entry.path()));
            match self.collect_file(entry.path(), &mut namer) {
                Ok(Some(record)) => {
                    observer(CollectEvent::Copied(&record));
                    report.copied.push(record);
                }
                Ok(None) => report.skipped += 1,
                Err(error) => {
                    observer(CollectEvent::Failed(&error));
                    report.errors.push(error);
                }
            }
        }

        Ok(report)
    }

    /// Creates the destination directory and its parents. Nothing is created in
    /// a dry run.
    fn prepare_destination(&self) -> Result<(), CollectError> {
        if self.options.dry_run {
            return Ok(());
        }

        fs::create_dir_all(&self.destination).map_err(|source| {
            CollectError::DestinationCreation {
                path: self.destination.clone(),
                source,
            }
        })
    }

    fn is_pruned(&self, entry: &DirEntry, destination: Option<&Path>) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        if self
            .filters
            .prunes_dir(&entry.file_name().to_string_lossy())
        {
            return true;
        }

        destination.is_some_and(|destination| {
            fs::canonicalize(entry.path()).is_ok_and(|dir| dir == destination)
        })
    }

    /// Classifies one file and, if it is an image, copies it under a free name.
    ///
    /// Returns `Ok(None)` for files that are not images.
    fn collect_file(
        &self,
        path: &Path,
        namer: &mut DestinationNamer,
    ) -> Result<Option<CopyRecord>, EntryError> {
        let kind = classify_file(path).map_err(|source| EntryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(desired) = canonical_file_name(path, kind) else {
            return Ok(None);
        };

        let destination = namer.allocate(&desired);
        let bytes = if self.options.dry_run {
            source_len(path)?
        } else {
            copy_file(path, &destination)?
        };

        Ok(Some(CopyRecord {
            source: path.to_path_buf(),
            destination,
            kind,
            bytes,
        }))
    }
}

/// Size of a source file, reported in place of a copy during a dry run.
fn source_len(path: &Path) -> Result<u64, EntryError> {
    fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|source| EntryError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Streams `source` into a newly created `destination`.
///
/// The destination is opened with `create_new`, so an existing file is never
/// truncated. A partially written destination is left in place on failure.
fn copy_file(source: &Path, destination: &Path) -> Result<u64, EntryError> {
    let mut reader = File::open(source).map_err(|e| EntryError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(|e| EntryError::Create {
            path: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e,
        })?;

    io::copy(&mut reader, &mut writer).map_err(|e| EntryError::Copy {
        path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source: e,
    })
}
