//! Package lookup for unpacking many info files in one run.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{Error, Package, Result};

/// File extension of package files.
pub const PACKAGE_EXTENSION: &str = "ntsp";

/// Packages loaded so far, keyed by package name.
///
/// Each package file is read at most once; misses are remembered too. The
/// cache only grows.
#[derive(Debug, Default)]
pub struct PackageCache {
    directory: Option<PathBuf>,
    packages: FxHashMap<String, Option<Package>>,
}

impl PackageCache {
    /// Create a cache resolving packages in `directory`, or in the current
    /// directory when `None`.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            directory,
            packages: FxHashMap::default(),
        }
    }

    /// Path of the package file for `name`.
    pub fn package_path(&self, name: &str) -> PathBuf {
        let file_name = format!("{name}.{PACKAGE_EXTENSION}");
        match &self.directory {
            Some(directory) => directory.join(file_name),
            None => Path::new(&file_name).to_path_buf(),
        }
    }

    /// Get the package called `name`, reading it on first use.
    pub fn get(&mut self, name: &str) -> Result<&Package> {
        if !self.packages.contains_key(name) {
            let path = self.package_path(name);
            let package = if path.is_file() {
                info!(package = name, path = %path.display(), "loading package");
                Some(Package::read(&path)?)
            } else {
                debug!(package = name, path = %path.display(), "package file missing");
                None
            };
            self.packages.insert(name.to_owned(), package);
        }

        match self.packages.get(name) {
            Some(Some(package)) => Ok(package),
            _ => Err(Error::PackageNotFound {
                package: name.to_owned(),
                path: self.package_path(name),
            }),
        }
    }

    /// Whether `name` has been looked up, found or not.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Number of names looked up so far.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether nothing has been looked up yet.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{DataBlock, PackageEntry};

    #[test]
    fn test_package_path() {
        let cache = PackageCache::new(Some(PathBuf::from("packages")));
        assert_eq!(cache.package_path("terrain"), Path::new("packages").join("terrain.ntsp"));

        let cache = PackageCache::new(None);
        assert_eq!(cache.package_path("terrain"), PathBuf::from("terrain.ntsp"));
    }

    #[test]
    fn test_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let package = Package {
            entries: vec![PackageEntry::new("a", 4, 4, 1)],
            blocks: vec![DataBlock::new(vec![5; 8])],
        };
        package.write(dir.path().join("terrain.ntsp")).unwrap();

        let mut cache = PackageCache::new(Some(dir.path().to_path_buf()));
        assert_eq!(cache.get("terrain").unwrap().entries.len(), 1);

        // A second lookup is served from memory even if the file is gone
        std::fs::remove_file(dir.path().join("terrain.ntsp")).unwrap();
        assert_eq!(cache.get("terrain").unwrap().blocks[0].data, vec![5; 8]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remembers_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = PackageCache::new(Some(dir.path().to_path_buf()));

        assert!(matches!(
            cache.get("missing"),
            Err(Error::PackageNotFound { package, .. }) if package == "missing"
        ));
        assert!(cache.contains("missing"));

        // Creating the file afterwards does not change the cached answer
        Package::new().write(dir.path().join("missing.ntsp")).unwrap();
        assert!(cache.get("missing").is_err());
    }
}
