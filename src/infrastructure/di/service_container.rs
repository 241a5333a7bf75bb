//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::ClassifierService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub classifier: ClassifierService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let classifier =
            ClassifierService::new(Arc::clone(&fs)).with_delimiter(settings.delimiter_byte());

        Self {
            settings,
            fs,
            classifier,
        }
    }

    /// Resolve a dataset path: relative paths that do not exist as given are
    /// looked up under the configured `data_dir`.
    pub fn resolve_dataset(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || self.fs.exists(path) {
            return path.to_path_buf();
        }
        match &self.settings.data_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Write the settings template to `path`; an existing file is left untouched.
    pub fn init_config(&self, path: &Path) -> InfraResult<()> {
        self.fs
            .create_new(path, &Settings::template())
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => InfraError::FileExists(path.to_path_buf()),
                _ => InfraError::io(format!("write {}", path.display()), e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    /// In-memory filesystem
    struct MemoryFileSystem {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemoryFileSystem {
        fn new(files: HashMap<PathBuf, String>) -> Self {
            Self {
                files: Mutex::new(files),
            }
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.exists(path)
        }

        fn create_new(&self, path: &Path, contents: &str) -> io::Result<()> {
            let mut files = self.files.lock().unwrap();
            if files.contains_key(path) {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, "exists"));
            }
            files.insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    fn container(data_dir: Option<&str>, files: &[(&str, &str)]) -> ServiceContainer {
        let settings = Settings {
            data_dir: data_dir.map(PathBuf::from),
            ..Settings::default()
        };
        let fs = MemoryFileSystem::new(
            files
                .iter()
                .map(|(p, c)| (PathBuf::from(p), c.to_string()))
                .collect(),
        );
        ServiceContainer::with_deps(settings, Arc::new(fs))
    }

    #[test]
    fn given_data_dir_when_resolving_missing_relative_path_then_joins_data_dir() {
        let c = container(Some("/data"), &[("/data/weather.csv", "a,y\nx,yes\n")]);
        let resolved = c.resolve_dataset(Path::new("weather.csv"));
        assert_eq!(resolved, PathBuf::from("/data/weather.csv"));

        let ds = c.classifier.load_dataset(&resolved, None).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn given_existing_relative_path_when_resolving_then_kept_as_is() {
        let c = container(Some("/data"), &[("weather.csv", "a,y\n")]);
        assert_eq!(
            c.resolve_dataset(Path::new("weather.csv")),
            PathBuf::from("weather.csv")
        );
    }

    #[test]
    fn given_semicolon_setting_when_loading_then_classifier_uses_it() {
        let settings = Settings {
            delimiter: ';',
            ..Settings::default()
        };
        let fs = MemoryFileSystem::new(
            [(PathBuf::from("/d.csv"), "a;y\nx;yes\n".to_string())]
                .into_iter()
                .collect(),
        );
        let c = ServiceContainer::with_deps(settings, Arc::new(fs));
        let ds = c.classifier.load_dataset(Path::new("/d.csv"), None).unwrap();
        assert_eq!(ds.rows[0].get("a"), Some("x"));
    }

    #[test]
    fn given_missing_file_when_loading_then_dataset_not_found() {
        let c = container(None, &[]);
        let err = c
            .classifier
            .load_dataset(Path::new("/nope.csv"), None)
            .unwrap_err();
        assert!(err.to_string().contains("dataset not found"));
    }

    #[test]
    fn given_config_path_when_init_twice_then_second_reports_file_exists() {
        let c = container(None, &[]);
        let path = Path::new("/home/u/.config/id3tree/id3tree.toml");

        c.init_config(path).unwrap();
        assert_eq!(c.fs.read_to_string(path).unwrap(), Settings::template());

        let err = c.init_config(path).unwrap_err();
        assert!(matches!(err, InfraError::FileExists(p) if p == path));
    }
}
