/// Directory separators used to split and join paths.
///
/// Both characters split a path; `primary` is the one used when a full path is
/// rebuilt. The default follows drive-letter conventions (`\` primary, `/`
/// alternate) whatever the host is, so `C:\scripts\main.csx` is stable in tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Separators {
    pub primary: char,
    pub alternate: char,
}

impl Separators {
    pub const fn new(primary: char, alternate: char) -> Self {
        Self { primary, alternate }
    }

    /// Separators of the host the crate is built for.
    pub fn host() -> Self {
        let primary = std::path::MAIN_SEPARATOR;
        let alternate = if primary == '/' { '\\' } else { '/' };
        Self { primary, alternate }
    }

    pub fn is_separator(&self, c: char) -> bool {
        c == self.primary || c == self.alternate
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::new('\\', '/')
    }
}

/// Construction options of [`LinesFS`](crate::LinesFS).
///
/// ```
/// use vfs_lines::{LinesFS, LinesFSConfig, Separators};
///
/// let config = LinesFSConfig::new("/")
///     .separators(Separators::new('/', '\\'))
///     .modules_folder("packages");
/// let fs = LinesFS::with_config(config).unwrap();
/// assert_eq!(fs.modules_folder(), "packages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesFSConfig {
    pub root_name: String,
    pub separators: Separators,
    pub modules_folder: String,
}

pub const DEFAULT_MODULES_FOLDER: &str = "modules";

impl LinesFSConfig {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            separators: Separators::default(),
            modules_folder: DEFAULT_MODULES_FOLDER.to_string(),
        }
    }

    pub fn separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    pub fn modules_folder(mut self, folder: impl Into<String>) -> Self {
        self.modules_folder = folder.into();
        self
    }
}
