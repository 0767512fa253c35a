//! Shared helpers: assembly manifests written into a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use test_discovery::{AssemblyEnumeratorWrapper, DiscoverySettings, TestMethodDescriptor, WarningList};

pub const FRAMEWORK_NAME: &str = "Microsoft.VisualStudio.TestPlatform.TestFramework";

pub const FRAMEWORK: &str = "name: Microsoft.VisualStudio.TestPlatform.TestFramework\ntypes: []\n";

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// A directory that already contains the test framework manifest.
    pub fn new() -> Self {
        let workspace = Self {
            dir: TempDir::new().unwrap(),
        };
        workspace.write(&format!("{FRAMEWORK_NAME}.yaml"), FRAMEWORK);
        workspace
    }

    pub fn write(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn canonical(&self, file_name: &str) -> String {
        self.path(file_name)
            .canonicalize()
            .unwrap()
            .display()
            .to_string()
    }

    pub fn discover(&self, file_name: &str) -> Discovery {
        self.discover_with(file_name, &DiscoverySettings::default())
    }

    pub fn discover_with(&self, file_name: &str, settings: &DiscoverySettings) -> Discovery {
        let mut warnings = WarningList::new();
        let tests = AssemblyEnumeratorWrapper::in_process().get_tests(
            &self.path(file_name).display().to_string(),
            settings,
            &mut warnings,
        );
        Discovery {
            tests,
            warnings: warnings.into_vec(),
        }
    }
}

pub struct Discovery {
    pub tests: Option<Vec<TestMethodDescriptor>>,
    pub warnings: Vec<String>,
}

impl Discovery {
    pub fn tests(&self) -> &[TestMethodDescriptor] {
        self.tests.as_deref().expect("assembly was not enumerated")
    }

    pub fn names(&self) -> Vec<String> {
        self.tests()
            .iter()
            .map(TestMethodDescriptor::fully_qualified_name)
            .collect()
    }

    pub fn find(&self, fully_qualified_name: &str) -> &TestMethodDescriptor {
        self.tests()
            .iter()
            .find(|t| t.fully_qualified_name() == fully_qualified_name)
            .unwrap_or_else(|| panic!("{fully_qualified_name} not discovered"))
    }
}
