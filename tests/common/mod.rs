//! Shared test utilities for E2E tests.
//!
//! Add `mod common;` to a test file, then `use common::prelude::*;`.

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Overrides only the library name.
    pub const ALTAIR: &str = r#"
library:
  name: altair
  owner: vega
  repository: altair
"#;

    /// Misspelled section key.
    pub const UNKNOWN_FIELD: &str = r#"
libary:
  name: altair
"#;
}

/// A temporary working directory laid out like a pipeline checkout.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `docset-pipeline.yaml`.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("docset-pipeline.yaml", content)
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Create `Dash-User-Contributions/docsets/{name}` as `gh repo fork` would
    /// leave it for an existing docset.
    pub fn with_fork_docset(self, name: &str) -> Self {
        self.temp_dir
            .child(format!("Dash-User-Contributions/docsets/{}", name))
            .create_dir_all()
            .expect("Failed to create docset directory");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// The binary, run inside the fixture with a clean environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("docset-pipeline");
        cmd.current_dir(self.path())
            .env_remove("DOCSET_PIPELINE_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
