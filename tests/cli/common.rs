use std::path::PathBuf;
use tempfile::TempDir;

/// Test utilities and common functions for CLI integration tests
///
/// Helper struct for managing test resources
pub struct TestContext {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with a temporary directory
    pub fn new() -> Result<Self, std::io::Error> {
        let temp_dir = TempDir::new()?;
        Ok(TestContext { temp_dir })
    }

    /// Get the path to the temporary directory
    pub fn temp_path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Create a test JSON file
    pub fn create_json_file(&self, name: &str, content: &str) -> Result<PathBuf, std::io::Error> {
        let file_path = self.temp_path().join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }
}

/// Get the litmock command, run inside `dir` so no stray config is picked up
pub fn cmd_in(dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cmd();
    cmd.current_dir(dir).env_remove("LITMOCK_CONFIG").env("NO_COLOR", "1");
    cmd
}

/// Get the litmock command
#[allow(deprecated)]
pub fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("litmock").expect("Failed to find litmock binary")
}

/// Mock shape of a two-method repository
pub fn sample_mock_shape_json() -> String {
    r#"{
  "type_name": "UserRepository",
  "methods": [
    {"name": "get_by_id", "return_type": "User", "parameters": [{"name": "id", "type": "i32"}]},
    {"name": "delete", "return_type": "()", "parameters": [{"name": "id", "type": "i32"}]}
  ],
  "properties": [{"name": "count", "type": "usize"}]
}"#
    .to_string()
}

/// API shape declaring the given method and property names
pub fn sample_api_shape_json(methods: &[&str], properties: &[&str]) -> String {
    serde_json::json!({ "methods": methods, "properties": properties }).to_string()
}
