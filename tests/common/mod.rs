use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home for one test: XDG dirs, an empty PATH and a wallpaper tree
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        for sub in ["config", "state", "runtime", "bin", "walls"] {
            fs::create_dir_all(temp_dir.path().join(sub))?;
        }
        Ok(Self { temp_dir })
    }

    /// Get the temp directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn walls(&self) -> PathBuf {
        self.path().join("walls")
    }

    pub fn config_file(&self) -> PathBuf {
        self.path().join("config").join("hyprwall").join("config.toml")
    }

    pub fn lock_file(&self) -> PathBuf {
        self.path().join("runtime").join("hyprwall.lock")
    }

    /// Create an empty file below the wallpaper root
    pub fn add_wallpaper(&self, rel: &str) -> Result<PathBuf> {
        let path = self.walls().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, b"")?;
        Ok(path)
    }

    /// Put an executable shell script named `name` on the test PATH
    pub fn add_tool(&self, name: &str, body: &str) -> Result<PathBuf> {
        let path = self.path().join("bin").join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        let path = self.config_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn envs(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("HOME", self.path().to_path_buf()),
            ("XDG_CONFIG_HOME", self.path().join("config")),
            ("XDG_STATE_HOME", self.path().join("state")),
            ("XDG_RUNTIME_DIR", self.path().join("runtime")),
            ("PATH", self.path().join("bin")),
        ]
    }
}
