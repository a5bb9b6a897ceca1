#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated directory holding a watched file, the state file and XDG homes.
pub struct Fixture {
    pub temp: TempDir,
    pub target: PathBuf,
    pub state_file: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("watched.log");
        let state_file = temp.path().join("filesizes");
        Self {
            temp,
            target,
            state_file,
        }
    }

    pub fn resize(&self, len: u64) {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.target)
            .expect("open target");
        file.set_len(len).expect("resize target");
    }

    /// `sizecheck --state-file <state> <args..> <target>`
    pub fn check(&self, args: &[&str]) -> Command {
        let mut cmd = self.bare();
        cmd.arg("--state-file").arg(&self.state_file);
        cmd.args(args);
        cmd.arg(&self.target);
        cmd
    }

    /// Binary with XDG homes pointed inside the fixture and no SIZECHECK_* overrides.
    pub fn bare(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("sizecheck");
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("XDG_STATE_HOME", self.temp.path().join("state"))
            .env_remove("SIZECHECK_LOG")
            .env_remove("SIZECHECK_LOG_OUTPUT")
            .env_remove("SIZECHECK__STORAGE__STATE_FILE");
        cmd
    }

    pub fn state_content(&self) -> Option<String> {
        fs::read_to_string(&self.state_file).ok()
    }

    pub fn canonical_target(&self) -> PathBuf {
        fs::canonicalize(&self.target).expect("canonicalize target")
    }
}

pub fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout")
}
