use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use lsfdoc_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static LSFDOC_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_arg(name: &str) -> String {
	shared_fixture_path(name).to_string_lossy().into_owned()
}

pub(crate) fn run_lsfdoc(args: &[&str]) -> Output {
	Command::new(lsfdoc_bin()).args(args).output().expect("lsfdoc command executes")
}

pub(crate) fn run_lsfdoc_json(args: &[&str]) -> serde_json::Value {
	let output = run_lsfdoc(args);
	assert!(
		output.status.success(),
		"lsfdoc command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

pub(crate) fn run_lsfdoc_text(args: &[&str]) -> String {
	let output = run_lsfdoc(args);
	assert!(output.status.success(), "lsfdoc command failed: {}", String::from_utf8_lossy(&output.stderr));
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

fn lsfdoc_bin() -> &'static PathBuf {
	LSFDOC_BIN.get_or_init(resolve_lsfdoc_bin)
}

fn resolve_lsfdoc_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_lsfdoc") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "lsfdoc.exe" } else { "lsfdoc" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "lsfdoc"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build lsfdoc binary at {}", bin.display());

	bin
}
