use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::io::Write;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn catalog_search() -> Command {
    scrubbed(env!("CARGO_BIN_EXE_catalog-search"))
}

pub fn category_label() -> Command {
    scrubbed(env!("CARGO_BIN_EXE_category-label"))
}

/// Command with the plantstore variables cleared so the host environment
/// cannot leak into assertions.
fn scrubbed(program: &str) -> Command {
    let mut cmd = Command::new(program);
    for key in [
        "PLANTSTORE_CATALOG",
        "PLANTSTORE_TRANSLATIONS",
        "PLANTSTORE_LANG",
        "PLANTSTORE_CURRENCY",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("PLANTSTORE_ROOT", repo_root());
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn command: {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("stdin not captured")?
        .write_all(input.as_bytes())?;
    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "command failed: status {:?}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

pub fn parse_ndjson(stdout: &[u8]) -> Result<Vec<Value>> {
    let text = String::from_utf8(stdout.to_vec()).context("stdout is not UTF-8")?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).with_context(|| format!("bad NDJSON line: {line}")))
        .collect()
}

pub fn write_file(dir: &Path, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value)?)?;
    Ok(path)
}
