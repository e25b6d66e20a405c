use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: subcommand, its parameters and input files.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input<P: AsRef<Path>>(mut self, input: P) -> Self {
        self.inputs.push(input.as_ref().to_string_lossy().into_owned());
        self
    }
}

/// Provenance block shared by sidecars and `report`.
pub fn document(payload: &Payload, outputs: &[String]) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "tool_version": calibgeom::VERSION,
        "command": payload.command,
        "params": payload.params,
        "inputs": payload.inputs,
        "outputs": outputs
    })
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    match sidecar.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating sidecar dir {}", dir.display()))?,
        _ => {}
    }
    let doc = document(payload, &[artifact.to_string_lossy().into_owned()]);
    let bytes = serde_json::to_vec_pretty(&doc)?;
    fs::write(&sidecar, bytes).with_context(|| format!("writing sidecar {}", sidecar.display()))?;
    tracing::debug!(path = %sidecar.display(), "provenance_written");
    Ok(sidecar)
}

/// `dir/name.ext` → `dir/name.provenance.json`.
fn provenance_path(artifact: &Path) -> PathBuf {
    if artifact.file_name().is_none() {
        return artifact.join("artifact.provenance.json");
    }
    artifact.with_extension("provenance.json")
}

/// Commit hash from `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let non_empty = |s: String| (!s.is_empty()).then_some(s);
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .and_then(non_empty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().and_then(non_empty))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_string())
}
