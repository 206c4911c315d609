use langfuse_types::{Error, Record, Result, deep_get};
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

/// Strict field projection for `--fields`.
///
/// Each output record carries exactly the requested keys, in flag order,
/// with `null` for anything the source record lacks. The result is a
/// rectangular array with a stable key set regardless of input shape.
pub fn project(records: &[Record], fields: &[String]) -> Vec<Record> {
    records
        .iter()
        .map(|record| {
            let mut projected = Record::new();
            for field in fields {
                let value = deep_get(record, field).cloned().unwrap_or(Value::Null);
                projected.insert(field.clone(), value);
            }
            projected
        })
        .collect()
}

/// Pipe a JSON document through the external `jq` binary and return its
/// stdout verbatim (trailing newline stripped).
pub fn apply_jq(json: &str, expr: &str) -> Result<String> {
    let mut child = Command::new("jq")
        .arg(expr)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::InvalidInput(
                    "`jq` is required for --jq but was not found in PATH".to_string(),
                )
            } else {
                Error::Io(e)
            }
        })?;

    child
        .stdin
        .take()
        .ok_or_else(|| Error::Internal(anyhow::anyhow!("jq stdin unavailable")))?
        .write_all(json.as_bytes())?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::InvalidInput(format!(
            "jq failed: {}",
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string())
}
