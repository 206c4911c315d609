use crate::context::ExecutionContext;
use crate::diff;
use langfuse_types::{Error, Record, Result, schema};
use owo_colors::OwoColorize;
use serde_json::{Value, json};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Version", "version"),
    ("Type", "type"),
    ("Labels", "labels"),
    ("Tags", "tags"),
    ("Prompt", "prompt"),
];

pub fn list(ctx: &ExecutionContext, limit: Option<usize>) -> Result<()> {
    let records = ctx.client()?.list_prompts(ctx.limit(limit)?)?;
    ctx.output().render_records(&records, schema::PROMPT_COLUMNS)
}

pub fn get(
    ctx: &ExecutionContext,
    name: &str,
    version: Option<u32>,
    label: Option<&str>,
) -> Result<()> {
    let record = ctx.client()?.get_prompt(name, version, label)?;
    ctx.output().render_detail(&record, DETAIL_FIELDS)
}

pub fn compile(
    ctx: &ExecutionContext,
    name: &str,
    version: Option<u32>,
    label: Option<&str>,
    vars: &[String],
) -> Result<()> {
    let vars = parse_vars(vars)?;
    let record = ctx.client()?.get_prompt(name, version, label)?;
    let body = record.get("prompt").cloned().unwrap_or(Value::Null);
    let compiled = substitute_value(&body, &vars);

    let out = ctx.output();
    if out.is_json() {
        return out.render_value(&compiled);
    }
    match &compiled {
        Value::String(text) => println!("{}", text),
        Value::Array(messages) => {
            for message in messages {
                let role = message
                    .get("role")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                let content = message
                    .get("content")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                if out.color() {
                    println!("{}: {}", role.bold(), content);
                } else {
                    println!("{}: {}", role, content);
                }
            }
        }
        other => out.render_value(other)?,
    }
    Ok(())
}

pub fn diff(ctx: &ExecutionContext, name: &str, v1: u32, v2: u32) -> Result<()> {
    let client = ctx.client()?;
    let old = prompt_text(&client.get_prompt(name, Some(v1), None)?);
    let new = prompt_text(&client.get_prompt(name, Some(v2), None)?);

    let out = ctx.output();
    let old_label = format!("{} v{}", name, v1);
    let new_label = format!("{} v{}", name, v2);

    if out.is_json() {
        let text = diff::unified(&old, &new, &old_label, &new_label, false);
        return out.render_value(&json!({
            "name": name,
            "v1": v1,
            "v2": v2,
            "diff": text,
        }));
    }

    let text = diff::unified(&old, &new, &old_label, &new_label, out.color());
    if text.is_empty() {
        out.status(&format!("Versions {} and {} are identical.", v1, v2));
    } else {
        print!("{}", text);
    }
    Ok(())
}

/// Text form of a prompt body for diffing: text prompts verbatim, chat
/// prompts as pretty JSON so message boundaries become line boundaries.
fn prompt_text(record: &Record) -> String {
    match record.get("prompt") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
        None => String::new(),
    }
}

fn parse_vars(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| {
                    Error::InvalidInput(format!("invalid --var '{}': expected KEY=VALUE", pair))
                })
        })
        .collect()
}

/// Fill `{{name}}` placeholders (whitespace-tolerant) in every string of the
/// prompt body. Unknown placeholders are left intact.
fn substitute_value(value: &Value, vars: &[(String, String)]) -> Value {
    match value {
        Value::String(text) => Value::String(substitute_text(text, vars)),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| substitute_value(v, vars)).collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_value(v, vars)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn substitute_text(text: &str, vars: &[(String, String)]) -> String {
    let mut out = text.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
        out = out.replace(&format!("{{{{ {} }}}}", key), value);
    }
    out
}
