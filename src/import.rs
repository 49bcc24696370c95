//! Inverse projection, document text back into the model
//!
//! Decode and validation failures abort the whole import before any state is
//! touched, the caller keeps its previous model. Reconstruction mirrors the
//! serializer's elisions by defaulting every absent field.

use crate::state::{
    AppState, ChpasswdEntry, FileEncoding, FileEntry, GroupEntry, Sudo, User,
};
use crate::{cmdlist, network};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Input is not syntactically valid yaml at all
    #[error("YAML Parse Error: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// Input decoded but violates the structural contract, one message per violation
    #[error("Schema Validation Failed:\n- {}", .0.join("\n- "))]
    Schema(Vec<String>),
}

/// Keys that must hold sequences whenever they are present
const LIST_KEYS: &[&str] = &[
    "users",
    "groups",
    "packages",
    "write_files",
    "runcmd",
    "bootcmd",
    "ssh_authorized_keys",
];

/// Parse document text into a fresh model
pub fn parse(text: &str) -> Result<AppState, ImportError> {
    let data: Value = serde_yaml::from_str(text)?;
    let root = validate(&data)?;
    reconstruct(root)
}

/// Explicit nulls count as absent, the yaml idiom for "key without value"
fn present<'a>(root: &'a Mapping, key: &str) -> Option<&'a Value> {
    root.get(key).filter(|x| !x.is_null())
}

/// Structural validation of the decoded tree, collects every violation instead
/// of bailing on the first one
fn validate(data: &Value) -> Result<&Mapping, ImportError> {
    let Some(root) = data.as_mapping() else {
        return Err(ImportError::Schema(vec![
            "Root must be a YAML object (dictionary).".to_string(),
        ]));
    };

    let mut errors = vec![];

    for key in LIST_KEYS {
        if let Some(value) = present(root, key) {
            if !value.is_sequence() {
                errors.push(format!("'{key}' must be a list."));
            }
        }
    }

    if let Some(value) = present(root, "ssh_pwauth") {
        if !(value.is_bool() || value.is_string() || value.is_number()) {
            errors.push("'ssh_pwauth' should be a boolean.".to_string());
        }
    }

    if let Some(value) = present(root, "package_update") {
        if !value.is_bool() {
            errors.push("'package_update' should be a boolean.".to_string());
        }
    }

    if errors.is_empty() {
        Ok(root)
    } else {
        Err(ImportError::Schema(errors))
    }
}

fn reconstruct(root: &Mapping) -> Result<AppState, ImportError> {
    let mut state = AppState {
        users: seq(present(root, "users")).iter().map(user_entry).collect(),
        groups: seq(present(root, "groups"))
            .iter()
            .filter_map(group_entry)
            .collect(),
        packages: string_seq(present(root, "packages")),
        package_update: truthy(present(root, "package_update")),
        files: seq(present(root, "write_files")).iter().map(file_entry).collect(),
        runcmd: seq(present(root, "runcmd")).iter().map(cmdlist::decode).collect(),
        bootcmd: seq(present(root, "bootcmd")).iter().map(cmdlist::decode).collect(),
        hostname: scalar_string(present(root, "hostname")),
        manage_etc_hosts: truthy(present(root, "manage_etc_hosts")),
        ssh_pwauth: present(root, "ssh_pwauth").map_or(true, pwauth),
        global_ssh_keys: string_seq(present(root, "ssh_authorized_keys")),
        ..Default::default()
    };

    if let Some(chpasswd) = present(root, "chpasswd").and_then(Value::as_mapping) {
        state.chpasswd_expire = truthy(chpasswd.get("expire"));

        if let Some(list) = chpasswd.get("list").and_then(Value::as_str) {
            // one "name:password" per line, split on the first colon so the
            // password may contain colons, lines without one are dropped
            state.chpasswd_users = list
                .split('\n')
                .filter_map(|line| {
                    line.split_once(':').map(|(name, password)| ChpasswdEntry {
                        name: name.to_string(),
                        password: password.to_string(),
                    })
                })
                .collect();
        } else if let Some(users) = chpasswd.get("users").and_then(Value::as_sequence) {
            // alternate form, a sequence of {name, password} records, scalars
            // coerced the same way as every other string field
            state.chpasswd_users = users
                .iter()
                .filter_map(|entry| {
                    let map = entry.as_mapping()?;
                    let name = scalar_string(map.get("name"));
                    let password = scalar_string(map.get("password"));

                    if name.is_empty() || password.is_empty() {
                        return None;
                    }

                    Some(ChpasswdEntry { name, password })
                })
                .collect();
        }
    }

    if let Some(net) = present(root, "network") {
        state.network =
            network::decode(net).map_err(|message| ImportError::Schema(vec![message]))?;
    }

    Ok(state)
}

fn seq(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Scalar coerced to its display string, everything else becomes empty
fn scalar_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(x)) => x.clone(),
        Some(Value::Number(x)) => x.to_string(),
        Some(Value::Bool(x)) => x.to_string(),
        _ => String::new(),
    }
}

/// Same as `scalar_string` but empty results collapse to `None`
fn opt_string(value: Option<&Value>) -> Option<String> {
    let text = scalar_string(value);
    (!text.is_empty()).then_some(text)
}

/// Sequence of scalars coerced to strings, non-scalars are dropped
fn string_seq(value: Option<&Value>) -> Vec<String> {
    seq(value)
        .iter()
        .filter_map(|x| {
            let text = scalar_string(Some(x));
            (!text.is_empty() || x.is_string()).then_some(text)
        })
        .collect()
}

/// Loose truthiness for flags that may be written as anything
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(x)) => *x,
        Some(Value::Number(x)) => x.as_f64().map_or(true, |n| n != 0.0),
        Some(Value::String(x)) => !x.is_empty(),
        Some(Value::Sequence(_)) | Some(Value::Mapping(_)) | Some(Value::Tagged(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// The documented `ssh_pwauth` coercion, "true" or 1 mean true and everything
/// else means false, including strings like "yes" or "True"
fn pwauth(value: &Value) -> bool {
    match value {
        Value::Bool(x) => *x,
        Value::String(x) => x == "true",
        Value::Number(x) => x.as_i64() == Some(1) || x.as_f64() == Some(1.0),
        _ => false,
    }
}

fn user_entry(value: &Value) -> User {
    let Some(map) = value.as_mapping() else {
        return User::default();
    };

    User {
        name: scalar_string(map.get("name")),
        gecos: opt_string(map.get("gecos")),
        shell: opt_string(map.get("shell")),
        primary_group: opt_string(map.get("primary_group")),
        groups: match map.get("groups") {
            Some(Value::Sequence(_)) => string_seq(map.get("groups")),
            // a comma joined string is accepted as shorthand
            Some(Value::String(x)) => x.split(',').map(str::to_string).collect(),
            _ => vec![],
        },
        passwd: opt_string(map.get("passwd")),
        plain_text_passwd: opt_string(map.get("plain_text_passwd")),
        ssh_authorized_keys: string_seq(map.get("ssh_authorized_keys")),
        expiredate: opt_string(map.get("expiredate")),
        inactive: map.get("inactive").and_then(Value::as_i64),
        sudo: match map.get("sudo") {
            Some(Value::String(x)) => Some(Sudo::Rule(x.clone())),
            Some(Value::Bool(x)) => Some(Sudo::Flag(*x)),
            _ => None,
        },
        lock_passwd: map.get("lock_passwd").and_then(Value::as_bool),
        system: map.get("system").and_then(Value::as_bool),
    }
}

/// Entries that match neither shape class of the union are dropped
fn group_entry(value: &Value) -> Option<GroupEntry> {
    serde_yaml::from_value(value.clone()).ok()
}

/// Unknown keys are dropped, known ones get their documented defaults
fn file_entry(value: &Value) -> FileEntry {
    let Some(map) = value.as_mapping() else {
        return FileEntry::default();
    };

    FileEntry {
        path: scalar_string(map.get("path")),
        permissions: opt_string(map.get("permissions")),
        owner: opt_string(map.get("owner")),
        content: scalar_string(map.get("content")),
        encoding: match map.get("encoding").and_then(Value::as_str) {
            Some("b64") => FileEncoding::B64,
            _ => FileEncoding::Plain,
        },
    }
}
