//! Projection of the model into the serialized document
//!
//! Runs after every model replacement, so it is total by design, a well formed
//! model never fails to serialize. Defaults and empties are elided so a fresh
//! model produces the marker line and a placeholder instead of noise.

use crate::state::AppState;
use crate::{cmdlist, network, DOC_MARKER, DOC_PLACEHOLDER};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_yaml::to_value(value).expect("model is always representable as yaml")
}

/// Assemble the generic document tree, applying every elision rule
///
/// Key insertion order is the order the agent documentation lists the modules
/// in and is preserved verbatim by the encoder
pub fn config_tree(state: &AppState) -> Mapping {
    let mut doc = Mapping::new();

    if !state.hostname.is_empty() {
        doc.insert("hostname".into(), state.hostname.clone().into());
    }

    if state.manage_etc_hosts {
        doc.insert("manage_etc_hosts".into(), true.into());
    }

    // default is true so only false is worth writing out
    if !state.ssh_pwauth {
        doc.insert("ssh_pwauth".into(), false.into());
    }

    if state.package_update {
        doc.insert("package_update".into(), true.into());
    }

    if !state.global_ssh_keys.is_empty() {
        doc.insert("ssh_authorized_keys".into(), to_value(&state.global_ssh_keys));
    }

    if !state.users.is_empty() {
        doc.insert("users".into(), to_value(&state.users));
    }

    if !state.chpasswd_users.is_empty() {
        // the chpasswd module wants a single "name:password" per line string
        let list = state
            .chpasswd_users
            .iter()
            .map(|x| format!("{}:{}", x.name, x.password))
            .collect::<Vec<_>>()
            .join("\n");

        let mut chpasswd = Mapping::new();
        chpasswd.insert("list".into(), list.into());
        chpasswd.insert("expire".into(), state.chpasswd_expire.into());
        doc.insert("chpasswd".into(), Value::Mapping(chpasswd));
    } else if state.chpasswd_expire {
        let mut chpasswd = Mapping::new();
        chpasswd.insert("expire".into(), true.into());
        doc.insert("chpasswd".into(), Value::Mapping(chpasswd));
    }

    if !state.groups.is_empty() {
        doc.insert("groups".into(), to_value(&state.groups));
    }

    if !state.packages.is_empty() {
        doc.insert("packages".into(), to_value(&state.packages));
    }

    if !state.files.is_empty() {
        doc.insert("write_files".into(), to_value(&state.files));
    }

    if !state.runcmd.is_empty() {
        let entries = state.runcmd.iter().map(|x| cmdlist::encode(x)).collect();
        doc.insert("runcmd".into(), Value::Sequence(entries));
    }

    if !state.bootcmd.is_empty() {
        let entries = state.bootcmd.iter().map(|x| cmdlist::encode(x)).collect();
        doc.insert("bootcmd".into(), Value::Sequence(entries));
    }

    if let Some(net) = network::encode(&state.network) {
        doc.insert("network".into(), net);
    }

    doc
}

/// Render the full document text, always prefixed with the marker line
pub fn render(state: &AppState) -> String {
    let tree = config_tree(state);

    if tree.is_empty() {
        return format!("{DOC_MARKER}\n\n{DOC_PLACEHOLDER}\n");
    }

    match serde_yaml::to_string(&tree) {
        Ok(body) => format!("{DOC_MARKER}\n{body}"),
        // unreachable for a well formed model, kept as a visible degrade
        Err(err) => format!("Error generating config:\n{err}\n"),
    }
}
