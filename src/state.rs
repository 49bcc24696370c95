//! In-memory model of a user-data document
//!
//! Plain value types, no behavior beyond field replacement. The serializer and
//! importer enforce all invariants so the model itself stays a dumb container
//! that is always replaced wholesale, never patched in place.

use crate::network::Network;
use crate::import::ImportError;
use crate::{emit, import};
use serde::{Deserialize, Serialize};

/// Skip helper, `None` and empty string are both treated as "not set"
pub(crate) fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// The `sudo:` key takes either a sudoers rule or a plain boolean toggle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sudo {
    Rule(String),
    Flag(bool),
}

/// User created through the `users:` module
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "blank")]
    pub gecos: Option<String>,

    #[serde(skip_serializing_if = "blank")]
    pub shell: Option<String>,

    #[serde(skip_serializing_if = "blank")]
    pub primary_group: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Pre-hashed password, mutually exclusive with `plain_text_passwd`
    #[serde(skip_serializing_if = "blank")]
    pub passwd: Option<String>,

    #[serde(skip_serializing_if = "blank")]
    pub plain_text_passwd: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_authorized_keys: Vec<String>,

    #[serde(skip_serializing_if = "blank")]
    pub expiredate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sudo: Option<Sudo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_passwd: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
}

/// One `name:password` pair for the `chpasswd` module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChpasswdEntry {
    pub name: String,
    pub password: String,
}

/// Entry of the `groups:` module, either a bare name or a name with members
///
/// The shape class is preserved verbatim in both directions, a bare name is
/// never promoted to the record form or the other way around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        members: Option<Vec<String>>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FileEncoding {
    #[default]
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "b64")]
    B64,
}

impl FileEncoding {
    /// Plain is the default and gets elided from the document
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// Entry of the `write_files:` module
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileEntry {
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    pub content: String,

    #[serde(skip_serializing_if = "FileEncoding::is_plain")]
    pub encoding: FileEncoding,
}

/// Root of the structural model, owns every editable concern by value
///
/// Run and boot commands are kept as single line strings, a command in
/// argument-vector form is a JSON array literal inside that string (see
/// `cmdlist`) so it stays editable as plain text
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub users: Vec<User>,
    pub chpasswd_users: Vec<ChpasswdEntry>,
    /// Applies to the whole chpasswd list, may be set even when the list is empty
    pub chpasswd_expire: bool,
    pub groups: Vec<GroupEntry>,
    pub packages: Vec<String>,
    pub package_update: bool,
    pub files: Vec<FileEntry>,
    pub runcmd: Vec<String>,
    pub bootcmd: Vec<String>,
    pub hostname: String,
    pub manage_etc_hosts: bool,
    pub network: Network,
    /// Defaults to true, only written to the document when false
    pub ssh_pwauth: bool,
    pub global_ssh_keys: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            users: vec![],
            chpasswd_users: vec![],
            chpasswd_expire: false,
            groups: vec![],
            packages: vec![],
            package_update: false,
            files: vec![],
            runcmd: vec![],
            bootcmd: vec![],
            hostname: String::new(),
            manage_etc_hosts: false,
            network: Network::default(),
            ssh_pwauth: true,
            global_ssh_keys: vec![],
        }
    }
}

/// Owns the current model together with the text rendered from it
///
/// The text is recomputed unconditionally on every replacement, the model is
/// small enough that caching would only buy invalidation bugs
#[derive(Debug, Clone)]
pub struct Session {
    state: AppState,
    output: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_state(AppState::default())
    }
}

impl Session {
    pub fn from_state(state: AppState) -> Self {
        let output = emit::render(&state);
        Self { state, output }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Replace the model wholesale and re-render the document
    pub fn replace(&mut self, state: AppState) {
        self.state = state;
        self.output = emit::render(&self.state);
    }

    /// Parse `text` and replace the model with the result
    ///
    /// The previous state is untouched unless parsing fully succeeds
    pub fn load(&mut self, text: &str) -> Result<(), ImportError> {
        let state = import::parse(text)?;
        self.replace(state);
        Ok(())
    }
}
