use crate::network::{Interface, InterfaceKind, Network, Subnet, SubnetKind};
use crate::state::{
    AppState, ChpasswdEntry, FileEncoding, FileEntry, GroupEntry, Session, Sudo, User,
};
use crate::{emit, import};
use anyhow::Result;
use std::io::Write;

// NOTE: This test is not useless, it prevents running tests on outdated main binary
#[test]
fn test_sanity() -> Result<()> {
    assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .args(["--version"])
        .assert()
        .success()
        .stdout(format!("{} {}\n", crate::APP_NAME, crate::VERSION));

    Ok(())
}

/// A model touching every module, the way the form panels would build it
fn rich_state() -> AppState {
    AppState {
        users: vec![
            User {
                name: "admin".to_string(),
                gecos: Some("Administrator".to_string()),
                shell: Some("/bin/bash".to_string()),
                primary_group: Some("admin".to_string()),
                groups: vec!["adm".to_string(), "wheel".to_string()],
                passwd: Some("$6$abc$xyz".to_string()),
                ssh_authorized_keys: vec!["ssh-ed25519 AAAA admin@host".to_string()],
                sudo: Some(Sudo::Rule("ALL=(ALL) NOPASSWD:ALL".to_string())),
                lock_passwd: Some(false),
                ..Default::default()
            },
            User {
                name: "svc".to_string(),
                system: Some(true),
                inactive: Some(30),
                sudo: Some(Sudo::Flag(false)),
                ..Default::default()
            },
        ],
        chpasswd_users: vec![ChpasswdEntry {
            name: "ubuntu".to_string(),
            password: "$6$abc$xyz".to_string(),
        }],
        chpasswd_expire: true,
        groups: vec![
            GroupEntry::Name("wheel".to_string()),
            GroupEntry::Detailed {
                name: "admins".to_string(),
                members: Some(vec!["admin".to_string()]),
            },
        ],
        packages: vec!["vim".to_string(), "nginx".to_string()],
        package_update: true,
        files: vec![
            FileEntry {
                path: "/etc/motd".to_string(),
                content: "welcome\nto this box\n".to_string(),
                permissions: Some("0644".to_string()),
                owner: Some("root:root".to_string()),
                encoding: FileEncoding::Plain,
            },
            FileEntry {
                path: "/etc/blob".to_string(),
                content: "aGVsbG8=".to_string(),
                encoding: FileEncoding::B64,
                ..Default::default()
            },
        ],
        runcmd: vec![
            "echo hello".to_string(),
            r#"["systemctl","restart","nginx"]"#.to_string(),
        ],
        bootcmd: vec!["cloud-init-per once mymkfs mkfs /dev/vdb".to_string()],
        hostname: "web01".to_string(),
        manage_etc_hosts: true,
        network: Network::V1(vec![Interface {
            name: "eth0".to_string(),
            kind: InterfaceKind::Physical,
            mac_address: None,
            subnets: vec![Subnet {
                kind: SubnetKind::Dhcp,
                address: None,
                netmask: None,
                gateway: None,
                dns_nameservers: vec![],
                routes: vec![],
            }],
        }
        .into()]),
        ssh_pwauth: false,
        global_ssh_keys: vec!["ssh-rsa BBBB global@host".to_string()],
    }
}

#[test]
fn round_trip_is_byte_stable() -> Result<()> {
    let first = emit::render(&rich_state());
    let reparsed = import::parse(&first)?;
    let second = emit::render(&reparsed);

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn v2_network_round_trip_stabilizes() -> Result<()> {
    let state = AppState {
        network: Network::V2("version: 2\nethernets:\n  eth0:\n    dhcp4: true".to_string()),
        ..Default::default()
    };

    // the first cycle may re-flatten the blob text
    let first = emit::render(&state);
    let second = emit::render(&import::parse(&first)?);
    // after that it must not move anymore
    let third = emit::render(&import::parse(&second)?);

    assert_eq!(second, third);

    Ok(())
}

#[test]
fn elided_keys_reparse_to_defaults() -> Result<()> {
    // a model with a single field set emits a single key, everything the
    // output omits must come back as its documented default
    let text = emit::render(&AppState {
        hostname: "web01".to_string(),
        ..Default::default()
    });
    let state = import::parse(&text)?;

    assert_eq!(
        state,
        AppState {
            hostname: "web01".to_string(),
            ..Default::default()
        }
    );

    Ok(())
}

#[test]
fn empty_scaffold_is_comments_only() {
    // the scaffold intentionally carries no data, importing it is rejected
    // the same way any other dataless text is
    let text = emit::render(&AppState::default());
    assert!(import::parse(&text).is_err());
}

#[test]
fn cmd_new_prints_scaffold() -> Result<()> {
    assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .args(["new"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n\n{}\n",
            crate::DOC_MARKER,
            crate::DOC_PLACEHOLDER
        ));

    Ok(())
}

#[test]
fn cmd_fmt_normalizes_documents() -> Result<()> {
    // hand-written, unordered, with shorthand forms
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        "packages: [vim]\nhostname: web01\nusers:\n  - name: a\n    groups: \"adm,wheel\"\n"
    )?;

    let output = assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .arg("fmt")
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output)?;
    assert!(text.starts_with(crate::DOC_MARKER));
    // keys come back in document order, hostname before users before packages
    let hostname = text.find("hostname:").unwrap();
    let users = text.find("users:").unwrap();
    let packages = text.find("packages:").unwrap();
    assert!(hostname < users && users < packages);

    // and the result is a fixpoint
    let mut second = tempfile::NamedTempFile::new()?;
    second.write_all(text.as_bytes())?;

    assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .arg("fmt")
        .arg(second.path())
        .assert()
        .success()
        .stdout(text);

    Ok(())
}

#[test]
fn cmd_fmt_write_rewrites_in_place() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "hostname: web01")?;

    assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .arg("fmt")
        .arg("--write")
        .arg(file.path())
        .assert()
        .success();

    let rewritten = std::fs::read_to_string(file.path())?;
    assert_eq!(
        rewritten,
        format!("{}\nhostname: web01\n", crate::DOC_MARKER)
    );

    Ok(())
}

#[test]
fn cmd_validate_reports_schema_violations() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "users: \"bob\"")?;

    let assert = assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone())?;
    assert!(stderr.contains("'users' must be a list."));

    Ok(())
}

#[test]
fn cmd_hash_matches_known_vector() -> Result<()> {
    assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .args(["hash", "--salt", "saltstring", "Hello world!"])
        .assert()
        .success()
        .stdout("$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1\n");

    Ok(())
}

#[test]
fn cmd_completion_emits_a_script() -> Result<()> {
    // stdout is captured here, not a terminal, so the script is written out
    let output = assert_cmd::Command::cargo_bin(env!("CARGO_BIN_NAME"))?
        .args(["completion", "bash"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let script = String::from_utf8(output)?;
    assert!(script.contains(crate::APP_NAME));

    Ok(())
}

#[test]
fn session_models_the_editing_loop() -> Result<()> {
    let mut session = Session::default();

    // the user fills in a panel, the text follows
    session.replace(AppState {
        packages: vec!["htop".to_string()],
        ..Default::default()
    });
    assert!(session.output().contains("- htop"));

    // the user hand-edits the text and loads it back
    let edited = format!("{}\npackage_update: true\n", session.output());
    session.load(&edited)?;
    assert!(session.state().package_update);
    assert_eq!(session.state().packages, vec!["htop".to_string()]);

    Ok(())
}
