//! End-to-end tests for `#[derive(Configurable)]` driven through the public
//! `Configurator` API.

use std::collections::HashMap;
use std::io::Write;

use configurator::{Configurable, Configurator, FieldKind};

#[derive(Debug, Default, Configurable)]
struct Server {
    #[configurator(default = "localhost", file = "host", env = "HOST")]
    host: String,
    #[configurator(default = 8080, file = "port", env = "PORT")]
    port: i64,
    #[configurator(default = true, json = "tls", env = "TLS")]
    tls: bool,
    #[configurator(nested, file = "limits")]
    limits: Limits,
    #[configurator(skip)]
    cache: Vec<String>,
    #[configurator(default = "1.5", file = "ratio")]
    ratio: f64,
    #[configurator(file = "type")]
    r#type: String,
}

#[derive(Debug, Default, Configurable)]
struct Limits {
    #[configurator(default = "16", file = "max-conn", env = "MAX_CONN")]
    max_conn: i64,
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn configurator(pairs: &[(&str, &str)]) -> Configurator {
    Configurator::builder()
        .env_prefix("APP_")
        .env_source(env(pairs))
        .build()
}

#[test]
fn derive_lists_fields_in_declaration_order() {
    let mut server = Server::default();
    let names: Vec<_> = server
        .fields()
        .iter()
        .map(|f| (f.descriptor.name, f.kind()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("host", FieldKind::Str),
            ("port", FieldKind::Int),
            ("tls", FieldKind::Bool),
            ("limits", FieldKind::Nested),
            ("ratio", FieldKind::Unsupported),
            ("type", FieldKind::Str),
        ]
    );
}

#[test]
fn derive_carries_metadata() {
    let mut server = Server::default();
    let fields = server.fields();
    assert_eq!(fields[1].descriptor.default, "8080");
    assert_eq!(fields[1].descriptor.env, "PORT");
    assert_eq!(fields[2].descriptor.file_key, "tls");
    assert_eq!(fields[5].descriptor.json_key(), "type");
}

#[test]
fn defaults_only() {
    let mut server = Server::default();
    configurator(&[]).initialize_from(&mut server, ["app"]);
    assert_eq!(server.host, "localhost");
    assert_eq!(server.port, 8080);
    assert!(server.tls);
    assert_eq!(server.limits.max_conn, 16);
    assert_eq!(server.ratio, 0.0);
    assert!(server.cache.is_empty());
}

#[test]
fn every_layer_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{"host": "file-host", "port": 1, "limits": {{"max-conn": 2}}, "type": "edge"}}"#
    )
    .unwrap();

    let location = path.to_str().unwrap();
    let mut c = configurator(&[
        ("APP_CONFIG", location),
        ("APP_PORT", "2"),
        ("APP_MAX_CONN", "3"),
    ]);
    let mut server = Server::default();
    c.initialize_from(&mut server, ["app", "--max-conn", "4", "--tls=false", "serve"]);

    assert_eq!(server.host, "file-host");
    assert_eq!(server.port, 2);
    assert_eq!(server.limits.max_conn, 4);
    assert!(!server.tls);
    assert_eq!(server.r#type, "edge");
    assert_eq!(c.args(), ["serve"]);
}

#[test]
fn skipped_field_is_never_touched() {
    let mut server = Server {
        cache: vec!["keep".into()],
        ..Server::default()
    };
    configurator(&[]).initialize_from(&mut server, ["app"]);
    assert_eq!(server.cache, ["keep"]);
}

#[test]
fn flags_registered_for_env_tagged_fields() {
    let mut c = configurator(&[]);
    let mut server = Server::default();
    c.initialize_from(&mut server, ["app"]);
    let names: Vec<_> = c.flags().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["host", "max-conn", "port", "tls"]);
}
