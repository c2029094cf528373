//! Integration test: load analyzer definition fixtures from disk and
//! validate candidate configurations against them.

use cortex_schema::{
    AnalyzerDefinition, AnalyzerRecord, ConfigSchemaValidator, DefinitionError, FieldType,
    RecordError, ValidationError,
};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("fixture candidate must be an object")
}

#[test]
fn test_load_json_definition() {
    let def = AnalyzerDefinition::from_file(&fixture("virustotal.json")).unwrap();
    assert_eq!(def.id().as_str(), "VirusTotal_GetReport_3_0");
    assert_eq!(def.base_config.as_deref(), Some("VirusTotal"));
    assert!(def.can_process("hash"));
    assert!(!def.can_process("mail"));

    let schema = def.schema();
    let names: Vec<&str> = schema.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["key", "polling_interval", "download_sample", "proxy_hosts"]);
    assert!(schema.get("proxy_hosts").unwrap().is_multi());
}

#[test]
fn test_load_yaml_definition() {
    let def = AnalyzerDefinition::from_file(&fixture("passive_dns.yaml")).unwrap();
    assert_eq!(def.id().as_str(), "CIRCLPassiveDNS_2_0");
    let record_types = def.schema().get("record_types").cloned().unwrap();
    assert_eq!(record_types.field_type, FieldType::String);
    assert_eq!(record_types.default_value, Some(json!(["A", "AAAA"])));
}

#[test]
fn test_duplicate_items_fixture_rejected() {
    let err = AnalyzerDefinition::from_file(&fixture("duplicate_items.json")).unwrap_err();
    assert!(
        matches!(err, DefinitionError::Schema(_)),
        "expected Schema error, got: {err}"
    );
}

#[test]
fn test_nameless_yaml_rejected() {
    let err = AnalyzerDefinition::from_file(&fixture("nameless.yml")).unwrap_err();
    match err {
        DefinitionError::Load { path, .. } => assert!(path.ends_with("nameless.yml")),
        other => panic!("expected Load error, got: {other}"),
    }
}

#[test]
fn test_valid_configuration_is_normalized() {
    let def = AnalyzerDefinition::from_file(&fixture("virustotal.json")).unwrap();
    let config = def
        .validate_configuration(&obj(json!({
            "key": "0123456789abcdef",
            "download_sample": true,
            "comment": "ignored"
        })))
        .unwrap();
    assert_eq!(
        Value::Object(config),
        json!({
            "key": "0123456789abcdef",
            "polling_interval": 60,
            "download_sample": true,
            "proxy_hosts": []
        })
    );
}

#[test]
fn test_invalid_configuration_reports_every_problem() {
    let def = AnalyzerDefinition::from_file(&fixture("virustotal.json")).unwrap();
    let errors = def
        .validate_configuration(&obj(json!({
            "polling_interval": "60",
            "download_sample": "yes",
            "proxy_hosts": ["http://a:3128", 3128, false]
        })))
        .unwrap_err();

    let fields: Vec<&str> = errors.errors().iter().map(|e| e.field()).collect();
    assert_eq!(
        fields,
        ["key", "polling_interval", "download_sample", "proxy_hosts[]", "proxy_hosts[]"]
    );
    assert_eq!(
        errors.errors()[0],
        ValidationError::MissingRequired {
            field: "key".into()
        }
    );
}

#[test]
fn test_yaml_default_for_multi_field() {
    let def = AnalyzerDefinition::from_file(&fixture("passive_dns.yaml")).unwrap();
    let validator = ConfigSchemaValidator::new(def.schema());
    let config = validator
        .validate(&obj(json!({"user": "u", "password": "p"})))
        .unwrap();
    assert_eq!(config["record_types"], json!(["A", "AAAA"]));

    let config = validator
        .validate(&obj(json!({"user": "u", "password": "p", "record_types": ["MX"]})))
        .unwrap();
    assert_eq!(config["record_types"], json!(["MX"]));
}

#[test]
fn test_configured_record_round_trip() {
    let def = AnalyzerDefinition::from_file(&fixture("virustotal.json")).unwrap();
    let record = AnalyzerRecord::configure(&def, "VirusTotal", &obj(json!({"key": "k"}))).unwrap();
    let stored = serde_json::to_string(&record).unwrap();
    let loaded: AnalyzerRecord = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, record);

    // A stored configuration validates again unchanged.
    let again = loaded.revalidate(&def).unwrap().unwrap();
    assert_eq!(again, loaded.configuration_object().unwrap());
}

#[test]
fn test_configured_record_rejection() {
    let def = AnalyzerDefinition::from_file(&fixture("passive_dns.yaml")).unwrap();
    let err = AnalyzerRecord::configure(&def, "pdns", &Map::new()).unwrap_err();
    match err {
        RecordError::Invalid(errors) => assert_eq!(errors.len(), 2),
        other => panic!("expected Invalid, got: {other}"),
    }
}

#[test]
fn test_validator_is_shareable_across_threads() {
    let def = AnalyzerDefinition::from_file(&fixture("virustotal.json")).unwrap();
    let validator = std::sync::Arc::new(ConfigSchemaValidator::new(def.schema()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validator = validator.clone();
            std::thread::spawn(move || {
                let candidate = obj(json!({"key": format!("key-{i}")}));
                validator.validate(&candidate).map(|c| c["key"].clone())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let key = handle.join().unwrap().unwrap();
        assert_eq!(key, json!(format!("key-{i}")));
    }
}
