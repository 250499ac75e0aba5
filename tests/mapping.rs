mod common;

use sheet2sql::{
    data::CellValue,
    error::ImportError,
    mapping::{DEFAULT_HEADER_ROW, MappingSpec},
};

use common::TestWorkspace;

fn configuration_message(result: Result<MappingSpec, ImportError>) -> String {
    match result {
        Err(ImportError::Configuration(message)) => message,
        other => panic!("Expected configuration error, got {other:?}"),
    }
}

#[test]
fn columns_keep_declaration_order() {
    let mapping = MappingSpec::from_json_str(
        r#"{"columns": {
            "zeta": {"sources": ["Z"]},
            "alpha": {"sources": ["A"]},
            "mid": {"sources": ["M"]}
        }}"#,
    )
    .unwrap();
    assert_eq!(mapping.output_columns(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn field_names_are_case_insensitive() {
    let mapping = MappingSpec::from_json_str(
        r#"{"HEADERROW": 2, "Columns": {"Name": {"Sources": ["First"], "DEFAULT": "anon"}}}"#,
    )
    .unwrap();
    assert_eq!(mapping.header_row(), 2);
    let column = &mapping.columns()["Name"];
    assert_eq!(column.sources, vec!["First".to_string()]);
    assert_eq!(column.default, Some(CellValue::from("anon")));
}

#[test]
fn missing_or_empty_columns_are_rejected() {
    let message = configuration_message(MappingSpec::from_json_str(r#"{"header_row": 1}"#));
    assert!(message.contains("columns"));

    let message = configuration_message(MappingSpec::from_json_str(r#"{"columns": {}}"#));
    assert!(message.contains("columns"));
}

#[test]
fn missing_sources_are_rejected() {
    let message = configuration_message(MappingSpec::from_json_str(
        r#"{"columns": {"ok": {"sources": ["A"]}, "broken": {"default": "x"}}}"#,
    ));
    assert!(message.contains("'broken'"));

    let message =
        configuration_message(MappingSpec::from_json_str(r#"{"columns": {"nul": null}}"#));
    assert!(message.contains("'nul'"));

    let message = configuration_message(MappingSpec::from_json_str(
        r#"{"columns": {"nul": {"sources": null}}}"#,
    ));
    assert!(message.contains("sources"));
}

#[test]
fn empty_sources_list_is_allowed() {
    let mapping = MappingSpec::from_json_str(
        r#"{"columns": {"constant": {"sources": [], "default": "fixed"}}}"#,
    )
    .unwrap();
    assert!(mapping.columns()["constant"].sources.is_empty());
}

#[test]
fn header_row_must_be_positive_integer() {
    let message = configuration_message(MappingSpec::from_json_str(
        r#"{"header_row": 0, "columns": {"a": {"sources": ["A"]}}}"#,
    ));
    assert!(message.contains("1 or greater"));

    configuration_message(MappingSpec::from_json_str(
        r#"{"header_row": -4, "columns": {"a": {"sources": ["A"]}}}"#,
    ));
    configuration_message(MappingSpec::from_json_str(
        r#"{"header_row": "two", "columns": {"a": {"sources": ["A"]}}}"#,
    ));
}

#[test]
fn structurally_invalid_payloads_are_rejected() {
    configuration_message(MappingSpec::from_json_str("{not json"));
    configuration_message(MappingSpec::from_json_str("[1, 2, 3]"));
    configuration_message(MappingSpec::from_json_str(
        r#"{"columns": {"a": {"sources": "A"}}}"#,
    ));
}

#[test]
fn yaml_mapping_matches_json() {
    let yaml = MappingSpec::from_yaml_str(
        "headerRow: 2\ncolumns:\n  name:\n    sources: [First, Name]\n  status:\n    sources: [Status]\n    default: unknown\n",
    )
    .unwrap();
    let json = MappingSpec::from_json_str(
        r#"{"header_row": 2, "columns": {
            "name": {"sources": ["First", "Name"]},
            "status": {"sources": ["Status"], "default": "unknown"}
        }}"#,
    )
    .unwrap();
    assert_eq!(yaml, json);
}

#[test]
fn load_selects_format_by_extension() {
    let workspace = TestWorkspace::new();
    let json = workspace.write("map.json", r#"{"columns": {"id": {"sources": ["Id"]}}}"#);
    let yaml = workspace.write("map.YML", "columns:\n  id:\n    sources: [Id]\n");

    let from_json = MappingSpec::load(&json).unwrap();
    let from_yaml = MappingSpec::load(&yaml).unwrap();
    assert_eq!(from_json, from_yaml);
    assert_eq!(from_json.header_row(), DEFAULT_HEADER_ROW);
}

#[test]
fn unreadable_mapping_file_is_configuration_error() {
    let workspace = TestWorkspace::new();
    let message = configuration_message(MappingSpec::load(&workspace.join("absent.json")));
    assert!(message.contains("absent.json"));
}
