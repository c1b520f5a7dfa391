use crate::fixtures::*;
use litmock::shape::validate;
use litmock::{ApiShape, MockShape};

#[test]
fn test_mock_shape_lists_methods_and_properties() {
    let shape = MockShape::of::<dyn UserRepository>();
    assert_eq!(shape.type_name, "UserRepository");

    let methods: Vec<&str> = shape.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, ["get_by_id", "save_async", "get_all_async", "delete"]);
    assert_eq!(shape.properties.len(), 1);
    assert_eq!(shape.properties[0].name, "count");
    assert_eq!(shape.methods[0].parameters[0].name, "id");
    assert_eq!(shape.methods[0].parameters[0].ty, "i32");
    assert_eq!(shape.methods[3].return_type, "()");
}

#[test]
fn test_static_shape_comes_from_described_table() {
    let shape = MockShape::of_static::<Clock>();
    assert_eq!(shape.type_name, "Clock");
    assert_eq!(shape.methods.len(), 2);
    assert_eq!(shape.properties.len(), 1);
}

#[test]
fn test_validation_against_declared_api() {
    let shape = MockShape::of::<dyn ExternalApi>();
    let api = ApiShape::from_json(
        r#"{"methods": ["fetch_data", "health_check", "open_session"], "properties": []}"#,
    )
    .unwrap();
    assert!(validate(&shape, &api).is_valid);

    let drifted = ApiShape::from_json(r#"{"methods": ["fetch_data"]}"#).unwrap();
    let result = validate(&shape, &drifted);
    assert!(!result.is_valid);
    assert_eq!(result.mismatches.len(), 2);
    assert!(result
        .mismatches
        .contains(&"Method health_check exists in mock but not in API".to_string()));
}
