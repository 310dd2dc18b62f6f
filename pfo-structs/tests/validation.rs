use pfo_challenges::knapsack::{Challenge, Item};
use pfo_structs::{api::OptimizeReq, error::FieldError, validation::validate};
use serde_json::{from_value, json, Value};

fn request(value: Value) -> OptimizeReq {
    from_value(value).unwrap()
}

fn error_message(value: Value) -> String {
    validate(&request(value)).unwrap_err().to_string()
}

#[test]
fn test_valid_request() {
    let challenge = validate(&request(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
    })))
    .unwrap();

    assert_eq!(challenge, Challenge::new(1000, vec![Item::new("A", 100, 50)]));
}

#[test]
fn test_missing_capacity() {
    let msg = error_message(json!({
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
    }));
    assert!(msg.contains("capacidad"), "{}", msg);
}

#[test]
fn test_missing_objects() {
    let err = validate(&request(json!({"capacidad": 1000}))).unwrap_err();
    assert_eq!(
        err,
        FieldError::Missing {
            field: "objetos",
            item: None
        }
    );
    assert!(err.to_string().contains("objetos"));
}

#[test]
fn test_negative_and_zero_capacity() {
    for capacidad in [json!(-100), json!(0), json!(0.0), json!(-0.5)] {
        let msg = error_message(json!({
            "capacidad": capacidad,
            "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
        }));
        assert!(msg.contains("capacidad"), "{}", msg);
        assert!(msg.contains("positive"), "{}", msg);
    }
}

#[test]
fn test_non_numeric_capacity() {
    for capacidad in [json!("1000"), json!(true), json!(null), json!([1000])] {
        let err = validate(&request(json!({
            "capacidad": capacidad,
            "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
        })))
        .unwrap_err();
        assert_eq!(err.field(), "capacidad");
    }
}

#[test]
fn test_fractional_capacity_is_truncated() {
    let challenge = validate(&request(json!({
        "capacidad": 1000.9,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
    })))
    .unwrap();
    assert_eq!(challenge.capacity, 1000);

    let challenge = validate(&request(json!({
        "capacidad": 0.5,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
    })))
    .unwrap();
    assert_eq!(challenge.capacity, 0);
}

#[test]
fn test_huge_capacity_saturates() {
    let challenge = validate(&request(json!({
        "capacidad": 1e30,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 50}]
    })))
    .unwrap();
    assert_eq!(challenge.capacity, u64::MAX);
}

#[test]
fn test_empty_objects() {
    let msg = error_message(json!({"capacidad": 1000, "objetos": []}));
    assert_eq!(msg, "Field 'objetos' must be a non-empty list");
}

#[test]
fn test_objects_not_a_list() {
    let msg = error_message(json!({"capacidad": 1000, "objetos": {"nombre": "A"}}));
    assert!(msg.contains("objetos"), "{}", msg);
}

#[test]
fn test_object_not_a_map() {
    let err = validate(&request(json!({"capacidad": 1000, "objetos": [42]}))).unwrap_err();
    assert_eq!(err, FieldError::NotAnObject { item: 0 });
}

#[test]
fn test_object_missing_fields() {
    for (object, field) in [
        (json!({"peso": 100, "ganancia": 50}), "nombre"),
        (json!({"nombre": "A", "ganancia": 50}), "peso"),
        (json!({"nombre": "A", "peso": 100}), "ganancia"),
    ] {
        let err = validate(&request(json!({"capacidad": 1000, "objetos": [object]}))).unwrap_err();
        assert_eq!(
            err,
            FieldError::Missing {
                field,
                item: Some(0)
            }
        );
        assert!(err.to_string().contains(field));
    }
}

#[test]
fn test_invalid_name() {
    for nombre in [json!(""), json!(7), json!(null)] {
        let err = validate(&request(json!({
            "capacidad": 1000,
            "objetos": [{"nombre": nombre, "peso": 100, "ganancia": 50}]
        })))
        .unwrap_err();
        assert_eq!(err.field(), "nombre");
    }
}

#[test]
fn test_negative_weight() {
    let msg = error_message(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": -100, "ganancia": 50}]
    }));
    assert_eq!(msg, "Field 'peso' of item 0 must be a positive number");
}

#[test]
fn test_zero_weight() {
    for peso in [json!(0), json!(0.0)] {
        let msg = error_message(json!({
            "capacidad": 1000,
            "objetos": [{"nombre": "A", "peso": peso, "ganancia": 50}]
        }));
        assert!(msg.contains("positive"), "{}", msg);
    }
}

#[test]
fn test_negative_gain() {
    let msg = error_message(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": -50}]
    }));
    assert_eq!(msg, "Field 'ganancia' of item 0 must be a non-negative number");
}

#[test]
fn test_zero_gain_is_allowed() {
    let challenge = validate(&request(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 0}]
    })))
    .unwrap();
    assert_eq!(challenge.items[0].gain, 0);
}

#[test]
fn test_whole_floats_are_accepted() {
    let challenge = validate(&request(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 100.0, "ganancia": 50.0}]
    })))
    .unwrap();
    assert_eq!(challenge.items, vec![Item::new("A", 100, 50)]);
}

#[test]
fn test_fractional_values_are_rejected() {
    let msg = error_message(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 100.5, "ganancia": 50}]
    }));
    assert_eq!(msg, "Field 'peso' of item 0 must be a whole number");

    let msg = error_message(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 100, "ganancia": 0.25}]
    }));
    assert_eq!(msg, "Field 'ganancia' of item 0 must be a whole number");
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let err = validate(&request(json!({
        "capacidad": 1000,
        "objetos": [{"nombre": "A", "peso": 1e20, "ganancia": 50}]
    })))
    .unwrap_err();
    assert_eq!(err.field(), "peso");
    assert!(err.to_string().contains("at most"));
}

#[test]
fn test_reports_first_bad_item() {
    let msg = error_message(json!({
        "capacidad": 1000,
        "objetos": [
            {"nombre": "A", "peso": 100, "ganancia": 50},
            {"nombre": "B", "peso": "heavy", "ganancia": 50},
            {"nombre": "C", "peso": -1, "ganancia": 50}
        ]
    }));
    assert_eq!(msg, "Field 'peso' of item 1 must be a positive number");
}

#[test]
fn test_method_matches_function() {
    let req = request(json!({
        "capacidad": 10,
        "objetos": [{"nombre": "A", "peso": 1, "ganancia": 1}]
    }));
    assert_eq!(req.validate(), validate(&req));
}
