//! Custom models loaded from JSON payloads, the way profiles and requests
//! supply them.

use custom_model::{merge, ClauseKind, CustomModel, MergeError, ModelError, KEY};

const SERVER_MODEL: &str = r#"{
    "distance_influence": 80,
    "max_speed_fallback": 100,
    "speed_factor": [
        {"if": "road_class == TRACK", "value": 0.5}
    ],
    "max_speed": [
        {"if": "in_school_zone", "value": 30}
    ],
    "priority": [
        {"if": "road_environment == FERRY", "value": 0.2},
        {"else": "", "value": 1}
    ],
    "areas": {
        "school_zone": {
            "type": "Feature",
            "id": "school_zone",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-115.17, 36.12], [-115.16, 36.12], [-115.16, 36.13], [-115.17, 36.12]]]
            }
        }
    }
}"#;

fn request_model(request: &str) -> Result<CustomModel, ModelError> {
    let mut payload: serde_json::Value = serde_json::from_str(request)?;
    CustomModel::from_json_value(payload[KEY].take())
}

#[test]
fn test_load_server_model() {
    let model: CustomModel = CustomModel::from_json_str(SERVER_MODEL).unwrap();
    assert_eq!(model.distance_influence(), 80.0);
    assert_eq!(model.max_speed_fallback(), Some(100.0));
    assert_eq!(model.priority().len(), 2);
    assert_eq!(model.priority()[1].kind(), ClauseKind::Else);

    let zone = model.area("school_zone").unwrap();
    assert_eq!(zone.id(), Some("school_zone"));
    assert_eq!(zone.geometry().points()[0], (36.12, -115.17));
}

#[test]
fn test_merge_request_payload() {
    let base: CustomModel = CustomModel::from_json_str(SERVER_MODEL).unwrap();
    let query = request_model(
        r#"{
            "points": [[-115.17, 36.12], [-115.05, 36.01]],
            "custom_model": {
                "distance_influence": 120,
                "priority": [{"if": "in_construction", "value": 0}],
                "areas": {
                    "construction": {
                        "type": "Feature",
                        "geometry": {"type": "Polygon", "coordinates": [[[-115.1, 36.0], [-115.0, 36.0], [-115.0, 36.1], [-115.1, 36.0]]]}
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let merged = merge(&base, &query).unwrap();
    assert_eq!(merged.distance_influence(), 120.0);
    assert_eq!(merged.max_speed_fallback(), Some(100.0));
    assert_eq!(merged.priority().len(), 3);
    assert_eq!(merged.priority()[2].condition(), "in_construction");
    assert!(merged.area("construction").is_some());
    assert!(merged.area("school_zone").is_some());
}

#[test]
fn test_request_with_missing_model_uses_defaults() {
    let base: CustomModel = CustomModel::from_json_str(SERVER_MODEL).unwrap();
    let query = request_model(r#"{"custom_model": {}}"#).unwrap();
    let merged = merge(&base, &query).unwrap();
    assert_eq!(merged.fingerprint(), base.fingerprint());
}

#[test]
fn test_request_errors_translate_to_messages() {
    let base: CustomModel = CustomModel::from_json_str(SERVER_MODEL).unwrap();
    let query = request_model(
        r#"{"custom_model": {"speed_factor": [{"if": "road_class == MOTORWAY", "value": 1.3}]}}"#,
    )
    .unwrap();

    let err: ModelError = merge(&base, &query).unwrap_err().into();
    assert_eq!(
        err.to_string(),
        "speed_factor factor cannot be larger than 1 but was 1.3"
    );
    assert!(matches!(err, ModelError::Merge(MergeError::FactorTooLarge { .. })));
}

#[test]
fn test_malformed_clause_rejected_on_load() {
    let err = request_model(r#"{"custom_model": {"priority": [{"value": 0.5}]}}"#).unwrap_err();
    assert!(matches!(err, ModelError::Json(_)), "expected json error, got {:?}", err);
}

#[test]
fn test_serialized_model_reloads() {
    let base: CustomModel = CustomModel::from_json_str(SERVER_MODEL).unwrap();
    let json = base.to_json_string().unwrap();
    let reloaded: CustomModel = CustomModel::from_json_str(&json).unwrap();
    assert_eq!(reloaded.fingerprint(), base.fingerprint());
}
