use fuzzy_mamdani::{is, EmptySetPolicy, FuzzyError, Inputs, ModelConfig, Shape, UniverseRange, VariableConfig};

const MODEL: &str = r#"{
    "inputs": [
        {
            "name": "service",
            "universe": { "start": 0.0, "stop": 11.0, "step": 1.0 },
            "terms": [
                { "name": "poor", "shape": { "kind": "triangular", "a": 0.0, "b": 0.0, "c": 5.0 } },
                { "name": "good", "shape": { "kind": "trapezoidal", "a": 5.0, "b": 8.0, "c": 10.0, "d": 10.0 } }
            ]
        }
    ],
    "output": {
        "name": "tip",
        "universe": { "start": 0.0, "stop": 26.0, "step": 1.0 },
        "terms": [
            { "name": "low", "shape": { "kind": "triangular", "a": 0.0, "b": 0.0, "c": 13.0 } },
            { "name": "high", "shape": { "kind": "triangular", "a": 13.0, "b": 25.0, "c": 25.0 } }
        ]
    },
    "rules": [
        { "antecedent": { "is": { "variable": "service", "term": "poor" } }, "consequent": "low" },
        {
            "antecedent": { "or": [
                { "is": { "variable": "service", "term": "good" } },
                { "and": [] }
            ] },
            "consequent": "high"
        }
    ],
    "empty_set_policy": "universe_mean"
}"#;

#[test]
fn test_deserialize_model() {
    let config: ModelConfig = serde_json::from_str(MODEL).unwrap();

    assert_eq!(config.inputs.len(), 1);
    assert_eq!(config.inputs[0].terms[1].shape, Shape::trapezoidal(5., 8., 10., 10.));
    assert_eq!(config.output.universe, UniverseRange::new(0., 26., 1.));
    assert_eq!(config.rules.len(), 2);
    assert_eq!(config.empty_set_policy, EmptySetPolicy::UniverseMean);

    let session = config.build().unwrap();
    // An empty AND is always true, so "high" fires fully
    let outputs = session.infer(&Inputs::new().with("service", 0.)).unwrap();

    assert_eq!(outputs.activation("low"), Some(1.));
    assert_eq!(outputs.activation("high"), Some(1.));
}

#[test]
fn test_round_trip_builder() {
    let config = ModelConfig::new(
        VariableConfig::new("tip", UniverseRange::new(0., 26., 1.)).term("low", Shape::triangular(0., 0., 13.)),
    )
    .input(VariableConfig::new("service", UniverseRange::new(0., 11., 1.)).term("poor", Shape::triangular(0., 0., 5.)))
    .rule(is("service", "poor"), "low");

    let json = serde_json::to_string(&config).unwrap();
    let back: ModelConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
    assert_eq!(back.empty_set_policy, EmptySetPolicy::Fail);
}

#[test]
fn test_defaults_and_validation() {
    let json = r#"{
        "inputs": [],
        "output": { "name": "tip", "universe": { "start": 0.0, "stop": 26.0, "step": 0.0 } }
    }"#;
    let config: ModelConfig = serde_json::from_str(json).unwrap();

    assert!(config.rules.is_empty());
    assert!(config.output.terms.is_empty());
    assert!(matches!(config.build(), Err(FuzzyError::InvalidRange(_))));
}
