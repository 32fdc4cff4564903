use circlefractal_core::RenderParameters;

#[test]
fn parameters_roundtrip_through_json() {
    let original = RenderParameters::new(700, 500, 1000, 2, 0.0, 440.0, true).unwrap();

    let json = serde_json::to_string(&original).unwrap();
    assert!(json.contains(r#""number_of_iterations":1000"#));

    let restored: RenderParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn invalid_document_is_rejected() {
    let json = r#"{
        "width": 10,
        "height": 10,
        "number_of_iterations": 5,
        "division_factor": 1,
        "cut_off": 0.0,
        "maximum_distance": 20.0,
        "is_parallelized": false
    }"#;

    let err = serde_json::from_str::<RenderParameters>(json).unwrap_err();
    assert!(err.to_string().contains("divisionFactor"));
}

#[test]
fn maximum_distance_below_cut_off_band_is_rejected() {
    let json = r#"{
        "width": 10,
        "height": 10,
        "number_of_iterations": 5,
        "division_factor": 2,
        "cut_off": 0.01,
        "maximum_distance": 0.5,
        "is_parallelized": true
    }"#;

    assert!(serde_json::from_str::<RenderParameters>(json).is_err());
}
