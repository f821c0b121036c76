use super::IntegrationHarness;
use resumegen::records::{load_records, RecordName};
use resumegen::{generate, RenderVariant, ResumeError};
use serde_json::json;

#[test]
fn missing_record_aborts_before_output_exists() {
    let harness = IntegrationHarness::with_sample_records();
    harness.remove_record("personal-info");

    let err = generate(&harness.options(RenderVariant::Compact)).unwrap_err();
    match err {
        ResumeError::MissingFile { record, .. } => {
            assert_eq!(record, RecordName::PersonalInfo.as_str())
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!harness.output_dir().exists());
}

#[test]
fn malformed_json_names_the_record() {
    let harness = IntegrationHarness::with_sample_records();
    std::fs::write(harness.data_dir().join("skills.json"), "{ \"categories\": [").unwrap();

    let err = generate(&harness.options(RenderVariant::Compact)).unwrap_err();
    assert!(matches!(
        err,
        ResumeError::MalformedData { ref record, .. } if record == "skills"
    ));
    assert!(harness.generated_files().is_empty());
}

#[test]
fn missing_label_is_rejected() {
    let harness = IntegrationHarness::with_sample_records();
    harness.write_record(
        "section-labels",
        &json!({
            "professional_summary": "Summary",
            "key_skills": "Skills",
            "professional_experience": "Experience",
            "earlier_career": "Earlier",
            "education": "Education"
        }),
    );

    let err = load_records(&harness.data_dir()).unwrap_err();
    assert!(matches!(
        err,
        ResumeError::MalformedData { ref record, .. } if record == "section-labels"
    ));
}

#[test]
fn experience_with_both_shapes_is_rejected() {
    let harness = IntegrationHarness::with_sample_records();
    harness.write_record(
        "experience",
        &json!({
            "companies": [],
            "roles": []
        }),
    );

    let err = load_records(&harness.data_dir()).unwrap_err();
    match err {
        ResumeError::MalformedData { record, reason } => {
            assert_eq!(record, "experience");
            assert!(reason.contains("exactly one"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn loading_is_repeatable() {
    let harness = IntegrationHarness::with_sample_records();
    let first = load_records(&harness.data_dir()).unwrap();
    let second = load_records(&harness.data_dir()).unwrap();
    assert_eq!(first, second);
    assert!(first.experience.has_earlier_career());
}
