use super::{read_part, IntegrationHarness};
use resumegen::render::SectionKind;
use resumegen::{generate, RenderVariant};
use serde_json::json;

#[test]
fn compact_run_writes_one_versioned_document() {
    let harness = IntegrationHarness::with_sample_records();
    let generated = generate(&harness.options(RenderVariant::Compact)).expect("generation failed");

    assert_eq!(
        harness.generated_files(),
        vec![harness.output_dir().join("Grace_Hopper_Resume_1.docx")]
    );
    assert_eq!(generated.output.version, 1);
    assert!(generated.output.size_bytes > 0);

    let kinds: Vec<SectionKind> = generated.outline.iter().map(|entry| entry.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Header,
            SectionKind::Summary,
            SectionKind::Skills,
            SectionKind::Experience,
            SectionKind::EarlierCareer,
            SectionKind::Education,
            SectionKind::Certifications,
        ]
    );
}

#[test]
fn headings_come_from_section_labels() {
    let harness = IntegrationHarness::with_sample_records();
    let generated = generate(&harness.options(RenderVariant::Compact)).expect("generation failed");

    let headings: Vec<&str> = generated
        .outline
        .iter()
        .filter_map(|entry| entry.heading.as_deref())
        .collect();
    assert_eq!(
        headings,
        vec![
            "PROFESSIONAL SUMMARY",
            "KEY SKILLS",
            "PROFESSIONAL EXPERIENCE",
            "EARLIER CAREER",
            "EDUCATION",
            "CERTIFICATIONS",
        ]
    );

    let body = read_part(&generated.output.path, "word/document.xml");
    for heading in headings {
        assert_eq!(body.matches(heading).count(), 1, "heading {heading}");
    }
}

#[test]
fn every_body_string_appears_exactly_once() {
    let harness = IntegrationHarness::with_sample_records();
    let generated = generate(&harness.options(RenderVariant::Compact)).expect("generation failed");
    let body = read_part(&generated.output.path, "word/document.xml");

    for expected in [
        "Compiler pioneer with decades of systems experience.",
        "COBOL, FLOW-MATIC",
        "Standards committees",
        "Senior Mathematician",
        "1949 - 1952",
        "Built the first working compiler",
        "Led the UNIVAC programming team",
        "Harvard Computation Lab",
        "Programmed the Mark I during wartime service.",
        "PhD Mathematics",
        "Yale University",
        "Naval Reserve Officer",
        "Computer Sciences Man of the Year",
        "Distinguished Service Medal",
    ] {
        assert_eq!(body.matches(expected).count(), 1, "body text {expected}");
    }
    assert!(!body.contains("Naval Reserve Officer | Computer"));
}

#[test]
fn contact_details_land_in_the_first_page_header() {
    let harness = IntegrationHarness::with_sample_records();
    let generated = generate(&harness.options(RenderVariant::Compact)).expect("generation failed");

    let header = read_part(&generated.output.path, "word/header1.xml");
    assert!(header.contains("GRACE HOPPER"));
    assert!(header.contains("grace@example.org"));
    assert!(header.contains("555-0100"));
    assert!(header.contains("Arlington, VA"));
    assert!(header.contains("<w:tbl>"));

    let rels = read_part(&generated.output.path, "word/_rels/header1.xml.rels");
    assert!(rels.contains("mailto:grace@example.org"));
    assert!(rels.contains("https://github.com/grace"));

    let body = read_part(&generated.output.path, "word/document.xml");
    assert!(body.contains("<w:titlePg/>"));
    assert!(!body.contains("grace@example.org"));
}

#[test]
fn classic_header_uses_centered_paragraphs() {
    let harness = IntegrationHarness::with_sample_records();
    let generated = generate(&harness.options(RenderVariant::Classic)).expect("generation failed");

    let header = read_part(&generated.output.path, "word/header1.xml");
    assert!(!header.contains("<w:tbl>"));
    assert!(header.contains("Grace Hopper"));
    assert!(header.contains(r#"<w:jc w:val="center"/>"#));
}

#[test]
fn consecutive_runs_increment_the_version() {
    let harness = IntegrationHarness::with_sample_records();
    let options = harness.options(RenderVariant::Compact);

    let first = generate(&options).expect("first run failed");
    let second = generate(&options).expect("second run failed");

    assert_eq!(first.output.version, 1);
    assert_eq!(second.output.version, 2);
    assert!(second.output.path.ends_with("Grace_Hopper_Resume_2.docx"));
    assert_eq!(harness.generated_files().len(), 2);
    assert!(first.output.path.exists());
}

#[test]
fn flat_history_without_earlier_career_omits_that_section() {
    let harness = IntegrationHarness::with_sample_records();
    harness.write_record(
        "experience",
        &json!({
            "roles": [
                {
                    "title": "Rear Admiral",
                    "company": "US Navy",
                    "location": "Washington, DC",
                    "date": "1983 - 1986",
                    "bullets": ["Standardized Navy programming languages"]
                }
            ]
        }),
    );

    let generated = generate(&harness.options(RenderVariant::Banner)).expect("generation failed");
    assert!(!generated
        .outline
        .iter()
        .any(|entry| entry.kind == SectionKind::EarlierCareer));

    let body = read_part(&generated.output.path, "word/document.xml");
    assert!(!body.contains("EARLIER CAREER"));
    assert_eq!(body.matches("US Navy | Washington, DC").count(), 1);
    assert_eq!(
        body.matches("Standardized Navy programming languages").count(),
        1
    );
}
