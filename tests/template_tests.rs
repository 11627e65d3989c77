use fleetcfg::template::{render_file, substitute, TemplateContext, TemplateError};
use std::path::PathBuf;

fn templates_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

#[test]
fn test_render_shipped_interprocess_template() {
    let mut values = TemplateContext::new();
    values.set("platform", "usv");
    let text = render_file(templates_dir().join("_interprocess.pb.cfg.in"), &values).unwrap();
    assert_eq!(text, "interprocess {\n    platform: \"usv\"\n}\n");
}

#[test]
fn test_shipped_link_template_requires_all_values() {
    let mut values = TemplateContext::new();
    values.set("modem_id", 258);
    let err = render_file(templates_dir().join("_link_acomms.pb.cfg.in"), &values).unwrap_err();
    assert!(matches!(err, TemplateError::MissingValue { name } if name == "subnet_mask"));
}

#[test]
fn test_missing_template_file_reports_the_path() {
    let err = render_file(templates_dir().join("no_such.pb.cfg.in"), &TemplateContext::new())
        .unwrap_err();
    match err {
        TemplateError::Io { path, .. } => assert!(path.ends_with("no_such.pb.cfg.in")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_numeric_values_render_through_display() {
    let mut values = TemplateContext::new();
    values.set("modem_id", 258).set("subnet_mask", 0xFF00);
    assert_eq!(
        substitute("modem_id: $modem_id subnet_mask: $subnet_mask", &values).unwrap(),
        "modem_id: 258 subnet_mask: 65280"
    );
}

#[test]
fn test_block_values_substitute_verbatim() {
    let mut values = TemplateContext::new();
    values.set(
        "mac_slots",
        "slot { src: 258 slot_seconds: 10 max_frame_bytes: 128 }\n",
    );
    let rendered = substitute("mac {\n$mac_slots}\n", &values).unwrap();
    assert_eq!(
        rendered,
        "mac {\nslot { src: 258 slot_seconds: 10 max_frame_bytes: 128 }\n}\n"
    );
}
