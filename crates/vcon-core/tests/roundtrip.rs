use chrono::{TimeZone, Utc};
use serde_json::{Map, Value, json};
use vcon_core::{
    Analysis, CivicAddress, DerivationMarker, Dialog, DialogRef, Encoding, Party, PartyHistory,
    VCon,
};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn populated_vcon() -> VCon {
    let mut vcon = VCon::build_new();
    vcon.set_subject(Some("Billing question".to_string()));
    vcon.set_meta(Some(object(json!({"source": "pbx-7"}))));
    vcon.set_group(Some(vec![json!({"uuid": "a1b2", "type": "thread"})]));
    vcon.set_appended(Some(DerivationMarker::Details(object(json!({"uuid": "prev"})))));

    let mut customer = Party::new().with_tel("+15551234567").with_role("customer");
    customer.civic_address = Some(CivicAddress {
        country: Some("US".to_string()),
        postcode: Some("12345".to_string()),
        ..Default::default()
    });
    customer.extensions.insert("sip".to_string(), json!("sip:c@example.com"));
    vcon.add_party(customer);
    vcon.add_party(Party::new().with_name("Agent Smith").with_role("agent"));

    let start = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
    let mut recording = Dialog::new("recording", start, vec![0, 1]).unwrap();
    recording
        .add_external_data("https://example.com/call.wav", "call.wav", "audio/x-wav")
        .unwrap();
    recording.duration = Some(93.5);
    recording.party_history = Some(vec![
        PartyHistory::new(0, "join", start),
        PartyHistory::new(1, "join", start),
    ]);
    vcon.add_dialog(recording);

    let mut chat = Dialog::new("text", start, vec![1, 0]).unwrap();
    chat.originator = Some(1);
    chat.add_inline_data_encoded("SGk=", "chat.txt", "text/plain", Encoding::Base64)
        .unwrap();
    chat.extensions.insert("x-priority".to_string(), json!(3));
    vcon.add_dialog(chat);

    vcon.add_attachment("application/pdf", "JVBERi0=", Encoding::Base64);
    vcon.add_analysis(object(json!({
        "type": "transcript",
        "dialog": 0,
        "vendor": "acme-stt",
        "body": "hello ...",
    })))
    .unwrap();
    vcon.push_analysis(Analysis::new(
        "summary",
        DialogRef::Many(vec![0, 1]),
        "acme-llm",
        json!({"text": "Customer asked about billing"}),
    ));
    vcon.add_tag("queue", "billing");
    vcon.add_tag("language", "en");
    vcon
}

#[test]
fn test_round_trip_preserves_everything() {
    let vcon = populated_vcon();
    let restored = VCon::build_from_json(&vcon.to_json().unwrap()).unwrap();

    assert_eq!(restored, vcon);
    assert_eq!(restored.to_json().unwrap(), vcon.to_json().unwrap());
    assert_eq!(restored.dialogs()[0].url(), Some("https://example.com/call.wav"));
    assert_eq!(restored.dialogs()[1].encoding(), Some(&Encoding::Base64));
    assert_eq!(restored.parties()[0].extensions.get("sip"), Some(&json!("sip:c@example.com")));
}

#[test]
fn test_analysis_dialog_variant_on_the_wire() {
    let vcon = populated_vcon();
    let document = vcon.to_value().unwrap();

    assert_eq!(document["analysis"][0]["dialog"], json!(0));
    assert_eq!(document["analysis"][1]["dialog"], json!([0, 1]));

    let restored = VCon::build_from_json(&document.to_string()).unwrap();
    assert_eq!(restored.analysis()[0].dialog, DialogRef::Single(0));
    assert_eq!(restored.analysis()[1].dialog, DialogRef::Many(vec![0, 1]));
}

#[test]
fn test_wire_names_and_null_omission() {
    let vcon = populated_vcon();
    let document = vcon.to_value().unwrap();

    assert!(document.get("dialog").is_some());
    assert!(document.get("dialogs").is_none());
    assert!(document.get("redacted").is_none());
    assert!(document.get("signatures").is_none());
    assert_eq!(document["parties"][0]["civicaddress"]["country"], json!("US"));
    assert!(document["parties"][1].get("tel").is_none());
    assert_eq!(document["dialog"][0]["party_history"][0]["event"], json!("join"));
    assert_eq!(document["attachments"][0]["encoding"], json!("base64"));

    let text = vcon.to_json().unwrap();
    assert!(!text.contains("null"));
}

#[test]
fn test_from_minimal_document() {
    let source = json!({
        "uuid": "0191b6c4-0000-7000-8000-000000000000",
        "created_at": "2024-01-01T00:00:00.1234567Z",
    });
    let vcon = VCon::build_from_json(&source.to_string()).unwrap();

    assert_eq!(vcon.uuid(), "0191b6c4-0000-7000-8000-000000000000");
    assert_eq!(vcon.spec_version(), "1.0");
    assert!(vcon.updated_at().is_none());
    assert!(vcon.parties().is_empty());
    assert!(vcon.dialogs().is_empty());
    assert!(vcon.attachments().is_empty());
    assert!(vcon.analysis().is_empty());
    assert!(vcon.tags().is_empty());
    assert!(vcon.signatures().is_empty());
}

#[test]
fn test_null_collections_become_empty() {
    let vcon = VCon::build_from_json(r#"{"uuid": "x", "parties": null, "tags": null}"#).unwrap();
    assert!(vcon.parties().is_empty());
    assert!(vcon.tags().is_empty());
}

#[test]
fn test_unknown_top_level_members_survive() {
    let source = json!({
        "uuid": "abc",
        "vcon": "0.0.2",
        "created_at": "2024-01-01T00:00:00Z",
        "must_support": ["x-ext"],
        "x-ext": {"nested": [1, 2, 3]},
    });
    let vcon = VCon::build_from_json(&source.to_string()).unwrap();
    assert_eq!(vcon.extensions().get("must_support"), Some(&json!(["x-ext"])));

    let out = vcon.to_value().unwrap();
    assert_eq!(out["x-ext"], json!({"nested": [1, 2, 3]}));
    assert_eq!(out["vcon"], json!("0.0.2"));
}

#[test]
fn test_redacted_flag_round_trip() {
    let vcon = VCon::build_from_json(r#"{"uuid": "r", "redacted": true}"#).unwrap();
    assert!(vcon.is_redacted());
    assert_eq!(vcon.to_value().unwrap()["redacted"], json!(true));
}

#[test]
fn test_parse_errors() {
    let err = VCon::build_from_json("{not json").unwrap_err();
    assert!(err.is_parse());

    let err = VCon::build_from_json(r#"{"uuid": "x", "parties": {"tel": "1"}}"#).unwrap_err();
    assert!(err.is_parse());

    let err = VCon::build_from_json(r#"{"dialog": [{"type": "text"}]}"#).unwrap_err();
    assert!(err.is_parse());

    let err = VCon::build_from_json(
        r#"{"analysis": [{"type": "t", "dialog": "x", "vendor": "v", "body": 1}]}"#,
    )
    .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_timestamps_are_iso8601() {
    let source = json!({
        "uuid": "t",
        "created_at": "2024-02-03T04:05:06Z",
        "updated_at": "2024-02-03T04:05:07.250Z",
    });
    let vcon = VCon::build_from_json(&source.to_string()).unwrap();
    let out = vcon.to_value().unwrap();

    assert_eq!(out["created_at"], json!("2024-02-03T04:05:06Z"));
    assert_eq!(out["updated_at"], json!("2024-02-03T04:05:07.250Z"));
}

#[test]
fn test_nested_unknown_fields_survive() {
    let source = json!({
        "uuid": "n",
        "parties": [{"civicaddress": {"country": "US", "a1": "CA", "hno": "12"}}],
        "dialog": [{
            "type": "recording",
            "start": "2024-01-01T00:00:00Z",
            "parties": [0],
            "party_history": [
                {"party": 0, "event": "join", "time": "2024-01-01T00:00:00Z", "via": "ivr"}
            ],
        }],
    });
    let vcon = VCon::build_from_json(&source.to_string()).unwrap();
    let out = vcon.to_value().unwrap();

    assert_eq!(
        out["parties"][0]["civicaddress"],
        json!({"country": "US", "a1": "CA", "hno": "12"})
    );
    assert_eq!(out["dialog"][0]["party_history"][0]["via"], json!("ivr"));
}

#[test]
fn test_encoding_names_are_read_leniently() {
    let source = json!({
        "uuid": "e",
        "dialog": [{
            "type": "text",
            "start": "2024-01-01T00:00:00Z",
            "parties": [0],
            "body": "SGk=",
            "encoding": "BASE64",
        }],
        "attachments": [{"type": "text/plain", "body": "hi", "encoding": "utf-8"}],
    });
    let vcon = VCon::build_from_json(&source.to_string()).unwrap();

    assert_eq!(vcon.dialogs()[0].encoding(), Some(&Encoding::Base64));
    assert_eq!(
        vcon.attachments()[0].encoding,
        Encoding::Other("utf-8".to_string())
    );

    let out = vcon.to_value().unwrap();
    assert_eq!(out["dialog"][0]["encoding"], json!("base64"));
    assert_eq!(out["attachments"][0]["encoding"], json!("utf-8"));
}

#[test]
fn test_non_finite_duration_fails_to_serialize() {
    let mut vcon = VCon::build_new();
    vcon.add_party(Party::new().with_tel("+15550000000"));
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
    let mut dialog = Dialog::new("recording", start, vec![0]).unwrap();
    dialog.duration = Some(f64::NAN);
    vcon.add_dialog(dialog);

    let err = vcon.to_json().unwrap_err();
    assert!(err.is_parse());
}
