use super::*;

#[test]
fn decodes_entries_in_program_order() {
    let payload = serde_json::json!({
        "total": 2,
        "entries": [
            { "link": "a.gif", "submitter": "X", "upvotes": 3, "seq": 0 },
            { "link": "b.gif", "submitter": "Y", "upvotes": 0, "seq": 1 }
        ]
    });

    let entries = decode_entries(payload).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].link, "a.gif");
    assert_eq!(entries[0].submitter, Identity("X".to_string()));
    assert_eq!(entries[0].upvotes, 3);
    assert_eq!(entries[0].id, Some(EntryId(0)));
    assert_eq!(entries[1].link, "b.gif");
}

#[test]
fn accepts_legacy_field_names_and_missing_votes() {
    let payload = serde_json::json!({
        "total_gifs": 1,
        "gif_list": [{ "gif_link": "c.gif", "user_address": "Z" }]
    });

    let entries = decode_entries(payload).unwrap();
    assert_eq!(
        entries,
        vec![Entry {
            link: "c.gif".to_string(),
            submitter: Identity("Z".to_string()),
            upvotes: 0,
            id: None,
        }]
    );
}

#[test]
fn empty_list_decodes_to_no_entries() {
    let entries = decode_entries(serde_json::json!({ "entries": [] })).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn rejects_payload_without_a_list() {
    assert!(decode_entries(serde_json::json!({ "owner": "X" })).is_err());
    assert!(decode_entries(serde_json::json!("raw bytes")).is_err());
}

#[test]
fn rejects_negative_upvote_counter() {
    let payload = serde_json::json!({
        "entries": [{ "link": "a.gif", "submitter": "X", "upvotes": -1 }]
    });
    assert!(decode_entries(payload).is_err());
}
