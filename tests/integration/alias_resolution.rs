use crate::integration::support::{drain, spawn};

const ALIASED_XBEL: &str = r#"<?xml version="1.0"?>
<xbel version="1.0">
  <folder>
    <title>A</title>
    <bookmark href="http://seven.example/" id="7">
      <title>Seven</title>
    </bookmark>
    <bookmark href="http://eight.example/" id="8">
      <title>Eight</title>
    </bookmark>
  </folder>
  <folder>
    <title>C</title>
    <alias ref="8"/>
    <alias ref="7"/>
  </folder>
  <folder>
    <title>D</title>
    <alias ref="8"/>
  </folder>
</xbel>
"#;

#[test]
fn alias_target_lists_original_then_alias_folder() {
    let xml = r#"<xbel>
  <folder><title>A</title>
    <bookmark href="http://seven.example/" id="7"><title>Seven</title></bookmark>
  </folder>
  <folder><title>C</title><alias ref="7"/></folder>
</xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    handle.join().unwrap();

    assert_eq!(records.len(), 2);
    let primary = &records[0];
    assert_eq!(primary.folders(), Some("R/A"));
    assert_eq!(primary.title(), Some("Seven"));

    let target = &records[1];
    assert_eq!(target.folders(), Some("R/A,R/C"));
    assert_eq!(target.url(), primary.url());
    assert_eq!(target.title(), None);
}

#[test]
fn alias_targets_follow_primaries_in_first_reference_order() {
    let handle = spawn(ALIASED_XBEL, "R", 2);
    let records = drain(&handle);
    let summary = handle.join().unwrap();

    assert_eq!(summary.bookmarks, 2);
    assert_eq!(summary.aliases, 3);
    assert_eq!(summary.alias_targets, 2);

    let urls: Vec<_> = records.iter().map(|r| r.url().unwrap()).collect();
    assert_eq!(
        urls,
        vec![
            "http://seven.example/",
            "http://eight.example/",
            "http://eight.example/",
            "http://seven.example/",
        ]
    );
    assert_eq!(records[2].folders(), Some("R/A,R/C,R/D"));
    assert_eq!(records[3].folders(), Some("R/A,R/C"));
}

#[test]
fn two_aliases_of_one_bookmark_yield_one_target_record() {
    let handle = spawn(ALIASED_XBEL, "R", 8);
    let records = drain(&handle);
    handle.join().unwrap();

    let eight_targets = records
        .iter()
        .skip(2)
        .filter(|r| r.url() == Some("http://eight.example/"))
        .count();
    assert_eq!(eight_targets, 1);
}

#[test]
fn alias_before_definition_is_resolved_at_end_of_document() {
    let xml = r#"<xbel>
  <folder><title>Early</title><alias ref="late"/></folder>
  <folder><title>Late</title>
    <bookmark href="http://late.example/" id="late"><title>Late</title></bookmark>
  </folder>
</xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    handle.join().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].folders(), Some("R/Late"));
    assert_eq!(records[1].folders(), Some("R/Early,R/Late"));
    assert_eq!(records[1].url(), Some("http://late.example/"));
}

#[test]
fn alias_to_unknown_bookmark_is_emitted_without_url() {
    let xml = r#"<xbel><folder><title>X</title><alias ref="ghost"/></folder></xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    handle.join().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url(), None);
    assert_eq!(records[0].folders(), Some("R/X"));
}
