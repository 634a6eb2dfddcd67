use xbel_import::BookmarkField;

use crate::integration::support::{drain, flat_document, spawn, wait_until, NESTED_XBEL};

#[test]
fn primary_record_count_matches_bookmark_elements() {
    let handle = spawn(NESTED_XBEL, "R", 2);
    let records = drain(&handle);
    let summary = handle.join().unwrap();

    assert_eq!(records.len(), NESTED_XBEL.matches("<bookmark ").count());
    assert_eq!(summary.bookmarks, 4);
    assert_eq!(summary.alias_targets, 0);
}

#[test]
fn nested_folder_paths_follow_document_structure() {
    let handle = spawn(NESTED_XBEL, "R", 8);
    let records = drain(&handle);
    handle.join().unwrap();

    let folders: Vec<_> = records.iter().map(|r| r.folders().unwrap()).collect();
    assert_eq!(folders, vec!["R", "R/A", "R/A/B", "R/A"]);

    let titles: Vec<_> = records.iter().map(|r| r.title().unwrap()).collect();
    assert_eq!(titles, vec!["Top", "In A", "In A/B", "Back in A"]);
    assert_eq!(
        records[0].get(BookmarkField::Description),
        Some("Top level bookmark")
    );
}

#[test]
fn whitespace_folder_title_does_not_cut_parent_path() {
    let xml = r#"<xbel><folder><title>A</title><folder><title> </title><bookmark href="x"/></folder><bookmark href="y"/></folder></xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    handle.join().unwrap();

    let placed: Vec<_> = records
        .iter()
        .map(|r| (r.url().unwrap(), r.folders().unwrap()))
        .collect();
    assert_eq!(placed, vec![("x", "R/A/ "), ("y", "R/A")]);
}

#[test]
fn indentation_around_folder_titles_is_ignored() {
    let xml = "<xbel>\n  <folder>\n    <title>A</title>\n    <bookmark href=\"a\">\n      <title>In A</title>\n    </bookmark>\n  </folder>\n  <bookmark href=\"top\"/>\n</xbel>\n";
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    handle.join().unwrap();

    let folders: Vec<_> = records.iter().map(|r| r.folders().unwrap()).collect();
    assert_eq!(folders, vec!["R/A", "R"]);
    assert_eq!(records[0].title(), Some("In A"));
}

#[test]
fn dates_are_normalized_to_epoch_millis() {
    let handle = spawn(NESTED_XBEL, "R", 8);
    let records = drain(&handle);
    handle.join().unwrap();

    assert_eq!(
        records[0].get(BookmarkField::DateAdded),
        Some("1299234030000")
    );
    assert!(records[1].contains(BookmarkField::DateVisited));
    assert!(records[2].contains(BookmarkField::DateModified));
    assert!(!records[3].contains(BookmarkField::DateAdded));
}

#[test]
fn unparseable_date_keeps_record_and_siblings() {
    let xml = r#"<xbel>
  <bookmark href="http://bad.example/" added="sometime" visited="2011-04-01T08:00:00Z">
    <title>Bad date</title>
  </bookmark>
  <bookmark href="http://next.example/"><title>Next</title></bookmark>
</xbel>"#;
    let handle = spawn(xml, "R", 4);
    let records = drain(&handle);
    let summary = handle.join().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title(), Some("Bad date"));
    assert_eq!(records[0].url(), Some("http://bad.example/"));
    assert!(!records[0].contains(BookmarkField::DateAdded));
    assert!(records[0].contains(BookmarkField::DateVisited));
    assert_eq!(records[1].title(), Some("Next"));
    assert_eq!(summary.invalid_dates, 1);
}

#[test]
fn producer_blocks_at_capacity_until_consumer_takes() {
    let handle = spawn(&flat_document(10), "R", 3);
    let consumer = handle.consumer();

    assert!(wait_until(|| consumer.pending() == 3));
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert_eq!(consumer.stats().enqueued, 3);
    assert_eq!(consumer.pending(), 3);

    let first = handle.take().into_record().unwrap();
    assert_eq!(first.url(), Some("http://example.com/0"));
    assert!(wait_until(|| consumer.stats().enqueued == 4));
    assert_eq!(consumer.pending(), 3);

    let rest = drain(&handle);
    assert_eq!(rest.len(), 9);
    assert_eq!(rest[0].url(), Some("http://example.com/1"));
    assert_eq!(rest[8].url(), Some("http://example.com/9"));
    handle.join().unwrap();
}

#[test]
fn nothing_but_end_of_stream_after_last_record_without_aliases() {
    let handle = spawn(&flat_document(3), "R", 1);
    let records = drain(&handle);
    assert_eq!(records.len(), 3);
    assert!(handle.take().is_end_of_stream());
    assert_eq!(handle.join().unwrap().alias_targets, 0);
}
