use std::io::Cursor;
use std::thread;
use std::time::Duration;

use xbel_import::{BookmarkRecord, ImportConfig, ImportHandle, ImportItem, XbelImporter};

pub fn config(root: &str, capacity: usize) -> ImportConfig {
    ImportConfig {
        root_folder: root.to_string(),
        folder_separator: "/".to_string(),
        queue_capacity: capacity,
        ..ImportConfig::default()
    }
}

pub fn spawn(xml: &str, root: &str, capacity: usize) -> ImportHandle {
    XbelImporter::new(Cursor::new(xml.to_string()), config(root, capacity))
        .spawn()
        .unwrap()
}

/// Take records until end of stream.
pub fn drain(handle: &ImportHandle) -> Vec<BookmarkRecord> {
    let mut records = Vec::new();
    loop {
        match handle.take() {
            ImportItem::Record(record) => records.push(record),
            ImportItem::EndOfStream => return records,
        }
    }
}

pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..300 {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

pub fn flat_document(count: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<xbel version=\"1.0\">\n");
    for i in 0..count {
        xml.push_str(&format!(
            "  <bookmark href=\"http://example.com/{i}\" id=\"b{i}\"><title>Bookmark {i}</title></bookmark>\n"
        ));
    }
    xml.push_str("</xbel>\n");
    xml
}

pub const NESTED_XBEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xbel PUBLIC "+//IDN python.org//DTD XML Bookmark Exchange Language 1.0//EN//XML" "http://www.python.org/topics/xml/dtds/xbel-1.0.dtd">
<xbel version="1.0">
  <title>Bookmarks</title>
  <bookmark href="http://top.example/" added="2011-03-04T10:20:30Z">
    <title>Top</title>
    <desc>Top level bookmark</desc>
  </bookmark>
  <folder id="f1" folded="no">
    <title>A</title>
    <bookmark href="http://a.example/" id="7" visited="2011-04-01T08:00:00Z">
      <title>In A</title>
    </bookmark>
    <separator/>
    <folder>
      <title>B</title>
      <bookmark href="http://ab.example/" modified="2011-04-02">
        <title>In A/B</title>
        <info>
          <metadata owner="http://example.com/owner">opaque</metadata>
        </info>
      </bookmark>
    </folder>
    <bookmark href="http://a2.example/">
      <title>Back in A</title>
    </bookmark>
  </folder>
</xbel>
"#;
