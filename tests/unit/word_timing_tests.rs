/*!
 * Tests for the word timing export
 */

use anyhow::Result;
use lyricplay::lyrics_processor::TimedEntry;
use lyricplay::word_timing::WordTimingExport;
use crate::common::{self, assert_close};

/// Test that words tile each caption exactly
#[test]
fn test_from_entries_withMultiWordCaption_shouldTileDuration() {
    let entries = vec![TimedEntry::new(10.0, 14.0, "one two three four")];
    let export = WordTimingExport::from_entries(&entries);

    let words = &export.captions[0].words;
    assert_eq!(words.len(), 4);
    assert_close(words[0].start, 10.0);
    assert_close(words[3].end, 14.0);
    for pair in words.windows(2) {
        assert_close(pair[0].end, pair[1].start);
        assert_close(pair[0].end - pair[0].start, 1.0);
    }
}

/// Test that the flat word list follows caption order
#[test]
fn test_from_entries_withSeveralCaptions_shouldFlattenInOrder() {
    let entries = vec![
        TimedEntry::new(0.0, 2.0, "a"),
        TimedEntry::new(2.0, 5.0, "b\nc"),
    ];
    let export = WordTimingExport::from_entries(&entries);

    let flat: Vec<&str> = export.words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(flat, vec!["a", "b", "c"]);
    assert_eq!(export.captions[1].text, "b\nc");
    assert_eq!(export.captions[1].start_time, "00:02.00");
    assert_eq!(export.captions[1].end_time, "00:05.00");
}

/// Test the JSON layout and writing to disk
#[test]
fn test_write_json_withExport_shouldWriteWordsAndCaptions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("words.json");
    let export = WordTimingExport::from_entries(&[TimedEntry::new(1.0, 3.0, "hi there")]);

    export.write_json(&path)?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(value["words"].as_array().map(|w| w.len()), Some(2));
    assert_eq!(value["words"][1]["word"], "there");
    assert_eq!(value["words"][1]["start_time"], "00:02.00");
    assert_eq!(value["captions"][0]["text"], "hi there");
    assert_eq!(value["captions"][0]["words"].as_array().map(|w| w.len()), Some(2));
    Ok(())
}

/// Test that an empty entry list exports empty arrays
#[test]
fn test_to_json_withNoEntries_shouldHaveEmptyArrays() -> Result<()> {
    let json = WordTimingExport::from_entries(&[]).to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value["words"], serde_json::json!([]));
    assert_eq!(value["captions"], serde_json::json!([]));
    Ok(())
}
