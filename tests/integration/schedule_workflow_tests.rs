/*!
 * Integration tests for the schedule listing and word timing export
 */

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use lyricplay::lyrics_processor::LyricCollection;
use lyricplay::playback::{PlaybackSettings, PlaybackTransform, RealtimeScheduler, Stage, VirtualClock};
use lyricplay::schedule_printer::{build_schedule, print_schedule};
use lyricplay::word_timing::WordTimingExport;
use crate::common::{self, assert_close};

/// Test the full listing of the sample file
#[test]
fn test_print_schedule_withSampleFile_shouldListEveryEntry() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let collection = LyricCollection::load(&path)?;
    let mut out = Vec::new();

    let schedule = print_schedule(&collection.entries, &PlaybackTransform::default(), 0.0, &mut out)?;
    let text = String::from_utf8(out)?;

    assert_eq!(schedule.len(), 4);
    assert!(text.contains("=== LYRIC SCHEDULE ==="));
    assert!(text.contains("[00:00.00] (00:00)\n  First line\n"));
    assert!(text.contains("[00:02.50] (00:02)\n  Second line (ooh)\n  continued here\n"));
    assert!(text.contains("[00:08.00] (00:08)\n  Chorus line\n"));
    Ok(())
}

/// Test that the listing shows the times realtime playback targets
#[tokio::test]
async fn test_build_schedule_withTransform_shouldMatchPlaybackTargets() -> Result<()> {
    let collection = LyricCollection {
        source_file: "inline.lrc".into(),
        entries: LyricCollection::parse_lrc_string(common::SAMPLE_LRC)?,
    };
    let transform = PlaybackTransform::new(0.5, Some(1.0), 1.5)?;
    let schedule = build_schedule(&collection.entries, &transform);

    let mut config = common::quiet_config();
    config.wrap_width = 80;
    let settings = PlaybackSettings::from_config(&config, None);
    let genre = common::plain_genre(0.001);
    let mut clock = VirtualClock::new();
    let mut rng = StdRng::seed_from_u64(1);
    let mut out = Vec::new();
    let report = {
        let mut stage = Stage::new(&mut clock, &mut rng, &mut out);
        RealtimeScheduler::new(&genre, transform, settings)
            .play(&collection.entries, &mut stage)
            .await?
    };

    assert_eq!(report.entries.len(), schedule.len());
    for (played, listed) in report.entries.iter().zip(&schedule) {
        assert_close(played.scheduled_start, listed.start);
    }
    assert_close(schedule[0].start, 1.5);
    assert_close(schedule[1].start, 1.5 + 2.5 / 1.5);
    Ok(())
}

/// Test exporting word timings from a loaded file
#[test]
fn test_word_timing_export_withSampleFile_shouldCoverEveryWord() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let collection = LyricCollection::load(&path)?;
    let json_path = temp_dir.path().join("song.json");

    WordTimingExport::from_entries(&collection.entries).write_json(&json_path)?;
    let export: WordTimingExport = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;

    assert_eq!(export.captions.len(), 4);
    // 2 + 5 + 2 + 2 words
    assert_eq!(export.words.len(), 11);
    for (caption, entry) in export.captions.iter().zip(&collection.entries) {
        assert_close(caption.words[0].start, entry.start);
        assert_close(caption.words[caption.words.len() - 1].end, entry.end);
    }
    Ok(())
}
