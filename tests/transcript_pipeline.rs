//! End-to-end checks: raw engine output to clips, clips to captions, caption
//! text to keywords and collocations.

use std::io::Write as _;

use cliprank::readers::{plain, segments, vtt};
use cliprank::writers::vtt::write_vtt;
use cliprank::{BackgroundCorpus, ClipSegmenter, TranscriptAnalyzer};

fn background() -> BackgroundCorpus {
    BackgroundCorpus::from_counts([
        ("the", 6_187_267u64),
        ("of", 2_941_444),
        ("and", 2_682_863),
        ("house", 49_712),
        ("future", 26_303),
        ("cheap", 3_602),
    ])
}

#[test]
fn plain_stream_survives_a_caption_round_trip() {
    let input = concat!(
        "hello(0.0,0.5) world(0.75,1.25) <sil>(1.25,2.0) again(2.0,2.5)\n",
        "<s>(2.5,2.5)\n",
        "Falling back to narrow beam\n",
        "fresh(2.75,3.25) start(3.5,4.0)\n",
    );
    let segmenter = ClipSegmenter::new();
    let clips = plain::read_clips(input.as_bytes(), &segmenter).unwrap();

    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0].text, "hello world again");
    assert_eq!(clips[1].text, "fresh start");

    let mut vtt_out = Vec::new();
    write_vtt(&clips, &mut vtt_out).unwrap();
    let reread = vtt::read_clips(vtt_out.as_slice()).unwrap();

    assert_eq!(reread.len(), clips.len());
    for (a, b) in clips.iter().zip(&reread) {
        assert_eq!(a.text, b.text);
        // The caption format stores milliseconds, so spans match to 1 ms.
        assert!((a.start - b.start).abs() < 1e-3);
        assert!((a.end - b.end).abs() < 1e-3);
    }
}

#[test]
fn diarized_transcript_yields_speakers_keywords_and_collocations() {
    let xml = concat!(
        r#"<?xml version="1.0"?><transcription><segmentlist>"#,
        "<segment><speaker>Alice</speaker><labellist>",
        "<label><start>0</start><end>50</end><value>solar</value></label>",
        "<label><start>50</start><end>100</end><value>panels</value></label>",
        "<label><start>100</start><end>150</end><value>are</value></label>",
        "<label><start>150</start><end>200</end><value>the</value></label>",
        "<label><start>200</start><end>250</end><value>future</value></label>",
        "</labellist></segment>",
        "<segment><speaker>Bob</speaker><labellist>",
        "<label><start>300</start><end>350</end><value>cheap</value></label>",
        "<label><start>350</start><end>400</end><value>solar</value></label>",
        "<label><start>400</start><end>450</end><value>panels</value></label>",
        "<label><start>450</start><end>500</end><value>spread</value></label>",
        "</labellist></segment>",
        "<segment><speaker>Alice</speaker><labellist>",
        "<label><start>600</start><end>650</end><value>install</value></label>",
        "<label><start>650</start><end>700</end><value>solar</value></label>",
        "<label><start>700</start><end>750</end><value>panels</value></label>",
        "<label><start>750</start><end>800</end><value>today</value></label>",
        "</labellist></segment>",
        "</segmentlist></transcription>",
    );

    let transcript = segments::read_clips(xml, &ClipSegmenter::new()).unwrap();
    assert_eq!(transcript.clips.len(), 3);
    assert_eq!(transcript.speakers.len(), 2);
    assert_eq!(transcript.speakers[0].name, "Alice");
    assert!(transcript.clips.iter().all(|c| c.begins_paragraph));
    assert_eq!(transcript.clips[0].text, "solar panels are the future");

    let corpus = background();
    let analyzer = TranscriptAnalyzer::new(&corpus);
    let analysis = analyzer.analyze(transcript.clips.iter().map(|c| c.text.as_str()));

    assert!(analysis.keywords.iter().any(|k| k.word == "solar"));
    assert!(analysis.keywords.iter().any(|k| k.word == "panels"));
    let top = analysis.collocations.first().expect("one collocation");
    assert_eq!(top.pair, ("solar".to_string(), "panels".to_string()));
    assert_eq!(top.count, 3);
}

#[test]
fn corpus_loads_from_disk_and_drives_ranking() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"the": 6187267, "of": 2941444, "coffee": 1200, "roast": 310}}"#
    )
    .unwrap();
    let corpus = BackgroundCorpus::load(file.path()).unwrap();

    let analyzer = TranscriptAnalyzer::new(&corpus);
    let transcripts = vec![
        vec!["the roast profile matters more than the origin".to_string()],
        vec!["grind size and the roast decide extraction".to_string()],
    ];
    let batch = analyzer.analyze_batch(&transcripts);

    assert_eq!(batch.len(), 2);
    for (lines, analysis) in transcripts.iter().zip(&batch) {
        assert_eq!(analysis.keywords, analyzer.analyze(lines).keywords);
        assert!(analysis.keywords.iter().any(|k| k.word == "roast"));
        assert!(analysis.keywords.iter().all(|k| k.word != "the"));
    }
}
