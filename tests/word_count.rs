//! End-to-end counting over real corpus directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use topic_coherence::cooccur::{count_corpus, WindowCounter};
use topic_coherence::corpus::list_partitions;
use topic_coherence::counts::{WordCounts, TOTAL_WINDOWS_KEY};
use topic_coherence::errors::Error;
use topic_coherence::metrics::Metric;
use topic_coherence::vocab::TopicIndex;

/// Corpus directory with one file per partition
fn corpus(partitions: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in partitions {
        fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

fn run(topics: &[&str], dir: &Path, window_size: usize) -> WordCounts {
    let index = TopicIndex::from_lines(topics.iter().cloned());
    let partitions = list_partitions(dir).unwrap();
    count_corpus(&index, &partitions, window_size).unwrap()
}

fn emit(counts: &WordCounts) -> String {
    let mut out = vec![];
    counts.write_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn whole_document_window_scenario() {
    let dir = corpus(&[("part-0", "space the earth\n")]);
    let counts = run(&["space earth"], dir.path(), 0);
    assert_eq!(
        emit(&counts),
        "!!<TOTAL_WINDOWS>!!|1\nearth|1\nearth|space|1\nspace|1\n"
    );
}

#[test]
fn empty_partition_only_adds_windows() {
    let dir = corpus(&[("empty", "")]);
    let counts = run(&["space earth"], dir.path(), 20);
    assert_eq!(emit(&counts), "!!<TOTAL_WINDOWS>!!|0\n");

    let dir = corpus(&[("empty", ""), ("full", "space the earth\n")]);
    let with_empty = run(&["space earth"], dir.path(), 2);
    let dir = corpus(&[("full", "space the earth\n")]);
    let without = run(&["space earth"], dir.path(), 2);
    assert_eq!(with_empty, without);
}

#[test]
fn unseen_topic_words_are_absent() {
    let dir = corpus(&[("part-0", "space the earth\n")]);
    let counts = run(&["space earth moon"], dir.path(), 0);
    let text = emit(&counts);
    assert!(!text.contains("moon"), "{}", text);
    assert_eq!(counts.get("moon"), 0);
}

#[test]
fn hidden_partitions_are_ignored() {
    let dir = corpus(&[("part-0", "space earth\n"), (".part-1.swp", "space earth\n")]);
    let counts = run(&["space earth"], dir.path(), 0);
    assert_eq!(counts.get("space"), 1);
    assert_eq!(counts.total_windows(), 1);
}

#[test]
fn collocations_are_counted_as_phrases() {
    let dir = corpus(&[("part-0", "flights to new york and back\nyork is old\n")]);
    let counts = run(&["new_york flights", "york old"], dir.path(), 0);
    assert_eq!(counts.get("new york"), 1);
    assert_eq!(counts.get("flights|new york"), 1);
    assert_eq!(counts.get("york"), 2);
    assert_eq!(counts.get("old|york"), 1);
    // related on no topic line
    assert_eq!(counts.get("flights|york"), 0);
    assert_eq!(counts.total_windows(), 2);
}

#[test]
fn splitting_the_corpus_changes_nothing() {
    let docs = [
        "space shuttle launch from earth orbit",
        "the moon orbits the earth",
        "",
        "shuttle crew returns to earth after moon mission",
        "space space space",
    ];
    let topics = ["space earth moon orbit", "shuttle launch crew"];

    let lines = |docs: &[&str]| docs.iter().map(|doc| format!("{}\n", doc)).collect::<String>();
    let whole = corpus(&[("all", &lines(&docs))]);
    let split = corpus(&[
        ("a", &lines(&docs[..2])),
        ("b", &lines(&docs[2..3])),
        ("c", &lines(&docs[3..])),
    ]);
    for &window_size in &[0, 1, 3, 20] {
        assert_eq!(
            run(&topics, whole.path(), window_size),
            run(&topics, split.path(), window_size),
            "window size {}",
            window_size
        );
    }
}

#[test]
fn window_total_follows_document_lengths() {
    let dir = corpus(&[("a", "one two three\nfour\n"), ("b", "five six\n")]);
    let counts = run(&["one two"], dir.path(), 4);
    // (3 + 3) + (1 + 3) + (2 + 3)
    assert_eq!(counts.total_windows(), 15);
}

#[test]
fn unreadable_partition_fails_the_run() {
    let dir = corpus(&[("part-0", "space earth\n")]);
    let index = TopicIndex::from_lines(vec!["space earth"]);
    let mut partitions = list_partitions(dir.path()).unwrap();
    partitions.push(dir.path().join("vanished"));

    match count_corpus(&index, &partitions, 0) {
        Err(Error::FileError(path, _)) => assert!(path.ends_with("vanished")),
        other => panic!("expected FileError, got {:?}", other),
    }
}

#[test]
fn directory_in_corpus_fails_the_run() {
    let dir = corpus(&[("part-0", "space earth\n")]);
    fs::create_dir(dir.path().join("nested")).unwrap();
    let index = TopicIndex::from_lines(vec!["space earth"]);
    let partitions = list_partitions(dir.path()).unwrap();
    assert!(count_corpus(&index, &partitions, 0).is_err());
}

#[test]
fn invalid_utf8_partition_fails_the_run() {
    let dir = corpus(&[("part-0", "space earth\n")]);
    fs::write(dir.path().join("part-1"), b"space \xff earth\n").unwrap();
    let index = TopicIndex::from_lines(vec!["space earth"]);
    let partitions = list_partitions(dir.path()).unwrap();

    match count_corpus(&index, &partitions, 0) {
        Err(Error::FileError(path, err)) => {
            assert!(path.ends_with("part-1"));
            assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("expected FileError, got {:?}", other),
    }
}

#[test]
fn single_partition_matches_worker() {
    let dir = corpus(&[("part-0", "space the earth\nearth earth moon space\n")]);
    let index = TopicIndex::from_lines(vec!["space earth", "moon earth"]);
    let path: PathBuf = dir.path().join("part-0");
    let direct = WindowCounter::new(&index, 2).count_partition(&path).unwrap();
    let pooled = count_corpus(&index, &[path], 2).unwrap();
    assert_eq!(direct, pooled);
}

#[test]
fn emitted_counts_feed_coherence() {
    let dir = corpus(&[(
        "part-0",
        "space earth\nspace earth\nspace moon\nearth\nbanana\n",
    )]);
    let counts = run(&["space earth moon"], dir.path(), 0);
    let reread = WordCounts::read_from(emit(&counts).as_bytes()).unwrap();
    assert_eq!(reread, counts);
    assert_eq!(reread.get(TOTAL_WINDOWS_KEY), 5);

    // space=3 earth=3 pair=2 over 5 windows
    let pmi = Metric::Pmi.association(&reread, "space", "earth");
    assert!((pmi - (2.0f64 * 5.0 / 9.0).log10()).abs() < 1e-12);
    assert!(Metric::Npmi.topic_coherence(&reread, &["space", "earth", "moon"]) > 0.0);
}
