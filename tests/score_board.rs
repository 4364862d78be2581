/// High-score ranking and its on-disk form.
use proptest::prelude::*;
use std::cmp::Ordering;
use std::fs;

use dungeon_puzzler::dungeon::{CsvScoreStore, Score, ScoreBoard, ScoreStore, DEFAULT_CAPACITY};

fn arb_scores() -> impl Strategy<Value = Vec<(u32, u64)>> {
    prop::collection::vec((0u32..20, 0u64..5), 0..40)
}

proptest! {
    #[test]
    fn prop_board_keeps_top_entries_in_order(raw in arb_scores()) {
        let mut board = ScoreBoard::default();
        let all: Vec<Score> = raw
            .iter()
            .enumerate()
            .map(|(i, (score, time))| Score::new(format!("p{i}"), *score, *time))
            .collect();
        for score in &all {
            board.insert(score.clone());
        }

        prop_assert_eq!(board.len(), all.len().min(DEFAULT_CAPACITY));
        for pair in board.entries().windows(2) {
            prop_assert_ne!(pair[0].rank_cmp(&pair[1]), Ordering::Greater);
        }

        // Same result as a stable sort of everything, truncated.
        let mut expected = all.clone();
        expected.sort_by(Score::rank_cmp);
        expected.truncate(DEFAULT_CAPACITY);
        prop_assert_eq!(board.entries(), expected.as_slice());
    }

    #[test]
    fn prop_dropped_entries_never_outrank_kept(raw in arb_scores()) {
        let mut board = ScoreBoard::new(3);
        let mut dropped = Vec::new();
        for (i, (score, time)) in raw.iter().enumerate() {
            let entry = Score::new(format!("p{i}"), *score, *time);
            let before: Vec<Score> = board.entries().to_vec();
            board.insert(entry.clone());
            for old in before.iter().chain(std::iter::once(&entry)) {
                if !board.entries().contains(old) {
                    dropped.push(old.clone());
                }
            }
        }
        if let Some(last) = board.entries().last() {
            for gone in &dropped {
                prop_assert_ne!(gone.rank_cmp(last), Ordering::Less);
            }
        }
    }
}

#[test]
fn csv_store_skips_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    fs::write(
        &path,
        "alice,450,183\nnot a score line\nbob,lots,10\n\ncarol,300,90,extra\ndave,500,200\n",
    )
    .unwrap();

    let store = CsvScoreStore::new(&path);
    let loaded = store.load().unwrap();
    assert_eq!(
        loaded,
        vec![Score::new("alice", 450, 183), Score::new("dave", 500, 200)]
    );
    let board = ScoreBoard::from_entries(loaded, DEFAULT_CAPACITY);
    assert_eq!(board.entries()[0].player_name, "dave");
}

#[test]
fn csv_store_round_trips_ranked_table() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvScoreStore::new(dir.path().join("scores").join("table.txt"));
    let mut board = ScoreBoard::default();
    for (name, score, time) in [("a", 100, 60), ("b", 200, 90), ("c", 200, 30)] {
        board.insert(Score::new(name, score, time));
    }
    store.save(board.entries()).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw, "c,200,30\nb,200,90\na,100,60\n");
    assert_eq!(store.load().unwrap(), board.entries());
}
