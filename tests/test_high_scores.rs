use space_invaders::high_scores::*;
use space_invaders::HighScoreError;

#[test]
fn missing_file_is_an_empty_board() {
    let dir = tempfile::tempdir().expect("temp dir");
    let board = HighScoreBoard::load(dir.path().join("scores")).expect("loads");
    assert!(board.entries().is_empty());
    assert!(board.best().is_none());
    assert!(board.qualifies(0));
}

#[test]
fn keeps_ten_best_in_ascending_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut board = HighScoreBoard::empty(dir.path().join("scores"));
    for score in [500, 100, 1200, 300, 900, 50, 700, 1100, 200, 800, 1000, 600] {
        board.add(RankedPlayer::new("ace", score, 1));
    }
    let scores: Vec<u32> = board.entries().iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![200, 300, 500, 600, 700, 800, 900, 1000, 1100, 1200]);
    assert_eq!(board.best().map(|p| p.score), Some(1200));
    assert!(!board.qualifies(150));
    assert!(board.qualifies(250));
}

#[test]
fn saved_board_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scores");
    let mut board = HighScoreBoard::empty(&path);
    board.add(RankedPlayer::new("alice", 4200, 3));
    board.add(RankedPlayer::new("bob", 900, 1));
    board.save().expect("saves");

    let written = std::fs::read_to_string(&path).expect("reads");
    assert_eq!(written, "bob\t900\t1\nalice\t4200\t3\n");

    let loaded = HighScoreBoard::load(&path).expect("loads");
    assert_eq!(loaded.entries(), board.entries());
}

#[test]
fn malformed_line_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scores");
    std::fs::write(&path, "alice\t100\t1\nbob\tlots\t2\n").expect("write");
    match HighScoreBoard::load(&path) {
        Err(HighScoreError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected malformed record, got {other:?}"),
    }
}

#[test]
fn names_are_sanitised() {
    assert_eq!(RankedPlayer::new("  ", 10, 1).name, "Anonymous");
    assert_eq!(RankedPlayer::new("a\tb", 10, 1).name, "a b");
    assert_eq!(RankedPlayer::new("zed", 10, 1).to_string(), "zed: 10");
}
