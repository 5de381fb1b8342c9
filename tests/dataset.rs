use pretty_assertions::assert_eq;
use puzzle_eval::dataset::{assemble, assemble_par, assign_control_groups, SkipReason};
use puzzle_eval::io::load_lichess_csv;
use puzzle_eval::{BuildError, DatasetError, PuzzleRecord};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn fixture() -> Vec<PuzzleRecord> {
    load_lichess_csv("tests/data/puzzles_sample.csv").expect("bundled puzzles_sample.csv").records
}

#[test]
fn skips_failing_records_and_keeps_order() {
    let records = fixture();
    let asm = assemble(&records, None).unwrap();
    assert_eq!(asm.examples.len(), 2 + 7 + 7 + 2 + 1);

    let skipped: Vec<(usize, &str)> = asm.skipped.iter().map(|s| (s.index, s.puzzle_id.as_str())).collect();
    assert_eq!(skipped, vec![(3, "p0005"), (6, "p0008")]);
    assert!(matches!(asm.skipped[0].reason, SkipReason::Build(BuildError::IllegalReplayMove { .. })));
    assert!(matches!(asm.skipped[1].reason, SkipReason::Build(BuildError::EmptyLegalMoveSet { .. })));

    let mut order: Vec<&str> = asm.examples.iter().map(|e| e.puzzle_id.as_str()).collect();
    order.dedup();
    assert_eq!(order, vec!["p0001", "p0002", "p0003", "p0006", "p0007"]);
    for w in asm.examples.windows(2) {
        if w[0].puzzle_id == w[1].puzzle_id { assert_eq!(w[0].ply_index + 1, w[1].ply_index); }
    }
}

#[test]
fn empty_solutions_are_skipped_not_errors() {
    let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let records = vec![
        PuzzleRecord::new("a", start, &[]),
        PuzzleRecord::new("b", start, &["d2d4"]),
    ];
    let asm = assemble(&records, None).unwrap();
    assert_eq!(asm.examples.len(), 1);
    assert!(matches!(asm.skipped[0].reason, SkipReason::EmptySolution));
}

#[test]
fn parallel_matches_sequential() {
    let records = fixture();
    let seq = assemble(&records, None).unwrap();
    let par = assemble_par(&records, None).unwrap();
    assert_eq!(seq.examples, par.examples);
    let idx = |a: &puzzle_eval::Assembly| a.skipped.iter().map(|s| s.index).collect::<Vec<_>>();
    assert_eq!(idx(&seq), idx(&par));
}

#[test]
fn labels_are_attached_per_record() {
    let records = fixture();
    let labels: Vec<String> = (0..records.len()).map(|i| format!("g{}", i % 2)).collect();
    let asm = assemble(&records, Some(labels.as_slice())).unwrap();
    for ex in &asm.examples {
        let i = records.iter().position(|r| r.id == ex.puzzle_id).unwrap();
        assert_eq!(ex.metadata.control_group.as_deref(), Some(labels[i].as_str()));
    }
}

#[test]
fn misaligned_labels_are_fatal() {
    let records = fixture();
    let labels = vec!["only-one".to_string()];
    assert!(matches!(assemble(&records, Some(labels.as_slice())), Err(DatasetError::LabelMismatch { labels: 1, .. })));
}

#[test]
fn control_groups_are_balanced_and_seeded() {
    let groups = vec!["control".to_string(), "treatment".to_string()];
    let a = assign_control_groups(11, &groups, &mut SmallRng::seed_from_u64(7));
    let b = assign_control_groups(11, &groups, &mut SmallRng::seed_from_u64(7));
    assert_eq!(a, b);
    let control = a.iter().filter(|g| *g == "control").count();
    assert_eq!(control, 6);
    assert_eq!(a.len() - control, 5);
    assert!(assign_control_groups(3, &[], &mut SmallRng::seed_from_u64(7)).is_empty());
}
