use puzzle_eval::dataset::assemble;
use puzzle_eval::distribution::{analyze, Attribute};
use puzzle_eval::{PuzzleAttributes, PuzzleRecord};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn uniform_population(n: usize) -> Vec<PuzzleRecord> {
    (0..n).map(|i| {
        let attrs = PuzzleAttributes { rating: 1500, popularity: 80, rating_deviation: 75, themes: vec!["short".into()] };
        PuzzleRecord::new(&format!("u{i}"), START, &["e2e4", "e7e5"]).with_attributes(attrs)
    }).collect()
}

#[test]
fn uniform_rating_has_zero_spread_on_both_sides() {
    let pop = uniform_population(12);
    let sample = assemble(&pop[..4], None).unwrap().examples;
    let report = analyze(&pop, &sample);
    let rating = report.get(Attribute::Rating).unwrap();
    let p = rating.population.as_ref().unwrap();
    let s = rating.sample.as_ref().unwrap();
    assert_eq!(p.mean, 1500.0);
    assert_eq!(s.mean, 1500.0);
    assert_eq!(p.std_dev, 0.0);
    assert_eq!(s.std_dev, 0.0);
    assert_eq!(p.count, 12);
    assert_eq!(s.count, 8);
}

#[test]
fn tracks_all_numeric_attributes() {
    let pop = uniform_population(3);
    let report = analyze(&pop, &[]);
    let tracked: Vec<Attribute> = report.comparisons.iter().map(|c| c.attribute).collect();
    assert_eq!(tracked, Attribute::ALL.to_vec());
    let pop_dev = report.get(Attribute::RatingDeviation).unwrap().population.as_ref().unwrap();
    assert_eq!(pop_dev.median, 75.0);
}

#[test]
fn empty_sample_is_reported_not_fatal() {
    let pop = uniform_population(5);
    let report = analyze(&pop, &[]);
    for c in &report.comparisons {
        assert!(c.population.is_some());
        assert!(c.sample.is_none());
    }
    let text = format!("{}", report);
    assert!(text.contains("popularity"));
    assert!(text.contains("1500.00"));
    assert!(text.contains(" -"));
}

#[test]
fn spread_differs_between_population_and_sample() {
    let mut pop = uniform_population(4);
    for (i, r) in pop.iter_mut().enumerate() { r.attributes.rating = 1000 + 200 * i as u32; }
    let sample = assemble(&pop[..1], None).unwrap().examples;
    let report = analyze(&pop, &sample);
    let rating = report.get(Attribute::Rating).unwrap();
    let p = rating.population.as_ref().unwrap();
    assert_eq!(p.mean, 1300.0);
    assert_eq!(p.min, 1000.0);
    assert_eq!(p.max, 1600.0);
    assert_eq!(rating.sample.as_ref().unwrap().mean, 1000.0);
}
