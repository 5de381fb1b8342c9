//! Storage readers and writers: Lichess puzzle CSV in, JSONL devset out.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use log::{debug, info, warn};
use crate::error::{IoError, RecordError};
use crate::example::DecisionExample;
use crate::puzzle::{parse_move_list, parse_themes, PuzzleAttributes, PuzzleRecord};

#[derive(Debug, Default)]
pub struct LoadedPuzzles {
    pub records: Vec<PuzzleRecord>,
    /// Lines that were neither a header nor a parsable puzzle.
    pub malformed: usize,
}

/// Parses one line of the Lichess puzzle export:
/// `PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags`.
/// FENs and move lists contain spaces but never commas.
pub fn parse_lichess_csv_line(line: &str) -> Result<PuzzleRecord, RecordError> {
    let parts = line.trim_end().splitn(10, ',').collect::<Vec<_>>();
    let field = |i: usize, name: &'static str| {
        parts.get(i).map(|s| s.trim()).filter(|s| !s.is_empty()).ok_or(RecordError::MissingField(name))
    };
    let id = field(0, "PuzzleId")?;
    let fen = field(1, "FEN")?;
    let moves = parse_move_list(field(2, "Moves")?)?;
    let rating = number(field(3, "Rating")?, "Rating")?;
    let rating_deviation = number(field(4, "RatingDeviation")?, "RatingDeviation")?;
    let popularity = number(field(5, "Popularity")?, "Popularity")?;
    let themes = parts.get(7).map(|t| parse_themes(t)).unwrap_or_default();
    Ok(PuzzleRecord {
        id: id.to_string(),
        start_position: fen.to_string(),
        solution_moves: moves,
        attributes: PuzzleAttributes { rating, popularity, rating_deviation, themes },
    })
}

fn number<T: std::str::FromStr>(raw: &str, field: &'static str) -> Result<T, RecordError> {
    raw.parse::<T>().map_err(|_| RecordError::InvalidNumber { field, value: raw.to_string() })
}

pub fn load_lichess_csv<P: AsRef<Path>>(path: P) -> Result<LoadedPuzzles, IoError> {
    let path = path.as_ref();
    let io_err = |source| IoError::Io { path: path.to_path_buf(), source };
    let rdr = BufReader::new(File::open(path).map_err(io_err)?);
    let mut out = LoadedPuzzles::default();
    for (lineno, line) in rdr.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let l = line.trim();
        if l.is_empty() || l.starts_with("PuzzleId") { continue; }
        match parse_lichess_csv_line(l) {
            Ok(rec) => out.records.push(rec),
            Err(e) => {
                debug!("{}:{}: {}", path.display(), lineno + 1, e);
                out.malformed += 1;
            }
        }
    }
    info!("loaded {} puzzles from {} ({} malformed lines)", out.records.len(), path.display(), out.malformed);
    Ok(out)
}

pub fn write_devset_jsonl<P: AsRef<Path>>(path: P, examples: &[DecisionExample]) -> Result<(), IoError> {
    let path = path.as_ref();
    let io_err = |source| IoError::Io { path: path.to_path_buf(), source };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    for (i, ex) in examples.iter().enumerate() {
        let json = serde_json::to_string(ex)
            .map_err(|source| IoError::Json { path: path.to_path_buf(), line: i + 1, source })?;
        writeln!(w, "{}", json).map_err(io_err)?;
    }
    w.flush().map_err(io_err)
}

/// Loads a JSONL devset. Lines that fail to parse, or whose expected move is
/// not among their options, are skipped with a warning. A devset with no
/// usable line is an error.
pub fn load_devset_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<DecisionExample>, IoError> {
    let path = path.as_ref();
    let io_err = |source| IoError::Io { path: path.to_path_buf(), source };
    let rdr = BufReader::new(File::open(path).map_err(io_err)?);
    let mut examples = Vec::new();
    let mut rejected = 0usize;
    for (lineno, line) in rdr.lines().enumerate() {
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() { continue; }
        match serde_json::from_str::<DecisionExample>(&line) {
            Ok(ex) if ex.is_valid() => examples.push(ex),
            Ok(ex) => {
                debug!("{}:{}: `{}` not among options", path.display(), lineno + 1, ex.expected_option);
                rejected += 1;
            }
            Err(e) => {
                debug!("{}:{}: {}", path.display(), lineno + 1, e);
                rejected += 1;
            }
        }
    }
    if rejected > 0 { warn!("skipped {} malformed devset lines in {}", rejected, path.display()); }
    if examples.is_empty() { return Err(IoError::EmptyDevset { path: path.to_path_buf() }); }
    info!("loaded {} examples from {}", examples.len(), path.display());
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "00008,r6k/pp2r2p/4Rp1Q/3p4/8/1N1P2R1/PqP2bPP/7K b - - 0 24,f2g3 e6e7 b2b1 b3c1 b1c1 h6c1,1913,76,94,6230,crushing hangingPiece long middlegame,https://lichess.org/787zsVup/black#47,";

    #[test]
    fn parses_lichess_line() {
        let rec = parse_lichess_csv_line(LINE).unwrap();
        assert_eq!(rec.id, "00008");
        assert_eq!(rec.start_position, "r6k/pp2r2p/4Rp1Q/3p4/8/1N1P2R1/PqP2bPP/7K b - - 0 24");
        assert_eq!(rec.solution_moves.len(), 6);
        assert_eq!(rec.attributes.rating, 1913);
        assert_eq!(rec.attributes.rating_deviation, 76);
        assert_eq!(rec.attributes.popularity, 94);
        assert_eq!(rec.attributes.themes, vec!["crushing", "hangingPiece", "long", "middlegame"]);
    }

    #[test]
    fn rejects_bad_fields() {
        assert!(matches!(parse_lichess_csv_line("x,fen,e2e4,abc,1,1,1,t,u,"), Err(RecordError::InvalidNumber { field: "Rating", .. })));
        assert!(matches!(parse_lichess_csv_line("x,fen,e2e4 O-O,1500,1,1,1,t,u,"), Err(RecordError::InvalidMove { .. })));
        assert!(matches!(parse_lichess_csv_line("x,fen"), Err(RecordError::MissingField("Moves"))));
    }

    #[test]
    fn negative_popularity() {
        let rec = parse_lichess_csv_line("y,8/8/8/8/8/8/8/k6K w - - 0 1,h1g1,900,80,-12,3,endgame,u,").unwrap();
        assert_eq!(rec.attributes.popularity, -12);
    }
}
