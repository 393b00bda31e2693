use std::{fs::File, io::Read};

use terra_tour_derive::KvDisplay;

use crate::{Error, Point, Result, options::SolverOptions};

/// The full point table, fixed before any algorithm runs.
#[derive(Clone, Debug, KvDisplay)]
pub struct PointSet {
    #[kv(name = "n", fmt = "len")]
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Reads from `--input` when given, stdin otherwise.
    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        match options.input_path() {
            Some(path) => {
                let file = File::open(path).map_err(|e| {
                    Error::invalid_input(format!("failed to open {}: {e}", path.display()))
                })?;
                Self::from_reader(file)
            }
            None => Self::from_reader(std::io::stdin().lock()),
        }
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// Parses a count followed by that many `x y` integer pairs, in any
    /// whitespace layout.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace().enumerate();

        let (_, count_tok) = tokens
            .next()
            .ok_or_else(|| Error::invalid_input("No points provided"))?;
        let count: usize = count_tok.parse().map_err(|_| {
            Error::invalid_input(format!("Token 1: invalid point count: {count_tok}"))
        })?;
        if count == 0 {
            return Err(Error::invalid_input("No points provided"));
        }

        let mut next_coord = |axis: &str, point: usize| -> Result<i32> {
            let (idx, tok) = tokens.next().ok_or_else(|| {
                Error::invalid_input(format!(
                    "expected {count} points but input ended at point {point} ({axis})"
                ))
            })?;
            tok.parse().map_err(|_| {
                Error::invalid_input(format!("Token {}: invalid {axis} coordinate: {tok}", idx + 1))
            })
        };

        // Each point needs at least two tokens of one byte plus a separator.
        let mut points = Vec::with_capacity(count.min(input.len() / 4));
        for point in 0..count {
            let x = next_coord("x", point)?;
            let y = next_coord("y", point)?;
            points.push(Point::new(x, y));
        }

        let trailing = tokens.count();
        if trailing > 0 {
            log::warn!("input: ignoring trailing tokens count={trailing}");
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Point {
        self.points[idx]
    }
}
