use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{Error, Result, SpanningTree, Tour, algo::solver::Solution, options::SolverOptions};

/// Weight on the first line, then one `a b` edge per line.
impl fmt::Display for SpanningTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:.2}", self.weight())?;
        for (a, b) in self.edges() {
            writeln!(f, "{a} {b}")?;
        }
        Ok(())
    }
}

/// Length on the first line, then the visiting order on one line.
impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:.2}", self.length())?;
        let mut order = self.order().iter();
        if let Some(first) = order.next() {
            write!(f, "{first}")?;
            for idx in order {
                write!(f, " {idx}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spanning(tree) => tree.fmt(f),
            Self::Tour(tour) => tour.fmt(f),
        }
    }
}

/// Writes `solution` to `--output` when given, stdout otherwise.
pub fn write_solution(solution: &Solution, options: &SolverOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::invalid_input(format!("failed to create {}: {e}", path.display()))
            })?;
            write_to(solution, BufWriter::new(file))?;
            log::info!("output: wrote path={}", path.display());
        }
        None => write_to(solution, BufWriter::new(io::stdout().lock()))?,
    }
    Ok(())
}

fn write_to(solution: &Solution, mut writer: impl Write) -> Result<()> {
    write!(writer, "{solution}")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_to;
    use crate::{Point, SpanningTree, Tour, algo::solver::Solution};

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn spanning_tree_lists_weight_then_edges() {
        let pts = points(&[(0, 0), (1, 1), (3, 1), (-1, -1)]);
        let tree = SpanningTree::build(&pts).expect("build");
        assert_eq!(tree.to_string(), "4.83\n0 1\n1 2\n0 3\n");
    }

    #[test]
    fn single_point_tree_prints_only_the_weight() {
        let tree = SpanningTree::build(&points(&[(2, 2)])).expect("build");
        assert_eq!(tree.to_string(), "0.00\n");
    }

    #[test]
    fn tour_lists_length_then_order_without_trailing_space() {
        let tour = Tour::new(vec![0, 2, 1], 34.142_135);
        assert_eq!(tour.to_string(), "34.14\n0 2 1\n");
    }

    #[test]
    fn solution_writes_through_any_writer() {
        let tour = Tour::new(vec![0, 1, 2, 3], 16.0);
        let mut buf = Vec::new();
        write_to(&Solution::Tour(tour), &mut buf).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "16.00\n0 1 2 3\n");
    }
}
