use crate::{
    Error, PointSet, Result, SpanningTree, Tour,
    algo::{branch_bound::BranchAndBound, insertion::cheapest_insertion_tour},
    constants::MIN_CYCLE_POINTS,
    options::Mode,
};

/// What a run produces, one variant per problem family.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution {
    Spanning(SpanningTree),
    Tour(Tour),
}

/// Runs the algorithm `mode` selects over `points`.
pub fn solve(points: &PointSet, mode: Mode) -> Result<Solution> {
    log::info!("solver: mode={mode} {points}");

    match mode {
        Mode::Mst => SpanningTree::build(points.points()).map(Solution::Spanning),
        Mode::FastTsp => {
            validate_cycle(points)?;
            let tour = cheapest_insertion_tour(points.points());
            tour.metrics(points.points());
            Ok(Solution::Tour(tour))
        }
        Mode::OptTsp => {
            validate_cycle(points)?;
            let seed = cheapest_insertion_tour(points.points());
            let (tour, stats) = BranchAndBound::new(points.points(), &seed).solve();
            log::info!(
                "solver: seed_length={:.2} final_length={:.2} {stats}",
                seed.length(),
                tour.length()
            );
            tour.metrics(points.points());
            Ok(Solution::Tour(tour))
        }
    }
}

fn validate_cycle(points: &PointSet) -> Result<()> {
    if points.len() < MIN_CYCLE_POINTS {
        return Err(Error::invalid_input(format!(
            "Need at least {MIN_CYCLE_POINTS} points for a tour, got {}",
            points.len()
        )));
    }
    Ok(())
}
