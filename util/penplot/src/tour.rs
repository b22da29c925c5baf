use std::cmp::Ordering;

use tracing::debug;

use crate::{error::{PlotterError, Result}, stroke::{Orientation, Stroke}, coordinates::Point};

#[derive(Debug, Clone)]
pub struct TourStep {
    pub stroke: Stroke,
    pub orientation: Orientation,
}
impl TourStep {
    pub fn start(&self) -> Point {
        self.stroke.start(self.orientation)
    }
    pub fn end(&self) -> Point {
        self.stroke.end(self.orientation)
    }
}

pub type Tour = Vec<TourStep>;

/// Keeps the input order with every stroke drawn forward.
pub fn document_order(strokes: impl IntoIterator<Item = Stroke>) -> Tour {
    strokes.into_iter().map(|stroke| TourStep { stroke, orientation: Orientation::Forward }).collect()
}

struct Candidate {
    distance: f64,
    orientation: Orientation,
    // Position in the pool, which keeps the original input order.
    position: usize,
}
impl Candidate {
    fn compare(&self, other: &Candidate) -> Ordering {
        self.distance.total_cmp(&other.distance)
            .then(self.orientation.cmp(&other.orientation))
            .then(self.position.cmp(&other.position))
    }
}

/// Greedy nearest-neighbour ordering: starting with the stroke at `index`,
/// repeatedly append whichever remaining stroke has an endpoint closest to
/// where the pen currently is, drawing it reversed when its end is the closer
/// endpoint.
///
/// Candidates compare by distance, then forward before reversed, then lowest
/// original index. This is O(n^2) and makes no optimality claim.
pub fn reorder_greedy(strokes: impl IntoIterator<Item = Stroke>, index: usize) -> Result<Tour> {
    let mut pool: Vec<Stroke> = strokes.into_iter().collect();
    if pool.is_empty() {
        return Ok(Vec::new());
    }
    if index >= pool.len() {
        return Err(PlotterError::StartIndexOutOfRange { index, len: pool.len() });
    }
    let mut tour = Vec::with_capacity(pool.len());
    tour.push(TourStep { stroke: pool.remove(index), orientation: Orientation::Forward });
    let mut tail = tour[0].end();

    while !pool.is_empty() {
        let nearest = pool.iter().enumerate().flat_map(|(position, stroke)| [
            Candidate { distance: tail.distance_to(stroke.start(Orientation::Forward)), orientation: Orientation::Forward, position },
            Candidate { distance: tail.distance_to(stroke.start(Orientation::Reversed)), orientation: Orientation::Reversed, position },
        ]).min_by(Candidate::compare);
        let Some(nearest) = nearest else { break };
        let step = TourStep { stroke: pool.remove(nearest.position), orientation: nearest.orientation };
        tail = step.end();
        tour.push(step);
    }
    debug!(
        "ordered {} strokes, {} reversed",
        tour.len(),
        tour.iter().filter(|step| step.orientation == Orientation::Reversed).count()
    );
    Ok(tour)
}
