use std::iter::once;

use itertools::Itertools;

use crate::{command::{Command, CommandKind}, config::PlotterConfiguration, error::Result, tour::TourStep};

/// Flattens a tour back into a command stream, led by a pen-up so the
/// controller starts from a known state.
pub fn assemble<'a>(config: &PlotterConfiguration, tour: &'a [TourStep]) -> impl Iterator<Item = Command> + 'a {
    once(Command::classify(config, &config.pen_up)).chain(
        tour.iter().flat_map(|step| step.stroke.commands(step.orientation).cloned())
    )
}

/// Distance travelled with the pen lifted between consecutive strokes.
pub fn total_penup_travel(tour: &[TourStep]) -> f64 {
    tour.iter().tuple_windows().map(|(previous, next)| previous.end().distance_to(next.start())).sum()
}

/// Distance travelled between consecutive moves of the whole tour, lifted or not.
pub fn total_travel(tour: &[TourStep]) -> Result<f64> {
    let positions = tour.iter()
        .flat_map(|step| step.stroke.commands(step.orientation))
        .filter(|command| command.kind() == CommandKind::Move)
        .map(Command::require_coordinate)
        .collect::<Result<Vec<_>>>()?;
    Ok(positions.iter().tuple_windows().map(|(previous, next)| previous.distance_to(*next)).sum())
}
