use std::collections::VecDeque;

use tracing::debug;

use crate::{command::{Command, CommandKind}, config::PlotterConfiguration, error::{PlotterError, Result}};

/// Lazily removes pen lifts that barely move.
///
/// Created by [`prune_short_penups`].
pub struct PrunedCommands<I> {
    commands: I,
    min_penup_travel: f64,
    first: Option<Command>,
    last_emitted: Option<Command>,
    queued: VecDeque<Command>,
    finished: bool,
}

/// Removes every pen-up ... pen-down bracket whose travel is at most the
/// configured minimum, measured from the last command before the lift to the
/// last command inside it.
///
/// The stream is expected to open with a pen-up, which always passes through.
/// A lift that is never followed by a pen-down keeps just the pen-up and ends
/// the stream.
pub fn prune_short_penups<I: IntoIterator<Item = Command>>(
    config: &PlotterConfiguration,
    commands: I,
) -> Result<PrunedCommands<I::IntoIter>> {
    let mut commands = commands.into_iter();
    let first = commands.next().ok_or(PlotterError::EmptyStream)?;
    Ok(PrunedCommands {
        commands,
        min_penup_travel: config.min_penup_travel,
        first: Some(first),
        last_emitted: None,
        queued: VecDeque::new(),
        finished: false,
    })
}

impl<I: Iterator<Item = Command>> PrunedCommands<I> {
    fn emit(&mut self, command: Command) -> Option<Result<Command>> {
        self.last_emitted = Some(command.clone());
        Some(Ok(command))
    }
    fn fail(&mut self, error: PlotterError) -> Option<Result<Command>> {
        self.finished = true;
        Some(Err(error))
    }
    fn lift_travel(&self, penup: &Command, moves: &[Command]) -> Result<f64> {
        let last_move = moves.last().ok_or_else(|| PlotterError::EmptyLiftBracket { line: penup.text().to_string() })?;
        let before = self.last_emitted.as_ref().ok_or_else(|| PlotterError::CoordinateMissing { line: penup.text().to_string() })?;
        Ok(last_move.require_coordinate()?.distance_to(before.require_coordinate()?))
    }
}

impl<I: Iterator<Item = Command>> Iterator for PrunedCommands<I> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(command) = self.queued.pop_front() {
            return Some(Ok(command));
        }
        if self.finished {
            return None;
        }
        if let Some(first) = self.first.take() {
            return self.emit(first);
        }
        loop {
            let command = self.commands.next()?;
            if command.kind() != CommandKind::PenUp {
                return self.emit(command);
            }
            let penup = command;
            let mut moves = Vec::new();
            let pendown = loop {
                match self.commands.next() {
                    Some(command) if command.kind() == CommandKind::PenDown => break command,
                    Some(command) => moves.push(command),
                    None => {
                        self.finished = true;
                        return Some(Ok(penup));
                    }
                }
            };
            let travel = match self.lift_travel(&penup, &moves) {
                Ok(travel) => travel,
                Err(error) => return self.fail(error),
            };
            if travel <= self.min_penup_travel {
                debug!("dropping pen lift travelling {:.3}mm", travel);
                continue;
            }
            self.queued.extend(moves);
            self.queued.push_back(pendown.clone());
            self.last_emitted = Some(pendown);
            return Some(Ok(penup));
        }
    }
}
