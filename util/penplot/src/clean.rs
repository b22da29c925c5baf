use tracing::trace;

use crate::{command::{Command, CommandKind}, config::PlotterConfiguration, coordinates::Point, error::Result, parse::Word};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PenState { Up, Down }

/// Normalizes feed rates and drops zero-length moves, one command at a time.
pub struct StreamCleaner<'a> {
    config: &'a PlotterConfiguration,
    pen: PenState,
    previous_kind: Option<CommandKind>,
    last_position: Option<Point>,
}
impl<'a> StreamCleaner<'a> {
    pub fn new(config: &'a PlotterConfiguration) -> Self {
        StreamCleaner {
            config,
            pen: PenState::Up,
            previous_kind: None,
            last_position: None,
        }
    }
    pub fn pen(&self) -> PenState {
        self.pen
    }
    fn is_degenerate(&self, position: Point) -> bool {
        self.last_position.map_or(false, |last| last.distance_to(position) == 0.0)
    }
    /// Returns the command to write out, or `None` if it should be dropped.
    pub fn feed(&mut self, mut command: Command) -> Result<Option<Command>> {
        match command.kind() {
            CommandKind::PenUp => self.pen = PenState::Up,
            CommandKind::PenDown => self.pen = PenState::Down,
            _ => (),
        }
        if command.kind() == CommandKind::Move && command.code() == self.config.travel_code {
            if self.pen == PenState::Up {
                return Ok(Some(self.keep(command)));
            }
            // A travel move with the pen down draws, so it becomes a drawn move.
            let position = command.require_coordinate()?;
            if self.is_degenerate(position) {
                trace!("dropping zero-length move {:?}", command.text());
                return Ok(None);
            }
            let draw_code = &self.config.draw_code;
            command.rewrite(|line| line.set_code(draw_code));
            return Ok(Some(self.keep(command)));
        }
        if self.is_drawn_move(&command) && command.coordinate().map_or(false, |position| self.is_degenerate(position)) {
            trace!("dropping zero-length move {:?}", command.text());
            return Ok(None);
        }
        Ok(Some(self.keep(command)))
    }
    fn is_drawn_move(&self, command: &Command) -> bool {
        command.kind() == CommandKind::Move && command.code() == self.config.draw_code
    }
    fn keep(&mut self, mut command: Command) -> Command {
        if self.is_drawn_move(&command) && command.coordinate().is_some() {
            if self.previous_kind == Some(CommandKind::PenDown) {
                if !command.has_field('F') {
                    let feedrate = self.config.feedrate_value();
                    command.rewrite(|line| line.insert_after_code(Word::new('F', feedrate)));
                }
            } else if command.has_field('F') {
                command.rewrite(|line| line.remove('F'));
            }
        }
        self.previous_kind = Some(command.kind());
        if let Some(position) = command.coordinate() {
            self.last_position = Some(position);
        }
        command
    }
}

/// Lazy adaptor running a [`StreamCleaner`] over a stream; stops after the first error.
pub struct CleanedCommands<'a, I> {
    cleaner: StreamCleaner<'a>,
    commands: I,
    finished: bool,
}

pub fn clean_commands<I: IntoIterator<Item = Result<Command>>>(
    config: &PlotterConfiguration,
    commands: I,
) -> CleanedCommands<'_, I::IntoIter> {
    CleanedCommands {
        cleaner: StreamCleaner::new(config),
        commands: commands.into_iter(),
        finished: false,
    }
}

impl<'a, I: Iterator<Item = Result<Command>>> Iterator for CleanedCommands<'a, I> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let result = self.commands.next()?.and_then(|command| self.cleaner.feed(command));
            match result {
                Ok(Some(command)) => return Some(Ok(command)),
                Ok(None) => (),
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
        None
    }
}
