use std::{fmt::{Display, Formatter, self}, cell::Cell};

use crate::parse::{GcodeLine, Word};

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.head, self.value)
    }
}
impl Display for GcodeLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let needs_preceding_space = Cell::new(false);
        for word in &self.words {
            if needs_preceding_space.replace(true) {
                write!(f, " ")?;
            }
            write!(f, "{}", word)?;
        }
        if !self.tail.is_empty() {
            if needs_preceding_space.get() {
                write!(f, " ")?;
            }
            write!(f, "{}", self.tail)?;
        }
        Ok(())
    }
}
