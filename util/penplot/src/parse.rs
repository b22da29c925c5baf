/// A single address/value pair such as `X250.066` or `G0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub head: char,
    pub value: String,
}
impl Word {
    pub fn new(head: char, value: impl Into<String>) -> Self {
        Self { head, value: value.into() }
    }
}

/// Word-level view of one line. The first word is the command code.
///
/// Whatever follows the last word (a `;` or `( )` comment, or anything else
/// that does not read as a word) is kept as an opaque tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcodeLine {
    pub words: Vec<Word>,
    pub tail: String,
}

// input should be trimmed.
fn parse_word(input: &str) -> Option<(&str, Word)> {
    let head = input.chars().next().filter(|c| c.is_alphabetic())?;
    let input = &input[head.len_utf8()..];
    let last = input.find(|v: char| !v.is_alphanumeric() && v != '.' && v != '-' && v != '+').unwrap_or(input.len());
    Some((
        &input[last..],
        Word::new(head, &input[..last]),
    ))
}

/// Splits a line into words, stopping at the first comment or token that is
/// not a word. Returns `None` when the line does not start with a word
/// (comments, program markers, blank lines); such lines are carried through
/// untouched.
pub fn parse_line(mut input: &str) -> Option<GcodeLine> {
    let mut words = Vec::new();
    let mut tail = "";
    loop {
        input = input.trim_start();
        if input.is_empty() {
            break;
        }
        match parse_word(input) {
            Some((rest, word)) => {
                words.push(word);
                input = rest;
            }
            None => {
                tail = input.trim_end();
                break;
            }
        }
    }
    if words.is_empty() {
        None
    } else {
        Some(GcodeLine { words, tail: tail.to_string() })
    }
}

impl GcodeLine {
    pub fn get(&self, head: char) -> Option<&str> {
        self.words.iter().skip(1).find(|word| word.head == head).map(|word| word.value.as_str())
    }
    pub fn get_f64(&self, head: char) -> Option<f64> {
        self.get(head).and_then(|value| value.parse::<f64>().ok())
    }
    pub fn has(&self, head: char) -> bool {
        self.get(head).is_some()
    }
    /// Replaces the value of an existing field; returns false if the field is absent.
    pub fn set(&mut self, head: char, value: &str) -> bool {
        match self.words.iter_mut().skip(1).find(|word| word.head == head) {
            Some(word) => {
                word.value = value.to_string();
                true
            }
            None => false,
        }
    }
    pub fn remove(&mut self, head: char) {
        let mut index = 1;
        while index < self.words.len() {
            if self.words[index].head == head {
                self.words.remove(index);
            } else {
                index += 1;
            }
        }
    }
    /// Inserts a field directly after the command code.
    pub fn insert_after_code(&mut self, word: Word) {
        self.words.insert(1.min(self.words.len()), word);
    }
    /// Swaps the command code for another one, e.g. `G1` for `G0`.
    pub fn set_code(&mut self, code: &str) {
        if let Some((_, word)) = parse_word(code) {
            match self.words.first_mut() {
                Some(first) => *first = word,
                None => self.words.push(word),
            }
        }
    }
}
