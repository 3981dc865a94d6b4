use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "wasm", derive(serde::Serialize))]
pub enum OutputBlock {
    Title(String),
    Text(String),
    Event(String),
    Exits(String),
    Item(String),
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn event(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Event(s));
        }
    }

    /// Title that is kept even when blank.
    pub fn heading(&mut self, s: impl Into<String>) {
        self.blocks.push(OutputBlock::Title(s.into()));
    }

    /// Text line that is kept even when blank.
    pub fn line(&mut self, s: impl Into<String>) {
        self.blocks.push(OutputBlock::Text(s.into()));
    }

    pub fn exits(&mut self, s: impl Into<String>) {
        self.blocks.push(OutputBlock::Exits(s.into()));
    }

    pub fn item(&mut self, s: impl Into<String>) {
        self.blocks.push(OutputBlock::Item(s.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the blocks as terminal lines.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut started_events = false;

        for (i, block) in self.blocks.iter().enumerate() {
            match block {
                OutputBlock::Title(t) => writeln!(w, "\n{}", t)?,
                OutputBlock::Text(line) | OutputBlock::Exits(line) | OutputBlock::Item(line) => {
                    writeln!(w, "{}", line)?
                }
                OutputBlock::Event(ev) => {
                    if !started_events {
                        if i > 0 {
                            writeln!(w)?; // visual separation before first event
                        }
                        started_events = true;
                    }
                    writeln!(w, "{}", ev)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_dropped() {
        let mut out = Output::new();
        out.say("   ");
        out.event("\n");
        assert!(out.is_empty());
    }

    #[test]
    fn heading_and_line_keep_blank_text() {
        let mut out = Output::new();
        out.heading("");
        out.line("");

        let mut buf = Vec::new();
        out.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\n\n\n");
    }

    #[test]
    fn writes_title_with_leading_blank_line() {
        let mut out = Output::new();
        out.heading("Hall");
        out.say("A long hall.");
        out.exits("Exits: south");

        let mut buf = Vec::new();
        out.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\nHall\nA long hall.\nExits: south\n"
        );
    }

    #[test]
    fn separates_first_event_from_earlier_text() {
        let mut out = Output::new();
        out.say("Welcome!");
        out.event("A storm rolls in.");
        out.event("  [hide] Hide -> You stay dry.");

        let mut buf = Vec::new();
        out.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Welcome!\n\nA storm rolls in.\n  [hide] Hide -> You stay dry.\n"
        );
    }
}
