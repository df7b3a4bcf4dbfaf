use std::io::Write;

use crate::analysis::{Analysis, Deviation, Segment};
use crate::Error;

/// Characters of the prompt shown in the banner.
pub const PROMPT_EXCERPT_CHARS: usize = 100;

/// Human-readable diagnostics of one probe run.
pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, prompt: &str) -> Result<(), Error> {
        let excerpt: String = prompt.chars().take(PROMPT_EXCERPT_CHARS).collect();

        writeln!(self.out, "Testing the Gemini API...")?;
        writeln!(self.out, "Prompt: {}...", excerpt)?;
        Ok(())
    }

    pub fn response_text(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.out)?;
        writeln!(self.out, "Gemini response:")?;
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn analysis(&mut self, analysis: &Analysis) -> Result<(), Error> {
        writeln!(self.out)?;
        writeln!(self.out, "Analysis:")?;

        let segments = match analysis {
            Analysis::Unformatted => {
                writeln!(self.out, "Format not respected - no | separators")?;
                return Ok(());
            }
            Analysis::Segmented(segments) => segments,
        };

        writeln!(self.out, "Number of parts: {}", segments.len())?;
        for (index, segment) in segments.iter().enumerate() {
            self.segment(index + 1, segment)?;
        }

        Ok(())
    }

    fn segment(&mut self, number: usize, segment: &Segment) -> Result<(), Error> {
        writeln!(self.out, "Part {}: {}", number, segment.content)?;

        if let Some(choices) = &segment.choices {
            writeln!(self.out, "  -> Number of choices: {}", choices.len())?;
            for (index, choice) in choices.iter().enumerate() {
                writeln!(self.out, "     Choice {}: {}", index + 1, choice)?;
            }
        }

        Ok(())
    }

    pub fn verdict(&mut self, deviations: &[Deviation]) -> Result<(), Error> {
        writeln!(self.out)?;

        if deviations.is_empty() {
            writeln!(self.out, "Verdict: format respected")?;
            return Ok(());
        }

        writeln!(self.out, "Verdict: {} deviation(s)", deviations.len())?;
        for deviation in deviations {
            writeln!(self.out, "  - {}", deviation)?;
        }

        Ok(())
    }

    pub fn api_error(&mut self, status: u16, body: &str) -> Result<(), Error> {
        writeln!(self.out, "API error: {}", status)?;
        writeln!(self.out, "{}", body)?;
        Ok(())
    }

    pub fn transport_failure(&mut self, message: &str) -> Result<(), Error> {
        writeln!(self.out, "Error: {}", message)?;
        Ok(())
    }
}
