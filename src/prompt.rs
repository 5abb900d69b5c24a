use log::error;
use std::io::{BufRead, Write};

use crate::quiz::definition::QuestionType;
use crate::quiz::substitution::{Substitution, SubstitutionPolicy};

/// Asks the operator on the terminal whether a regular question may stand in for a
/// missing key question.
pub struct TerminalPrompt<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> TerminalPrompt<I, O> {
    pub fn new(input: I, output: O) -> Self {
        TerminalPrompt { input, output }
    }

    fn ask(&mut self, question_type: &QuestionType) -> std::io::Result<String> {
        writeln!(
            self.output,
            "Ran out of key {} questions. Substitute regular questions?",
            question_type
        )?;
        write!(self.output, "y/n: ")?;
        self.output.flush()?;
        let mut response = String::new();
        self.input.read_line(&mut response)?;
        Ok(response)
    }
}

impl<I: BufRead, O: Write> SubstitutionPolicy for TerminalPrompt<I, O> {
    fn decide(&mut self, question_type: &QuestionType) -> Substitution {
        match self.ask(question_type) {
            Ok(response) if response.trim().eq_ignore_ascii_case("y") => Substitution::Substitute,
            Ok(_) => Substitution::Fail,
            Err(e) => {
                error!("Could not read substitution answer: {}", e);
                Substitution::Fail
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decide(answer: &str) -> (Substitution, String) {
        let mut output = Vec::new();
        let decision = {
            let mut prompt = TerminalPrompt::new(Cursor::new(answer.as_bytes()), &mut output);
            prompt.decide(&QuestionType::new("MA"))
        };
        (decision, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_yes() {
        let (decision, printed) = decide("Y\n");
        assert_eq!(decision, Substitution::Substitute);
        assert!(printed.contains("Ran out of key MA questions"));
    }

    #[test]
    fn anything_else_declines() {
        assert_eq!(decide("n\n").0, Substitution::Fail);
        assert_eq!(decide("yes please\n").0, Substitution::Fail);
        assert_eq!(decide("").0, Substitution::Fail);
    }
}
