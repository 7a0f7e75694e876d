//! Tri-state interactive confirmation.

use std::io::{BufRead, BufReader, Stdin, Write};

/// Operator decision at the remediation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancel,
}

impl Answer {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Self::Yes),
            "n" | "no" => Some(Self::No),
            "c" | "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Presents a yes/no/cancel question and blocks until a valid answer.
pub trait ConfirmationPrompt {
    fn confirm(&mut self, question: &str) -> Answer;
}

/// Line-input prompt. Re-prompts indefinitely on invalid input; end of
/// input is treated as `Cancel` so a closed stdin cannot loop forever.
pub struct LinePrompt<R: BufRead> {
    input: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

pub fn stdin_prompt() -> LinePrompt<BufReader<Stdin>> {
    LinePrompt::new(BufReader::new(std::io::stdin()))
}

impl<R: BufRead> ConfirmationPrompt for LinePrompt<R> {
    fn confirm(&mut self, question: &str) -> Answer {
        loop {
            eprint!("{question} [y]es / [n]o / [c]ancel: ");
            let _ = std::io::stderr().flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return Answer::Cancel,
                Ok(_) => {}
            }
            if let Some(answer) = Answer::from_input(&line) {
                return answer;
            }
            eprintln!("Please answer y, n, or c.");
        }
    }
}

#[cfg(test)]
pub mod scripted {
    use super::{Answer, ConfirmationPrompt};
    use std::collections::VecDeque;

    /// Canned answers for engine tests.
    pub struct ScriptedPrompt {
        answers: VecDeque<Answer>,
        pub asked: usize,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[Answer]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: 0,
            }
        }
    }

    impl ConfirmationPrompt for ScriptedPrompt {
        fn confirm(&mut self, _question: &str) -> Answer {
            self.asked += 1;
            self.answers.pop_front().expect("prompt asked more than scripted")
        }
    }

    /// Fails the test if the engine prompts at all.
    pub struct RefusingPrompt;

    impl ConfirmationPrompt for RefusingPrompt {
        fn confirm(&mut self, question: &str) -> Answer {
            panic!("unexpected prompt: {question}");
        }
    }
}
