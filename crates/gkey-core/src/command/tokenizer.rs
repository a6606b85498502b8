// GKey Command API - Command Line Tokenizer
// Splits operator input like "join 5 secret" into a verb and its parameters

use smallvec::SmallVec;

/// Most parameters any verb consumes
pub const MAX_ARGS: usize = 2;

/// A tokenized command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// First token, empty for a blank line
    pub verb: String,
    /// Up to [`MAX_ARGS`] parameters following the verb
    pub args: SmallVec<[String; MAX_ARGS]>,
}

impl CommandLine {
    /// Get a parameter by position
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|s| s.as_str())
    }
}

/// Tokenize a command line.
///
/// Tokens are separated by ASCII spaces; runs of spaces never produce empty
/// tokens. Tokens after the second parameter are discarded.
///
/// # Examples
/// ```
/// use gkey_core::command::tokenize;
/// let line = tokenize("join 5 secret");
/// assert_eq!(line.verb, "join");
/// assert_eq!(line.args.as_slice(), ["5", "secret"]);
/// ```
pub fn tokenize(line: &str) -> CommandLine {
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());

    let verb = tokens.next().unwrap_or_default().to_string();
    let args = tokens.take(MAX_ARGS).map(str::to_string).collect();

    CommandLine { verb, args }
}
