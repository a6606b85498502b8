// GKey Command API
// Console command tokenizing, verb lookup and dispatch

pub mod dispatcher;
pub mod tokenizer;
pub mod verb;

pub use dispatcher::{CommandContext, DispatchOutcome, Dispatcher};
pub use tokenizer::{tokenize, CommandLine, MAX_ARGS};
pub use verb::{resolve, Action, Verb};
