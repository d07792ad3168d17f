//! Recording [`CommandRunner`] for unit tests.

use std::cell::RefCell;

use super::{CommandOutput, CommandRunner, OutputMode};
use crate::errors::{ClaspSecretsError, Result};

type Responder = Box<dyn Fn(&[String]) -> Result<CommandOutput>>;

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub mode: OutputMode,
}

impl Call {
    pub fn line(&self) -> String {
        self.args.join(" ")
    }
}

pub(crate) struct FakeRunner {
    calls: RefCell<Vec<Call>>,
    responder: Responder,
}

impl FakeRunner {
    pub fn new(responder: impl Fn(&[String]) -> Result<CommandOutput> + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// A runner for a repository the user can push to; every other
    /// command succeeds with empty output.
    pub fn pushable() -> Self {
        Self::new(|args| {
            if args.first().map(String::as_str) == Some("api") {
                ok(r#"{"permissions":{"push":true}}"#)
            } else {
                ok("")
            }
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Call::line).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, args: &[&str], stdin: Option<&str>, mode: OutputMode) -> Result<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| (*a).to_string()).collect();
        self.calls.borrow_mut().push(Call {
            args: args.clone(),
            stdin: stdin.map(str::to_string),
            mode,
        });
        (self.responder)(&args)
    }
}

pub(crate) fn ok(stdout: &str) -> Result<CommandOutput> {
    Ok(CommandOutput {
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code: Some(0),
    })
}

pub(crate) fn failed(code: i32, stderr: &str) -> Result<CommandOutput> {
    Ok(CommandOutput {
        stdout: String::new(),
        stderr: stderr.to_string(),
        exit_code: Some(code),
    })
}

pub(crate) fn spawn_error(message: &str) -> Result<CommandOutput> {
    Err(ClaspSecretsError::ExternalCommandFailure(message.to_string()))
}
