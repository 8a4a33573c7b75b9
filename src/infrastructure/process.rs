//! Local process execution
//!
//! Every command floop issues, local or through `docker-machine ssh`, goes
//! through [`run`]. The command line is split with shell rules so the rendered
//! string logged by the lifecycle layer is exactly what gets executed.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{FloopError, FloopResult};

/// Where echoed output lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoStream {
    #[default]
    Stdout,
    /// Keeps stdout free for machine-readable reports
    Stderr,
}

/// Live echo of a command's stdout, one `label: line` per output line
#[derive(Debug, Clone, Copy)]
pub struct Echo<'a> {
    pub label: &'a str,
    pub stream: EchoStream,
}

impl Echo<'_> {
    fn line(&self, text: &str) {
        let text = text.trim_end_matches(['\r', '\n']);
        match self.stream {
            EchoStream::Stdout => println!("{}: {}", self.label, text),
            EchoStream::Stderr => eprintln!("{}: {}", self.label, text),
        }
    }
}

/// Captured output of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Run `command` and wait for it to finish.
///
/// When `echo` is set, each stdout line is printed as soon as it is read,
/// prefixed with the echo label. With `check`, a non-zero exit becomes
/// [`FloopError::RemoteCommand`] carrying the command's stderr.
pub fn run(command: &str, check: bool, echo: Option<Echo<'_>>) -> FloopResult<CommandOutput> {
    let argv = shlex::split(command).ok_or_else(|| FloopError::RemoteCommand {
        command: command.to_string(),
        stderr: "unbalanced quotes in command line".to_string(),
    })?;
    let Some((program, args)) = argv.split_first() else {
        return Err(FloopError::RemoteCommand {
            command: command.to_string(),
            stderr: "empty command line".to_string(),
        });
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| FloopError::CommandSpawn {
            program: program.clone(),
            source,
        })?;

    // Drain stderr on its own thread so a chatty command cannot block on a full pipe.
    let stderr_pipe = child.stderr.take();
    let stderr_reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr_pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    });

    let mut stdout = String::new();
    let read = match child.stdout.take() {
        Some(pipe) => read_lines(pipe, echo, &mut stdout),
        None => Ok(()),
    };
    if read.is_err() {
        let _ = child.kill();
    }

    // Reap the child and the stderr thread before reporting a read failure.
    let status = child.wait();
    let stderr = stderr_reader.join().unwrap_or_default();
    read?;
    let status = status?;

    if check && !status.success() {
        let stderr = match stderr.trim() {
            "" => format!("exited with {}", status),
            trimmed => trimmed.to_string(),
        };
        return Err(FloopError::RemoteCommand {
            command: command.to_string(),
            stderr,
        });
    }

    Ok(CommandOutput {
        stdout,
        stderr,
        status,
    })
}

fn read_lines(pipe: impl Read, echo: Option<Echo<'_>>, out: &mut String) -> std::io::Result<()> {
    let mut reader = BufReader::new(pipe);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&line);
        if let Some(echo) = &echo {
            echo.line(&text);
        }
        out.push_str(&text);
    }
}
