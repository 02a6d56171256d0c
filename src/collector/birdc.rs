use crate::collector::StatusSource;
use crate::error::CollectorError;
use itertools::Itertools;
use log::{debug, warn};
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Bound on a single `birdc` call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const QUERY: [&str; 3] = ["show", "protocols", "all"];

/// Printed by `birdc` when the daemon's control socket cannot be reached.
const CONNECT_FAILURE: &str = "Unable to connect to server control socket";

/// Queries a running BIRD daemon through its `birdc` control client.
#[derive(Debug, Clone)]
pub struct BirdcCollector {
    program: PathBuf,
    socket: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Default for BirdcCollector {
    fn default() -> Self {
        BirdcCollector {
            program: PathBuf::from("birdc"),
            socket: None,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl BirdcCollector {
    pub fn new() -> BirdcCollector {
        BirdcCollector::default()
    }

    /// Use a different client binary, e.g. an absolute path to `birdc`.
    pub fn with_program<P: Into<PathBuf>>(self, program: P) -> BirdcCollector {
        BirdcCollector {
            program: program.into(),
            ..self
        }
    }

    /// Talk to the daemon on a specific control socket instead of the compiled-in default.
    pub fn with_socket<P: Into<PathBuf>>(self, socket: Option<P>) -> BirdcCollector {
        BirdcCollector {
            socket: socket.map(Into::into),
            ..self
        }
    }

    /// Bound the wait on `birdc`. `None` waits forever.
    pub fn with_timeout(self, timeout: Option<Duration>) -> BirdcCollector {
        BirdcCollector { timeout, ..self }
    }

    fn args(&self) -> Vec<OsString> {
        let mut args = vec![];
        if let Some(socket) = &self.socket {
            args.push(OsString::from("-s"));
            args.push(socket.clone().into_os_string());
        }
        args.extend(QUERY.iter().map(OsString::from));
        args
    }

    fn command_line(&self) -> String {
        let args = self.args();
        std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(|a| a.as_os_str()))
            .map(|a| a.to_string_lossy())
            .join(" ")
    }
}

impl StatusSource for BirdcCollector {
    fn collect(&self) -> Result<String, CollectorError> {
        let command = self.command_line();
        debug!("running {}", command);

        let io_error = |source: io::Error| CollectorError::Io {
            command: command.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_error)?;

        // drain both pipes while waiting so a large dump cannot block the child
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            None => child.wait().map_err(io_error)?,
            Some(timeout) => match child.wait_timeout(timeout).map_err(io_error)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CollectorError::Timeout { command, timeout });
                }
            },
        };

        let stdout = join(stdout).map_err(io_error)?;
        let stderr = join(stderr).map_err(io_error)?;
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();

        if !status.success() {
            return Err(CollectorError::ExitStatus {
                command,
                status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            warn!("{} wrote to stderr: {}", command, stderr);
        }

        let output = String::from_utf8(stdout)?;
        if let Some(line) = output.lines().find(|l| l.contains(CONNECT_FAILURE)) {
            return Err(CollectorError::Daemon(line.trim().to_string()));
        }
        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = vec![];
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join(handle: JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe reader panicked")))
}
