use super::AlignmentSink;
use crate::error::{ConvertError, Result};
use log::debug;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

const PIPE_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Pipes SAM text into `samtools view -b`.
///
/// Dropping the sink without calling [`AlignmentSink::finish`] kills and reaps
/// the child process.
pub struct SamtoolsSink {
    program: String,
    child: Option<Child>,
    stdin: Option<BufWriter<ChildStdin>>,
}

impl SamtoolsSink {
    pub fn spawn(program: &str, threads: usize, output: &Path) -> Result<Self> {
        let mut command = Command::new(program);
        command
            .arg("view")
            .arg("-@")
            .arg(threads.to_string())
            .arg("-b")
            .arg("-o")
            .arg(output)
            .arg("-");
        Self::from_command(command, program)
    }

    /// Starts `command` with a piped stdin; `program` names it in messages.
    fn from_command(mut command: Command, program: &str) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| ConvertError::SinkOpen {
                message: format!("failed to start {}", program),
                source: Some(source),
            })?;

        let stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConvertError::SinkOpen {
                    message: format!("{} stdin is not available", program),
                    source: None,
                });
            }
        };

        debug!("Spawned {} (pid {})", program, child.id());

        Ok(Self {
            program: program.to_string(),
            child: Some(child),
            stdin: Some(BufWriter::with_capacity(PIPE_BUFFER_CAPACITY, stdin)),
        })
    }

    /// Process id of the encoder while it is still owned by the sink.
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    fn stdin(&mut self) -> io::Result<&mut BufWriter<ChildStdin>> {
        self.stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "encoder input is closed"))
    }
}

impl Write for SamtoolsSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdin()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.stdin()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdin()?.flush()
    }
}

impl AlignmentSink for SamtoolsSink {
    fn finish(mut self: Box<Self>) -> Result<()> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin.flush().map_err(ConvertError::SinkWrite)?;
        }

        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child.wait().map_err(ConvertError::SinkWrite)?;
        if !status.success() {
            return Err(ConvertError::EncoderExit(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

impl Drop for SamtoolsSink {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            self.stdin.take();
            let _ = child.wait();
        }
    }
}
