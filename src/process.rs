// src/process.rs

//! Subprocess execution with output forwarding.
//!
//! The public API is synchronous. Internally each call drives
//! `tokio::process` on its own current-thread runtime so that the child's
//! stderr and stdout pipes are drained together and neither can fill up and
//! stall the child.
//!
//! A caller that is already inside a tokio runtime cannot block on a second
//! one, so in that case the per-call runtime lives on a scoped helper
//! thread and output chunks are handed back over a channel.

use std::io::{self, Write};
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;

use anyhow::anyhow;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::debug;

use crate::errors::{Result, WorkerError};
use crate::types::SIGNALLED_EXIT_CODE;

const READ_CHUNK: usize = 8 * 1024;

/// Run `program` with `args` and wait for it to exit.
///
/// - The child's stderr is forwarded to `sink`.
/// - If `stdout_to_stderr` is set, the child's stdout is forwarded to `sink`
///   as well, interleaved in arrival order. Otherwise it is inherited.
/// - stdin is always inherited.
///
/// Returns the child's exit code, or [`SIGNALLED_EXIT_CODE`] if it has none.
pub fn run_subprocess(
    program: &str,
    args: &[String],
    sink: &mut dyn Write,
    stdout_to_stderr: bool,
) -> Result<i32> {
    if tokio::runtime::Handle::try_current().is_ok() {
        debug!(program, "inside a tokio runtime; running subprocess on a helper thread");
        return run_on_helper_thread(program, args, sink, stdout_to_stderr);
    }
    block_on_own_runtime(program, args, sink, stdout_to_stderr)
}

fn block_on_own_runtime(
    program: &str,
    args: &[String],
    sink: &mut dyn Write,
    stdout_to_stderr: bool,
) -> Result<i32> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run_subprocess_async(program, args, sink, stdout_to_stderr))
}

fn run_on_helper_thread(
    program: &str,
    args: &[String],
    sink: &mut dyn Write,
    stdout_to_stderr: bool,
) -> Result<i32> {
    let (tx, rx) = mpsc::channel::<Vec<u8>>();

    thread::scope(|scope| {
        let worker = scope.spawn(move || {
            let mut writer = ChunkSender(tx);
            block_on_own_runtime(program, args, &mut writer, stdout_to_stderr)
        });

        // Ends once the worker drops its sender.
        for chunk in rx {
            sink.write_all(&chunk)?;
        }
        sink.flush()?;

        worker
            .join()
            .map_err(|_| WorkerError::Other(anyhow!("subprocess helper thread panicked")))?
    })
}

/// `Write` adapter that ships each chunk to the thread owning the real sink.
struct ChunkSender(mpsc::Sender<Vec<u8>>);

impl Write for ChunkSender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .send(buf.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "output sink went away"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn run_subprocess_async(
    program: &str,
    args: &[String],
    sink: &mut dyn Write,
    stdout_to_stderr: bool,
) -> Result<i32> {
    debug!(program, arg_count = args.len(), stdout_to_stderr, "spawning subprocess");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if stdout_to_stderr {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    let mut child = cmd.spawn().map_err(|source| WorkerError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let stderr = child.stderr.take();
    let stdout = child.stdout.take();

    forward_output(stderr, stdout, sink).await?;

    let status = child.wait().await?;
    sink.flush()?;

    let code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
    debug!(program, exit_code = code, success = status.success(), "subprocess exited");
    Ok(code)
}

/// Copy both pipes into `sink` until each reaches EOF.
async fn forward_output<E, O>(
    mut stderr: Option<E>,
    mut stdout: Option<O>,
    sink: &mut dyn Write,
) -> io::Result<()>
where
    E: AsyncRead + Unpin,
    O: AsyncRead + Unpin,
{
    let mut err_buf = vec![0u8; READ_CHUNK];
    let mut out_buf = vec![0u8; READ_CHUNK];

    while stderr.is_some() || stdout.is_some() {
        tokio::select! {
            n = read_some(&mut stderr, &mut err_buf) => match n? {
                0 => stderr = None,
                n => sink.write_all(&err_buf[..n])?,
            },
            n = read_some(&mut stdout, &mut out_buf) => match n? {
                0 => stdout = None,
                n => sink.write_all(&out_buf[..n])?,
            },
        }
    }

    Ok(())
}

/// Read from `reader` if it is still open; never resolves once it is closed.
async fn read_some<R>(reader: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(r) => r.read(buf).await,
        None => std::future::pending().await,
    }
}
