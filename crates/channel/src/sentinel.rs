//! Sentinel fencing for the interactive SSH shell channel.
//!
//! Correctness requires that each command's output be fenced: the channel
//! writes the command, then a sentinel echo containing a literal marker
//! plus `$?`. Lines before the first echo of the command are discarded as
//! shell prompt junk; lines after the sentinel carry the exit code. If
//! exit is non-zero, captured stdout lines are reinterpreted as stderr — a
//! concession to shells that do not expose stderr separately on an
//! interactive channel.

use crate::{ChannelError, ExecResult};

pub const MARKER: &str = "__RERUN_SENTINEL__";

/// The line the channel writes after `cmd` to fence its output.
pub fn sentinel_line() -> String {
    format!("echo {MARKER}:$?")
}

/// Parse the accumulated raw lines read from the shell after writing `cmd`
/// followed by [`sentinel_line`]. `cmd` is used to recognise and discard
/// the shell's echo of the command itself (and any prompt junk preceding
/// it); the sentinel line is recognised by its `MARKER:` prefix and
/// terminates the parse.
pub fn fence(cmd: &str, raw_lines: &[String]) -> Result<ExecResult, ChannelError> {
    let mut started = false;
    let mut body: Vec<&str> = Vec::new();
    let mut exit: Option<i32> = None;

    for line in raw_lines {
        if !started {
            // Discard prompt junk and the shell's echo of the command itself.
            // The echo is typically prompt-prefixed (`user@host$ echo hi`),
            // so look for the command as a suffix rather than requiring an
            // exact match.
            if line.trim_end().ends_with(cmd.trim_end()) {
                started = true;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(MARKER) {
            let code = rest.trim_start_matches(':').trim();
            exit = Some(code.parse().unwrap_or(-1));
            break;
        }

        body.push(line.as_str());
    }

    let exit = exit.ok_or(ChannelError::ShellDesync)?;
    let joined = body.join("\n");

    if exit == 0 {
        Ok(ExecResult { stdout: joined, stderr: String::new(), exit })
    } else {
        Ok(ExecResult { stdout: String::new(), stderr: joined, exit })
    }
}
