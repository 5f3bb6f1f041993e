use crate::host::AuthMethod;
use crate::sentinel::{fence, sentinel_line};
use crate::{ChannelError, CommandChannel, ExecResult, FileMode, FileStream, HostConfig};
use parking_lot::Mutex;
use ssh2::{Channel, Session};
use std::io::{Read, Write};
use std::net::TcpStream;

/// A single long-lived interactive shell channel over one `ssh2::Session`
/// per host. Serial use only; callers must not multiplex.
pub struct SshChannel {
    #[allow(dead_code)]
    session: Session,
    shell: Mutex<Channel>,
    login_message: String,
}

impl SshChannel {
    /// Connect to `host`, authenticate per its resolved [`AuthMethod`], and
    /// open one interactive shell. Password resolution order: explicit
    /// argument → `RERUN_SSH_PASSWORD` env var → interactive prompt
    /// (suppressible via `password` being `Some`).
    pub fn connect(host: &HostConfig, password: Option<&str>) -> Result<Self, ChannelError> {
        let tcp = TcpStream::connect((host.hostname.as_str(), host.port))?;
        let mut session = Session::new().map_err(ChannelError::from)?;
        session.set_tcp_stream(tcp);
        session.handshake().map_err(ChannelError::from)?;

        Self::authenticate(&session, host, password)?;

        let mut shell = session.channel_session().map_err(ChannelError::from)?;
        shell.request_pty("xterm", None, None).map_err(ChannelError::from)?;
        shell.shell().map_err(ChannelError::from)?;

        let login_message = Self::capture_login_message(&mut shell)?;

        Ok(Self { session, shell: Mutex::new(shell), login_message })
    }

    fn authenticate(session: &Session, host: &HostConfig, password: Option<&str>) -> Result<(), ChannelError> {
        match &host.auth {
            AuthMethod::Key(path) => {
                session
                    .userauth_pubkey_file(&host.user, None, path, None)
                    .map_err(|_| ChannelError::AuthFailed { host: host.host.clone() })
            }
            AuthMethod::Password => {
                let resolved = password
                    .map(str::to_string)
                    .or_else(|| std::env::var("RERUN_SSH_PASSWORD").ok())
                    .ok_or_else(|| ChannelError::AuthFailed { host: host.host.clone() })?;
                session
                    .userauth_password(&host.user, &resolved)
                    .map_err(|_| ChannelError::AuthFailed { host: host.host.clone() })
            }
        }
    }

    /// Captured once at construction by executing a no-op echo and
    /// retaining whatever appeared before the sentinel.
    fn capture_login_message(shell: &mut Channel) -> Result<String, ChannelError> {
        let lines = exchange(shell, ":")?;
        let result = fence(":", &lines)?;
        // Everything discarded as "prompt junk" by `fence` is the banner;
        // reconstruct it from the raw read since `fence` only returns the
        // post-echo body.
        let banner: Vec<&str> = lines
            .iter()
            .take_while(|l| l.trim_end() != ":")
            .map(|s| s.as_str())
            .collect();
        let _ = result; // exit code of `:` is always 0; not otherwise useful here.
        Ok(banner.join("\n"))
    }
}

fn exchange(shell: &mut Channel, cmd: &str) -> Result<Vec<String>, ChannelError> {
    let full = format!("{cmd}\n{}\n", sentinel_line());
    shell.write_all(full.as_bytes())?;
    shell.flush()?;

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = shell.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if String::from_utf8_lossy(&buf).contains(crate::sentinel::MARKER) {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&buf).lines().map(str::to_string).collect())
}

impl CommandChannel for SshChannel {
    fn execute(&self, cmd: &str) -> Result<ExecResult, ChannelError> {
        if cmd.trim().is_empty() {
            return Err(ChannelError::InvalidArgument);
        }

        let mut shell = self.shell.lock();
        let lines = exchange(&mut shell, cmd)?;
        fence(cmd, &lines)
    }

    fn open_file(&self, path: &str, mode: FileMode) -> Result<Box<dyn FileStream>, ChannelError> {
        match mode {
            FileMode::Read => {
                let (file, _stat) = self.session.scp_recv(std::path::Path::new(path))?;
                Ok(Box::new(file) as Box<dyn FileStream>)
            }
            FileMode::Write | FileMode::Append => {
                let sftp = self.session.sftp()?;
                let open_mode = if mode == FileMode::Append {
                    ssh2::OpenFlags::WRITE | ssh2::OpenFlags::CREATE | ssh2::OpenFlags::APPEND
                } else {
                    ssh2::OpenFlags::WRITE | ssh2::OpenFlags::CREATE | ssh2::OpenFlags::TRUNCATE
                };
                let file = sftp.open_mode(
                    std::path::Path::new(path),
                    open_mode,
                    0o644,
                    ssh2::OpenType::File,
                )?;
                Ok(Box::new(file) as Box<dyn FileStream>)
            }
        }
    }

    fn login_message(&self) -> &str {
        &self.login_message
    }
}
