//! Credential/host resolver: reads `~/.ssh/config` (or `$SSH_CONFIG`),
//! resolves a host alias to `(hostname, user, port, identity files)`, and
//! accepts the `ssh://user@host[:port]` URL form for hosts not present in
//! the user's SSH config.

use crate::ChannelError;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// An identity file is configured, or `IdentitiesOnly yes` is set.
    Key(PathBuf),
    /// No identity file on record, or `PreferredAuthentications password`.
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub host: String,
    pub hostname: String,
    pub user: String,
    pub port: u16,
    pub auth: AuthMethod,
}

impl HostConfig {
    /// Resolve `alias` against `~/.ssh/config` (or `$SSH_CONFIG`). Falls
    /// back to treating `alias` itself as the hostname, with password
    /// auth, if no config entry matches.
    pub fn from_config(alias: &str) -> Result<Self, ChannelError> {
        let path = std::env::var("SSH_CONFIG")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".ssh").join("config"))
                    .ok_or(())
            })
            .map_err(|_| ChannelError::SshConfig("no home directory and no $SSH_CONFIG".into()))?;

        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Ok(Self::bare(alias)),
        };

        Self::parse(alias, &contents)
    }

    /// Parse the `ssh://user@host[:port]` URL form for a host not present
    /// in the user's SSH config.
    pub fn from_url(url: &str) -> Result<Self, ChannelError> {
        let rest = url
            .strip_prefix("ssh://")
            .ok_or_else(|| ChannelError::SshConfig(format!("not an ssh:// url: {url}")))?;

        let (userhost, port) = match rest.rsplit_once(':') {
            Some((uh, p)) if p.chars().all(|c| c.is_ascii_digit()) => {
                (uh, p.parse().unwrap_or(22))
            }
            _ => (rest, 22),
        };

        let (user, hostname) = userhost
            .split_once('@')
            .ok_or_else(|| ChannelError::SshConfig(format!("missing user@ in {url}")))?;

        Ok(Self {
            host: hostname.to_string(),
            hostname: hostname.to_string(),
            user: user.to_string(),
            port,
            auth: AuthMethod::Password,
        })
    }

    fn bare(alias: &str) -> Self {
        let (user, hostname) = alias
            .split_once('@')
            .map(|(u, h)| (u.to_string(), h.to_string()))
            .unwrap_or_else(|| (whoami_fallback(), alias.to_string()));
        Self { host: alias.to_string(), hostname, user, port: 22, auth: AuthMethod::Password }
    }

    fn parse(alias: &str, config: &str) -> Result<Self, ChannelError> {
        let mut in_block = false;
        let mut hostname = alias.to_string();
        let mut user = whoami_fallback();
        let mut port = 22u16;
        let mut identity: Option<PathBuf> = None;
        let mut preferred_auth: Option<String> = None;

        for raw_line in config.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(char::is_whitespace) else { continue };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            if key == "host" {
                in_block = value.split_whitespace().any(|pattern| pattern == alias);
                continue;
            }
            if !in_block {
                continue;
            }

            match key.as_str() {
                "hostname" => hostname = value.to_string(),
                "user" => user = value.to_string(),
                "port" => port = value.parse().unwrap_or(22),
                "identityfile" => identity = Some(PathBuf::from(expand_tilde(value))),
                "preferredauthentications" => preferred_auth = Some(value.to_string()),
                _ => {}
            }
        }

        let auth = match (identity, preferred_auth.as_deref()) {
            (_, Some(p)) if p.contains("password") => AuthMethod::Password,
            (Some(path), _) => AuthMethod::Key(path),
            (None, _) => AuthMethod::Password,
        };

        Ok(Self { host: alias.to_string(), hostname, user, port, auth })
    }
}

fn whoami_fallback() -> String {
    std::env::var("USER").unwrap_or_else(|_| "user".to_string())
}

fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).to_string_lossy().into_owned();
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matching_host_block() {
        let config = "\
Host cx3
    HostName login.hpc.ic.ac.uk
    User jdoe
    Port 2222
    IdentityFile ~/.ssh/id_rsa

Host other
    HostName unrelated
";
        let resolved = HostConfig::parse("cx3", config).unwrap();
        assert_eq!(resolved.hostname, "login.hpc.ic.ac.uk");
        assert_eq!(resolved.user, "jdoe");
        assert_eq!(resolved.port, 2222);
        assert!(matches!(resolved.auth, AuthMethod::Key(_)));
    }

    #[test]
    fn falls_back_to_password_without_identity_file() {
        let config = "Host cx3\n    HostName login.hpc.ic.ac.uk\n";
        let resolved = HostConfig::parse("cx3", config).unwrap();
        assert_eq!(resolved.auth, AuthMethod::Password);
    }

    #[test]
    fn unmatched_alias_falls_back_to_bare_hostname() {
        let resolved = HostConfig::parse("doesnotexist.example.com", "Host other\n").unwrap();
        assert_eq!(resolved.hostname, "doesnotexist.example.com");
    }

    #[test]
    fn parses_ssh_url_form() {
        let resolved = HostConfig::from_url("ssh://jdoe@login.hpc.ic.ac.uk:2200").unwrap();
        assert_eq!(resolved.user, "jdoe");
        assert_eq!(resolved.hostname, "login.hpc.ic.ac.uk");
        assert_eq!(resolved.port, 2200);
    }

    #[test]
    fn ssh_url_defaults_to_port_22() {
        let resolved = HostConfig::from_url("ssh://jdoe@login.hpc.ic.ac.uk").unwrap();
        assert_eq!(resolved.port, 22);
    }
}
