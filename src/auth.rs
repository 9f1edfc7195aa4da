/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Credential handling for the SIM API.
//!
//! The SIM API uses HTTP Basic authentication. Credentials are looked up in a
//! netrc file keyed by the host name of the API base URL.

use crate::errors::NetrcError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Credentials of one `machine` (or `default`) block of a netrc file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetrcEntry {
    pub login: String,
    pub account: Option<String>,
    pub password: String,
}

/// Parsed contents of a netrc file.
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    hosts: HashMap<String, NetrcEntry>,
    default: Option<NetrcEntry>,
}

#[derive(Debug)]
struct ParseFailure {
    line: usize,
    message: String,
}

impl Netrc {
    /// Reads and parses the netrc file at `path`
    pub fn from_file(path: &Path) -> Result<Self, NetrcError> {
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => NetrcError::NotFound(path.to_path_buf()),
            _ => NetrcError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::parse(&text).map_err(|failure| NetrcError::Parse {
            path: path.to_path_buf(),
            line: failure.line,
            message: failure.message,
        })
    }

    /// Returns the entry for `host`, falling back to the `default` entry
    pub fn authenticators(&self, host: &str) -> Option<&NetrcEntry> {
        self.hosts.get(host).or(self.default.as_ref())
    }

    fn parse(text: &str) -> Result<Self, ParseFailure> {
        let mut netrc = Netrc::default();
        let mut lexer = Lexer::new(text);

        while let Some((line, token)) = lexer.next_token()? {
            let host = match token.as_str() {
                "machine" => match lexer.next_token()? {
                    Some((_, host)) => Some(host),
                    None => {
                        return Err(ParseFailure {
                            line,
                            message: "missing host name after 'machine'".into(),
                        });
                    }
                },
                "default" => None,
                "macdef" => {
                    // The macro name and body are not credentials
                    if lexer.next_token()?.is_none() {
                        return Err(ParseFailure {
                            line,
                            message: "missing macro name after 'macdef'".into(),
                        });
                    }
                    lexer.skip_macro_body();
                    continue;
                }
                other => {
                    return Err(ParseFailure {
                        line,
                        message: format!("bad toplevel token {other:?}"),
                    });
                }
            };

            let mut entry = NetrcEntry::default();
            while let Some((line, key)) = lexer.next_token()? {
                if matches!(key.as_str(), "machine" | "default" | "macdef") {
                    lexer.push_back(line, key);
                    break;
                }
                // Values are taken verbatim, even when they look like keywords
                let Some((_, value)) = lexer.next_token()? else {
                    return Err(ParseFailure {
                        line,
                        message: format!("missing value after {key:?}"),
                    });
                };
                match key.as_str() {
                    "login" | "user" => entry.login = value,
                    "account" => entry.account = Some(value),
                    "password" => entry.password = value,
                    other => {
                        return Err(ParseFailure {
                            line,
                            message: format!("bad follower token {other:?}"),
                        });
                    }
                }
            }

            // Later blocks for the same machine replace earlier ones
            match host {
                Some(host) => {
                    netrc.hosts.insert(host, entry);
                }
                None => netrc.default = Some(entry),
            }
        }
        Ok(netrc)
    }
}

/// Line aware tokenizer over netrc text, dropping comments
struct Lexer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
    pending: VecDeque<String>,
    pushed_back: Option<(usize, String)>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            line: 0,
            pending: VecDeque::new(),
            pushed_back: None,
        }
    }

    /// Next token with the line it was found on
    fn next_token(&mut self) -> Result<Option<(usize, String)>, ParseFailure> {
        if let Some(token) = self.pushed_back.take() {
            return Ok(Some(token));
        }
        while self.pending.is_empty() {
            let Some((idx, raw_line)) = self.lines.next() else {
                return Ok(None);
            };
            self.line = idx + 1;
            self.pending = split_line(self.line, raw_line)?;
        }
        Ok(self.pending.pop_front().map(|token| (self.line, token)))
    }

    fn push_back(&mut self, line: usize, token: String) {
        self.pushed_back = Some((line, token));
    }

    // A macro body runs from the line after `macdef` up to the next blank line
    fn skip_macro_body(&mut self) {
        self.pending.clear();
        for (_, raw_line) in self.lines.by_ref() {
            if raw_line.trim().is_empty() {
                break;
            }
        }
    }
}

fn split_line(line: usize, raw_line: &str) -> Result<VecDeque<String>, ParseFailure> {
    let mut chars = raw_line.chars().peekable();
    let mut tokens = VecDeque::new();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else { break };
        if first == '#' {
            break;
        }

        let mut token = String::new();
        if first == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => token.extend(chars.next()),
                    c => token.push(c),
                }
            }
            if !closed {
                return Err(ParseFailure {
                    line,
                    message: "unterminated quoted token".into(),
                });
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                match c {
                    '\\' => token.extend(chars.next()),
                    c => token.push(c),
                }
            }
        }
        tokens.push_back(token);
    }
    Ok(tokens)
}

// Resolves the file to read, `~/.netrc` by default, expanding a leading `~` against `home`
fn resolve_netrc_path(
    netrc_path: Option<&Path>,
    home: Option<PathBuf>,
) -> Result<PathBuf, NetrcError> {
    let path = netrc_path.unwrap_or(Path::new("~/.netrc"));
    match path.strip_prefix("~") {
        Ok(rest) => home
            .map(|home| home.join(rest))
            .ok_or_else(|| NetrcError::NoHomeDirectory(path.to_path_buf())),
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Loads the login and password for the host of `base_url` from a netrc file.
///
/// `netrc_path` defaults to `~/.netrc`; a leading `~` is expanded.
pub fn load_netrc_credentials(
    base_url: &str,
    netrc_path: Option<&Path>,
) -> Result<(String, String), NetrcError> {
    let path = resolve_netrc_path(netrc_path, dirs::home_dir())?;
    let netrc = Netrc::from_file(&path)?;

    let host = url::Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_matches(['[', ']']).to_lowercase()))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| NetrcError::InvalidBaseUrl(base_url.to_string()))?;

    let entry = netrc
        .authenticators(&host)
        .ok_or_else(|| NetrcError::NoCredentials {
            host: host.clone(),
            path: path.clone(),
        })?;

    if entry.login.is_empty() || entry.password.is_empty() {
        return Err(NetrcError::IncompleteCredentials { host, path });
    }

    debug!("Loaded netrc credentials for {host}");
    Ok((entry.login.clone(), entry.password.clone()))
}

/// Returns the HTTP Basic `Authorization` header value for the given credentials
pub fn build_basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
