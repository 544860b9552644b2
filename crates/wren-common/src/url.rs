//! URL model, relative resolution, and blocking fetch client.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! This is deliberately not a full URL-Standard parser: the browser supports
//! exactly three schemes and the subset of syntax they need. Fetching speaks
//! plain `HTTP/1.0` over a TCP socket (TLS-wrapped for `https`) so that the
//! response headers can be inspected before any decoding happens.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use native_tls::TlsConnector;
use thiserror::Error;

/// Errors produced while parsing or resolving a URL.
///
/// An unsupported scheme is fatal per the browser's error policy: there is
/// nothing to render if the document cannot even be addressed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The scheme is not one of `http`, `https`, or `file`.
    #[error("unsupported scheme {0:?} (expected http, https, or file)")]
    UnsupportedScheme(String),
    /// The input had no `://` separator.
    #[error("missing '://' in {0:?}")]
    MissingScheme(String),
    /// The `host:port` authority carried a non-numeric port.
    #[error("invalid port in {0:?}")]
    InvalidPort(String),
}

/// Errors produced while fetching a URL's body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Socket or file I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// TLS setup or handshake failure (https only).
    #[error("tls error talking to {host}: {message}")]
    Tls {
        /// Hostname used for SNI.
        host: String,
        /// Underlying TLS error description.
        message: String,
    },
    /// The status line did not look like `HTTP/<v> <code> <reason>`.
    #[error("malformed status line {0:?}")]
    MalformedStatusLine(String),
    /// The response declared a transfer encoding we do not implement.
    #[error("unsupported transfer-encoding {0:?}")]
    TransferEncoding(String),
    /// The response declared a content encoding we do not implement.
    #[error("unsupported content-encoding {0:?}")]
    ContentEncoding(String),
}

/// URL scheme supported by the fetch client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain HTTP over TCP, default port 80.
    Http,
    /// HTTP over TLS with SNI, default port 443.
    Https,
    /// Local filesystem read.
    File,
}

impl Scheme {
    /// The scheme name as it appears before `://`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::File => "file",
        }
    }

    /// Default port used when the authority does not name one.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
            Self::File => 0,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed URL: scheme, host, port, and path.
///
/// `file` URLs keep everything after `://` as the path; host is empty and
/// port is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    /// The URL scheme.
    pub scheme: Scheme,
    /// Hostname (empty for `file`).
    pub host: String,
    /// Port (scheme default unless the authority overrides it).
    pub port: u16,
    /// Path component, always `/`-prefixed for network schemes.
    pub path: String,
}

impl Url {
    /// Parse a URL string.
    ///
    /// A network URL with no path gets `/`. A `host:port` authority overrides
    /// the scheme's default port.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] when the separator is missing, the scheme is
    /// unsupported, or the port is not numeric.
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let Some((scheme, rest)) = raw.split_once("://") else {
            return Err(UrlError::MissingScheme(raw.to_string()));
        };

        let scheme = match scheme {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "file" => Scheme::File,
            other => return Err(UrlError::UnsupportedScheme(other.to_string())),
        };

        if scheme == Scheme::File {
            return Ok(Self {
                scheme,
                host: String::new(),
                port: 0,
                path: rest.to_string(),
            });
        }

        let rest = if rest.contains('/') {
            rest.to_string()
        } else {
            format!("{rest}/")
        };
        // Split cannot fail: rest is guaranteed to contain '/'.
        let (authority, path) = rest.split_once('/').unwrap_or((rest.as_str(), ""));

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| UrlError::InvalidPort(raw.to_string()))?;
                (host.to_string(), port)
            }
            None => (authority.to_string(), scheme.default_port()),
        };

        Ok(Self {
            scheme,
            host,
            port,
            path: format!("/{path}"),
        })
    }

    /// Fetch this URL's body as a string.
    ///
    /// For `file` URLs the referenced path is read as UTF-8. For network URLs
    /// a single `GET <path> HTTP/1.0` request is issued and the body is
    /// everything after the header block. Responses that declare
    /// `transfer-encoding` or `content-encoding` are rejected: this client
    /// does not implement chunking or compression, and decoding a body it
    /// does not understand would render garbage.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on I/O or TLS failure, a malformed status line,
    /// or an unsupported encoding header.
    pub fn request(&self) -> Result<String, FetchError> {
        match self.scheme {
            Scheme::File => Ok(fs::read_to_string(&self.path)?),
            Scheme::Http => {
                let stream = TcpStream::connect((self.host.as_str(), self.port))?;
                self.exchange(stream)
            }
            Scheme::Https => {
                let stream = TcpStream::connect((self.host.as_str(), self.port))?;
                let connector = TlsConnector::new().map_err(|e| FetchError::Tls {
                    host: self.host.clone(),
                    message: e.to_string(),
                })?;
                // connect() takes the server name, which doubles as SNI.
                let tls = connector
                    .connect(&self.host, stream)
                    .map_err(|e| FetchError::Tls {
                        host: self.host.clone(),
                        message: e.to_string(),
                    })?;
                self.exchange(tls)
            }
        }
    }

    /// Send the request and read status line, headers, and body.
    fn exchange<S: Read + Write>(&self, mut stream: S) -> Result<String, FetchError> {
        write!(
            stream,
            "GET {} HTTP/1.0\r\nHost: {}\r\n\r\n",
            self.path, self.host
        )?;
        stream.flush()?;

        let mut reader = BufReader::new(stream);

        let status_line = read_crlf_line(&mut reader)?;
        // "HTTP/1.0 200 OK". The shape is validated but the code is not
        // branched on; the body renders regardless of status.
        let mut parts = status_line.splitn(3, ' ');
        if parts.next().is_none() || parts.next().is_none() {
            return Err(FetchError::MalformedStatusLine(status_line));
        }

        let mut headers = HashMap::new();
        loop {
            let line = read_crlf_line(&mut reader)?;
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                let _ = headers.insert(name.to_lowercase(), value.trim().to_string());
            }
        }

        if let Some(encoding) = headers.get("transfer-encoding") {
            return Err(FetchError::TransferEncoding(encoding.clone()));
        }
        if let Some(encoding) = headers.get("content-encoding") {
            return Err(FetchError::ContentEncoding(encoding.clone()));
        }

        let mut body = Vec::new();
        let _ = reader.read_to_end(&mut body)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Resolve a possibly-relative reference against this URL.
    ///
    /// The four cases, checked in order:
    ///
    /// 1. contains `://`: already absolute.
    /// 2. starts with `//`: scheme-relative, borrow this URL's scheme.
    /// 3. starts with `/`: host-relative, borrow scheme, host, and port.
    /// 4. otherwise: path-relative, drop the last segment of this URL's
    ///    path, pop one directory per leading `../`, then join.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] if the assembled absolute URL fails to parse.
    pub fn resolve(&self, reference: &str) -> Result<Self, UrlError> {
        if reference.contains("://") {
            return Self::parse(reference);
        }
        if let Some(rest) = reference.strip_prefix("//") {
            return Self::parse(&format!("{}://{}", self.scheme, rest));
        }
        if reference.starts_with('/') {
            return Self::parse(&self.with_path(reference));
        }

        let mut dir = self
            .path
            .rsplit_once('/')
            .map_or("", |(dir, _last)| dir);
        let mut reference = reference;
        while let Some(rest) = reference.strip_prefix("../") {
            reference = rest;
            if let Some((parent, _)) = dir.rsplit_once('/') {
                dir = parent;
            }
        }
        Self::parse(&self.with_path(&format!("{dir}/{reference}")))
    }

    /// Rebuild an absolute URL string around this URL's authority. `file`
    /// URLs have no authority, so the path stands alone.
    fn with_path(&self, path: &str) -> String {
        if self.scheme == Scheme::File {
            format!("{}://{}", self.scheme, path)
        } else {
            format!("{}://{}:{}{}", self.scheme, self.host, self.port, path)
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scheme == Scheme::File {
            write!(f, "{}://{}", self.scheme, self.path)
        } else {
            write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
        }
    }
}

/// Read one CRLF-terminated line, returning it without the terminator.
fn read_crlf_line<R: BufRead>(reader: &mut R) -> std::io::Result<String> {
    let mut line = String::new();
    let _ = reader.read_line(&mut line)?;
    while line.ends_with('\n') || line.ends_with('\r') {
        let _ = line.pop();
    }
    Ok(line)
}
