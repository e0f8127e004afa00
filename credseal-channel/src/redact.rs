//! Credential scrubbing for log output.
//!
//! Applied as a writer around the log sink, so anything that reaches the logs
//! (including third-party crates' events) is filtered the same way. The crypto
//! engine itself never logs secrets and does not depend on this.

use std::borrow::Cow;
use std::io;
use tracing_subscriber::fmt::MakeWriter;

/// Replacement text for a scrubbed value.
pub const REDACTED: &str = "[REDACTED]";

/// Keys whose values are scrubbed. Matched case-insensitively on whole words.
const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "new_password",
    "newpassword",
    "token",
    "reset_token",
    "resettoken",
    "access_token",
    "accesstoken",
    "refresh_token",
    "refreshtoken",
    "secret",
    "private_key",
    "privatekey",
    "authorization",
    "encrypted_key",
    "encryptedkey",
    "encrypted_data",
    "encrypteddata",
];

/// Redacts the values of sensitive `key=value`, `key: value` and
/// `"key":"value"` pairs in `line`.
///
/// Returns the input unchanged (borrowed) when nothing matched.
pub fn redact_line(line: &str) -> Cow<'_, str> {
    let bytes = line.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let Some(key_len) = sensitive_key_at(bytes, i) else {
            i += 1;
            continue;
        };
        let Some((start, end)) = value_span(bytes, i + key_len) else {
            i += key_len;
            continue;
        };

        out.push_str(&line[copied..start]);
        out.push_str(REDACTED);
        copied = end;
        i = end;
    }

    if copied == 0 {
        Cow::Borrowed(line)
    } else {
        out.push_str(&line[copied..]);
        Cow::Owned(out)
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of the sensitive key starting at `at`, if one starts there on a
/// word boundary. Longest match wins.
fn sensitive_key_at(bytes: &[u8], at: usize) -> Option<usize> {
    if at > 0 && is_word_byte(bytes[at - 1]) {
        return None;
    }
    SENSITIVE_KEYS
        .iter()
        .filter(|key| {
            let end = at + key.len();
            end <= bytes.len()
                && bytes[at..end].eq_ignore_ascii_case(key.as_bytes())
                && (end == bytes.len() || !is_word_byte(bytes[end]))
        })
        .map(|key| key.len())
        .max()
}

/// Finds the value following a key that ends at `after_key`.
fn value_span(bytes: &[u8], after_key: usize) -> Option<(usize, usize)> {
    let mut i = after_key;
    if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
        i += 1;
    }
    i = skip_spaces(bytes, i);
    if i >= bytes.len() || (bytes[i] != b'=' && bytes[i] != b':') {
        return None;
    }
    i = skip_spaces(bytes, i + 1);
    if i >= bytes.len() {
        return None;
    }

    match bytes[i] {
        quote @ (b'"' | b'\'') => {
            let start = i + 1;
            let mut j = start;
            while j < bytes.len() && bytes[j] != quote {
                j += if bytes[j] == b'\\' { 2 } else { 1 };
            }
            let end = j.min(bytes.len());
            Some((start, end))
        }
        _ => {
            let start = i;
            let mut end = token_end(bytes, start);
            // Keep the scheme visible but hide the credential: "Bearer abc".
            let scheme = &bytes[start..end];
            if (scheme.eq_ignore_ascii_case(b"bearer") || scheme.eq_ignore_ascii_case(b"basic"))
                && end < bytes.len()
                && bytes[end] == b' '
            {
                let cred_start = skip_spaces(bytes, end);
                end = token_end(bytes, cred_start);
                return (end > cred_start).then_some((cred_start, end));
            }
            (end > start).then_some((start, end))
        }
    }
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    i
}

fn token_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len()
        && !matches!(
            bytes[i],
            b' ' | b',' | b';' | b'&' | b'}' | b')' | b'\n' | b'\r' | b'\t'
        )
    {
        i += 1;
    }
    i
}

/// A [`MakeWriter`] that scrubs each write through [`redact_line`].
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for RedactingMakeWriter<M> {
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
        }
    }
}

/// Writer produced by [`RedactingMakeWriter`].
#[derive(Debug)]
pub struct RedactingWriter<W> {
    inner: W,
}

impl<W: io::Write> io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(redact_line(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
