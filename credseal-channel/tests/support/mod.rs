//! Shared helpers for secure channel integration tests.

#![allow(dead_code)]

use credseal_channel::{ChannelConfig, SecureChannel};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub const SERVER_PUBLIC_PEM: &str = include_str!("../fixtures/server_public.pem");
pub const SERVER_PRIVATE_PEM: &str = include_str!("../fixtures/server_private.pem");
pub const CLIENT_PUBLIC_PEM: &str = include_str!("../fixtures/client_public.pem");
pub const CLIENT_PRIVATE_PEM: &str = include_str!("../fixtures/client_private.pem");

/// The client side: seals for the server, opens with the client key.
pub fn client_channel() -> SecureChannel {
    let config = ChannelConfig::new(SERVER_PUBLIC_PEM).with_client_private_key(CLIENT_PRIVATE_PEM);
    SecureChannel::new(&config).expect("client channel must build")
}

/// The mirror server side: seals for the client, opens with the server key.
pub fn server_channel() -> SecureChannel {
    let config = ChannelConfig::new(CLIENT_PUBLIC_PEM).with_client_private_key(SERVER_PRIVATE_PEM);
    SecureChannel::new(&config).expect("server channel must build")
}

/// In-memory log sink for asserting on formatted output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
