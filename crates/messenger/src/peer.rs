//! A single encrypted chat connection over TCP.

use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::crypto::{decrypt_text, encrypt_text, CipherKind};
use crate::error::Result;
use crate::frame::{read_frame, write_frame};

/// Which side opened the connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Accepted an incoming connection.
    Server,
    /// Connected out to a waiting peer.
    Client,
}

/// Cipher and key applied to every message of a connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CipherSettings {
    /// Cipher in use.
    pub cipher: CipherKind,
    /// Shared key as text.
    pub key: String,
}

impl CipherSettings {
    /// Settings taken from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            cipher: config.cipher,
            key: config.key.clone(),
        }
    }
}

/// Listening socket waiting for one peer.
pub struct PeerListener {
    listener: TcpListener,
    settings: CipherSettings,
}

impl PeerListener {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Blocks until a peer connects.
    pub fn accept(self) -> Result<Peer> {
        let (stream, _) = self.listener.accept()?;
        Ok(Peer::from_stream(stream, Mode::Server, self.settings))
    }
}

/// Connected peer exchanging framed, encrypted text messages.
pub struct Peer {
    stream: TcpStream,
    mode: Mode,
    settings: CipherSettings,
}

impl Peer {
    /// Binds a listener on `addr` without accepting yet.
    pub fn bind(addr: impl ToSocketAddrs, settings: CipherSettings) -> Result<PeerListener> {
        let listener = TcpListener::bind(addr)?;
        Ok(PeerListener { listener, settings })
    }

    /// Listens on every interface at `port` and accepts the first peer.
    pub fn listen(port: u16, settings: CipherSettings) -> Result<Self> {
        Self::bind(("0.0.0.0", port), settings)?.accept()
    }

    /// Connects to a peer listening at `host:port`.
    pub fn connect(host: &str, port: u16, settings: CipherSettings) -> Result<Self> {
        let stream = TcpStream::connect((host, port))?;
        Ok(Self::from_stream(stream, Mode::Client, settings))
    }

    /// Wraps an established stream.
    pub fn from_stream(stream: TcpStream, mode: Mode, settings: CipherSettings) -> Self {
        Self {
            stream,
            mode,
            settings,
        }
    }

    /// Side of the connection this peer is on.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cipher settings in use.
    pub fn settings(&self) -> &CipherSettings {
        &self.settings
    }

    /// Remote end of the connection.
    pub fn partner_address(&self) -> Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }

    /// Encrypts and sends one message.
    ///
    /// Nothing is written when encryption fails or the ciphertext would not
    /// fit in a frame.
    pub fn send(&mut self, text: &str) -> Result<()> {
        let payload = encrypt_text(text, &self.settings.key, self.settings.cipher)?;
        write_frame(&mut self.stream, &payload)
    }

    /// Blocks for the next message; `Ok(None)` once the peer has gone.
    pub fn recv(&mut self) -> Result<Option<String>> {
        match read_frame(&mut self.stream)? {
            Some(payload) => Ok(Some(decrypt_text(
                &payload,
                &self.settings.key,
                self.settings.cipher,
            )?)),
            None => Ok(None),
        }
    }

    /// Second handle on the same connection, e.g. for a reader thread.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            stream: self.stream.try_clone()?,
            mode: self.mode,
            settings: self.settings.clone(),
        })
    }

    /// Closes both directions of the connection.
    pub fn close(&self) -> Result<()> {
        self.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}
