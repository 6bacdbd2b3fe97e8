//! Command-line interface for `simple-messenger`.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use aes_core::trace::FnTracer;
use aes_core::{
    decrypt, decrypt_block_traced, encrypt, encrypt_block_traced, expand_key, Aes128Key,
    ExpandedKey, State, Step,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use messenger::{CipherKind, CipherSettings, Config, Peer};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Peer-to-peer chat with a from-scratch AES-128 cipher.
#[derive(Parser)]
#[command(name = "smsg", version, author, about = "Simple encrypted messenger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file (AES-128 ECB, zero padded).
    Enc {
        #[command(flatten)]
        key: KeyArgs,
        /// Plaintext input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Ciphertext output file.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file produced by `enc`.
    Dec {
        #[command(flatten)]
        key: KeyArgs,
        /// Ciphertext input file (multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Plaintext output file; keeps the zero padding.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the state after every transform of one block.
    Trace {
        #[command(flatten)]
        key: KeyArgs,
        /// Block as up to 32 hex characters, zero padded.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// Run the inverse cipher instead.
        #[arg(long, default_value_t = false)]
        decrypt: bool,
    },
    /// Verify the cipher against the FIPS-197 vector and random round trips.
    Check {
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt a random message under a random key and decrypt it back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Wait for a peer to connect, then chat over stdin/stdout.
    Listen {
        #[command(flatten)]
        conn: ConnArgs,
    },
    /// Connect to a listening peer, then chat over stdin/stdout.
    Connect {
        #[command(flatten)]
        conn: ConnArgs,
        /// Remote host (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },
}

#[derive(Args)]
struct KeyArgs {
    /// Key as text, at most 16 UTF-8 bytes (shorter keys are zero-extended).
    #[arg(long, conflicts_with = "key_hex")]
    key: Option<String>,
    /// Key as up to 32 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
}

impl KeyArgs {
    fn bytes(&self) -> Result<Vec<u8>> {
        match (&self.key, &self.key_hex) {
            (_, Some(hex_str)) => hex::decode(hex_str.trim()).context("decode key hex"),
            (Some(text), None) => Ok(text.as_bytes().to_vec()),
            (None, None) => bail!("a key is required (--key or --key-hex)"),
        }
    }
}

#[derive(Args)]
struct ConnArgs {
    /// TOML config file with host, port, cipher and key.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// TCP port (overrides the config file).
    #[arg(long)]
    port: Option<u16>,
    /// `aes128` or `none` (overrides the config file).
    #[arg(long)]
    cipher: Option<CipherKind>,
    /// Shared key as text (overrides the config file).
    #[arg(long)]
    key: Option<String>,
}

impl ConnArgs {
    fn resolve(&self, host: Option<&String>) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                Config::load(path).with_context(|| format!("load {}", path.display()))?
            }
            None => Config::default(),
        };
        if let Some(host) = host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(cipher) = self.cipher {
            config.cipher = cipher;
        }
        if let Some(key) = &self.key {
            config.key.clone_from(key);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc { key, input, output } => cmd_enc(&key, &input, &output),
        Commands::Dec { key, input, output } => cmd_dec(&key, &input, &output),
        Commands::Trace {
            key,
            block_hex,
            decrypt,
        } => cmd_trace(&key, &block_hex, decrypt),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
        Commands::Listen { conn } => cmd_listen(&conn),
        Commands::Connect { conn, host } => cmd_connect(&conn, host.as_ref()),
    }
}

fn cmd_enc(key: &KeyArgs, input_path: &Path, output_path: &Path) -> Result<()> {
    let key = key.bytes()?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = encrypt(&data, &key).context("encrypt")?;
    fs::write(output_path, ciphertext)
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_dec(key: &KeyArgs, input_path: &Path, output_path: &Path) -> Result<()> {
    let key = key.bytes()?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let plaintext = decrypt(&data, &key).context("decrypt")?;
    fs::write(output_path, plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_trace(key: &KeyArgs, block_hex: &str, inverse: bool) -> Result<()> {
    let key = Aes128Key::from_slice(&key.bytes()?).context("parse key")?;
    let bytes = hex::decode(block_hex.trim()).context("decode block hex")?;
    if bytes.len() > 16 {
        bail!("a block is at most 16 bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block[..bytes.len()].copy_from_slice(&bytes);

    let expanded = expand_key(&key);
    for line in schedule_lines(&expanded) {
        println!("{line}");
    }
    let mut tracer = FnTracer(|round: usize, step: Step, state: &State| {
        println!("round {round:2} {step}");
        println!("{state}");
    });
    let out = if inverse {
        decrypt_block_traced(&block, &expanded, &mut tracer)
    } else {
        encrypt_block_traced(&block, &expanded, &mut tracer)
    };
    println!("output: {}", hex::encode(out));
    Ok(())
}

/// One `w[i] hex` line per expanded key word.
fn schedule_lines(expanded: &ExpandedKey) -> Vec<String> {
    expanded
        .words()
        .iter()
        .enumerate()
        .map(|(i, word)| format!("w[{i:2}] {}", hex::encode(word)))
        .collect()
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let key = hex::decode("000102030405060708090a0b0c0d0e0f")?;
    let plain = hex::decode("00112233445566778899aabbccddeeff")?;
    let expected = hex::decode("69c4e0d86a7b0430d8cdb78070b4c55a")?;
    if encrypt(&plain, &key)? != expected {
        bail!("encryption does not match the FIPS-197 vector");
    }
    if decrypt(&expected, &key)? != plain {
        bail!("decryption does not match the FIPS-197 vector");
    }

    let mut rng = seeded_rng(seed);
    for sample in 0..samples {
        let mut key = vec![0u8; rng.gen_range(0..=16)];
        let mut message = vec![0u8; 16 * rng.gen_range(1..=8)];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut message);
        let ciphertext = encrypt(&message, &key)?;
        if decrypt(&ciphertext, &key)? != message {
            bail!("round trip failed on sample {sample}");
        }
    }
    println!("ok: known-answer vector and {samples} random round trips");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let mut message = vec![0u8; 16 * rng.gen_range(1..=4)];
    rng.fill_bytes(&mut message);

    let ciphertext = encrypt(&message, &key)?;
    let decrypted = decrypt(&ciphertext, &key)?;

    println!("demo key: {}", hex::encode(key));
    println!("plaintext: {}", hex::encode(&message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn cmd_listen(conn: &ConnArgs) -> Result<()> {
    let config = conn.resolve(None)?;
    eprintln!("waiting for a peer on port {}", config.port);
    let peer = Peer::listen(config.port, CipherSettings::from_config(&config))
        .with_context(|| format!("listen on port {}", config.port))?;
    chat(peer)
}

fn cmd_connect(conn: &ConnArgs, host: Option<&String>) -> Result<()> {
    let config = conn.resolve(host)?;
    let peer = Peer::connect(&config.host, config.port, CipherSettings::from_config(&config))
        .with_context(|| format!("connect to {}:{}", config.host, config.port))?;
    chat(peer)
}

/// Inputs to the chat loop, from the stdin thread and the receiver thread.
enum Event {
    Line(io::Result<String>),
    StdinClosed,
    PeerGone(Result<()>),
}

fn chat(peer: Peer) -> Result<()> {
    eprintln!(
        "connected to {} ({}, cipher {})",
        peer.partner_address()?,
        match peer.mode() {
            messenger::Mode::Server => "server",
            messenger::Mode::Client => "client",
        },
        peer.settings().cipher
    );

    let (events, inbox) = mpsc::channel();
    let lines = events.clone();
    // Stays blocked on stdin after the chat ends; the process exit reaps it.
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if lines.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = lines.send(Event::StdinClosed);
    });
    converse(peer, events, inbox)
}

/// Sends typed lines and prints incoming messages until either side is done.
fn converse(
    mut peer: Peer,
    events: mpsc::Sender<Event>,
    inbox: mpsc::Receiver<Event>,
) -> Result<()> {
    let mut reader = peer.try_clone()?;
    let incoming = thread::spawn(move || {
        let outcome = receive_messages(&mut reader);
        // The chat loop may already have returned.
        let _ = events.send(Event::PeerGone(outcome));
    });

    while let Ok(event) = inbox.recv() {
        match event {
            Event::Line(line) => {
                let line = line.context("read stdin")?;
                if line.is_empty() {
                    continue;
                }
                match peer.send(&line) {
                    Ok(()) => {}
                    Err(err @ messenger::Error::Cipher(_)) => {
                        eprintln!("encryption failed, the message was not sent: {err}");
                    }
                    Err(err @ messenger::Error::FrameTooLarge { .. }) => {
                        eprintln!("message too long, not sent: {err}");
                    }
                    Err(err) => return Err(err).context("send message"),
                }
            }
            Event::StdinClosed => break,
            Event::PeerGone(outcome) => {
                join_receiver(incoming)?;
                return outcome;
            }
        }
    }

    // Shutting down ends the receiver's loop.
    match peer.close() {
        Ok(()) => {}
        // The peer hung up first.
        Err(messenger::Error::Io(err)) if err.kind() == io::ErrorKind::NotConnected => {}
        Err(err) => return Err(err).context("close connection"),
    }
    join_receiver(incoming)
}

/// Prints incoming messages until the peer disconnects or the transport fails.
///
/// A message that does not decrypt is reported and skipped.
fn receive_messages(reader: &mut Peer) -> Result<()> {
    loop {
        match reader.recv() {
            Ok(Some(text)) => println!("peer: {text}"),
            Ok(None) => {
                eprintln!("peer disconnected");
                return Ok(());
            }
            Err(err @ messenger::Error::Cipher(_)) => {
                eprintln!("could not decrypt a message, skipped: {err}");
            }
            Err(err) => return Err(err).context("receive message"),
        }
    }
}

fn join_receiver(handle: thread::JoinHandle<()>) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow!("receiver thread panicked"))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
