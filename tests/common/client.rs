//! Test IRC client.
//!
//! Speaks raw lines so assertions can compare exact wire text.

use std::net::SocketAddr;
use std::time::Duration;

use ircserv_proto::split_line;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// How long a single receive waits before failing the test.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A test IRC client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server.
    pub async fn connect(addr: SocketAddr, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    /// This client's nickname.
    #[allow(dead_code)]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a raw line; the terminator is added when missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line with the terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(RECV_TIMEOUT).await
    }

    /// Receive one line, failing after `dur`. EOF is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until `predicate` matches; returns all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Receive lines until one carries the given command or numeric.
    pub async fn expect(&mut self, verb: &str) -> anyhow::Result<String> {
        let lines = self.recv_until(|line| verb_of(line) == verb).await?;
        lines
            .into_iter()
            .last()
            .ok_or_else(|| anyhow::anyhow!("no line received"))
    }

    /// Discard anything the server has already sent.
    pub async fn drain(&mut self) {
        while self.recv_timeout(Duration::from_millis(50)).await.is_ok() {}
    }

    /// Assert the server closes the connection, ignoring lines sent first.
    #[allow(dead_code)]
    pub async fn expect_closed(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let read = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
            if read == 0 {
                return Ok(lines);
            }
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    /// PASS/NICK/USER, then wait for RPL_MYINFO (004).
    pub async fn register(&mut self, password: &str) -> anyhow::Result<Vec<String>> {
        let nick = self.nick.clone();
        self.send_raw(&format!("PASS {password}")).await?;
        self.send_raw(&format!("NICK {nick}")).await?;
        self.send_raw(&format!("USER {nick} 0 * :Test User {nick}")).await?;
        self.recv_until(|line| verb_of(line) == "004").await
    }

    /// Join a channel and wait for the end of its NAMES list.
    #[allow(dead_code)]
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<String>> {
        self.send_raw(&format!("JOIN {channel}")).await?;
        self.recv_until(|line| verb_of(line) == "366").await
    }
}

/// The command word or numeric of a received line.
pub fn verb_of(line: &str) -> &str {
    split_line(line).map_or("", |raw| raw.command)
}
