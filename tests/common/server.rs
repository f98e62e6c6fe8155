//! Test server management.
//!
//! Runs the gateway inside the test's runtime on `127.0.0.1:0`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ircserv::config::LimitsConfig;
use ircserv::{Config, Gateway};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::client::TestClient;

/// Connection password used by every test server.
pub const PASSWORD: &str = "secret";

/// A running test server; shuts down when dropped.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Spawn a server with default limits.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn a server after adjusting its limits.
    pub async fn spawn_with(tune: impl FnOnce(&mut LimitsConfig)) -> anyhow::Result<Self> {
        let mut config = Config::default().with_credentials(0, PASSWORD);
        config.server.name = "irc.test".to_string();
        config.listen.address = IpAddr::V4(Ipv4Addr::LOCALHOST);
        tune(&mut config.limits);

        let gateway = Gateway::bind(&config).await?;
        let addr = gateway.local_addr()?;
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(gateway.run(shutdown.clone()));

        Ok(Self {
            addr,
            shutdown,
            task: Some(task),
        })
    }

    /// Get the server address.
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Open a connection without registering.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<TestClient> {
        TestClient::connect(self.addr, nick).await
    }

    /// Open a connection and complete PASS/NICK/USER.
    pub async fn register(&self, nick: &str) -> anyhow::Result<TestClient> {
        let mut client = self.connect(nick).await?;
        client.register(PASSWORD).await?;
        Ok(client)
    }

    /// Cancel the reactor and wait for it to finish closing connections.
    #[allow(dead_code)]
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
