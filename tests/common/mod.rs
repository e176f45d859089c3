//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use uuid::Uuid;

use user_service::domain::{NewUser, User};
use user_service::http::{HttpServer, ServerError};
use user_service::lifecycle::{Shutdown, ShutdownOutcome};
use user_service::net::listener;
use user_service::repository::{InMemoryUserRepository, RepositoryResult, UserRepository};
use user_service::ServiceConfig;

pub fn test_config() -> ServiceConfig {
    serde_yaml::from_str(
        r#"
service:
  name: user
  url: http://users.test:8000
  bindAddress: 127.0.0.1
  port: 0
database:
  host: localhost
  port: 5432
  user: test
  password: test
  name: users
"#,
    )
    .unwrap()
}

pub fn sample_user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: "hash".to_string(),
        is_verified: false,
        stream_api_key: Some(Uuid::new_v4()),
        facebook_id: None,
        is_online: false,
    }
}

/// Repository that counts every call before delegating to an in-memory store.
#[derive(Default)]
pub struct SpyRepository {
    pub inner: InMemoryUserRepository,
    calls: AtomicUsize,
}

impl SpyRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for SpyRepository {
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<User> {
        self.hit();
        self.inner.get_by_id(id).await
    }

    async fn get_by_name(&self, username: &str) -> RepositoryResult<User> {
        self.hit();
        self.inner.get_by_name(username).await
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<User> {
        self.hit();
        self.inner.get_by_email(email).await
    }

    async fn get_by_api_key(&self, api_key: Uuid) -> RepositoryResult<User> {
        self.hit();
        self.inner.get_by_api_key(api_key).await
    }

    async fn get_by_facebook_id(&self, facebook_id: &str) -> RepositoryResult<User> {
        self.hit();
        self.inner.get_by_facebook_id(facebook_id).await
    }

    async fn get_streaming_users(&self) -> RepositoryResult<Vec<User>> {
        self.hit();
        self.inner.get_streaming_users().await
    }

    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        self.hit();
        self.inner.create(user).await
    }

    async fn update(&self, user: &User) -> RepositoryResult<()> {
        self.hit();
        self.inner.update(user).await
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.hit();
        self.inner.delete(id).await
    }
}

/// A server running on an ephemeral port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<ShutdownOutcome, ServerError>>,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub fn spawn_server(server: HttpServer) -> RunningServer {
    let (tcp, addr) = listener::bind("127.0.0.1:0").unwrap();
    let shutdown = Shutdown::new();
    let notified = shutdown.notified();
    let task = tokio::spawn(server.run(tcp, None, notified));
    RunningServer {
        addr,
        shutdown,
        task,
    }
}

pub fn in_memory_server(repo: Arc<dyn UserRepository>) -> HttpServer {
    HttpServer::new(test_config(), repo)
}
