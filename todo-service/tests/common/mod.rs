use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Role;
use auth::TokenCodec;
use chrono::Duration;
use todo_service::domain::auth::service::AuthService;
use todo_service::domain::task::errors::TaskError;
use todo_service::domain::task::models::Task;
use todo_service::domain::task::models::TaskId;
use todo_service::domain::task::ports::TaskRepository;
use todo_service::domain::task::service::TaskService;
use todo_service::domain::user::errors::UserError;
use todo_service::domain::user::models::EmailAddress;
use todo_service::domain::user::models::User;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::models::Username;
use todo_service::domain::user::ports::UserRepository;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            TEST_SECRET,
            Duration::minutes(15),
            Duration::days(7),
        ));

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let task_repository = Arc::new(InMemoryTaskRepository::new());

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let task_service = Arc::new(TaskService::new(
            task_repository,
            Arc::clone(&user_repository),
        ));

        let router = create_router(
            auth_service,
            user_service,
            task_service,
            Arc::clone(&authenticator),
        );

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Server crashed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            users: user_repository,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register an account through the API and return the `data` payload
    /// (access/refresh tokens, email, role).
    pub async fn register(&self, username: &str, email: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
                "confirmPassword": password
            }))
            .send()
            .await
            .expect("Failed to execute register request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Insert an ADMIN account directly into the store and return its
    /// access token.
    pub async fn seed_admin(&self, email: &str, password: &str) -> String {
        let hash = self.authenticator.hash_password(password).unwrap();
        let user = User::with_role(
            Username::new("admin".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            hash,
            Role::Admin,
        );
        let user = self.users.create(user).await.unwrap();

        self.authenticator
            .token_codec()
            .issue_access(email, Role::Admin, user.id.0)
            .unwrap()
    }

    /// Refresh token signed with the right secret but already expired.
    pub fn expired_refresh_token(&self, email: &str) -> String {
        TokenCodec::new(
            TEST_SECRET,
            Duration::seconds(-120),
            Duration::seconds(-120),
        )
        .issue_refresh(email)
        .unwrap()
    }
}

/// Hash-map-backed user store mimicking the database uniqueness
/// constraints.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .values()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if users
            .values()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username.as_str() == username.as_str())
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email.as_str() == email))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .values()
            .any(|u| u.id != user.id && u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.username.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        if !users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

/// Hash-map-backed task store.
pub struct InMemoryTaskRepository {
    tasks: Mutex<HashMap<Uuid, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        self.tasks.lock().unwrap().insert(task.id.0, task.clone());
        Ok(task)
    }

    async fn find_by_id_and_user(
        &self,
        id: &TaskId,
        user_id: &UserId,
    ) -> Result<Option<Task>, TaskError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .get(&id.0)
            .filter(|t| t.user_id == *user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Task>, TaskError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.lock().unwrap();

        if !tasks.contains_key(&task.id.0) {
            return Err(TaskError::TaskNotFound(task.id.to_string()));
        }

        tasks.insert(task.id.0, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskError> {
        self.tasks
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(TaskError::TaskNotFound(id.to_string()))
    }
}
