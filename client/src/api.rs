use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Remote operations the hooks depend on.
pub trait TaskApi {
    fn get_tasks(&self) -> Result<Vec<Task>, ClientError>;
    fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ClientError>;
    fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ClientError>;
    fn delete_task(&self, id: &str) -> Result<(), ClientError>;
}

pub struct HttpTaskApi {
    pub base_url: String,
    client: Client,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
        })
    }

    pub fn localhost() -> Result<Self, ClientError> {
        Self::new(DEFAULT_BASE_URL)
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/api/tasks/{}", self.base_url, id)
    }
}

fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        Err(ClientError::Http { status, body })
    }
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    Ok(ensure_success(resp)?.json::<T>()?)
}

impl TaskApi for HttpTaskApi {
    fn get_tasks(&self) -> Result<Vec<Task>, ClientError> {
        debug!("GET {}", self.tasks_url());
        read_json(self.client.get(self.tasks_url()).send()?)
    }

    fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, ClientError> {
        debug!("POST {}", self.tasks_url());
        read_json(self.client.post(self.tasks_url()).json(request).send()?)
    }

    fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ClientError> {
        debug!("PATCH {}", self.task_url(id));
        read_json(self.client.patch(self.task_url(id)).json(request).send()?)
    }

    fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        debug!("DELETE {}", self.task_url(id));
        ensure_success(self.client.delete(self.task_url(id)).send()?)?;
        Ok(())
    }
}
