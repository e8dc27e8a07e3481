// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod task_schema;

// Responses
pub mod error_response;
