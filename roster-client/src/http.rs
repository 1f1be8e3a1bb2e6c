//! HTTP client for network-based API calls

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ApiResponse, ClientConfig, ClientError, ClientResult};
use shared::models::{Employee, EmployeeInput, EmployeeListData};

/// HTTP client for making network requests to the roster service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).query(query).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    async fn put<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let response = self.client.put(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Make a multipart request (POST or PUT)
    async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, %method, "multipart");
        let response = self
            .client
            .request(method, &url)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(classify_error(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    fn employee_form(input: &EmployeeInput) -> reqwest::multipart::Form {
        reqwest::multipart::Form::new()
            .text("name", input.name.clone())
            .text("email", input.email.clone())
            .text("phone", input.phone.clone())
            .text("department", input.department.clone())
            .text("salary", input.salary.to_string())
    }

    fn image_part(filename: String, image: Vec<u8>) -> reqwest::multipart::Part {
        reqwest::multipart::Part::bytes(image).file_name(filename)
    }

    // ========== Employee API ==========

    /// List employees with optional name search and pagination
    pub async fn list_employees(
        &self,
        search: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<EmployeeListData> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(s) = search {
            query.push(("search", s.to_string()));
        }
        if let Some(p) = page {
            query.push(("page", p.to_string()));
        }
        if let Some(l) = limit {
            query.push(("limit", l.to_string()));
        }

        self.get::<ApiResponse<EmployeeListData>>("api/employees", &query)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee list".to_string()))
    }

    /// Fetch a single employee by id
    pub async fn get_employee(&self, id: i64) -> ClientResult<Employee> {
        self.get::<ApiResponse<Employee>>(&format!("api/employees/{id}"), &[])
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".to_string()))
    }

    /// Create an employee
    pub async fn create_employee(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        self.post::<ApiResponse<Employee>, _>("api/employees", input)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".to_string()))
    }

    /// Create an employee with a profile image
    pub async fn create_employee_with_image(
        &self,
        input: &EmployeeInput,
        filename: impl Into<String>,
        image: Vec<u8>,
    ) -> ClientResult<Employee> {
        let form = Self::employee_form(input)
            .part("profileImage", Self::image_part(filename.into(), image));

        self.send_multipart::<ApiResponse<Employee>>(reqwest::Method::POST, "api/employees", form)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".to_string()))
    }

    /// Update an employee (full overwrite of the core fields)
    pub async fn update_employee(&self, id: i64, input: &EmployeeInput) -> ClientResult<Employee> {
        self.put::<ApiResponse<Employee>, _>(&format!("api/employees/{id}"), input)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".to_string()))
    }

    /// Update an employee and replace the profile image
    pub async fn update_employee_with_image(
        &self,
        id: i64,
        input: &EmployeeInput,
        filename: impl Into<String>,
        image: Vec<u8>,
    ) -> ClientResult<Employee> {
        let form = Self::employee_form(input)
            .part("profileImage", Self::image_part(filename.into(), image));

        self.send_multipart::<ApiResponse<Employee>>(
            reqwest::Method::PUT,
            &format!("api/employees/{id}"),
            form,
        )
        .await?
        .data
        .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".to_string()))
    }

    /// Delete an employee
    pub async fn delete_employee(&self, id: i64) -> ClientResult<()> {
        self.delete::<ApiResponse<()>>(&format!("api/employees/{id}"))
            .await?;
        Ok(())
    }

    /// Fetch a stored profile image by its envelope path or bare filename
    pub async fn fetch_image(&self, path: &str) -> ClientResult<Vec<u8>> {
        let filename = path.rsplit('/').next().unwrap_or(path);
        let url = self.url(&format!("api/images/{filename}"));
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(classify_error(status, text));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Map a non-success response to a typed error, preferring the envelope
/// message over the raw body.
fn classify_error(status: StatusCode, body: String) -> ClientError {
    let envelope = serde_json::from_str::<ApiResponse<()>>(&body).ok();
    let message = envelope
        .as_ref()
        .map(|r| r.message.clone())
        .unwrap_or_else(|| body.clone());

    match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ => {
            // Internal failures carry the underlying detail in `error`
            match envelope.and_then(|r| r.error) {
                Some(detail) => ClientError::Internal(format!("{message}: {detail}")),
                None => ClientError::Internal(message),
            }
        }
    }
}
