//! Employee form extraction
//!
//! Create and update accept either a JSON body or multipart/form-data
//! (text fields plus an optional `profileImage` file part). Both shapes
//! funnel into the same validated [`EmployeeForm`].

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request},
};
use http::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::utils::AppError;
use shared::models::EmployeeInput;

/// Raw field set before validation. Everything is optional so missing
/// fields surface as the contract's validation message instead of a
/// deserializer rejection.
#[derive(Debug, Default, Deserialize)]
struct RawEmployeeBody {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    department: Option<String>,
    /// Number in JSON bodies, text in multipart ones
    salary: Option<Value>,
}

/// An uploaded profile image, not yet stored
#[derive(Debug)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Validated employee create/update payload
#[derive(Debug)]
pub struct EmployeeForm {
    pub input: EmployeeInput,
    pub image: Option<UploadedImage>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl RawEmployeeBody {
    /// Presence validation with the original falsiness rules: missing
    /// fields, empty strings and a zero salary are all "required".
    fn validate(self, image: Option<UploadedImage>) -> Result<EmployeeForm, AppError> {
        let salary = match self.salary {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => {
                let parsed = s
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| AppError::validation("Invalid salary value"))?;
                Some(parsed)
            }
            Some(_) => return Err(AppError::validation("Invalid salary value")),
        };

        let (Some(name), Some(email), Some(phone), Some(department), Some(salary)) = (
            non_empty(self.name),
            non_empty(self.email),
            non_empty(self.phone),
            non_empty(self.department),
            salary.filter(|v| *v != 0.0),
        ) else {
            return Err(AppError::validation("All fields are required"));
        };

        Ok(EmployeeForm {
            input: EmployeeInput {
                name,
                email,
                phone,
                department,
                salary,
            },
            image,
        })
    }
}

impl FromRequest<ServerState> for EmployeeForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &ServerState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?;
            return from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(body): Json<RawEmployeeBody> = Json::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(format!("Invalid request body: {}", e.body_text())))?;
            return body.validate(None);
        }

        // No recognized body at all: fall through to presence validation,
        // which reports the contract message for the all-missing case
        RawEmployeeBody::default().validate(None)
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<EmployeeForm, AppError> {
    let mut body = RawEmployeeBody::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        match name.as_str() {
            "name" => body.name = Some(field.text().await?),
            "email" => body.email = Some(field.text().await?),
            "phone" => body.phone = Some(field.text().await?),
            "department" => body.department = Some(field.text().await?),
            "salary" => {
                let text = field.text().await?;
                body.salary = (!text.is_empty()).then_some(Value::String(text));
            }
            "profileImage" => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let data = field.bytes().await?.to_vec();
                // An empty file input submits an empty part; treat as no image
                if !filename.is_empty() && !data.is_empty() {
                    image = Some(UploadedImage { filename, data });
                }
            }
            // Unknown fields are ignored, same as the form parser upstream
            _ => {}
        }
    }

    body.validate(image)
}
