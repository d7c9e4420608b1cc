use crate::errors::ToolError;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        #[serde(rename = "filePath")]
        file_path: String,
        #[serde(default, rename = "fileName")]
        file_name: Option<String>,
        #[serde(default, rename = "contentType")]
        content_type: Option<String>,
    },
}

fn default_file_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_path)
        .to_string()
}

async fn file_part(
    file_path: &str,
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<Part, ToolError> {
    // Whole file is buffered in memory; large uploads cost their full size.
    let bytes = tokio::fs::read(file_path)
        .await
        .map_err(|err| ToolError::file_read_failed(file_path, err))?;
    let name = file_name
        .map(str::to_string)
        .unwrap_or_else(|| default_file_name(file_path));
    let part = Part::bytes(bytes).file_name(name);
    match content_type {
        Some(mime) => part.mime_str(mime).map_err(|err| {
            ToolError::invalid_params(format!("Invalid contentType '{}': {}", mime, err))
        }),
        None => Ok(part),
    }
}

/// Builds the multipart body in field order. Every file is read before
/// anything is sent, so an unreadable path aborts the whole request.
pub async fn build_form(fields: &[FormField]) -> Result<Form, ToolError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File {
                name,
                file_path,
                file_name,
                content_type,
            } => {
                let part =
                    file_part(file_path, file_name.as_deref(), content_type.as_deref()).await?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_deserialize_by_type_tag() {
        let fields: Vec<FormField> = serde_json::from_value(json!([
            {"type": "text", "name": "title", "value": "Report"},
            {"type": "file", "name": "doc", "filePath": "/tmp/a.pdf", "contentType": "application/pdf"}
        ]))
        .expect("fields");
        assert_eq!(
            fields[1],
            FormField::File {
                name: "doc".to_string(),
                file_path: "/tmp/a.pdf".to_string(),
                file_name: None,
                content_type: Some("application/pdf".to_string()),
            }
        );
    }

    #[test]
    fn default_file_name_is_basename() {
        assert_eq!(default_file_name("/var/data/report.csv"), "report.csv");
        assert_eq!(default_file_name("notes.txt"), "notes.txt");
    }

    #[tokio::test]
    async fn unreadable_file_fails_with_path() {
        let missing = std::env::temp_dir()
            .join(format!("missing-{}", uuid::Uuid::new_v4()))
            .display()
            .to_string();
        let fields = vec![
            FormField::Text {
                name: "a".to_string(),
                value: "b".to_string(),
            },
            FormField::File {
                name: "f".to_string(),
                file_path: missing.clone(),
                file_name: None,
                content_type: None,
            },
        ];
        let Err(err) = build_form(&fields).await else {
            panic!("unreadable file must fail");
        };
        assert_eq!(err.code, "FILE_READ_FAILED");
        assert!(err.message.contains(&missing));
    }

    #[tokio::test]
    async fn invalid_content_type_is_rejected() {
        let path = std::env::temp_dir().join(format!("form-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, "hello").expect("write");
        let fields = vec![FormField::File {
            name: "f".to_string(),
            file_path: path.display().to_string(),
            file_name: None,
            content_type: Some("not a mime".to_string()),
        }];
        let Err(err) = build_form(&fields).await else {
            panic!("bad mime must fail");
        };
        assert_eq!(err.code, "INVALID_PARAMS");
        let _ = std::fs::remove_file(path);
    }
}
