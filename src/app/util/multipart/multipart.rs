use axum::extract::{multipart::MultipartError, Multipart};

use crate::app::models::api_error::ApiError;

use super::models::{file_properties::FileProperties, multipart_form::MultipartForm};

pub async fn get_multipart_form(mut multipart: Multipart) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("get_multipart_form: {}", e);
                return Err(invalid_multipart(e));
            }
        };

        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|name| name.to_string());

        let Some(file_name) = file_name else {
            let text = field.text().await.map_err(invalid_multipart)?;
            form.fields.insert(field_name, text);
            continue;
        };

        let mime_type = field
            .content_type()
            .and_then(|content_type| content_type.parse().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let data = field.bytes().await.map_err(invalid_multipart)?;

        form.files.push(FileProperties {
            field_name,
            file_name,
            mime_type,
            data,
        });
    }

    Ok(form)
}

fn invalid_multipart(e: MultipartError) -> ApiError {
    ApiError {
        code: e.status(),
        message: format!("Invalid multipart body: {}", e.body_text()),
    }
}
