use std::str::FromStr;

use crate::{
    app::{
        models::api_error::ApiError, util::multipart::models::multipart_form::MultipartForm,
    },
    images::errors::ImagesApiError,
};

pub mod colorize_dto;
pub mod inpaint_dto;

fn parse_field<T: FromStr>(form: &MultipartForm, name: &str, default: T) -> Result<T, ApiError> {
    let Some(raw) = form.field(name) else {
        return Ok(default);
    };

    raw.parse().map_err(|_| invalid_parameter(name, raw))
}

fn invalid_parameter(name: &str, raw: &str) -> ApiError {
    ImagesApiError::InvalidParameter {
        name: name.to_string(),
        value: raw.to_string(),
    }
    .value()
}
