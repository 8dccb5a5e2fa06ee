use std::fs;
use std::path::Path;

use dealdesk_client::api::ProductBody;
use dealdesk_client::models::{ProductUpdate, StatusCounts};
use dealdesk_client::{ApiClient, FilePart, MultipartForm};
use serde_json::Value;

use super::print_json;
use crate::cli::{Payload, ProductCommand};
use crate::{Error, Result};

const IMAGE_FIELD: &str = "product_image";

pub async fn run(client: &ApiClient, cmd: ProductCommand) -> Result<()> {
    let products = client.products();
    match cmd {
        ProductCommand::List {
            status,
            page,
            counts,
        } => {
            let page = products.list(status.into(), page).await?;
            if counts {
                print_json(&StatusCounts::tally(&page))
            } else {
                print_json(&page)
            }
        }
        ProductCommand::Show { id } => print_json(&products.detail(id).await?),
        ProductCommand::Approve { id } => print_json(&products.approve(id).await?),
        ProductCommand::Reject { id } => print_json(&products.reject(id).await?),
        ProductCommand::Delete { id } => print_json(&products.delete(id).await?),
        ProductCommand::Create { kind, payload } => {
            let body = body_from(&payload)?;
            print_json(&products.create(kind.into(), body).await?)
        }
        ProductCommand::Update { id, payload } => {
            let fields = read_fields(&payload.json)?;
            if payload.image.is_none() {
                if let Some(update) = edit_form(&fields) {
                    return print_json(&products.update_fields(id, update).await?);
                }
            }
            print_json(&products.update(id, with_image(fields, payload.image.as_deref())?).await?)
        }
    }
}

fn body_from(payload: &Payload) -> Result<ProductBody> {
    with_image(read_fields(&payload.json)?, payload.image.as_deref())
}

fn read_fields(path: &Path) -> Result<Value> {
    let fields: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    if !fields.is_object() {
        return Err(Error::Custom(format!(
            "{} must contain a JSON object",
            path.display()
        )));
    }
    Ok(fields)
}

/// Edit-form shaped JSON (name, category and both prices) gets the derived
/// discount fields; fields the file leaves out stay out of the request.
fn edit_form(fields: &Value) -> Option<ProductUpdate> {
    serde_json::from_value(fields.clone()).ok()
}

fn with_image(fields: Value, image: Option<&Path>) -> Result<ProductBody> {
    let Some(image) = image else {
        return Ok(ProductBody::Json(fields));
    };
    let file_name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".into());
    let form = MultipartForm::from_json(&fields).file(FilePart {
        field: IMAGE_FIELD.into(),
        mime: mime_for(image).into(),
        file_name,
        bytes: fs::read(image)?,
    });
    Ok(ProductBody::Multipart(form))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
