// ABOUTME: Multipart parsing for thesis forms
// ABOUTME: Collects text fields and an optional size- and type-checked PDF

use archive_core::{MAX_PDF_SIZE, PDF_MIME_TYPE};
use archive_theses::ThesisForm;
use axum::extract::Multipart;
use tracing::debug;

use crate::error::ApiError;
use crate::pdf_store::PdfStore;

/// Name of the multipart field carrying the document
pub const PDF_FIELD: &str = "pdf";

/// Body limit for multipart routes: the PDF cap plus room for text fields
pub const MULTIPART_BODY_LIMIT: usize = MAX_PDF_SIZE + 1024 * 1024;

/// A thesis form as received, before anything is written
#[derive(Debug, Default)]
pub struct ThesisUpload {
    pub form: ThesisForm,
    pub pdf: Option<Vec<u8>>,
}

impl ThesisUpload {
    /// Read every field of the body. Unknown text fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut upload = ThesisUpload::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == PDF_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await?;

                // An untouched file input still sends an empty, unnamed part
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                if content_type != PDF_MIME_TYPE {
                    return Err(ApiError::UnsupportedMediaType(
                        "Only PDF files are allowed".to_string(),
                    ));
                }

                if data.len() > MAX_PDF_SIZE {
                    return Err(ApiError::PayloadTooLarge(
                        "File size exceeds the 50MB limit".to_string(),
                    ));
                }
                upload.pdf = Some(data.to_vec());
                continue;
            }

            let value = field.text().await?;
            if !upload.form.set_field(&name, value) {
                debug!("Ignoring unknown form field: {}", name);
            }
        }

        Ok(upload)
    }

    /// Write the PDF, if one was sent, and return its public URL
    pub async fn store_pdf(&self, store: &dyn PdfStore) -> Result<Option<String>, ApiError> {
        match &self.pdf {
            Some(data) => Ok(Some(store.store(data).await?)),
            None => Ok(None),
        }
    }
}
