use axum::extract::Multipart;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AppError, AppResult};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Placeholder shown when a row has no stored image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefaultImage {
    Profile,
    Plant,
    Equipment,
    Garden,
    Nutrient,
}

impl DefaultImage {
    pub fn path(self) -> &'static str {
        match self {
            DefaultImage::Profile => "/img/profile.jpg",
            DefaultImage::Plant => "/img/plant_Image",
            DefaultImage::Equipment => "/img/equipment.jpg",
            DefaultImage::Garden => "/img/journal.jpg",
            DefaultImage::Nutrient => "/img/fertilizer.jpg",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

pub fn to_data_uri(data: Option<&[u8]>, content_type: Option<&str>, default: DefaultImage) -> String {
    match data {
        Some(bytes) if !bytes.is_empty() => {
            let content_type = content_type
                .filter(|t| !t.is_empty())
                .unwrap_or("application/octet-stream");
            format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
        }
        _ => default.path().to_string(),
    }
}

/// Validates one uploaded part. The declared content type wins; otherwise it
/// is guessed from the file name.
pub fn image_from_parts(
    data: Vec<u8>,
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> AppResult<UploadedImage> {
    if data.is_empty() {
        return Err(AppError::InvalidInput("The uploaded file is empty.".into()));
    }
    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Images must be smaller than {} MB.",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }

    let content_type = match content_type.filter(|t| !t.is_empty() && *t != "application/octet-stream") {
        Some(declared) => declared.to_string(),
        None => file_name
            .map(|name| mime_guess::from_path(name).first_or_octet_stream().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    };

    let is_image = content_type
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE)
        .unwrap_or(false);
    if !is_image {
        return Err(AppError::InvalidInput(format!(
            "Unsupported file type `{content_type}`; please upload an image."
        )));
    }

    Ok(UploadedImage { data, content_type })
}

/// Reads the `image` part (or the first file part) from a multipart body.
pub async fn file_to_bytes(mut multipart: Multipart) -> AppResult<UploadedImage> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?
    {
        let is_image_field = field.name() == Some("image") || field.file_name().is_some();
        if !is_image_field {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?;
        return image_from_parts(bytes.to_vec(), content_type.as_deref(), file_name.as_deref());
    }

    Err(AppError::InvalidInput("No image was provided.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_bytes_become_a_data_uri() {
        let uri = to_data_uri(Some(b"png!".as_slice()), Some("image/png"), DefaultImage::Plant);
        assert_eq!(uri, "data:image/png;base64,cG5nIQ==");
    }

    #[test]
    fn missing_bytes_fall_back_to_kind_default() {
        assert_eq!(to_data_uri(None, None, DefaultImage::Plant), "/img/plant_Image");
        assert_eq!(
            to_data_uri(Some([].as_slice()), Some("image/png"), DefaultImage::Equipment),
            "/img/equipment.jpg"
        );
        assert_eq!(DefaultImage::Garden.path(), "/img/journal.jpg");
        assert_eq!(DefaultImage::Nutrient.path(), "/img/fertilizer.jpg");
        assert_eq!(DefaultImage::Profile.path(), "/img/profile.jpg");
    }

    #[test]
    fn content_type_is_guessed_from_file_name() {
        let img = image_from_parts(vec![1, 2, 3], None, Some("tomato.jpg")).unwrap();
        assert_eq!(img.content_type, "image/jpeg");
        assert_eq!(img.data, vec![1, 2, 3]);

        let declared = image_from_parts(vec![1], Some("image/webp"), Some("x.jpg")).unwrap();
        assert_eq!(declared.content_type, "image/webp");
    }

    #[test]
    fn non_images_and_oversized_files_are_rejected() {
        let err = image_from_parts(vec![1], Some("application/pdf"), Some("a.pdf")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = image_from_parts(vec![0; MAX_IMAGE_BYTES + 1], Some("image/png"), None).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));

        let err = image_from_parts(Vec::new(), Some("image/png"), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
