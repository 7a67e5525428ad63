use base64::{engine::general_purpose::STANDARD, Engine as _};
use mime_guess::{mime, Mime};
use std::{fs, io, path::Path};
use thiserror::Error;

/// Largest image that is embedded into a report.
pub const MAX_IMAGE_SIZE: u64 = 8 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Not an image: {0}")]
    UnsupportedType(String),
    #[error("Image is too large ({size} bytes, at most {MAX_IMAGE_SIZE} bytes)")]
    TooLarge { size: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Image type guessed from the file extension.
pub fn mime_type(path: &Path) -> Option<Mime> {
    mime_guess::from_path(path)
        .iter()
        .find(|guess| guess.type_() == mime::IMAGE)
}

pub fn encode_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

/// Read an image file into a `data:` URL.
pub fn load_data_url(path: &Path) -> Result<String, ImageError> {
    let mime = mime_type(path)
        .ok_or_else(|| ImageError::UnsupportedType(path.display().to_string()))?;
    let size = fs::metadata(path)?.len();
    if size > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge { size });
    }
    let data = fs::read(path)?;
    log::debug!("Embedding {size} bytes of {mime} from {}", path.display());
    Ok(encode_data_url(mime.as_ref(), &data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn detect_image_types_by_extension() {
        let mime = |file: &str| mime_type(Path::new(file)).map(|mime| mime.to_string());
        assert_eq!(mime("photo.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(mime("spill.png").as_deref(), Some("image/png"));
        assert_eq!(mime("scan.tiff").as_deref(), Some("image/tiff"));
        assert_eq!(mime("notes.txt"), None);
        assert_eq!(mime("report.pdf"), None);
        assert_eq!(mime("image"), None);
    }

    #[test]
    fn embed_small_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(
            load_data_url(&path).unwrap(),
            "data:image/png;base64,iVBORw=="
        );
    }

    #[test]
    fn reject_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"%PDF").unwrap();
        assert!(matches!(
            load_data_url(&path),
            Err(ImageError::UnsupportedType(_))
        ));
    }

    #[test]
    fn reject_large_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.jpg");
        File::create(&path)
            .unwrap()
            .set_len(MAX_IMAGE_SIZE + 1)
            .unwrap();
        assert!(matches!(
            load_data_url(&path),
            Err(ImageError::TooLarge { .. })
        ));
    }
}
