/// Photo file loader
///
/// Turns a catalog file reference into an image handle the UI can draw.
/// The handle owns the file bytes; dropping it releases them.

use iced::widget::image::Handle;
use std::io::Cursor;
use std::path::PathBuf;
use tokio::{fs, task};

use crate::error::AssetError;
use crate::state::data::Side;

/// A photo ready for display
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Catalog file reference this was loaded from
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

/// Both photos of one round
#[derive(Debug, Clone)]
pub struct RoundImages {
    pub left: LoadedImage,
    pub right: LoadedImage,
}

impl RoundImages {
    /// Photo shown on the given side
    pub fn on(&self, side: Side) -> &LoadedImage {
        match side {
            Side::A => &self.left,
            Side::B => &self.right,
        }
    }
}

/// Load the left and right photos of a round concurrently.
///
/// The round only succeeds if both files load. On failure the error names
/// the offending file (the left one if both fail).
pub async fn load_round(
    dir: PathBuf,
    left_file: String,
    right_file: String,
) -> Result<RoundImages, AssetError> {
    let (left, right) = tokio::join!(
        fetch_image(dir.clone(), left_file),
        fetch_image(dir, right_file),
    );

    Ok(RoundImages {
        left: left?,
        right: right?,
    })
}

/// Load a single photo.
///
/// Reads `dir/file`; if that fails, retries once with the filename
/// percent-encoded, which covers assets exported with escaped names.
pub async fn fetch_image(dir: PathBuf, file: String) -> Result<LoadedImage, AssetError> {
    let bytes = match fs::read(dir.join(&file)).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let encoded = encode_uri_component(&file);
            tracing::debug!("Read of {:?} failed ({}), retrying as {:?}", file, e, encoded);
            fs::read(dir.join(&encoded))
                .await
                .map_err(|_| AssetError::NotFound(file.clone()))?
        }
    };

    // Header parsing is cheap but still blocking work
    let (bytes, dimensions) = task::spawn_blocking(move || {
        let dimensions = probe_dimensions(&bytes);
        (bytes, dimensions)
    })
    .await
    .map_err(|e| AssetError::Undecodable {
        file: file.clone(),
        reason: format!("Task join error: {}", e),
    })?;

    let (width, height) = dimensions.map_err(|reason| AssetError::Undecodable {
        file: file.clone(),
        reason,
    })?;

    tracing::debug!("📷 Loaded {} ({}x{})", file, width, height);

    Ok(LoadedImage {
        file,
        width,
        height,
        handle: Handle::from_bytes(bytes),
    })
}

/// Read the image header and return its dimensions
fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), String> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .into_dimensions()
        .map_err(|e| e.to_string())
}

/// Percent-encode a filename the way browsers' `encodeURIComponent` does
fn encode_uri_component(name: &str) -> String {
    const UNRESERVED: &[u8] = b"-_.!~*'()";

    let mut encoded = String::with_capacity(name.len());
    for &byte in name.as_bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED.contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}
