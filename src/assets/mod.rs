/// Photo asset loading module
///
/// This module handles:
/// - Reading photo files from the asset directory
/// - Retrying with a percent-encoded filename
/// - Probing that the bytes are a decodable image
/// - Loading both photos of a round concurrently

pub mod loader;

pub use loader::{load_round, LoadedImage, RoundImages};
