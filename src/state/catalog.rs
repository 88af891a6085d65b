use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::data::PhotoPair;
use crate::config::Settings;
use crate::error::CatalogError;

/// Catalog file looked up inside the asset directory
pub const CATALOG_FILENAME: &str = "pairs.json";

/// Filename tags used by folder discovery ("<subject> iphone.jpg")
const PHONE_TAG: &str = "iphone";
const FULL_FRAME_TAG: &str = "sony";

/// Image extensions considered during discovery
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "heic"];

/// Built-in pairs, shipped next to the executable
const BUILTIN_PAIRS: [(u32, &str, &str, &str); 10] = [
    (1, "car dew iphone.jpg", "car dew sony.jpg", "Automotive Detail"),
    (2, "hair flower iphone.jpg", "hair flower sony.jpg", "Portrait Macro"),
    (3, "home iphone.jpg", "home sony.jpg", "Interior Design"),
    (4, "mask iphone.jpg", "mask sony.jpg", "Art & Culture"),
    (5, "pink flower iphone.jpg", "pink flower sony.jpg", "Floral Close-up"),
    (6, "stick plant iphone.jpg", "stick plant sony.jpg", "Botanical"),
    (7, "vase detailed iphone.jpg", "vase detailed sony.jpg", "Texture Study"),
    (8, "vase iphone.jpg", "vase sony.jpg", "Still Life"),
    (9, "yellow flower iphone.jpg", "yellow flower sony.jpg", "Nature"),
    (10, "bushes iphone.jpg", "bushes sony.jpg", "Landscape"),
];

/// The static list of labeled photo pairs.
///
/// Play never mutates a catalog: each game works on a shuffled copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pairs: Vec<PhotoPair>,
}

impl Catalog {
    pub fn new(pairs: Vec<PhotoPair>) -> Self {
        Self { pairs }
    }

    /// The default ten pairs
    pub fn builtin() -> Self {
        let pairs = BUILTIN_PAIRS
            .iter()
            .map(|&(id, phone, full_frame, category)| PhotoPair {
                id,
                phone_file: phone.to_string(),
                full_frame_file: full_frame.to_string(),
                category: category.to_string(),
            })
            .collect();
        Self { pairs }
    }

    /// Parse a JSON array of pair records.
    ///
    /// Duplicate ids are not rejected; the catalog author owns that.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let pairs: Vec<PhotoPair> = serde_json::from_str(json)?;
        Ok(Self { pairs })
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a catalog from the files in `dir`.
    ///
    /// Files named `<subject> iphone.<ext>` and `<subject> sony.<ext>` are
    /// paired by subject. Subjects missing either half are skipped.
    pub fn discover(dir: &Path) -> Result<Self, CatalogError> {
        // subject -> (phone, full frame)
        let mut halves: BTreeMap<String, (Option<String>, Option<String>)> = BTreeMap::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|source| CatalogError::Scan {
                path: dir.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().to_string();
            let Some((subject, tag)) = split_tagged_name(&filename) else {
                continue;
            };

            let slot = halves.entry(subject).or_default();
            if tag == PHONE_TAG {
                slot.0 = Some(filename);
            } else {
                slot.1 = Some(filename);
            }
        }

        let pairs = halves
            .into_iter()
            .filter_map(|(subject, halves)| match halves {
                (Some(phone), Some(full_frame)) => Some((subject, phone, full_frame)),
                _ => None,
            })
            .zip(1u32..)
            .map(|((subject, phone_file, full_frame_file), id)| PhotoPair {
                id,
                phone_file,
                full_frame_file,
                category: subject,
            })
            .collect();

        Ok(Self { pairs })
    }

    /// Pick the catalog for the given settings.
    ///
    /// Order: explicit catalog file, `pairs.json` in the asset directory,
    /// folder discovery, built-in pairs. Any failure falls through to the
    /// built-in catalog.
    pub fn resolve(settings: &Settings) -> Self {
        let candidate: Option<PathBuf> = settings
            .catalog_file
            .clone()
            .or_else(|| Some(settings.asset_dir.join(CATALOG_FILENAME)).filter(|p| p.exists()));

        if let Some(path) = candidate {
            match Self::from_file(&path) {
                Ok(catalog) => {
                    tracing::info!("📁 Loaded {} pairs from {}", catalog.len(), path.display());
                    return catalog;
                }
                Err(e) => {
                    tracing::warn!("⚠️  {e}, using built-in catalog");
                    return Self::builtin();
                }
            }
        }

        match Self::discover(&settings.asset_dir) {
            Ok(catalog) if !catalog.is_empty() => {
                tracing::info!(
                    "🔍 Discovered {} pairs in {}",
                    catalog.len(),
                    settings.asset_dir.display()
                );
                catalog
            }
            Ok(_) => {
                tracing::info!("Using built-in catalog");
                Self::builtin()
            }
            Err(e) => {
                tracing::warn!("⚠️  {e}, using built-in catalog");
                Self::builtin()
            }
        }
    }

    pub fn pairs(&self) -> &[PhotoPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// A freshly shuffled copy of every pair
    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<PhotoPair> {
        let mut pairs = self.pairs.clone();
        pairs.shuffle(rng);
        pairs
    }
}

/// Split "pink flower IPHONE.jpg" into ("pink flower", "iphone")
fn split_tagged_name(filename: &str) -> Option<(String, &'static str)> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if !IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
        return None;
    }

    let (subject, tag) = stem.rsplit_once(' ')?;
    let tag = match tag.to_lowercase().as_str() {
        PHONE_TAG => PHONE_TAG,
        FULL_FRAME_TAG => FULL_FRAME_TAG,
        _ => return None,
    };

    let subject = subject.trim();
    if subject.is_empty() {
        return None;
    }
    Some((subject.to_string(), tag))
}
