//! Dictionary entries: the shape, taste and color description of a word
//!
//! Each word lives in its own `<word>.json` file inside the dictionary
//! directory. Asset paths inside an entry (`modelPath`, `meshPath`) are
//! resolved against the asset root, with a leading `/` meaning "relative to
//! the root" the way a web server's public directory works.

use conceptspace_core::{Error, Result, RgbBox, TasteProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the word looks: a model and the real-world size to scale it to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeEntry {
    pub model_path: String,
    pub target_size: f32,
    pub unit: String,
}

/// A closed mesh in RGB space marking colors the word can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRegion {
    pub mesh_path: String,
}

/// Colors a word can take: closed meshes in RGB space, a normalized RGB box,
/// or both. With neither, every color is allowed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    #[serde(default)]
    pub color_regions: Vec<ColorRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_region: Option<RgbBox>,
}

/// One word of the dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryItem {
    pub name: String,
    pub shape: ShapeEntry,
    pub taste: TasteProfile,
    pub color: ColorEntry,
}

impl DictionaryItem {
    fn validate(&self, word: &str) -> Result<()> {
        if !(self.shape.target_size.is_finite() && self.shape.target_size > 0.0) {
            return Err(Error::InvalidData(format!(
                "Invalid dictionary format for \"{}\": targetSize must be positive",
                word
            )));
        }
        if let Some(region) = &self.color.color_region {
            region.validate().map_err(|e| {
                Error::InvalidData(format!("Invalid dictionary format for \"{}\": {}", word, e))
            })?;
        }
        if !self.taste.is_finite() {
            return Err(Error::InvalidData(format!(
                "Invalid dictionary format for \"{}\": taste values must be finite",
                word
            )));
        }
        Ok(())
    }
}

/// Parse and validate a single entry. `word` is only used in messages.
pub fn parse_entry(word: &str, json: &str) -> Result<DictionaryItem> {
    let item: DictionaryItem = serde_json::from_str(json).map_err(|e| {
        Error::InvalidData(format!("Invalid dictionary format for \"{}\": {}", word, e))
    })?;
    item.validate(word)?;
    Ok(item)
}

/// A directory of word entries plus the root their assets live under
#[derive(Debug, Clone)]
pub struct Dictionary {
    dir: PathBuf,
    asset_root: PathBuf,
}

impl Dictionary {
    /// Open a dictionary directory. Assets resolve against the same directory
    /// until [`Dictionary::with_asset_root`] says otherwise.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(Error::NotFound(format!(
                "Dictionary directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            asset_root: dir.clone(),
            dir,
        })
    }

    pub fn with_asset_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.asset_root = root.as_ref().to_path_buf();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Sorted names of every `*.json` entry
    pub fn words(&self) -> Result<Vec<String>> {
        let mut words = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                words.push(stem.to_string());
            }
        }
        words.sort();
        Ok(words)
    }

    /// Load the entry for `word`
    pub fn load(&self, word: &str) -> Result<DictionaryItem> {
        if word.is_empty() || word.contains(|c: char| c == '/' || c == '\\') || word.contains("..") {
            return Err(Error::InvalidData(format!("Invalid word \"{}\"", word)));
        }

        let path = self.dir.join(format!("{}.json", word));
        if !path.is_file() {
            return Err(Error::NotFound(format!("Word \"{}\" not found in dictionary", word)));
        }

        debug!(path = %path.display(), "loading dictionary entry");
        let json = fs::read_to_string(&path)?;
        let item = parse_entry(word, &json)?;
        info!(
            word,
            regions = item.color.color_regions.len(),
            "loaded dictionary entry"
        );
        Ok(item)
    }

    /// Resolve an asset path from an entry against the asset root
    pub fn resolve(&self, asset: &str) -> PathBuf {
        let relative = asset.trim_start_matches('/');
        self.asset_root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conceptspace_core::UnitRgb;
    use std::fs;

    const APPLE: &str = r#"{
        "name": "apple",
        "shape": { "modelPath": "/models/apple.obj", "targetSize": 7.5, "unit": "cm" },
        "taste": { "sweet": 0.75, "sour": 0.55, "salty": 0.05, "bitter": 0.08, "umami": 0.06 },
        "color": { "colorRegions": [ { "meshPath": "/models/red.obj" }, { "meshPath": "models/green.obj" } ] }
    }"#;

    #[test]
    fn test_parse_entry() {
        let item = parse_entry("apple", APPLE).unwrap();
        assert_eq!(item.name, "apple");
        assert_eq!(item.shape.model_path, "/models/apple.obj");
        assert_eq!(item.shape.unit, "cm");
        assert_eq!(item.taste.sweet, 0.75);
        assert_eq!(item.color.color_regions.len(), 2);
    }

    #[test]
    fn test_missing_section_is_invalid_format() {
        let json = r#"{ "name": "x", "shape": { "modelPath": "a.obj", "targetSize": 1, "unit": "cm" } }"#;
        match parse_entry("x", json) {
            Err(Error::InvalidData(msg)) => assert!(msg.starts_with("Invalid dictionary format for \"x\"")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rgb_box_region() {
        let json = r#"{
            "name": "lime",
            "shape": { "modelPath": "/models/lime.obj", "targetSize": 5, "unit": "cm" },
            "taste": { "sweet": 0.1, "sour": 0.9, "salty": 0, "bitter": 0.2, "umami": 0 },
            "color": { "colorRegion": { "min": { "r": 0.2, "g": 0.6, "b": 0 }, "max": { "r": 0.6, "g": 1, "b": 0.3 } } }
        }"#;
        let item = parse_entry("lime", json).unwrap();
        assert!(item.color.color_regions.is_empty());
        let region = item.color.color_region.unwrap();
        assert_eq!(region.min, UnitRgb::new(0.2, 0.6, 0.0));
        assert_eq!(region.max, UnitRgb::new(0.6, 1.0, 0.3));

        let inverted = json.replace(r#""r": 0.6"#, r#""r": 0.1"#);
        assert!(matches!(parse_entry("lime", &inverted), Err(Error::InvalidData(_))));

        let plain = r#"{
            "name": "salt",
            "shape": { "modelPath": "/models/salt.obj", "targetSize": 1, "unit": "mm" },
            "taste": { "sweet": 0, "sour": 0, "salty": 1, "bitter": 0, "umami": 0 },
            "color": {}
        }"#;
        let item = parse_entry("salt", plain).unwrap();
        assert_eq!(item.color, ColorEntry::default());
    }

    #[test]
    fn test_non_positive_target_size() {
        let json = APPLE.replace("7.5", "0");
        assert!(matches!(parse_entry("apple", &json), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_directory_lookup() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("apple.json"), APPLE).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("banana.json"), APPLE.replace("apple", "banana")).unwrap();

        let dict = Dictionary::open(dir.path()).unwrap();
        assert_eq!(dict.words().unwrap(), vec!["apple", "banana"]);
        assert_eq!(dict.load("banana").unwrap().name, "banana");

        match dict.load("cherry") {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Word \"cherry\" not found in dictionary"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(dict.load("../apple"), Err(Error::InvalidData(_))));
        assert!(matches!(dict.load(""), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_resolve_assets() {
        let dir = tempfile::tempdir().unwrap();
        let dict = Dictionary::open(dir.path()).unwrap().with_asset_root("/srv/public");
        assert_eq!(dict.resolve("/models/apple.obj"), PathBuf::from("/srv/public/models/apple.obj"));
        assert_eq!(dict.resolve("models/apple.obj"), PathBuf::from("/srv/public/models/apple.obj"));
    }

    #[test]
    fn test_open_missing_directory() {
        assert!(matches!(
            Dictionary::open("/definitely/not/here"),
            Err(Error::NotFound(_))
        ));
    }
}
