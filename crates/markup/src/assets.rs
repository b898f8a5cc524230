//! Asset existence lookup.
//!
//! Discovering assets on disk is the caller's job; the compiler only asks
//! whether a key names an image and which file it resolves to.

use std::collections::HashMap;

/// Image extensions recognized for asset files, in lookup priority order.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "PNG", "jpg", "JPG", "jpeg", "JPEG"];

/// Answers whether an asset key names an existing image.
pub trait AssetLookup: Send + Sync {
    /// Whether `key` names an existing asset.
    fn exists(&self, key: &str) -> bool;

    /// File name (with extension) that `key` resolves to.
    fn resolve_filename(&self, key: &str) -> Option<String>;
}

/// External script-variant conversion service.
pub trait ScriptConverter: Send + Sync {
    /// Alternate-script spellings of `name`. May include `name` itself.
    fn variants(&self, name: &str) -> Vec<String>;
}

/// Converter that knows no alternate spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConversion;

impl ScriptConverter for NoConversion {
    fn variants(&self, _name: &str) -> Vec<String> {
        Vec::new()
    }
}

/// In-memory asset index keyed by file stem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSet {
    files: HashMap<String, String>,
}

impl AssetSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes file names by stem. Names without an image extension are
    /// ignored; when a stem has several images the extension listed first in
    /// [`IMAGE_EXTENSIONS`] wins.
    pub fn from_filenames<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Adds one file name. Returns false if it is not an image.
    pub fn insert(&mut self, filename: &str) -> bool {
        let Some((stem, ext)) = filename.rsplit_once('.') else {
            return false;
        };
        let Some(rank) = extension_rank(ext) else {
            return false;
        };
        if stem.is_empty() {
            return false;
        }

        let replace = match self.files.get(stem) {
            Some(existing) => existing
                .rsplit_once('.')
                .and_then(|(_, e)| extension_rank(e))
                .is_none_or(|current| rank < current),
            None => true,
        };
        if replace {
            self.files.insert(stem.to_string(), filename.to_string());
        }
        true
    }

    /// Number of indexed assets.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no assets are indexed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn extension_rank(ext: &str) -> Option<usize> {
    IMAGE_EXTENSIONS.iter().position(|e| *e == ext)
}

impl AssetLookup for AssetSet {
    fn exists(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    fn resolve_filename(&self, key: &str) -> Option<String> {
        self.files.get(key).cloned()
    }
}

/// Lookup that also accepts alternate-script spellings of a key.
///
/// A handbook converted to another script keeps its image file names, so a
/// key written in either script must find the same file.
pub struct VariantAwareAssets<'a, A: ?Sized, C: ?Sized> {
    assets: &'a A,
    converter: &'a C,
}

impl<'a, A, C> VariantAwareAssets<'a, A, C>
where
    A: AssetLookup + ?Sized,
    C: ScriptConverter + ?Sized,
{
    /// Wraps a lookup with a converter.
    pub fn new(assets: &'a A, converter: &'a C) -> Self {
        Self { assets, converter }
    }

    fn candidates(&self, key: &str) -> Vec<String> {
        let mut names = vec![key.to_string()];
        for variant in self.converter.variants(key) {
            if !names.contains(&variant) {
                names.push(variant);
            }
        }
        names
    }
}

impl<A, C> AssetLookup for VariantAwareAssets<'_, A, C>
where
    A: AssetLookup + ?Sized,
    C: ScriptConverter + ?Sized,
{
    fn exists(&self, key: &str) -> bool {
        self.candidates(key).iter().any(|name| self.assets.exists(name))
    }

    fn resolve_filename(&self, key: &str) -> Option<String> {
        self.candidates(key)
            .iter()
            .find_map(|name| self.assets.resolve_filename(name))
    }
}
