use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::key::IdMap;
use crate::{Error, PRIMARY_LEFT, PRIMARY_RIGHT, Result};

/// A named content layer inside a section and how many nested elements it holds.
///
/// Elements of a layer are staggered individually when the layer enters or exits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentLayer {
    pub name: String,
    pub elements: usize,
}

impl ContentLayer {
    pub fn new(name: impl Into<String>, elements: usize) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }
}

/// The optional parts a section actually has.
///
/// Anything missing here is skipped by the transition timeline instead of failing it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerSet {
    pub background: bool,
    pub overlay: bool,
    pub content: Vec<ContentLayer>,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self {
            background: true,
            overlay: false,
            content: vec![
                ContentLayer::new(PRIMARY_LEFT, 1),
                ContentLayer::new(PRIMARY_RIGHT, 1),
            ],
        }
    }
}

impl LayerSet {
    /// A section with no background, overlay or content layers.
    pub fn bare() -> Self {
        Self {
            background: false,
            overlay: false,
            content: Vec::new(),
        }
    }

    pub fn content_layer(&self, name: &str) -> Option<&ContentLayer> {
        self.content.iter().find(|l| l.name == name)
    }
}

/// Input to [`SectionRegistry::new`]: a section before it has been given an index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSpec {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layers: LayerSet,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: None,
            layers: LayerSet::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_layers(mut self, layers: LayerSet) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.layers.background = background;
        self
    }

    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.layers.overlay = overlay;
        self
    }

    /// Adds or replaces a content layer.
    pub fn with_content_layer(mut self, name: impl Into<String>, elements: usize) -> Self {
        let layer = ContentLayer::new(name, elements);
        match self.layers.content.iter_mut().find(|l| l.name == layer.name) {
            Some(existing) => *existing = layer,
            None => self.layers.content.push(layer),
        }
        self
    }

    pub fn without_content_layer(mut self, name: &str) -> Self {
        self.layers.content.retain(|l| l.name != name);
        self
    }
}

impl From<&str> for SectionSpec {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One full-viewport slide.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    id: String,
    category: Option<String>,
    index: usize,
    layers: LayerSet,
}

impl Section {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// `true` when both sections carry the same category tag.
    ///
    /// Untagged sections never share a category, not even with each other.
    pub fn shares_category_with(&self, other: &Section) -> bool {
        matches!((self.category(), other.category()), (Some(a), Some(b)) if a == b)
    }
}

/// The sections of a presentation in document order.
///
/// Immutable once built; a structural change means building a new registry.
#[derive(Clone, Debug, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    by_id: IdMap<usize>,
}

impl SectionRegistry {
    /// Builds a registry, assigning indexes in iteration order.
    ///
    /// Fails with [`Error::DuplicateSection`] if an id occurs twice.
    pub fn new<S: Into<SectionSpec>>(specs: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut sections = Vec::new();
        let mut by_id = IdMap::default();
        for (index, spec) in specs.into_iter().enumerate() {
            let spec = spec.into();
            if by_id.contains_key(spec.id.as_str()) {
                fwarn!(id = spec.id.as_str(), "SectionRegistry: duplicate section id");
                return Err(Error::DuplicateSection(spec.id));
            }
            by_id.insert(spec.id.clone(), index);
            sections.push(Section {
                id: spec.id,
                category: spec.category,
                index,
                layers: spec.layers,
            });
        }
        fdebug!(count = sections.len(), "SectionRegistry::new");
        Ok(Self { sections, by_id })
    }

    pub fn list(&self) -> &[Section] {
        &self.sections
    }

    pub fn count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn resolve(&self, id: &str) -> Result<&Section> {
        self.index_of(id)
            .and_then(|i| self.sections.get(i))
            .ok_or_else(|| Error::UnknownSection(id.into()))
    }

    /// Sections sharing `category`, in document order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .iter()
            .filter(move |s| s.category() == Some(category))
    }
}
