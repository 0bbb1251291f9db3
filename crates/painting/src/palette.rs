//! Pen dispatch
//!
//! A [`PaletteSpec`] maps stroke-type keys to pen factories. A [`Palette`]
//! is the materialized form: one pen instance per key, built once per
//! specification and looked up by `path.config.type` on every draw.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::types::{DrawOptions, Path};

/// Renders paths onto a surface context of type `C`
pub trait Pen<C>: Send + Sync {
    fn draw(&self, context: &mut C, path: &Path, options: &DrawOptions);
}

/// Errors raised by pen factories
#[derive(Debug, thiserror::Error)]
pub enum PenError {
    #[error("Failed to create pen: {0}")]
    Creation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("No pen registered for stroke type {kind:?}")]
    MissingPen { kind: String },

    #[error("Failed to instantiate pen {kind:?}: {source}")]
    Instantiate {
        kind: String,
        #[source]
        source: PenError,
    },
}

/// Constructor for one pen
pub type PenFactory<C> = Box<dyn Fn() -> Result<Box<dyn Pen<C>>, PenError> + Send + Sync>;

/// Host-supplied palette description.
///
/// Boards compare specifications by `Arc` identity: handing a board a new
/// `Arc` rebuilds its palette even when the contents are unchanged.
pub struct PaletteSpec<C> {
    factories: BTreeMap<String, PenFactory<C>>,
}

impl<C> Default for PaletteSpec<C> {
    fn default() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }
}

impl<C> fmt::Debug for PaletteSpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteSpec")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<C: 'static> PaletteSpec<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallible factory for `kind`
    pub fn with_factory<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Pen<C>>, PenError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
        self
    }

    /// Register a pen built with `Default`
    pub fn with_pen<P>(self, kind: impl Into<String>) -> Self
    where
        P: Pen<C> + Default + 'static,
    {
        self.with_factory(kind, || Ok(Box::new(P::default()) as Box<dyn Pen<C>>))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Pen instances for one palette specification
pub struct Palette<C> {
    pens: HashMap<String, Box<dyn Pen<C>>>,
    spec: Arc<PaletteSpec<C>>,
}

impl<C> fmt::Debug for Palette<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("kinds", &self.pens.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<C: 'static> Palette<C> {
    /// Instantiate one pen per key of `spec`.
    ///
    /// The first factory failure aborts the build.
    pub fn instantiate(spec: Arc<PaletteSpec<C>>) -> Result<Self, PaletteError> {
        let mut pens = HashMap::with_capacity(spec.len());
        for (kind, factory) in &spec.factories {
            let pen = factory().map_err(|source| PaletteError::Instantiate {
                kind: kind.clone(),
                source,
            })?;
            pens.insert(kind.clone(), pen);
        }
        info!("Instantiated palette with {} pens", pens.len());
        Ok(Self { pens, spec })
    }

    /// Whether `spec` is a different specification than this palette's
    pub fn is_stale(&self, spec: &Arc<PaletteSpec<C>>) -> bool {
        !Arc::ptr_eq(&self.spec, spec)
    }

    pub fn spec(&self) -> &Arc<PaletteSpec<C>> {
        &self.spec
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.pens.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.pens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pens.is_empty()
    }

    /// Draw `path` with the pen registered for its type
    pub fn draw(&self, context: &mut C, path: &Path, options: &DrawOptions) -> Result<(), PaletteError> {
        let pen = self
            .pens
            .get(path.kind())
            .ok_or_else(|| PaletteError::MissingPen {
                kind: path.kind().to_string(),
            })?;
        pen.draw(context, path, options);
        Ok(())
    }
}
