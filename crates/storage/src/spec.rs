//! Secondary index declarations
//!
//! An `IndexSpec` names a secondary index and says how to derive its key
//! from a record. Specs are fixed when the store is built; the store
//! validates them once and never accepts new ones.

use folio_core::{IndexKey, Record, StoreError, StoreResult};
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

/// Closure deriving an index key from a record
pub type Extractor<R> = Arc<dyn Fn(&R) -> Option<IndexKey> + Send + Sync>;

/// Normalization applied to extracted keys and to lookup probes
pub type Normalizer = fn(&IndexKey) -> IndexKey;

enum KeySource<R> {
    /// Arbitrary extraction closure
    Extract(Extractor<R>),
    /// Named record field, checked against `Record::FIELDS`
    Field(String),
}

/// Declaration of one secondary index
pub struct IndexSpec<R> {
    name: String,
    source: KeySource<R>,
    normalizer: Option<Normalizer>,
}

impl<R: Record> IndexSpec<R> {
    /// Index keyed by the result of `extract`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let by_author = IndexSpec::new("author", |b: &Book| IndexKey::from(&b.author));
    /// ```
    pub fn new<F>(name: impl Into<String>, extract: F) -> Self
    where
        R: 'static,
        F: Fn(&R) -> IndexKey + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: KeySource::Extract(Arc::new(move |r: &R| Some(extract(r)))),
            normalizer: None,
        }
    }

    /// Sparse index: records for which `extract` returns None are not filed
    pub fn sparse<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&R) -> Option<IndexKey> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: KeySource::Extract(Arc::new(extract)),
            normalizer: None,
        }
    }

    /// Index over a named record field
    ///
    /// The field must appear in `R::FIELDS`, otherwise store construction
    /// fails with `InvalidIndexSpec`.
    pub fn field(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: KeySource::Field(field.into()),
            normalizer: None,
        }
    }

    /// Normalize every extracted key and every lookup probe with `f`
    pub fn normalized(mut self, f: Normalizer) -> Self {
        self.normalizer = Some(f);
        self
    }

    /// Index name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key this index files `record` under, if any
    pub fn extract(&self, record: &R) -> Option<IndexKey> {
        let raw = match &self.source {
            KeySource::Extract(f) => f(record),
            KeySource::Field(field) => record.field(field),
        };
        raw.map(|k| self.normalize(k))
    }

    /// Apply the normalizer to a lookup probe
    pub fn normalize(&self, key: IndexKey) -> IndexKey {
        match self.normalizer {
            Some(f) => f(&key),
            None => key,
        }
    }

    fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::invalid_spec(&self.name, "index name is empty"));
        }
        if let KeySource::Field(field) = &self.source {
            if !R::FIELDS.contains(&field.as_str()) {
                return Err(StoreError::invalid_spec(
                    &self.name,
                    format!("unknown field '{}'", field),
                ));
            }
        }
        Ok(())
    }
}

/// Validate a full set of specs for one store
///
/// Rejects empty names, duplicate names and fields the record type does
/// not declare.
pub fn validate_specs<R: Record>(specs: &[IndexSpec<R>]) -> StoreResult<()> {
    let mut seen = FxHashSet::default();
    for spec in specs {
        spec.validate()?;
        if !seen.insert(spec.name.as_str()) {
            return Err(StoreError::invalid_spec(
                &spec.name,
                "duplicate index name",
            ));
        }
    }
    Ok(())
}

impl<R> Clone for IndexSpec<R> {
    fn clone(&self) -> Self {
        let source = match &self.source {
            KeySource::Extract(f) => KeySource::Extract(Arc::clone(f)),
            KeySource::Field(field) => KeySource::Field(field.clone()),
        };
        Self {
            name: self.name.clone(),
            source,
            normalizer: self.normalizer,
        }
    }
}

impl<R> fmt::Debug for IndexSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            KeySource::Extract(_) => "<extractor>".to_string(),
            KeySource::Field(field) => format!("field:{}", field),
        };
        f.debug_struct("IndexSpec")
            .field("name", &self.name)
            .field("source", &source)
            .field("normalized", &self.normalizer.is_some())
            .finish()
    }
}
