//! Aggregate root for the Product context.

use std::collections::HashSet;

use catalog_core::error::DomainError;

/// Maximum number of tags a product may carry.
pub const MAX_TAGS: usize = 5;

/// The aggregate root for a catalog product.
///
/// Prices are held in minor currency units (cents) to avoid floating-point
/// drift. Tags are unique under case-insensitive comparison and keep the
/// order in which they were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: i64,
    name: String,
    price: i64,
    tags: Vec<String>,
}

impl Product {
    /// Creates a validated, not-yet-persisted product (id `0`).
    ///
    /// The name and tags are trimmed, blank tags are dropped and duplicate
    /// tags (ignoring case) are collapsed onto their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty, the price is
    /// negative, or more than [`MAX_TAGS`] distinct tags remain.
    pub fn create<I, S>(name: &str, price: i64, tags: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let product = Self {
            id: 0,
            name: name.trim().to_owned(),
            price,
            tags: normalize_tags(tags),
        };
        product.validate()?;
        Ok(product)
    }

    /// Returns the product with its identifier set.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// The identifier, `0` until the product has been persisted.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The trimmed product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The price in minor currency units.
    #[must_use]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Tags in first-seen order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Re-checks every invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_field("name", "name required"));
        }
        if self.price < 0 {
            return Err(DomainError::invalid_field(
                "price",
                "price must be non-negative",
            ));
        }
        if self.tags.len() > MAX_TAGS {
            return Err(DomainError::invalid_field(
                "tags",
                format!("at most {MAX_TAGS} tags allowed"),
            ));
        }
        let mut seen = HashSet::with_capacity(self.tags.len());
        if !self.tags.iter().all(|tag| seen.insert(tag.to_lowercase())) {
            return Err(DomainError::invalid_field("tags", "tags must be unique"));
        }
        Ok(())
    }

    /// Replaces the name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty.
    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_field("name", "name required"));
        }
        trimmed.clone_into(&mut self.name);
        Ok(())
    }

    /// Replaces the price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the new price is negative; the
    /// current price is left untouched.
    pub fn change_price(&mut self, new_price: i64) -> Result<(), DomainError> {
        if new_price < 0 {
            return Err(DomainError::invalid_field(
                "price",
                "price must be non-negative",
            ));
        }
        self.price = new_price;
        Ok(())
    }

    /// Adds a tag unless it is blank or already present (ignoring case).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the product already has
    /// [`MAX_TAGS`] tags.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), DomainError> {
        let tag = tag.trim();
        if tag.is_empty() || self.has_tag(tag) {
            return Ok(());
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(DomainError::invalid_field(
                "tags",
                format!("at most {MAX_TAGS} tags allowed"),
            ));
        }
        self.tags.push(tag.to_owned());
        Ok(())
    }

    /// Removes the tag matching `tag` ignoring case. Absent tags are ignored.
    pub fn remove_tag(&mut self, tag: &str) {
        let needle = tag.trim().to_lowercase();
        self.tags.retain(|existing| existing.to_lowercase() != needle);
    }

    fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|existing| existing.to_lowercase() == needle)
    }
}

fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter_map(|tag| {
            let trimmed = tag.as_ref().trim();
            (!trimmed.is_empty() && seen.insert(trimmed.to_lowercase()))
                .then(|| trimmed.to_owned())
        })
        .collect()
}
