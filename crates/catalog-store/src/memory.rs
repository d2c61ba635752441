//! Process-local implementation of every repository port.
//!
//! All collections live behind one `parking_lot::RwLock`: reads take a
//! shared guard, writes an exclusive one, and no guard is held across an
//! `.await`. Identifiers are handed out from per-entity counters that only
//! move forward, so deleted ids are never reused.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use async_trait::async_trait;
use catalog_comment::domain::aggregates::Comment;
use catalog_comment::domain::repository::CommentRepository;
use catalog_core::error::DomainError;
use catalog_core::pagination::{Page, PageRequest};
use catalog_product::domain::aggregates::Product;
use catalog_product::domain::repository::ProductRepository;
use catalog_user::domain::aggregates::User;
use catalog_user::domain::repository::UserRepository;
use chrono::{TimeZone, Utc};
use parking_lot::RwLock;

#[derive(Debug)]
struct State {
    products: BTreeMap<i64, Product>,
    users: BTreeMap<i64, User>,
    comments: BTreeMap<i64, Comment>,
    next_product_id: i64,
    next_comment_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            users: BTreeMap::new(),
            comments: BTreeMap::new(),
            next_product_id: 1,
            next_comment_id: 1,
        }
    }
}

/// Thread-safe in-memory catalog store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with two products and two users.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the fixture data is rejected,
    /// which only happens if the fixtures themselves are edited badly.
    pub fn with_demo_data() -> Result<Self, DomainError> {
        let store = Self::new();
        store.insert_product(Product::create("Blue Widget", 1999, ["widget", "blue"])?.with_id(1))?;
        store.insert_product(Product::create("Red Gizmo", 2999, ["gizmo", "red"])?.with_id(2))?;

        let alice_joined = Utc
            .with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
            .single()
            .ok_or_else(|| DomainError::validation("invalid fixture timestamp"))?;
        let bob_joined = Utc
            .with_ymd_and_hms(2024, 1, 11, 9, 30, 0)
            .single()
            .ok_or_else(|| DomainError::validation("invalid fixture timestamp"))?;
        store.insert_user(User::new(1, "Alice", "alice@example.com", alice_joined)?)?;
        store.insert_user(User::new(2, "Bob", "bob@example.com", bob_joined)?)?;
        Ok(store)
    }

    /// Loads a product with a caller-chosen id, advancing the id counter
    /// past it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is not positive, is
    /// already taken, or the product breaks an invariant.
    pub fn insert_product(&self, product: Product) -> Result<(), DomainError> {
        product.validate()?;
        let id = positive_fixture_id(product.id())?;
        let mut state = self.state.write();
        match state.products.entry(id) {
            Entry::Occupied(_) => {
                return Err(DomainError::validation(format!("duplicate product id {id}")));
            }
            Entry::Vacant(slot) => {
                slot.insert(product);
            }
        }
        state.next_product_id = state.next_product_id.max(id + 1);
        Ok(())
    }

    /// Loads a user. Users are never created through the service, so this
    /// is the only write path and the place email uniqueness is enforced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is not positive, or the
    /// id or the email (compared case-insensitively) is already taken.
    pub fn insert_user(&self, user: User) -> Result<(), DomainError> {
        user.validate()?;
        let id = positive_fixture_id(user.id())?;
        let mut state = self.state.write();
        let email_taken = state
            .users
            .values()
            .any(|existing| existing.email().eq_ignore_ascii_case(user.email()));
        if email_taken {
            return Err(DomainError::invalid_field("email", "email already in use"));
        }
        match state.users.entry(id) {
            Entry::Occupied(_) => Err(DomainError::validation(format!("duplicate user id {id}"))),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }
}

fn positive_fixture_id(id: i64) -> Result<i64, DomainError> {
    if id <= 0 {
        return Err(DomainError::invalid_field("id", "fixture id must be positive"));
    }
    Ok(id)
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn get_by_id(&self, id: i64) -> Result<Product, DomainError> {
        self.state
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(DomainError::not_found("product", id))
    }

    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Product>, DomainError> {
        let needle = query.trim().to_lowercase();
        let state = self.state.read();
        let matches: Vec<&Product> = state
            .products
            .values()
            .filter(|product| needle.is_empty() || product.name().to_lowercase().contains(&needle))
            .collect();
        let total = u64::try_from(matches.len()).unwrap_or(u64::MAX);
        let items = matches
            .into_iter()
            .skip(to_usize(page.offset()))
            .take(to_usize(page.page_size()))
            .cloned()
            .collect();
        Ok(Page::new(items, total))
    }

    async fn create(&self, product: &Product) -> Result<i64, DomainError> {
        let mut state = self.state.write();
        let id = state.next_product_id;
        state.next_product_id += 1;
        state.products.insert(id, product.clone().with_id(id));
        Ok(id)
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut state = self.state.write();
        match state.products.get_mut(&product.id()) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("product", product.id())),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.write();
        if state.products.remove(&id).is_none() {
            return Err(DomainError::not_found("product", id));
        }
        state.comments.retain(|_, comment| comment.product_id() != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<User, DomainError> {
        self.state
            .read()
            .users
            .get(&id)
            .cloned()
            .ok_or(DomainError::not_found("user", id))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create_comment(&self, comment: &Comment) -> Result<i64, DomainError> {
        let mut state = self.state.write();
        let id = state.next_comment_id;
        state.next_comment_id += 1;
        state.comments.insert(id, comment.clone().with_id(id));
        Ok(id)
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Comment, DomainError> {
        self.state
            .read()
            .comments
            .get(&id)
            .cloned()
            .ok_or(DomainError::not_found("comment", id))
    }

    async fn list_comments_by_product(&self, product_id: i64) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .state
            .read()
            .comments
            .values()
            .filter(|comment| comment.product_id() == product_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(comments)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut state = self.state.write();
        match state.comments.get_mut(&comment.id()) {
            Some(slot) => {
                *slot = comment.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("comment", comment.id())),
        }
    }

    async fn delete_comment(&self, id: i64) -> Result<(), DomainError> {
        self.state
            .write()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::not_found("comment", id))
    }
}
