//! Catalog use case implementation.
//!
//! This module provides the `CatalogUseCase` which orchestrates the remote
//! catalog service, the in-memory product store, and the add/edit form. The
//! store is only mutated here, and only after the remote service confirmed
//! the mutation; a failed call leaves the store exactly as it was and parks
//! one message in the failed action's slot.

use std::sync::Arc;

use tokio::sync::Mutex;

use shopdeck_core::catalog::{
    Product, ProductDraft, ProductId, ProductRepository, ProductStore,
};
use shopdeck_core::error::{Result, ShopdeckError};
use shopdeck_core::form::FormController;

use crate::slot::ActionState;
use crate::snapshot::CatalogSnapshot;

const LOAD_ACTION: &str = "load";
const SAVE_ACTION: &str = "save";
const DELETE_ACTION: &str = "delete";

/// Use case for managing the product catalog against the remote service.
///
/// # Action slots
///
/// Three independent channels, each admitting one in-flight request:
/// - `load`: list refresh and single-record fetch
/// - `save`: create and update (the add/edit form submits here)
/// - `delete`: record removal
///
/// Unrelated slots may be in flight concurrently; a second request in the
/// same slot is rejected without a remote call being issued.
pub struct CatalogUseCase {
    /// Remote catalog service of record
    repository: Arc<dyn ProductRepository>,
    /// Session-local product collection
    store: Mutex<ProductStore>,
    /// The add/edit product form
    form: Mutex<FormController<ProductDraft>>,
    load_slot: Mutex<ActionState>,
    save_slot: Mutex<ActionState>,
    delete_slot: Mutex<ActionState>,
}

impl CatalogUseCase {
    /// Creates a use case with an empty store.
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            repository,
            store: Mutex::new(ProductStore::new()),
            form: Mutex::new(FormController::new()),
            load_slot: Mutex::new(ActionState::default()),
            save_slot: Mutex::new(ActionState::default()),
            delete_slot: Mutex::new(ActionState::default()),
        }
    }

    // ============================================================================
    // Remote operations
    // ============================================================================

    /// Fetches the full collection and replaces the store contents.
    ///
    /// On failure the store is left untouched and the load slot holds the
    /// error message.
    pub async fn load_all(&self) -> Result<()> {
        self.load_slot.lock().await.begin(LOAD_ACTION)?;

        match self.repository.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog loaded");
                self.store.lock().await.replace_all(products);
                self.load_slot.lock().await.settle(None);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("catalog load failed: {e}");
                self.load_slot.lock().await.settle(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Fetches a single record (the product-details view) and reconciles it
    /// into the store.
    pub async fn load_one(&self, id: &ProductId) -> Result<Product> {
        self.load_slot.lock().await.begin(LOAD_ACTION)?;

        match self.repository.fetch_product(id).await {
            Ok(product) => {
                self.store.lock().await.upsert(product.clone());
                self.load_slot.lock().await.settle(None);
                Ok(product)
            }
            Err(e) => {
                tracing::warn!(%id, "product fetch failed: {e}");
                self.load_slot.lock().await.settle(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Creates a record from a draft.
    ///
    /// The identifier is the one the service echoed, or a locally synthesized
    /// one when the echo carried none. There is no speculative insert: a
    /// failure leaves the store without the record.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let payload = draft.to_new_product()?;
        self.save_slot.lock().await.begin(SAVE_ACTION)?;

        match self.repository.create_product(&payload).await {
            Ok(echoed) => {
                let id = echoed.unwrap_or_else(ProductId::local);
                let product = payload.into_product(id);
                self.store.lock().await.upsert(product.clone());
                self.save_slot.lock().await.settle(None);
                Ok(product)
            }
            Err(e) => {
                tracing::warn!("product create failed: {e}");
                self.save_slot.lock().await.settle(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Replaces the record with the given identifier from a draft.
    pub async fn update(&self, id: &ProductId, draft: &ProductDraft) -> Result<Product> {
        let payload = draft.to_new_product()?;
        self.save_slot.lock().await.begin(SAVE_ACTION)?;

        match self.repository.update_product(id, &payload).await {
            Ok(()) => {
                let mut store = self.store.lock().await;
                // The form cannot edit the rating; carry the stored one over.
                let rating = store.get(id).and_then(|p| p.rating.clone());
                let mut product = payload.into_product(id.clone());
                product.rating = rating;
                store.upsert(product.clone());
                drop(store);
                self.save_slot.lock().await.settle(None);
                Ok(product)
            }
            Err(e) => {
                tracing::warn!(%id, "product update failed: {e}");
                self.save_slot.lock().await.settle(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Deletes the record with the given identifier.
    ///
    /// On failure the record remains visible in the store.
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        self.delete_slot.lock().await.begin(DELETE_ACTION)?;

        match self.repository.delete_product(id).await {
            Ok(()) => {
                self.store.lock().await.remove(id);
                self.delete_slot.lock().await.settle(None);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, "product delete failed: {e}");
                self.delete_slot.lock().await.settle(Some(e.to_string()));
                Err(e)
            }
        }
    }

    // ============================================================================
    // Form hooks
    // ============================================================================

    /// Opens the add/edit form.
    ///
    /// With an identifier the draft is seeded from the stored record and
    /// submits as an update; without one it is a blank create draft.
    pub async fn open_form(&self, seed: Option<&ProductId>) -> Result<()> {
        let draft = match seed {
            Some(id) => {
                let store = self.store.lock().await;
                let product = store
                    .get(id)
                    .ok_or_else(|| ShopdeckError::internal(format!("no product '{id}' to edit")))?;
                ProductDraft::from_product(product)
            }
            None => ProductDraft::new(),
        };
        self.form.lock().await.open(draft)
    }

    /// Mutates one field of the open draft.
    pub async fn set_form_field(&self, name: &str, value: &str) -> Result<()> {
        self.form.lock().await.set_field(name, value)
    }

    /// Discards the open draft without side effects.
    pub async fn cancel_form(&self) -> Result<()> {
        self.form.lock().await.cancel()
    }

    /// Submits the open draft, routing to create or update by its origin.
    ///
    /// The form closes on success and returns to editing, draft intact, on
    /// failure.
    pub async fn submit_form(&self) -> Result<Product> {
        let draft = self.form.lock().await.begin_submit()?;

        let outcome = match &draft.id {
            Some(id) => self.update(id, &draft).await,
            None => self.create(&draft).await,
        };

        self.form.lock().await.finish_submit(outcome.is_ok());
        outcome
    }

    // ============================================================================
    // View accessors
    // ============================================================================

    /// The current collection.
    pub async fn products(&self) -> Vec<Product> {
        self.store.lock().await.products().to_vec()
    }

    /// A single stored record.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.store.lock().await.get(id).cloned()
    }

    /// Serializable state for the presentation layer.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        let form = self.form.lock().await;
        CatalogSnapshot {
            products: self.store.lock().await.products().to_vec(),
            form: form.state(),
            draft: form.draft().cloned(),
            load: self.load_slot.lock().await.snapshot(),
            save: self.save_slot.lock().await.snapshot(),
            delete: self.delete_slot.lock().await.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use shopdeck_core::catalog::{NewProduct, Rating};
    use shopdeck_core::form::FormState;

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_string(),
            price,
            description: String::new(),
            category: "misc".to_string(),
            image: None,
            rating: None,
        }
    }

    fn draft(title: &str, price: &str) -> ProductDraft {
        let mut draft = ProductDraft::new();
        draft.title = title.to_string();
        draft.price = price.to_string();
        draft
    }

    /// Fake remote service with programmable failure and create-echo
    /// behavior, recording every call it receives.
    struct FakeRepository {
        listed: StdMutex<Vec<Product>>,
        fail: AtomicBool,
        echo_id: StdMutex<Option<ProductId>>,
        calls: StdMutex<Vec<&'static str>>,
    }

    impl FakeRepository {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                listed: StdMutex::new(Vec::new()),
                fail: AtomicBool::new(false),
                echo_id: StdMutex::new(None),
                calls: StdMutex::new(Vec::new()),
            })
        }

        fn with_products(products: Vec<Product>) -> Arc<Self> {
            let repo = Self::new();
            *repo.listed.lock().unwrap() = products;
            repo
        }

        fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn set_echo_id(&self, id: Option<ProductId>) {
            *self.echo_id.lock().unwrap() = id;
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ProductRepository for FakeRepository {
        async fn list_products(&self) -> Result<Vec<Product>> {
            self.record("list");
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopdeckError::load("connection reset"));
            }
            Ok(self.listed.lock().unwrap().clone())
        }

        async fn fetch_product(&self, id: &ProductId) -> Result<Product> {
            self.record("fetch");
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopdeckError::load("connection reset"));
            }
            self.listed
                .lock()
                .unwrap()
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .ok_or_else(|| ShopdeckError::load("no such record"))
        }

        async fn create_product(&self, _product: &NewProduct) -> Result<Option<ProductId>> {
            self.record("create");
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopdeckError::save("connection reset"));
            }
            Ok(self.echo_id.lock().unwrap().clone())
        }

        async fn update_product(&self, _id: &ProductId, _product: &NewProduct) -> Result<()> {
            self.record("update");
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopdeckError::save("connection reset"));
            }
            Ok(())
        }

        async fn delete_product(&self, _id: &ProductId) -> Result<()> {
            self.record("delete");
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopdeckError::delete("connection reset"));
            }
            Ok(())
        }
    }

    /// Fake whose list call parks until released, for in-flight tests.
    struct StalledRepository {
        release: Notify,
        calls: StdMutex<usize>,
    }

    impl StalledRepository {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                release: Notify::new(),
                calls: StdMutex::new(0),
            })
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProductRepository for StalledRepository {
        async fn list_products(&self) -> Result<Vec<Product>> {
            *self.calls.lock().unwrap() += 1;
            self.release.notified().await;
            Ok(Vec::new())
        }

        async fn fetch_product(&self, _id: &ProductId) -> Result<Product> {
            Err(ShopdeckError::load("unused"))
        }

        async fn create_product(&self, _product: &NewProduct) -> Result<Option<ProductId>> {
            Err(ShopdeckError::save("unused"))
        }

        async fn update_product(&self, _id: &ProductId, _product: &NewProduct) -> Result<()> {
            Err(ShopdeckError::save("unused"))
        }

        async fn delete_product(&self, _id: &ProductId) -> Result<()> {
            Err(ShopdeckError::delete("unused"))
        }
    }

    #[tokio::test]
    async fn test_load_all_populates_store() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo);

        usecase.load_all().await.unwrap();

        let products = usecase.products().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::from(1));
        assert_eq!(products[0].title, "A");
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_untouched() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo.clone());
        usecase.load_all().await.unwrap();

        repo.set_fail(true);
        let err = usecase.load_all().await.unwrap_err();
        assert!(err.is_load());

        let snapshot = usecase.snapshot().await;
        assert_eq!(snapshot.products, vec![product(1, "A", 9.99)]);
        assert!(snapshot.load.error.is_some());
    }

    #[tokio::test]
    async fn test_success_clears_prior_slot_error() {
        let repo = FakeRepository::new();
        let usecase = CatalogUseCase::new(repo.clone());

        repo.set_fail(true);
        let _ = usecase.load_all().await;
        assert!(usecase.snapshot().await.load.error.is_some());

        repo.set_fail(false);
        usecase.load_all().await.unwrap();
        assert!(usecase.snapshot().await.load.error.is_none());
    }

    #[tokio::test]
    async fn test_create_uses_echoed_id() {
        let repo = FakeRepository::new();
        repo.set_echo_id(Some(ProductId::from(21)));
        let usecase = CatalogUseCase::new(repo);

        let created = usecase.create(&draft("Mug", "4.50")).await.unwrap();
        assert_eq!(created.id, ProductId::from(21));
        assert_eq!(usecase.product(&ProductId::from(21)).await.unwrap().title, "Mug");
    }

    #[tokio::test]
    async fn test_create_synthesizes_local_id_when_not_echoed() {
        let repo = FakeRepository::new();
        let usecase = CatalogUseCase::new(repo);

        let first = usecase.create(&draft("Mug", "4.50")).await.unwrap();
        let second = usecase.create(&draft("Bowl", "7.00")).await.unwrap();

        assert!(first.id.is_local());
        assert!(second.id.is_local());
        assert_ne!(first.id, second.id);
        assert_eq!(usecase.products().await.len(), 2);
    }

    #[tokio::test]
    async fn test_create_failure_sets_save_error_and_skips_insert() {
        let repo = FakeRepository::new();
        repo.set_fail(true);
        let usecase = CatalogUseCase::new(repo);

        let err = usecase.create(&draft("Mug", "4.50")).await.unwrap_err();
        assert!(err.is_save());

        let snapshot = usecase.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert!(snapshot.save.error.is_some());
        assert!(snapshot.load.error.is_none());
        assert!(snapshot.delete.error.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo);
        usecase.load_all().await.unwrap();

        let updated = usecase
            .update(&ProductId::from(1), &draft("B", "12.50"))
            .await
            .unwrap();

        assert_eq!(updated.id, ProductId::from(1));
        assert_eq!(updated.title, "B");
        assert_eq!(updated.price, 12.50);
        assert_eq!(usecase.products().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_carries_over_rating() {
        let mut rated = product(1, "A", 9.99);
        rated.rating = Some(Rating {
            rate: 4.2,
            count: 37,
        });
        let repo = FakeRepository::with_products(vec![rated]);
        let usecase = CatalogUseCase::new(repo);
        usecase.load_all().await.unwrap();

        let updated = usecase
            .update(&ProductId::from(1), &draft("B", "12.50"))
            .await
            .unwrap();
        assert_eq!(updated.rating.unwrap().count, 37);
    }

    #[tokio::test]
    async fn test_update_failure_leaves_record_unchanged() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo.clone());
        usecase.load_all().await.unwrap();

        repo.set_fail(true);
        let err = usecase
            .update(&ProductId::from(1), &draft("B", "12.50"))
            .await
            .unwrap_err();
        assert!(err.is_save());

        let stored = usecase.product(&ProductId::from(1)).await.unwrap();
        assert_eq!(stored.title, "A");
        assert!(usecase.snapshot().await.save.error.is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo);
        usecase.load_all().await.unwrap();

        usecase.delete(&ProductId::from(1)).await.unwrap();
        assert!(usecase.products().await.is_empty());

        // Deleting again: the service still confirms, the store is unaffected.
        usecase.delete(&ProductId::from(1)).await.unwrap();
        assert!(usecase.products().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_record_visible() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo.clone());
        usecase.load_all().await.unwrap();

        repo.set_fail(true);
        let err = usecase.delete(&ProductId::from(1)).await.unwrap_err();
        assert!(err.is_delete());
        assert_eq!(usecase.products().await.len(), 1);
        assert!(usecase.snapshot().await.delete.error.is_some());
    }

    #[tokio::test]
    async fn test_store_reflects_last_successful_mutations() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99), product(2, "B", 5.0)]);
        repo.set_echo_id(Some(ProductId::from(3)));
        let usecase = CatalogUseCase::new(repo.clone());

        usecase.load_all().await.unwrap();
        usecase.create(&draft("C", "1.00")).await.unwrap();
        usecase
            .update(&ProductId::from(1), &draft("A2", "10.00"))
            .await
            .unwrap();
        usecase.delete(&ProductId::from(2)).await.unwrap();

        let mut ids: Vec<String> = usecase
            .products()
            .await
            .iter()
            .map(|p| p.id.as_str().to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(usecase.product(&ProductId::from(1)).await.unwrap().title, "A2");
    }

    #[tokio::test]
    async fn test_second_request_in_flight_is_rejected_without_remote_call() {
        let repo = StalledRepository::new();
        let usecase = Arc::new(CatalogUseCase::new(repo.clone()));

        let background = {
            let usecase = usecase.clone();
            tokio::spawn(async move { usecase.load_all().await })
        };

        // Wait for the first request to reach the repository.
        while repo.call_count() == 0 {
            tokio::task::yield_now().await;
        }

        let err = usecase.load_all().await.unwrap_err();
        assert!(err.is_busy());
        assert_eq!(repo.call_count(), 1);
        // The rejection did not store a slot error.
        assert!(usecase.snapshot().await.load.error.is_none());

        repo.release.notify_one();
        background.await.unwrap().unwrap();
        assert_eq!(repo.call_count(), 1);
    }

    #[tokio::test]
    async fn test_form_submit_routes_create_then_closes() {
        let repo = FakeRepository::new();
        repo.set_echo_id(Some(ProductId::from(9)));
        let usecase = CatalogUseCase::new(repo.clone());

        usecase.open_form(None).await.unwrap();
        usecase.set_form_field("title", "Lamp").await.unwrap();
        usecase.set_form_field("price", "25").await.unwrap();
        let created = usecase.submit_form().await.unwrap();

        assert_eq!(created.id, ProductId::from(9));
        assert_eq!(repo.calls(), vec!["create"]);
        assert_eq!(usecase.snapshot().await.form, FormState::Closed);
    }

    #[tokio::test]
    async fn test_form_submit_routes_update_for_seeded_draft() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo.clone());
        usecase.load_all().await.unwrap();

        usecase.open_form(Some(&ProductId::from(1))).await.unwrap();
        usecase.set_form_field("title", "A2").await.unwrap();
        usecase.submit_form().await.unwrap();

        assert_eq!(repo.calls(), vec!["list", "update"]);
        assert_eq!(usecase.product(&ProductId::from(1)).await.unwrap().title, "A2");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_editing() {
        let repo = FakeRepository::new();
        let usecase = CatalogUseCase::new(repo.clone());

        usecase.open_form(None).await.unwrap();
        usecase.set_form_field("title", "Lamp").await.unwrap();
        usecase.set_form_field("price", "25").await.unwrap();

        repo.set_fail(true);
        let err = usecase.submit_form().await.unwrap_err();
        assert!(err.is_save());

        let snapshot = usecase.snapshot().await;
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.form, FormState::Editing);
        assert_eq!(snapshot.draft.unwrap().title, "Lamp");
        assert!(snapshot.save.error.is_some());
    }

    #[tokio::test]
    async fn test_cancel_never_mutates_store() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99)]);
        let usecase = CatalogUseCase::new(repo.clone());
        usecase.load_all().await.unwrap();

        usecase.open_form(Some(&ProductId::from(1))).await.unwrap();
        usecase.set_form_field("title", "scrapped").await.unwrap();
        usecase.cancel_form().await.unwrap();

        assert_eq!(usecase.product(&ProductId::from(1)).await.unwrap().title, "A");
        assert_eq!(repo.calls(), vec!["list"]);
        assert_eq!(usecase.snapshot().await.form, FormState::Closed);
    }

    #[tokio::test]
    async fn test_open_form_for_unknown_record_fails() {
        let repo = FakeRepository::new();
        let usecase = CatalogUseCase::new(repo);
        assert!(usecase.open_form(Some(&ProductId::from(404))).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_before_any_remote_call() {
        let repo = FakeRepository::new();
        let usecase = CatalogUseCase::new(repo.clone());

        usecase.open_form(None).await.unwrap();
        usecase.set_form_field("title", "Lamp").await.unwrap();
        // price left empty
        let err = usecase.submit_form().await.unwrap_err();
        assert!(err.is_validation());
        assert!(repo.calls().is_empty());
        assert_eq!(usecase.snapshot().await.form, FormState::Editing);
    }

    #[tokio::test]
    async fn test_load_one_reconciles_single_record() {
        let repo = FakeRepository::with_products(vec![product(1, "A", 9.99), product(2, "B", 5.0)]);
        let usecase = CatalogUseCase::new(repo);

        let fetched = usecase.load_one(&ProductId::from(2)).await.unwrap();
        assert_eq!(fetched.title, "B");
        // Only the fetched record entered the store.
        assert_eq!(usecase.products().await.len(), 1);
    }
}
