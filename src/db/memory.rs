use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::catalog::{CatalogStore, NewProduct, Product, ProductRepository};
use crate::domain::order::{NewOrder, Order, OrderLine, OrderStatus, OrderStore};
use crate::domain::party::{NewParty, Party, PartyStore, Role};
use crate::domain::StoreError;

// ============================================================================
// In-memory stores for tests
// ============================================================================
//
// Same contracts as the PostgreSQL adapters: order inserts are all or
// nothing, status updates are compare-and-set under one lock, reads come
// back ordered by id.
//
// ============================================================================

#[derive(Default)]
struct State {
    products: BTreeMap<i64, Product>,
    orders: BTreeMap<i64, Order>,
    next_product_id: i64,
    next_order_id: i64,
    next_line_id: i64,
    fail_line_at: Option<usize>,
    status_writes: usize,
}

/// Orders and catalog behind one lock.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&self, name: &str, price: Decimal, seller_id: i64) -> Product {
        let mut state = self.state.lock().unwrap();
        state.next_product_id += 1;
        let product = Product {
            id: state.next_product_id,
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            seller_id,
        };
        state.products.insert(product.id, product.clone());
        product
    }

    pub fn set_price(&self, id: i64, price: Decimal) {
        if let Some(product) = self.state.lock().unwrap().products.get_mut(&id) {
            product.price = price;
        }
    }

    pub fn remove_product(&self, id: i64) {
        self.state.lock().unwrap().products.remove(&id);
    }

    /// Make the next order insert fail while writing line `index`.
    pub fn fail_line_insert_at(&self, index: usize) {
        self.state.lock().unwrap().fail_line_at = Some(index);
    }

    pub fn order(&self, id: i64) -> Option<Order> {
        self.state.lock().unwrap().orders.get(&id).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub fn order_line_count(&self) -> usize {
        self.state.lock().unwrap().orders.values().map(|o| o.items.len()).sum()
    }

    /// Successful status transitions so far.
    pub fn status_writes(&self) -> usize {
        self.state.lock().unwrap().status_writes
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn store(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut state = self.state.lock().unwrap();
        let fail_at = state.fail_line_at.take();

        // Stage ids locally; nothing is visible until every line succeeds.
        let order_id = state.next_order_id + 1;
        let mut line_id = state.next_line_id;
        let mut items = Vec::with_capacity(order.items.len());
        for (index, line) in order.items.iter().enumerate() {
            if fail_at == Some(index) {
                return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                    "injected failure inserting line {}",
                    index
                ))));
            }
            line_id += 1;
            items.push(OrderLine {
                id: line_id,
                product_id: line.product.id,
                quantity: line.quantity,
                unit_price: line.unit_price(),
            });
        }

        let stored = Order {
            id: order_id,
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            delivery_source_address: order.delivery_source_address,
            delivery_destination_address: order.delivery_destination_address,
            total_quantity: order.total_quantity,
            total_price: order.total_price,
            status: order.status,
            order_date: order.order_date,
            items,
        };

        state.next_order_id = order_id;
        state.next_line_id = line_id;
        state.orders.insert(order_id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> Result<Order, StoreError> {
        self.order(id).ok_or(StoreError::NotFound)
    }

    async fn get_by_buyer_id(&self, buyer_id: i64) -> Result<Vec<Order>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.values().filter(|o| o.buyer_id == buyer_id).cloned().collect())
    }

    async fn get_by_seller_id(&self, seller_id: i64) -> Result<Vec<Order>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.values().filter(|o| o.seller_id == seller_id).cloned().collect())
    }

    async fn update_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let transitioned = match state.orders.get_mut(&id) {
            Some(order) if order.status == from => {
                order.status = to;
                true
            }
            _ => false,
        };
        if transitioned {
            state.status_writes += 1;
        }
        Ok(transitioned)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let state = self.state.lock().unwrap();
        state.products.get(&id).cloned().ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn store(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.next_product_id += 1;
        let product = Product {
            id: state.next_product_id,
            name: product.name,
            description: product.description,
            price: product.price,
            seller_id: product.seller_id,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.state.lock().unwrap().products.values().cloned().collect())
    }
}

/// One role's parties, unique by email.
pub struct MemoryPartyStore {
    role: Role,
    parties: Mutex<Vec<Party>>,
}

impl MemoryPartyStore {
    pub fn new(role: Role) -> Self {
        Self { role, parties: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl PartyStore for MemoryPartyStore {
    fn role(&self) -> Role {
        self.role
    }

    async fn store(&self, party: NewParty) -> Result<Party, StoreError> {
        let mut parties = self.parties.lock().unwrap();
        if parties.iter().any(|p| p.email == party.email) {
            return Err(StoreError::Conflict(format!("duplicate email {}", party.email)));
        }

        let party = Party {
            id: parties.len() as i64 + 1,
            role: self.role,
            email: party.email,
            name: party.name,
            credential_hash: party.credential_hash,
            address: party.address,
        };
        parties.push(party.clone());
        Ok(party)
    }

    async fn get_by_email(&self, email: &str) -> Result<Party, StoreError> {
        let parties = self.parties.lock().unwrap();
        parties.iter().find(|p| p.email == email).cloned().ok_or(StoreError::NotFound)
    }
}
