//! SharedInventory - a mutex-guarded inventory for multiple callers
//!
//! Each method holds the lock for the whole operation, so id issuance plus
//! insertion, id-based replacement, and the product deletion check plus
//! removal are each atomic. Clone-friendly via Arc.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::{InventoryError, Result};
use crate::core::identity::{PartId, ProductId};
use crate::core::inventory::Inventory;
use crate::entities::part::Part;
use crate::entities::product::Product;

#[derive(Debug, Clone, Default)]
pub struct SharedInventory {
    inner: Arc<Mutex<Inventory>>,
}

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inventory>> {
        self.inner.lock().map_err(|_| InventoryError::Poisoned)
    }

    /// Run a read-only closure against the inventory
    pub fn read<T>(&self, f: impl FnOnce(&Inventory) -> T) -> Result<T> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    /// Run a closure with exclusive access for compound edits
    pub fn write<T>(&self, f: impl FnOnce(&mut Inventory) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    pub fn create_part(&self, part: Part) -> Result<PartId> {
        self.lock()?.create_part(part)
    }

    pub fn create_product(&self, product: Product) -> Result<ProductId> {
        self.lock()?.create_product(product)
    }

    pub fn update_part(&self, part: Part) -> Result<()> {
        self.lock()?.update_part(part)
    }

    pub fn update_product(&self, product: Product) -> Result<()> {
        self.lock()?.update_product(product)
    }

    pub fn delete_part(&self, id: PartId) -> Result<bool> {
        Ok(self.lock()?.delete_part(id))
    }

    pub fn delete_product(&self, id: ProductId) -> Result<bool> {
        self.lock()?.delete_product(id)
    }

    pub fn associate_part(&self, product_id: ProductId, part_id: PartId) -> Result<()> {
        self.lock()?.associate_part(product_id, part_id)
    }

    pub fn dissociate_part(&self, product_id: ProductId, part_id: PartId) -> Result<bool> {
        self.lock()?.dissociate_part(product_id, part_id)
    }

    /// Snapshot of a part by id
    pub fn part(&self, id: PartId) -> Result<Option<Part>> {
        self.read(|inv| inv.find_part_by_id(id).cloned())
    }

    /// Snapshot of a product by id
    pub fn product(&self, id: ProductId) -> Result<Option<Product>> {
        self.read(|inv| inv.find_product_by_id(id).cloned())
    }

    /// Copy of the current inventory; other handles keep working
    pub fn snapshot(&self) -> Result<Inventory> {
        self.read(Inventory::clone)
    }

    /// Take the inventory back out.
    ///
    /// Fails with `StillShared` while other handles exist; the state is
    /// then left with those handles.
    pub fn into_inner(self) -> Result<Inventory> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().map_err(|_| InventoryError::Poisoned),
            Err(shared) => Err(InventoryError::StillShared {
                others: Arc::strong_count(&shared) - 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    fn wheel() -> Part {
        Part::in_house(PartId::default(), "Wheel", 11.00, 16, 1, 20, 101)
    }

    #[test]
    fn test_concurrent_creates_issue_distinct_ids() {
        let shared = SharedInventory::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|_| shared.create_part(wheel()).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(ids.len(), 200);

        let inv = shared.into_inner().unwrap();
        assert_eq!(inv.parts().len(), 200);
        assert_eq!(inv.peek_next_part_id(), Some(PartId::new(200)));
    }

    #[test]
    fn test_guarded_delete_through_shared_handle() {
        let shared = SharedInventory::default();
        let part_id = shared.create_part(wheel()).unwrap();
        let product_id = shared
            .create_product(Product::new(ProductId::default(), "Tricycle", 99.99, 3, 1, 5))
            .unwrap();
        shared.associate_part(product_id, part_id).unwrap();

        assert!(matches!(
            shared.delete_product(product_id),
            Err(InventoryError::AssociationsPresent { count: 1, .. })
        ));
        assert!(shared.dissociate_part(product_id, part_id).unwrap());
        assert!(shared.delete_product(product_id).unwrap());
        assert_eq!(shared.product(product_id).unwrap(), None);
    }

    #[test]
    fn test_update_and_snapshot() {
        let shared = SharedInventory::default();
        let id = shared.create_part(wheel()).unwrap();
        let mut part = shared.part(id).unwrap().unwrap();
        part.stock = 4;
        shared.update_part(part).unwrap();
        assert_eq!(shared.read(|inv| inv.find_part_by_id(id).map(|p| p.stock)).unwrap(), Some(4));
        assert!(shared.delete_part(id).unwrap());
        assert!(!shared.delete_part(id).unwrap());
    }

    #[test]
    fn test_into_inner_refuses_while_shared() {
        let shared = SharedInventory::default();
        let other = shared.clone();
        let id = shared.create_part(wheel()).unwrap();

        let copy = other.snapshot().unwrap();
        assert!(copy.find_part_by_id(id).is_some());

        assert_eq!(
            shared.into_inner().unwrap_err(),
            InventoryError::StillShared { others: 1 }
        );
        // The remaining handle still owns the state and can take it
        let inv = other.into_inner().unwrap();
        assert_eq!(inv.parts().len(), 1);
    }
}
