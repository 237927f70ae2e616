//! Inventory store - the authoritative collection of parts and products
//!
//! The store issues identifiers, owns both collections in insertion order,
//! and is the single place where the product deletion rule is enforced:
//! a product that still lists associated parts is never removed.
//!
//! Deleting a part does not touch product association lists. References
//! left behind that way are reported as [`AssociatedPart::Orphaned`] when
//! a product's parts are resolved.

use crate::core::entity::Entity;
use crate::core::error::{InventoryError, Result};
use crate::core::identity::{EntityKind, PartId, ProductId};
use crate::core::validation::{validate_entity, validate_part};
use crate::entities::part::Part;
use crate::entities::product::Product;

/// A product's association resolved against the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssociatedPart<'a> {
    /// The referenced part is still in the store
    Resolved(&'a Part),
    /// The referenced part has been deleted from the store
    Orphaned(PartId),
}

impl AssociatedPart<'_> {
    pub fn id(&self) -> PartId {
        match self {
            AssociatedPart::Resolved(part) => part.id,
            AssociatedPart::Orphaned(id) => *id,
        }
    }

    pub fn is_orphaned(&self) -> bool {
        matches!(self, AssociatedPart::Orphaned(_))
    }
}

/// Terminal state of a product deletion request
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    /// The product was removed from the store
    Deleted(Product),
    /// The product still has associations; the store is unchanged
    Blocked { associated: usize },
    /// The caller declined to confirm; the store is unchanged
    Cancelled,
}

/// In-memory store of parts and products plus their id counters
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    parts: Vec<Part>,
    products: Vec<Product>,
    // One past the last issued id; reaches u32::MAX + 1 once exhausted
    next_part_id: u64,
    next_product_id: u64,
}

impl Inventory {
    /// Create an empty inventory with both counters at 0
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Identifier issuance
    // ------------------------------------------------------------------

    /// Return the next part id and advance the counter. Ids are never reused.
    ///
    /// Fails with `IdsExhausted` once `u32::MAX` has been issued.
    pub fn issue_part_id(&mut self) -> Result<PartId> {
        let id = u32::try_from(self.next_part_id).map_err(|_| InventoryError::IdsExhausted {
            kind: EntityKind::Part,
        })?;
        self.next_part_id += 1;
        Ok(PartId::new(id))
    }

    /// Return the next product id and advance the counter. Ids are never reused.
    pub fn issue_product_id(&mut self) -> Result<ProductId> {
        let id = u32::try_from(self.next_product_id).map_err(|_| InventoryError::IdsExhausted {
            kind: EntityKind::Product,
        })?;
        self.next_product_id += 1;
        Ok(ProductId::new(id))
    }

    /// The id the next `issue_part_id` will return; `None` once exhausted
    pub fn peek_next_part_id(&self) -> Option<PartId> {
        u32::try_from(self.next_part_id).ok().map(PartId::new)
    }

    pub fn peek_next_product_id(&self) -> Option<ProductId> {
        u32::try_from(self.next_product_id).ok().map(ProductId::new)
    }

    // ------------------------------------------------------------------
    // Parts
    // ------------------------------------------------------------------

    /// All parts in display order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Append a part. The caller is responsible for having issued its id.
    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Validate, issue an id for, and insert a part.
    ///
    /// The incoming id is overwritten. Nothing is issued if validation fails.
    pub fn create_part(&mut self, mut part: Part) -> Result<PartId> {
        validate_part(&part)?;
        part.id = self.issue_part_id()?;
        let id = part.id;
        self.parts.push(part);
        Ok(id)
    }

    /// First part with this id, if any
    pub fn find_part_by_id(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn find_part_by_id_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.id == id)
    }

    /// Parts whose name contains `query`
    pub fn find_parts_by_name(&self, query: &str) -> Vec<&Part> {
        self.parts.iter().filter(|p| p.name.contains(query)).collect()
    }

    /// Parts whose id text or name contains `query`
    pub fn search_parts(&self, query: &str) -> Vec<&Part> {
        self.parts.iter().filter(|p| p.matches_search(query)).collect()
    }

    /// Position of the first part with this id
    pub fn part_index(&self, id: PartId) -> Option<usize> {
        self.parts.iter().position(|p| p.id == id)
    }

    /// Overwrite the part at `index` after validating the replacement
    pub fn replace_part(&mut self, index: usize, part: Part) -> Result<()> {
        let len = self.parts.len();
        if index >= len {
            return Err(InventoryError::IndexOutOfRange {
                kind: EntityKind::Part,
                index,
                len,
            });
        }
        validate_part(&part)?;
        self.parts[index] = part;
        Ok(())
    }

    /// Overwrite the part carrying the replacement's id
    pub fn update_part(&mut self, part: Part) -> Result<()> {
        let index = self
            .part_index(part.id)
            .ok_or_else(|| InventoryError::part_not_found(part.id))?;
        validate_part(&part)?;
        self.parts[index] = part;
        Ok(())
    }

    /// Remove the first part with this id; returns whether one was removed.
    ///
    /// Product association lists are left untouched.
    pub fn delete_part(&mut self, id: PartId) -> bool {
        match self.part_index(id) {
            Some(index) => {
                self.parts.remove(index);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// All products in display order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Append a product. The caller is responsible for having issued its id.
    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Validate, issue an id for, and insert a product
    pub fn create_product(&mut self, mut product: Product) -> Result<ProductId> {
        validate_entity(&product)?;
        product.id = self.issue_product_id()?;
        let id = product.id;
        self.products.push(product);
        Ok(id)
    }

    pub fn find_product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_product_by_id_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Products whose name contains `query`
    pub fn find_products_by_name(&self, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.name.contains(query))
            .collect()
    }

    /// Products whose id text or name contains `query`
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches_search(query))
            .collect()
    }

    pub fn product_index(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Overwrite the product at `index` after validating the replacement
    pub fn replace_product(&mut self, index: usize, product: Product) -> Result<()> {
        let len = self.products.len();
        if index >= len {
            return Err(InventoryError::IndexOutOfRange {
                kind: EntityKind::Product,
                index,
                len,
            });
        }
        validate_entity(&product)?;
        self.products[index] = product;
        Ok(())
    }

    /// Overwrite the product carrying the replacement's id
    pub fn update_product(&mut self, product: Product) -> Result<()> {
        let index = self
            .product_index(product.id)
            .ok_or_else(|| InventoryError::product_not_found(product.id))?;
        validate_entity(&product)?;
        self.products[index] = product;
        Ok(())
    }

    /// Remove a product that has no associated parts.
    ///
    /// Returns `Ok(false)` if no such product exists and
    /// [`InventoryError::AssociationsPresent`] if it still lists parts.
    pub fn delete_product(&mut self, id: ProductId) -> Result<bool> {
        let Some(index) = self.product_index(id) else {
            return Ok(false);
        };
        let count = self.products[index].associated_parts().len();
        if count > 0 {
            return Err(InventoryError::AssociationsPresent {
                id: id.to_string(),
                count,
            });
        }
        self.products.remove(index);
        Ok(true)
    }

    /// Run a full deletion request: blocked products never reach `confirm`.
    ///
    /// Fails with `NotFound` for an unknown product.
    pub fn request_product_deletion<F>(&mut self, id: ProductId, confirm: F) -> Result<DeletionOutcome>
    where
        F: FnOnce(&Product) -> bool,
    {
        let index = self
            .product_index(id)
            .ok_or_else(|| InventoryError::product_not_found(id))?;
        let product = &self.products[index];
        if product.has_associations() {
            return Ok(DeletionOutcome::Blocked {
                associated: product.associated_parts().len(),
            });
        }
        if !confirm(product) {
            return Ok(DeletionOutcome::Cancelled);
        }
        Ok(DeletionOutcome::Deleted(self.products.remove(index)))
    }

    // ------------------------------------------------------------------
    // Associations
    // ------------------------------------------------------------------

    /// Associate a part that is currently in the store with a product
    pub fn associate_part(&mut self, product_id: ProductId, part_id: PartId) -> Result<()> {
        if self.find_part_by_id(part_id).is_none() {
            return Err(InventoryError::part_not_found(part_id));
        }
        let product = self
            .find_product_by_id_mut(product_id)
            .ok_or_else(|| InventoryError::product_not_found(product_id))?;
        product.add_associated_part(part_id);
        Ok(())
    }

    /// Remove the first reference to `part_id` from a product.
    ///
    /// Works for orphaned references too, so dangling ids can be cleared.
    pub fn dissociate_part(&mut self, product_id: ProductId, part_id: PartId) -> Result<bool> {
        let product = self
            .find_product_by_id_mut(product_id)
            .ok_or_else(|| InventoryError::product_not_found(product_id))?;
        Ok(product.remove_associated_part(part_id))
    }

    /// Resolve a product's associated part ids against the store
    pub fn resolve_associated_parts(&self, product_id: ProductId) -> Result<Vec<AssociatedPart<'_>>> {
        let product = self
            .find_product_by_id(product_id)
            .ok_or_else(|| InventoryError::product_not_found(product_id))?;
        Ok(self.resolve_parts_of(product))
    }

    /// Resolve the associations of a product value (which need not be in the store)
    pub fn resolve_parts_of(&self, product: &Product) -> Vec<AssociatedPart<'_>> {
        product
            .associated_parts()
            .iter()
            .map(|id| match self.find_part_by_id(*id) {
                Some(part) => AssociatedPart::Resolved(part),
                None => AssociatedPart::Orphaned(*id),
            })
            .collect()
    }

    /// Products that list `part_id` among their associations
    pub fn products_using_part(&self, part_id: PartId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.uses_part(part_id))
            .collect()
    }

    /// Every (product, part) pair whose part is no longer in the store
    pub fn orphaned_references(&self) -> Vec<(ProductId, PartId)> {
        let mut orphans = Vec::new();
        for product in &self.products {
            for part_id in product.associated_parts() {
                if self.find_part_by_id(*part_id).is_none() {
                    orphans.push((product.id, *part_id));
                }
            }
        }
        orphans
    }
}
