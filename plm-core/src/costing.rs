use crate::models::{BomData, ProductData, Record};
use rustc_hash::{FxHashMap, FxHashSet};
use std::{fmt::Debug, hash::Hash};

/// A product as it appears in a product snapshot.
pub type ProductRecord<ProductId, SupplierId, DateTime> =
    Record<ProductId, DateTime, ProductData<SupplierId, DateTime>>;

/// A bill of materials as it appears in a BOM snapshot.
pub type BomRecord<BomId, ProductId, DateTime> = Record<BomId, DateTime, BomData<ProductId>>;

/// Both costs of a single bill of materials.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BomCost<BomId> {
    /// The BOM that was costed
    pub bom_id: BomId,
    /// Every component valued at its product's own unit cost
    pub flat_cost: f64,
    /// Sub-assemblies valued through their approved BOMs
    pub rolled_up_cost: f64,
}

/// The cost of one unit of a product.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        rename_all = "camelCase",
        bound(deserialize = "ProductId: serde::Deserialize<'de>, BomId: serde::Deserialize<'de>")
    )
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ProductCost<ProductId, BomId> {
    /// The product that was costed
    pub product_id: ProductId,
    /// The cost recorded on the product itself
    pub unit_cost: f64,
    /// The approved BOM the roll-up went through, if the product has one
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub bom_id: Option<BomId>,
    /// The rolled-up cost of that BOM
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub rolled_up_cost: Option<f64>,
}

/// Costs bills of materials against a snapshot of products and BOMs.
///
/// The resolver indexes both snapshots once. When a snapshot holds more than
/// one product with the same id, or more than one `Approved` BOM for the same
/// product, the first one in snapshot order wins.
///
/// Costing never fails: a component whose product is missing contributes
/// nothing, a component without an approved BOM is valued at its product's
/// unit cost, and a BOM reached again along its own expansion path
/// contributes nothing.
pub struct CostResolver<'a, BomId, ProductId, DateTime> {
    unit_costs: FxHashMap<&'a ProductId, f64>,
    approved: FxHashMap<&'a ProductId, &'a BomRecord<BomId, ProductId, DateTime>>,
}

impl<'a, BomId, ProductId, DateTime> CostResolver<'a, BomId, ProductId, DateTime>
where
    BomId: Clone + Eq + Hash + Debug,
    ProductId: Eq + Hash,
{
    /// Index the product and BOM snapshots.
    pub fn new<SupplierId>(
        products: &'a [ProductRecord<ProductId, SupplierId, DateTime>],
        boms: &'a [BomRecord<BomId, ProductId, DateTime>],
    ) -> Self {
        let mut unit_costs = FxHashMap::default();
        for product in products {
            unit_costs.entry(&product.id).or_insert(product.data.cost);
        }

        let mut approved = FxHashMap::default();
        for bom in boms.iter().filter(|bom| bom.data.is_approved()) {
            approved.entry(&bom.data.product_id).or_insert(bom);
        }

        Self {
            unit_costs,
            approved,
        }
    }

    /// The unit cost recorded on a product, if it is in the snapshot.
    pub fn unit_cost(&self, product_id: &ProductId) -> Option<f64> {
        self.unit_costs.get(product_id).copied()
    }

    /// The BOM that represents `product_id` as a sub-assembly, if any.
    pub fn approved_bom(
        &self,
        product_id: &ProductId,
    ) -> Option<&'a BomRecord<BomId, ProductId, DateTime>> {
        self.approved.get(product_id).copied()
    }

    /// Sum of each component's unit cost times its quantity.
    pub fn flat_cost(&self, bom: &BomRecord<BomId, ProductId, DateTime>) -> f64 {
        bom.data
            .components
            .iter()
            .filter_map(|component| {
                self.unit_cost(&component.component_product_id)
                    .map(|cost| cost * component.quantity)
            })
            .fold(0.0, |total, contribution| total + contribution)
    }

    /// Manufactured cost of `bom`, expanding every component that has an
    /// approved BOM of its own.
    pub fn rolled_up_cost(&self, bom: &BomRecord<BomId, ProductId, DateTime>) -> f64 {
        self.rolled_up_cost_within(bom, &FxHashSet::default())
    }

    /// As [`Self::rolled_up_cost`], treating the BOMs in `visited` as already
    /// being expanded further up the path.
    ///
    /// `visited` is never modified; each level of the expansion extends its
    /// own copy, so sibling components detect cycles independently.
    pub fn rolled_up_cost_within(
        &self,
        bom: &BomRecord<BomId, ProductId, DateTime>,
        visited: &FxHashSet<BomId>,
    ) -> f64 {
        if visited.contains(&bom.id) {
            tracing::warn!(bom_id = ?bom.id, name = %bom.data.name, "circular BOM reference");
            return 0.0;
        }

        let mut path = visited.clone();
        path.insert(bom.id.clone());

        bom.data
            .components
            .iter()
            .filter_map(|component| {
                let product_id = &component.component_product_id;
                let leaf_cost = self.unit_cost(product_id)?;
                let unit_cost = match self.approved_bom(product_id) {
                    Some(sub_bom) => self.rolled_up_cost_within(sub_bom, &path),
                    None => leaf_cost,
                };
                Some(unit_cost * component.quantity)
            })
            .fold(0.0, |total, contribution| total + contribution)
    }

    /// The unit cost of `product`, alongside the roll-up through its
    /// approved BOM when it has one.
    pub fn product_cost<SupplierId>(
        &self,
        product: &ProductRecord<ProductId, SupplierId, DateTime>,
    ) -> ProductCost<ProductId, BomId>
    where
        ProductId: Clone,
    {
        let bom = self.approved_bom(&product.id);
        ProductCost {
            product_id: product.id.clone(),
            unit_cost: product.data.cost,
            bom_id: bom.map(|bom| bom.id.clone()),
            rolled_up_cost: bom.map(|bom| self.rolled_up_cost(bom)),
        }
    }

    /// Both costs of `bom`.
    pub fn bom_cost(&self, bom: &BomRecord<BomId, ProductId, DateTime>) -> BomCost<BomId> {
        BomCost {
            bom_id: bom.id.clone(),
            flat_cost: self.flat_cost(bom),
            rolled_up_cost: self.rolled_up_cost(bom),
        }
    }
}

/// Sum of each component's unit cost times its quantity.
///
/// Components referencing products absent from `products` contribute 0.
pub fn flat_cost<BomId, ProductId, SupplierId, DateTime>(
    bom: &BomRecord<BomId, ProductId, DateTime>,
    products: &[ProductRecord<ProductId, SupplierId, DateTime>],
) -> f64
where
    BomId: Clone + Eq + Hash + Debug,
    ProductId: Eq + Hash,
{
    CostResolver::new(products, &[]).flat_cost(bom)
}

/// Manufactured cost of `bom`, recursively substituting the rolled-up cost
/// of each component's first approved BOM in `boms`.
pub fn rolled_up_cost<BomId, ProductId, SupplierId, DateTime>(
    bom: &BomRecord<BomId, ProductId, DateTime>,
    products: &[ProductRecord<ProductId, SupplierId, DateTime>],
    boms: &[BomRecord<BomId, ProductId, DateTime>],
) -> f64
where
    BomId: Clone + Eq + Hash + Debug,
    ProductId: Eq + Hash,
{
    CostResolver::new(products, boms).rolled_up_cost(bom)
}
