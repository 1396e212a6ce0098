use crate::{
    costing::ProductRecord,
    models::{EcoData, NcrData, NcrStatus, ProductStatus, Record, Severity},
};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::hash::Hash;

/// The number of units each product is assumed to hold when valuing stock.
pub const NOMINAL_STOCK: f64 = 100.0;

/// How many products the cost ranking keeps.
pub const TOP_COST_LIMIT: usize = 5;

type Counts<K> = IndexMap<K, usize, FxBuildHasher>;

/// One bar of the "most expensive products" ranking.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CostRank {
    /// The product's stock keeping unit
    pub sku: String,
    /// The product's unit cost
    pub cost: f64,
}

/// Dashboard figures over the product, change-order and quality collections.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Number of products in the catalog
    pub product_count: usize,
    /// Catalog value at list price, assuming [`NOMINAL_STOCK`] units of each
    pub inventory_value: f64,
    /// Products per lifecycle state, every state present
    pub products_by_status: Counts<ProductStatus>,
    /// The most expensive products by unit cost, highest first
    pub top_cost_products: Vec<CostRank>,
    /// Change orders neither implemented nor rejected
    pub active_ecos: usize,
    /// Non-conformance reports not yet closed
    pub open_ncrs: usize,
    /// Reports per severity, every severity present
    pub ncrs_by_severity: Counts<Severity>,
    /// Reports per state, every state present
    pub ncrs_by_status: Counts<NcrStatus>,
}

/// Compute the dashboard summary.
pub fn summarize<ProductId, SupplierId, EcoId, NcrId, DateTime>(
    products: &[ProductRecord<ProductId, SupplierId, DateTime>],
    ecos: &[Record<EcoId, DateTime, EcoData<ProductId, DateTime>>],
    ncrs: &[Record<NcrId, DateTime, NcrData<ProductId, SupplierId>>],
) -> Summary {
    let products_by_status = tally(
        ProductStatus::ALL,
        products.iter().map(|product| product.data.status),
    );
    let ncrs_by_severity = tally(Severity::ALL, ncrs.iter().map(|ncr| ncr.data.severity));
    let ncrs_by_status = tally(NcrStatus::ALL, ncrs.iter().map(|ncr| ncr.data.status));

    let inventory_value = products
        .iter()
        .fold(0.0, |total, product| total + product.data.price * NOMINAL_STOCK);

    let mut top_cost_products = products
        .iter()
        .map(|product| CostRank {
            sku: product.data.sku.clone(),
            cost: product.data.cost,
        })
        .collect::<Vec<_>>();
    // stable, so ties keep catalog order
    top_cost_products.sort_by(|a, b| b.cost.total_cmp(&a.cost));
    top_cost_products.truncate(TOP_COST_LIMIT);

    Summary {
        product_count: products.len(),
        inventory_value,
        products_by_status,
        top_cost_products,
        active_ecos: ecos.iter().filter(|eco| eco.data.status.is_active()).count(),
        open_ncrs: ncrs
            .iter()
            .filter(|ncr| ncr.data.status != NcrStatus::Closed)
            .count(),
        ncrs_by_severity,
        ncrs_by_status,
    }
}

fn tally<K: Copy + Eq + Hash, const N: usize>(
    keys: [K; N],
    values: impl Iterator<Item = K>,
) -> Counts<K> {
    let mut counts: Counts<K> = keys.into_iter().map(|key| (key, 0)).collect();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
}
