//! Application implementation for the demo server.
//!
//! This module provides the concrete implementation of the Application trait,
//! wiring the SQLite repository to the identifier scheme used by the demo.

use plm_core::ports::Application;
use plm_sqlite::{
    Db,
    types::{BomId, CapaId, DateTime, EcoId, NcrId, ProductId, SupplierId},
};
use rand::RngCore;
use time::OffsetDateTime;
use uuid::Uuid;

/// The 4-bit tag stored in every generated identifier, naming its collection.
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdTag {
    /// A product
    Product = 0x1,
    /// A bill of materials
    Bom = 0x2,
    /// A supplier
    Supplier = 0x3,
    /// An engineering change order
    Eco = 0x4,
    /// A non-conformance report
    Ncr = 0x5,
    /// A corrective and preventive action
    Capa = 0x6,
}

/// Build a v8 UUID that sorts by creation time.
///
/// The millisecond timestamp is partitioned into (48, 12, 4) bits around the
/// version nibble and the variant bits, followed by the collection tag and
/// 54 random bits.
pub fn generate_id(tag: IdTag, now: OffsetDateTime) -> Uuid {
    let rng54 = rand::rng().next_u64() >> 10;

    let now = (now.unix_timestamp_nanos() / 1_000_000) as u64;
    let now48 = 0xffff_ffff_ffff_0000 & now;
    let now12 = (0xfff0 & now) >> 4;
    let now04 = (0x000f & now) << 54;

    let hi = 0x0000_0000_0000_8000 | now48 | now12;
    let lo = 0x8000_0000_0000_0000 | ((tag as u64) << 58) | now04 | rng54;
    Uuid::from_u64_pair(hi, lo)
}

/// Main application implementation for the demo server.
#[derive(Clone)]
pub struct DemoApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl DemoApp {
    fn generate(&self, tag: IdTag) -> (Uuid, DateTime) {
        let now = OffsetDateTime::now_utc();
        (generate_id(tag, now), now.into())
    }
}

impl Application for DemoApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        OffsetDateTime::now_utc().into()
    }

    fn generate_product_id(&self) -> (ProductId, DateTime) {
        let (id, now) = self.generate(IdTag::Product);
        (id.into(), now)
    }

    fn generate_bom_id(&self) -> (BomId, DateTime) {
        let (id, now) = self.generate(IdTag::Bom);
        (id.into(), now)
    }

    fn generate_supplier_id(&self) -> (SupplierId, DateTime) {
        let (id, now) = self.generate(IdTag::Supplier);
        (id.into(), now)
    }

    fn generate_eco_id(&self) -> (EcoId, DateTime) {
        let (id, now) = self.generate(IdTag::Eco);
        (id.into(), now)
    }

    fn generate_ncr_id(&self) -> (NcrId, DateTime) {
        let (id, now) = self.generate(IdTag::Ncr);
        (id.into(), now)
    }

    fn generate_capa_id(&self) -> (CapaId, DateTime) {
        let (id, now) = self.generate(IdTag::Capa);
        (id.into(), now)
    }
}

#[cfg(test)]
mod uuid_v8_tests {
    use super::*;
    use rstest::*;

    // Layout of the generated identifiers, per RFC 9562 section 5.8:
    //
    //  hi: | timestamp bits 16..63 (48) | ver = 8 (4) | timestamp bits 4..15 (12) |
    //  lo: | var = 10 (2) | tag (4) | timestamp bits 0..3 (4) | random (54) |

    /// Extract (version, variant, tag) from a UUID
    fn extract_meta(uuid: Uuid) -> (u64, u64, u64) {
        let (hi, lo) = uuid.as_u64_pair();
        ((hi >> 12) & 0xf, (lo >> 62) & 0x3, (lo >> 58) & 0xf)
    }

    /// Recover the millisecond timestamp from a UUID
    fn extract_timestamp(uuid: Uuid) -> u64 {
        let (hi, lo) = uuid.as_u64_pair();
        (hi & 0xffff_ffff_ffff_0000) | ((hi & 0x0fff) << 4) | ((lo >> 54) & 0xf)
    }

    fn at(millis: i128) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000).unwrap()
    }

    #[rstest]
    #[case(IdTag::Product)]
    #[case(IdTag::Bom)]
    #[case(IdTag::Supplier)]
    #[case(IdTag::Eco)]
    #[case(IdTag::Ncr)]
    #[case(IdTag::Capa)]
    fn test_structure(#[case] tag: IdTag) {
        let id = generate_id(tag, OffsetDateTime::now_utc());
        assert_eq!(id.get_version_num(), 8);
        assert_eq!(extract_meta(id), (8, 0b10, tag as u64));
    }

    #[test]
    fn test_timestamp_roundtrip() {
        let millis = 1_700_000_123_457;
        let id = generate_id(IdTag::Product, at(millis));
        assert_eq!(extract_timestamp(id), millis as u64);
    }

    #[test]
    fn test_ids_sort_by_creation_time() {
        let earlier = generate_id(IdTag::Eco, at(1_700_000_000_000));
        let later = generate_id(IdTag::Eco, at(1_700_000_000_001));
        assert!(earlier < later);
    }

    #[test]
    fn test_same_instant_differs() {
        let now = OffsetDateTime::now_utc();
        assert_ne!(generate_id(IdTag::Bom, now), generate_id(IdTag::Bom, now));
    }
}
