use std::fmt;

// ---------------------------------------------------------------------------
// PriceRecord – one validated row of a price list
// ---------------------------------------------------------------------------

/// A single product line loaded from a price file.
///
/// Only rows whose price and weight both parsed and whose weight is
/// strictly positive ever become a `PriceRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    /// Product name exactly as it appears in the source cell.
    pub product: String,
    pub price: f64,
    /// Weight in kilograms, always `> 0`.
    pub weight: f64,
    /// File name (not full path) the record was read from.
    pub source_file: String,
    /// `price / weight`, fixed at load time.
    pub price_per_kg: f64,
}

impl PriceRecord {
    /// Build a record, deriving the unit price.
    ///
    /// Returns `None` when `weight` is not strictly positive (this also
    /// rejects `NaN`).
    pub fn new(
        product: impl Into<String>,
        price: f64,
        weight: f64,
        source_file: impl Into<String>,
    ) -> Option<Self> {
        if weight.is_nan() || weight <= 0.0 {
            return None;
        }
        Some(PriceRecord {
            product: product.into(),
            price,
            weight,
            source_file: source_file.into(),
            price_per_kg: price / weight,
        })
    }
}

impl fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {:.2} / {} kg ({}) = {:.2} per kg",
            self.product, self.price, self.weight, self.source_file, self.price_per_kg
        )
    }
}

// ---------------------------------------------------------------------------
// PriceCatalog – every record accumulated during a session
// ---------------------------------------------------------------------------

/// Append-only collection of records, in ingestion order.
///
/// Duplicates (even identical rows from different files) are kept.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    records: Vec<PriceRecord>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PriceRecord) {
        self.records.push(record);
    }

    /// All records in the order they were loaded.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_price_per_kg() {
        let rec = PriceRecord::new("Bread", 50.0, 2.0, "price_1.csv").unwrap();
        assert_eq!(rec.price_per_kg, 25.0);
        assert_eq!(rec.source_file, "price_1.csv");
    }

    #[test]
    fn rejects_non_positive_weight() {
        assert!(PriceRecord::new("Bread", 50.0, 0.0, "f").is_none());
        assert!(PriceRecord::new("Bread", 50.0, -1.0, "f").is_none());
        assert!(PriceRecord::new("Bread", 50.0, f64::NAN, "f").is_none());
    }

    #[test]
    fn catalog_keeps_duplicates_in_order() {
        let mut catalog = PriceCatalog::new();
        catalog.push(PriceRecord::new("Milk", 80.0, 1.0, "price_a.csv").unwrap());
        catalog.push(PriceRecord::new("Milk", 90.0, 1.0, "price_b.csv").unwrap());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].source_file, "price_a.csv");
        assert_eq!(catalog.records()[1].source_file, "price_b.csv");
    }
}
