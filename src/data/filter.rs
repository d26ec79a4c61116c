use super::model::{PriceCatalog, PriceRecord};

/// Records whose product contains `text` (case-insensitive), cheapest per
/// kilogram first.
///
/// The sort is stable: equal unit prices keep catalog order. An empty
/// `text` matches every record.
pub fn find_text<'a>(catalog: &'a PriceCatalog, text: &str) -> Vec<&'a PriceRecord> {
    let needle = text.to_lowercase();
    let mut matches: Vec<&PriceRecord> = catalog
        .records()
        .iter()
        .filter(|rec| rec.product.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| a.price_per_kg.total_cmp(&b.price_per_kg));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(rows: &[(&str, f64, f64, &str)]) -> PriceCatalog {
        let mut catalog = PriceCatalog::new();
        for &(product, price, weight, file) in rows {
            catalog.push(PriceRecord::new(product, price, weight, file).unwrap());
        }
        catalog
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let cat = catalog(&[("bread loaf", 60.0, 1.0, "a"), ("milk", 80.0, 1.0, "a")]);
        let found = find_text(&cat, "BREAD");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product, "bread loaf");

        let cyr = catalog(&[("Хлеб ржаной", 40.0, 0.5, "a")]);
        assert_eq!(find_text(&cyr, "ХЛЕБ").len(), 1);
    }

    #[test]
    fn empty_text_returns_everything_sorted_and_stable() {
        let cat = catalog(&[
            ("a", 100.0, 1.0, "f1"),
            ("b", 50.0, 2.0, "f1"),
            ("c", 10.0, 1.0, "f2"),
            ("d", 25.0, 1.0, "f2"),
        ]);
        let names: Vec<&str> = find_text(&cat, "")
            .iter()
            .map(|r| r.product.as_str())
            .collect();
        // b and d both cost 25 per kg and keep their catalog order.
        assert_eq!(names, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn duplicates_from_different_files_both_match() {
        let cat = catalog(&[
            ("Milk", 95.0, 1.0, "price_b.csv"),
            ("Milk", 80.0, 1.0, "price_a.csv"),
        ]);
        let found = find_text(&cat, "milk");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].source_file, "price_a.csv");
        assert_eq!(found[1].source_file, "price_b.csv");
    }

    #[test]
    fn no_match_is_empty_and_catalog_untouched() {
        let cat = catalog(&[("milk", 80.0, 1.0, "a"), ("bread", 50.0, 1.0, "a")]);
        assert!(find_text(&cat, "cheese").is_empty());
        assert_eq!(cat.records()[0].product, "milk");
        assert_eq!(cat.len(), 2);
    }
}
