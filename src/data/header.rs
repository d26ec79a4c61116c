// ---------------------------------------------------------------------------
// Header synonyms
// ---------------------------------------------------------------------------

pub const PRODUCT_HEADERS: &[&str] = &["товар", "название", "наименование", "продукт"];
pub const PRICE_HEADERS: &[&str] = &["цена", "розница"];
/// Weight columns are expected to be in kilograms.
pub const WEIGHT_HEADERS: &[&str] = &["вес", "масса", "фасовка"];

/// Column positions of the three roles a price file must provide.
/// `None` means no header matched that role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub product: Option<usize>,
    pub price: Option<usize>,
    pub weight: Option<usize>,
}

/// Positions of all three roles once every one of them was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub product: usize,
    pub price: usize,
    pub weight: usize,
}

impl ColumnRoles {
    /// All three positions, or `None` if any role is missing.
    pub fn resolved(&self) -> Option<ResolvedColumns> {
        Some(ResolvedColumns {
            product: self.product?,
            price: self.price?,
            weight: self.weight?,
        })
    }

    /// Names of the roles that no header matched.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("product", self.product),
            ("price", self.price),
            ("weight", self.weight),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Find the first header (case-insensitive, exact) for each role.
///
/// Each role scans the whole header row independently.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnRoles {
    ColumnRoles {
        product: position_of(headers, PRODUCT_HEADERS),
        price: position_of(headers, PRICE_HEADERS),
        weight: position_of(headers, WEIGHT_HEADERS),
    }
}

fn position_of<S: AsRef<str>>(headers: &[S], synonyms: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let lowered = h.as_ref().to_lowercase();
        synonyms.contains(&lowered.as_str())
    })
}
