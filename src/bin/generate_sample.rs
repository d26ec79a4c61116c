use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Retail layout: numbered rows, "Наименование / Цена / Фасовка".
#[derive(Serialize)]
struct RetailRow<'a> {
    #[serde(rename = "№")]
    number: usize,
    #[serde(rename = "Наименование")]
    name: &'a str,
    #[serde(rename = "Цена")]
    price: f64,
    #[serde(rename = "Фасовка")]
    weight: f64,
    #[serde(rename = "Поставщик")]
    supplier: &'a str,
}

/// Market layout: "товар / розница / вес" plus an ignored stock column.
#[derive(Serialize)]
struct MarketRow<'a> {
    #[serde(rename = "товар")]
    name: &'a str,
    #[serde(rename = "остаток")]
    stock: u32,
    #[serde(rename = "розница")]
    price: f64,
    #[serde(rename = "вес")]
    weight: f64,
}

/// Wholesale layout: "продукт / масса / цена".
#[derive(Serialize)]
struct WholesaleRow<'a> {
    #[serde(rename = "продукт")]
    name: &'a str,
    #[serde(rename = "масса")]
    weight: f64,
    #[serde(rename = "цена")]
    price: f64,
}

/// (product, base price per kg, package weight in kg)
const PRODUCTS: &[(&str, f64, f64)] = &[
    ("Хлеб ржаной", 120.0, 0.5),
    ("Молоко 3.2%", 95.0, 1.0),
    ("Сыр Российский", 780.0, 0.3),
    ("Масло сливочное", 900.0, 0.18),
    ("Гречка", 110.0, 0.9),
    ("Сахар", 85.0, 1.0),
    ("Яблоки Гала", 160.0, 1.5),
    ("Кофе молотый", 1600.0, 0.25),
];

/// Deterministic linear congruential generator so reruns give identical files.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplier in `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + spread * (2.0 * self.next_f64() - 1.0)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn package_price(rng: &mut Lcg, per_kg: f64, weight: f64) -> f64 {
    round2(per_kg * weight * rng.jitter(0.15))
}

fn write_retail(dir: &Path, rng: &mut Lcg) -> Result<PathBuf> {
    let path = dir.join("price_0.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (i, &(name, per_kg, weight)) in PRODUCTS.iter().enumerate() {
        writer.serialize(RetailRow {
            number: i + 1,
            name,
            price: package_price(rng, per_kg, weight),
            weight,
            supplier: "ООО Ромашка",
        })?;
    }
    // Rows the analyzer is expected to discard.
    writer.write_record(["99", "Соль (нет в наличии)", "н/д", "1", "ООО Ромашка"])?;
    writer.write_record(["100", "Пакет", "5", "0", "ООО Ромашка"])?;
    writer.flush()?;
    Ok(path)
}

fn write_market(dir: &Path, rng: &mut Lcg) -> Result<PathBuf> {
    let path = dir.join("price_1.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for &(name, per_kg, weight) in PRODUCTS.iter().step_by(2) {
        writer.serialize(MarketRow {
            name,
            stock: (rng.next_f64() * 50.0) as u32,
            price: package_price(rng, per_kg, weight),
            weight,
        })?;
    }
    writer.write_record(["Сметана", "12", "89.90", "-0.3"])?;
    writer.flush()?;
    Ok(path)
}

fn write_wholesale(dir: &Path, rng: &mut Lcg) -> Result<PathBuf> {
    let path = dir.join("price_2.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for &(name, per_kg, _) in PRODUCTS.iter().skip(1) {
        let weight = 5.0;
        writer.serialize(WholesaleRow {
            name,
            weight,
            price: round2(package_price(rng, per_kg, weight) * 0.85),
        })?;
    }
    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = Lcg(42);
    let written = [
        write_retail(&dir, &mut rng)?,
        write_market(&dir, &mut rng)?,
        write_wholesale(&dir, &mut rng)?,
    ];

    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
