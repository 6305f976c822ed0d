//! Writes `sample_bom.xlsx` and `sample_life_cycle.xlsx` for trying the merger by hand.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

const BOM_COLUMNS: &[&str] = &[
    "ProductLines",
    "StationTypes",
    "MTS",
    "PN (SFG\\SA)",
    "PN",
    "Alternative PN",
    "Description",
    "Group",
    "Quantity",
    "ProductName",
    "Vendor",
    "DefaultMinQuantity",
    "Related to ACC-KIT",
    "Relation",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let product_lines = ["Infusion", "Monitoring", "Imaging"];
    let station_types = ["Assembly", "Test", "Pack"];
    let groups = ["Mechanical", "Electrical", "Consumable"];
    let vendors = ["Acme", "Globex", "Initech", "Umbrella"];
    let parts = [
        "Screw M3", "Cable harness", "PCB main", "Gasket", "Label", "Fuse 2A", "Display", "Bracket",
    ];

    // Part numbers 100000.. shared between both files; every fifth one has no limit.
    let part_numbers: Vec<String> = (0..40).map(|i| format!("{}", 100000 + i * 7)).collect();

    let header = Format::new().set_bold();

    // ---- BOM ----
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("BOM")?;
    for (col, name) in BOM_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    let mut row: u32 = 1;
    for mts in 1..=6 {
        let mts_code = format!("MTS{mts:03}");
        let product_line = rng.pick(&product_lines);
        for _ in 0..(4 + rng.below(5)) {
            let pn = &part_numbers[rng.below(part_numbers.len() as u64) as usize];
            let part = rng.pick(&parts);
            let kit = rng.below(4) == 0;

            sheet.write_string(row, 0, product_line)?;
            sheet.write_string(row, 1, rng.pick(&station_types))?;
            sheet.write_string(row, 2, &mts_code)?;
            sheet.write_string(row, 3, format!("SFG-{}", 5000 + mts))?;
            sheet.write_string(row, 4, pn)?;
            if rng.below(3) == 0 {
                sheet.write_string(row, 5, format!("{pn}-ALT"))?;
            }
            sheet.write_string(row, 6, part)?;
            sheet.write_string(row, 7, rng.pick(&groups))?;
            sheet.write_number(row, 8, (1 + rng.below(12)) as f64)?;
            sheet.write_string(row, 9, format!("{product_line} {mts}"))?;
            sheet.write_string(row, 10, rng.pick(&vendors))?;
            sheet.write_number(row, 11, rng.below(50) as f64)?;
            if kit {
                sheet.write_string(row, 12, "Yes")?;
                sheet.write_string(row, 13, format!("ACC-KIT-{mts}"))?;
            }
            row += 1;
        }
    }

    let bom_path = "sample_bom.xlsx";
    workbook
        .save(bom_path)
        .with_context(|| format!("Failed to save {bom_path}"))?;
    println!("Wrote {} BOM rows to {bom_path}", row - 1);

    // ---- Life Cycle ----
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Life Cycle")?;
    sheet.write_string_with_format(0, 0, "PN", &header)?;
    sheet.write_string_with_format(0, 1, "Limit", &header)?;

    let mut lc_row: u32 = 1;
    for (i, pn) in part_numbers.iter().enumerate() {
        if i % 5 == 4 {
            continue;
        }
        sheet.write_string(lc_row, 0, pn)?;
        sheet.write_number(lc_row, 1, (1000 * (1 + rng.below(20))) as f64)?;
        lc_row += 1;
    }

    let lc_path = "sample_life_cycle.xlsx";
    workbook
        .save(lc_path)
        .with_context(|| format!("Failed to save {lc_path}"))?;
    println!("Wrote {} life cycle rows to {lc_path}", lc_row - 1);

    Ok(())
}
