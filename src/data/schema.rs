//! Column descriptors for the uploaded tables and the produced output.

/// BOM column holding the MTS code used for filtering.
pub const FILTER_KEY: &str = "MTS";
/// Part number column shared by the BOM and the Life Cycle table.
pub const JOIN_KEY: &str = "PN";
/// Life Cycle column carried into the output.
pub const LIMIT: &str = "Limit";
/// Header of the synthetic column that is always emitted empty.
pub const BLANK_HEADER: &str = "SW /HCA";

/// Where an output column takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Always empty.
    Blank,
    /// A named BOM column.
    Bom(&'static str),
    /// A named Life Cycle column; null when the row has no match.
    LifeCycle(&'static str),
}

/// One column of the output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputColumn {
    pub header: &'static str,
    pub source: Source,
}

const fn col(header: &'static str, source: Source) -> OutputColumn {
    OutputColumn { header, source }
}

const BASIC_COLUMNS: &[OutputColumn] = &[
    col(BLANK_HEADER, Source::Blank),
    col("Product Lines", Source::Bom("ProductLines")),
    col("StationTypes", Source::Bom("StationTypes")),
    col("MTS", Source::Bom(FILTER_KEY)),
    col("PN (SFG\\SA)", Source::Bom("PN (SFG\\SA)")),
    col("PN", Source::Bom(JOIN_KEY)),
    col("Alternative PN", Source::Bom("Alternative PN")),
    col("Description", Source::Bom("Description")),
    col("Group", Source::Bom("Group")),
    col("BOM Quantity", Source::Bom("Quantity")),
    col("Life Cycle Limit", Source::LifeCycle(LIMIT)),
];

const EXTENDED_EXTRA: &[OutputColumn] = &[
    col("ProductName", Source::Bom("ProductName")),
    col("Vendor", Source::Bom("Vendor")),
    col("DefaultMinQuantity", Source::Bom("DefaultMinQuantity")),
    col("Related to ACC-KIT", Source::Bom("Related to ACC-KIT")),
    col("Relation", Source::Bom("Relation")),
];

/// Output layout choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Eleven columns ending at `Life Cycle Limit`.
    Basic,
    /// Basic plus product name, vendor, minimum quantity and ACC-KIT relation.
    #[default]
    Extended,
}

impl SchemaVariant {
    pub const ALL: [SchemaVariant; 2] = [SchemaVariant::Basic, SchemaVariant::Extended];

    pub fn label(self) -> &'static str {
        match self {
            SchemaVariant::Basic => "Basic",
            SchemaVariant::Extended => "Extended",
        }
    }

    /// Ordered output columns for this layout.
    pub fn output_columns(self) -> Vec<OutputColumn> {
        let mut columns = BASIC_COLUMNS.to_vec();
        if self == SchemaVariant::Extended {
            columns.extend_from_slice(EXTENDED_EXTRA);
        }
        columns
    }

    /// Output header row.
    pub fn headers(self) -> Vec<String> {
        self.output_columns()
            .iter()
            .map(|c| c.header.to_string())
            .collect()
    }

    /// BOM columns that must be present: the keys first, then every projected column.
    pub fn required_bom_columns(self) -> Vec<&'static str> {
        let mut required = vec![FILTER_KEY, JOIN_KEY];
        for column in self.output_columns() {
            if let Source::Bom(name) = column.source {
                if !required.contains(&name) {
                    required.push(name);
                }
            }
        }
        required
    }

    /// Life Cycle columns that must be present.
    pub fn required_life_cycle_columns(self) -> Vec<&'static str> {
        let mut required = vec![JOIN_KEY];
        for column in self.output_columns() {
            if let Source::LifeCycle(name) = column.source {
                if !required.contains(&name) {
                    required.push(name);
                }
            }
        }
        required
    }
}
