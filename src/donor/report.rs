use crate::format::format_amount;

use super::store::DonorStore;

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Configuration for a single column in the rendered table.
#[derive(Clone, Debug)]
pub struct TableColumn {
    pub header: &'static str,
    pub min_width: usize,
    pub alignment: Alignment,
}

/// A fixed-width text table with headers and a separator rule.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Content width per column: the widest of header, cells, and the
    /// configured minimum.
    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = column.header.chars().count().max(column.min_width);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.chars().count());
                    }
                }
                width
            })
            .collect()
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                match column.alignment {
                    Alignment::Left => format!("{:<width$}", text, width = widths[idx]),
                    Alignment::Right => format!("{:>width$}", text, width = widths[idx]),
                }
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }

    /// Header cells are left-aligned and joined with ` | `; data rows use
    /// plain two-space separation.
    fn render_header(&self, widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("{:<width$}", column.header, width = widths[idx]))
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let rule_width = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);

        let mut out = String::new();
        out.push_str(&self.render_header(&widths));
        out.push('\n');
        out.push_str(&"-".repeat(rule_width));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&self.render_row(row, &widths));
        }
        out
    }
}

/// Renders the donor summary: one row per donor in store order with a
/// zero-padded index, display name, total given, gift count, and average.
///
/// Panics if a donor has no donations; that breaks the store invariant and
/// must surface as a defect rather than a NaN cell.
pub fn render_report(store: &DonorStore) -> String {
    let columns = vec![
        TableColumn {
            header: "ID",
            min_width: 5,
            alignment: Alignment::Right,
        },
        TableColumn {
            header: "Donor Name",
            min_width: 20,
            alignment: Alignment::Left,
        },
        TableColumn {
            header: "Total Given",
            min_width: 14,
            alignment: Alignment::Right,
        },
        TableColumn {
            header: "Num Gifts",
            min_width: 9,
            alignment: Alignment::Right,
        },
        TableColumn {
            header: "Average Gift",
            min_width: 12,
            alignment: Alignment::Right,
        },
    ];

    let rows = store
        .donors()
        .iter()
        .enumerate()
        .map(|(index, donor)| {
            vec![
                format!("{:05}", index),
                donor.full_name.clone(),
                format_amount(donor.total_given()),
                donor.donation_count().to_string(),
                format_amount(donor.average_gift()),
            ]
        })
        .collect();

    Table { columns, rows }.render()
}
