use std::io::{self, Write};

use fep_extract::{DdgRow, EdgeTable, Leg, RepeatSet, io::format_rounded};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_DDG_ROWS: usize = 20;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

#[derive(Clone, Copy)]
struct Column {
    width: usize,
    align: Align,
}

impl Column {
    const fn left(width: usize) -> Self {
        Self {
            width,
            align: Align::Left,
        }
    }

    const fn right(width: usize) -> Self {
        Self {
            width,
            align: Align::Right,
        }
    }

    fn cell(&self, text: &str) -> String {
        let text = truncate(text, self.width);
        match self.align {
            Align::Left => format!("{:<w$}", text, w = self.width),
            Align::Right => format!("{:>w$}", text, w = self.width),
        }
    }
}

/// A titled box of fixed-width columns.
struct BoxTable<'a> {
    title: &'a str,
    columns: &'a [Column],
}

impl BoxTable<'_> {
    fn rule(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .columns
            .iter()
            .map(|c| "─".repeat(c.width + 2))
            .collect();
        format!("{INDENT}{left}{}{right}", segments.join(mid.to_string().as_str()))
    }

    fn row(&self, cells: &[&str]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .map(|(column, text)| column.cell(text))
            .collect();
        format!("{INDENT}│ {} │", cells.join(" │ "))
    }

    fn write(
        &self,
        out: &mut impl Write,
        header: Option<&[&str]>,
        body: &[Vec<String>],
    ) -> io::Result<()> {
        writeln!(
            out,
            "{INDENT}┌─ {} ─┐",
            truncate(self.title, SAFE_TABLE_WIDTH - 6)
        )?;
        writeln!(out, "{}", self.rule('┌', '┬', '┐'))?;
        if let Some(header) = header {
            writeln!(out, "{}", self.row(header))?;
            writeln!(out, "{}", self.rule('├', '┼', '┤'))?;
        }
        for cells in body {
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            writeln!(out, "{}", self.row(&cells))?;
        }
        writeln!(out, "{}", self.rule('└', '┴', '┘'))
    }
}

pub fn print_run_summary(set: &RepeatSet, skipped: usize, table: &EdgeTable) {
    let stderr = io::stderr();
    let _ = write_run_summary(&mut stderr.lock(), set, skipped, table);
}

fn write_run_summary(
    out: &mut impl Write,
    set: &RepeatSet,
    skipped: usize,
    table: &EdgeTable,
) -> io::Result<()> {
    let mut body: Vec<Vec<String>> = set
        .repeats
        .iter()
        .enumerate()
        .map(|(i, r)| vec![format!("Repeat {} files", i), r.files.len().to_string()])
        .collect();

    if skipped > 0 {
        body.push(vec!["Skipped inputs".to_string(), skipped.to_string()]);
    }

    let complete = table
        .iter()
        .filter(|e| e.leg(Leg::Complex).is_some() && e.leg(Leg::Solvent).is_some())
        .count();
    let vacuum = table.iter().filter(|e| e.leg(Leg::Vacuum).is_some()).count();

    body.push(vec!["Edges".to_string(), table.len().to_string()]);
    body.push(vec!["Complete edges".to_string(), complete.to_string()]);
    if vacuum > 0 {
        body.push(vec!["Vacuum legs".to_string(), vacuum.to_string()]);
    }

    let key_w = 16;
    let columns = [
        Column::left(key_w),
        Column::right(SAFE_TABLE_WIDTH.saturating_sub(key_w + 6)),
    ];
    BoxTable {
        title: "Run Summary",
        columns: &columns,
    }
    .write(out, None, &body)
}

pub fn print_ddg_table(rows: &[DdgRow], decimals: usize) {
    let stderr = io::stderr();
    let _ = write_ddg_table(&mut stderr.lock(), rows, decimals);
}

fn write_ddg_table(out: &mut impl Write, rows: &[DdgRow], decimals: usize) -> io::Result<()> {
    let (ddg_w, err_w) = (9, 7);
    let name_w = SAFE_TABLE_WIDTH.saturating_sub(ddg_w + err_w + 12) / 2;
    let columns = [
        Column::left(name_w),
        Column::left(name_w),
        Column::right(ddg_w),
        Column::right(err_w),
    ];

    let mut body: Vec<Vec<String>> = rows
        .iter()
        .take(MAX_DDG_ROWS)
        .map(|row| {
            vec![
                row.ligand_a.clone(),
                row.ligand_b.clone(),
                format_rounded(row.ddg, decimals),
                format_rounded(row.uncertainty, decimals),
            ]
        })
        .collect();

    if rows.len() > MAX_DDG_ROWS {
        body.push(vec![
            "...".to_string(),
            format!("+{} more", rows.len() - MAX_DDG_ROWS),
            String::new(),
            String::new(),
        ]);
    }

    BoxTable {
        title: "ΔΔG (kcal/mol)",
        columns: &columns,
    }
    .write(out, Some(&["Ligand i", "Ligand j", "ΔΔG", "±"]), &body)
}
