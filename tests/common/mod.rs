#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use workbook_service::services::excel::{StoreConfig, WorkbookStore};

pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

pub use self::Cell::{Blank, Number, Text};

pub struct SheetSpec {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
    /// Formatted but valueless cell written at this 0-based row, stretching the dimension.
    pub styled_tail_row: Option<u32>,
}

impl SheetSpec {
    pub fn new(name: &'static str, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name,
            rows,
            styled_tail_row: None,
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self::new(name, Vec::new())
    }
}

pub fn write_workbook(path: &Path, sheets: &[SheetSpec]) {
    let mut workbook = Workbook::new();
    let tail_format = Format::new().set_bold();

    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(spec.name).unwrap();

        for (r, row) in spec.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Number(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Blank => {}
                }
            }
        }

        if let Some(row) = spec.styled_tail_row {
            worksheet.write_blank(row, 0, &tail_format).unwrap();
        }
    }

    workbook.save(path).unwrap();
}

/// Products sheet with header `Код`/`Назва` and five rows, the third missing its name.
pub fn products_sheet() -> SheetSpec {
    SheetSpec::new(
        "Номенклатура",
        vec![
            vec![Text("Код"), Text("Назва")],
            vec![Number(101.0), Text("Цукор")],
            vec![Number(102.0), Text("Борошно")],
            vec![Number(103.0), Blank],
            vec![Number(104.0), Text("Сіль")],
            vec![Number(105.0), Text("Олія")],
        ],
    )
}

pub fn analysis_sheet() -> SheetSpec {
    SheetSpec::new(
        "Аналіз ABC-XYZ",
        vec![
            vec![Text("Код"), Text("ABC"), Text("XYZ")],
            vec![Number(101.0), Text("A"), Text("X")],
            vec![Number(102.0), Text("B"), Text("Z")],
        ],
    )
}

pub fn standard_sheets() -> Vec<SheetSpec> {
    vec![
        products_sheet(),
        SheetSpec::new(
            "Травень 2025",
            vec![
                vec![Text("Код"), Text("Продажі")],
                vec![Number(101.0), Number(12.5)],
            ],
        ),
        SheetSpec::new(
            "Лютий 2024",
            vec![
                vec![Text("Код"), Text("Продажі")],
                vec![Number(101.0), Number(3.0)],
                vec![Number(102.0), Number(4.0)],
            ],
        ),
        analysis_sheet(),
        SheetSpec::new("Звіт", vec![vec![Text("Примітка")]]),
    ]
}

pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new(sheets: &[SheetSpec]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workbook.xlsx");
        write_workbook(&path, sheets);
        Self { _dir: dir, path }
    }

    pub fn standard() -> Self {
        Self::new(&standard_sheets())
    }

    pub fn store(&self) -> WorkbookStore {
        WorkbookStore::new(StoreConfig::new(&self.path))
    }
}
