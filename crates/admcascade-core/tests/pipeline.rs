//! End-to-end tests of the conversion pipeline over in-memory workbooks

use admcascade_core::diagnostics::codes;
use admcascade_core::{convert, extract, CascadeError, Settings, Severity, SheetOrder};
use admcascade_data::{DataSource, ExcelSource, MemorySink, MemorySource, SheetGrid, XlsxSink};
use tempfile::TempDir;

fn grid(name: &str, rows: &[&[&str]]) -> SheetGrid {
    SheetGrid::from_str_rows(name, rows)
}

/// The two-level `Admin<N>Name_<locale>` / `Admin<N>Pcode` convention
fn admin_workbook() -> MemorySource {
    MemorySource::new()
        .with_sheet(grid(
            "Admin0",
            &[&["Admin0Name_en", "Admin0Pcode"], &["Country A", "AA"]],
        ))
        .with_sheet(grid(
            "Admin1",
            &[
                &["Admin0Name_en", "Admin0Pcode", "Admin1Name_en", "Admin1Pcode"],
                &["Country A", "AA", "District 1", "AA01"],
                &["Country A", "AA", "District 1", "AA01"],
                &["Country A", "AA", "District 2", "AA02"],
            ],
        ))
}

/// A three-level COD-AB style workbook with French and English names
fn cod_ab_workbook() -> MemorySource {
    let mut rows: Vec<Vec<String>> = vec![[
        "ADM2_EN", "ADM2_FR", "ADM2_PCODE", "ADM2_REF", "ADM2ALT1_EN", "ADM1_EN", "ADM1_FR",
        "ADM1_PCODE", "ADM0_EN", "ADM0_FR", "ADM0_PCODE", "validOn",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()];

    for province in 1..=5 {
        for district in 1..=4 {
            let p = format!("XY{:02}", province);
            let d = format!("{}{:02}", p, district);
            rows.push(vec![
                format!("District {}", d),
                format!("District FR {}", d),
                d.clone(),
                String::new(),
                String::new(),
                format!("Province {}", p),
                format!("Province FR {}", p),
                p,
                "Xyland".to_string(),
                "Xypays".to_string(),
                "XY".to_string(),
                "2024-01-01".to_string(),
            ]);
        }
    }

    MemorySource::new()
        .with_sheet(grid("xy_pop_adm0", &[&["ADM0_EN", "ADM0_PCODE"]]))
        .with_sheet(grid("xy_pop_adm1", &[&["ADM1_EN", "ADM1_PCODE"]]))
        .with_sheet(SheetGrid::new("xy_pop_adm2", rows))
        .with_sheet(grid("Notes", &[&["source"]]))
}

#[test]
fn test_admin_scenario() {
    let mut sink = MemorySink::new();
    let report = convert(&admin_workbook(), &mut sink, &Settings::default()).unwrap();

    assert_eq!(report.sheet, "Admin1");
    assert_eq!(report.deepest_level, 1);
    assert_eq!(report.locale.as_ref().map(|l| l.as_str()), Some("en"));
    assert!(report.complete);
    assert!(report.diagnostics.is_empty());

    assert!(sink.is_saved());
    let out = sink.to_grid("choices");
    let rows: Vec<Vec<&str>> = out
        .rows()
        .iter()
        .map(|r| r.iter().map(String::as_str).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["list_name", "name", "label", "Admin0"],
            vec!["Admin0", "AA", "Country A", ""],
            vec!["", "", "", ""],
            vec!["Admin1", "AA01", "District 1", "AA"],
            vec!["Admin1", "AA02", "District 2", "AA"],
        ]
    );
}

#[test]
fn test_cod_ab_output_shape() {
    let mut sink = MemorySink::new();
    let report = convert(&cod_ab_workbook(), &mut sink, &Settings::default()).unwrap();

    assert_eq!(report.sheet, "xy_pop_adm2");
    assert_eq!(report.deepest_level, 2);
    assert_eq!(report.locale.as_ref().map(|l| l.as_str()), Some("EN"));
    let counts: Vec<usize> = report.levels.iter().map(|l| l.records).collect();
    assert_eq!(counts, vec![1, 5, 20]);
    assert_eq!(report.rows_written, 29);
    assert_eq!(sink.row_count(), 29);

    assert_eq!(sink.cell(0, 3), "ADM0");
    assert_eq!(sink.cell(0, 4), "ADM1");
    assert_eq!(sink.cell(1, 0), "ADM0");
    assert_eq!(sink.cell(1, 2), "Xyland");
    assert_eq!(sink.cell(3, 0), "ADM1");
    assert_eq!(sink.cell(3, 3), "XY");
    assert_eq!(sink.cell(9, 0), "ADM2");
    assert_eq!(sink.cell(9, 1), "XY0101");
    assert_eq!(sink.cell(9, 2), "District XY0101");
    assert_eq!(sink.cell(9, 4), "XY01");
}

#[test]
fn test_hierarchy_closure() {
    let extraction = extract(&cod_ab_workbook(), &Settings::default()).unwrap();
    let levels = extraction.hierarchy.levels();
    for pair in levels.windows(2) {
        for record in pair[1].records() {
            assert!(
                pair[0].contains(&record.parent_code),
                "{} has no parent",
                record.code
            );
        }
    }
}

#[test]
fn test_preferred_locale_override() {
    let settings = Settings::from_toml_str("[locale]\npreferred = \"FR\"\n").unwrap();
    let mut sink = MemorySink::new();
    let report = convert(&cod_ab_workbook(), &mut sink, &settings).unwrap();

    assert!(report.complete);
    assert_eq!(sink.cell(1, 2), "Xypays");
    assert_eq!(sink.cell(3, 2), "Province FR XY01");

    let notice = &report.diagnostics[0];
    assert!(notice.has_code(codes::LOCALE_OVERRIDE));
    assert_eq!(notice.severity, Severity::Info);
    assert!(notice.message.contains("'EN'"));
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn test_preferred_locale_matching_inferred_is_silent() {
    let settings = Settings::from_toml_str("[locale]\npreferred = \"en\"\n").unwrap();
    let mut sink = MemorySink::new();
    let report = convert(&cod_ab_workbook(), &mut sink, &settings).unwrap();

    assert!(report.diagnostics.is_empty());
    assert_eq!(sink.cell(1, 2), "Xyland");
}

#[test]
fn test_invalid_preferred_locale() {
    let settings = Settings::from_toml_str("[locale]\npreferred = \"fra\"\n").unwrap();
    let result = extract(&cod_ab_workbook(), &settings);
    assert!(matches!(result, Err(CascadeError::Config(_))));
}

#[test]
fn test_missing_locale_for_level_falls_back() {
    let source = MemorySource::new().with_sheet(grid(
        "Admin1",
        &[
            &["Admin0Name_fr", "Admin0Pcode", "Admin1Name_en", "Admin1Pcode", "Admin1Name_en"],
            &["Pays", "AA", "District 1", "AA01", ""],
        ],
    ));

    let mut sink = MemorySink::new();
    let report = convert(&source, &mut sink, &Settings::default()).unwrap();
    assert!(report.complete);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.has_code(codes::LOCALE_FALLBACK) && d.level == Some(0)));
    assert_eq!(sink.cell(1, 2), "Pays");

    let mut strict = Settings::default();
    strict.locale.fallback = false;
    let mut sink = MemorySink::new();
    let report = convert(&source, &mut sink, &strict).unwrap();
    assert!(!report.complete);
    assert_eq!(report.empty_levels(), vec![0]);
    assert!(sink.is_saved());
}

#[test]
fn test_missing_level_is_partial_not_fatal() {
    let source = MemorySource::new().with_sheet(grid(
        "adm2",
        &[
            &["ADM0_EN", "ADM0_PCODE", "ADM2_EN", "ADM2_PCODE"],
            &["Xyland", "XY", "District", "XY0101"],
        ],
    ));

    let mut sink = MemorySink::new();
    let report = convert(&source, &mut sink, &Settings::default()).unwrap();

    assert!(!report.complete);
    assert_eq!(report.empty_levels(), vec![1]);
    assert!(report.diagnostics.iter().any(|d| d.has_code(codes::MISSING_COLUMN)));
    assert!(report.diagnostics.iter().any(|d| d.has_code(codes::EMPTY_LEVEL)));
    // Level 2's parent column (level 1 code) is absent, so its record is an orphan
    assert!(report.has_orphans());
    // header + XY + blank + (empty level 1) + blank + XY0101
    assert_eq!(report.rows_written, 5);
    assert_eq!(sink.cell(4, 1), "XY0101");
}

#[test]
fn test_no_matching_sheet() {
    let source = MemorySource::new()
        .with_sheet(grid("Sheet", &[&["a"]]))
        .with_sheet(grid("Notes", &[&["b"]]));
    let mut sink = MemorySink::new();

    let result = convert(&source, &mut sink, &Settings::default());
    assert!(matches!(result, Err(CascadeError::NoMatchingSheet(_))));
    assert!(!sink.is_saved());
}

#[test]
fn test_sheet_order_setting() {
    let deep = grid(
        "adm10",
        &[&["ADM10_PCODE"]],
    );
    let shallow = grid(
        "adm2",
        &[&["ADM2_EN", "ADM2_PCODE"]],
    );
    let source = MemorySource::new().with_sheet(shallow).with_sheet(deep);

    let numeric = extract(&source, &Settings::default()).unwrap();
    assert_eq!(numeric.selection.sheet_name, "adm10");

    let mut settings = Settings::default();
    settings.selection.sheet_order = SheetOrder::Lexicographic;
    let lexicographic = extract(&source, &settings).unwrap();
    assert_eq!(lexicographic.selection.sheet_name, "adm2");
}

#[test]
fn test_xlsx_output_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cascade.xlsx");

    let mut sink = XlsxSink::create(&path, "choices").unwrap();
    let report = convert(&admin_workbook(), &mut sink, &Settings::default()).unwrap();
    assert_eq!(report.rows_written, 5);

    let written = ExcelSource::new(&path).unwrap();
    let out = written.read_sheet("choices").unwrap();
    assert_eq!(out.cell(0, 0), "list_name");
    assert_eq!(out.cell(1, 1), "AA");
    assert_eq!(out.cell(2, 0), "");
    assert_eq!(out.cell(4, 1), "AA02");
    assert_eq!(out.cell(4, 3), "AA");
}
