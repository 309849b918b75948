mod common;

use common::fixtures::{STATEMENT_CSV, many_records, statement_records};
use common::{GeneratedPdf, TestResult, init_logger};
use replica::{
    Backend, InputError, LayoutConfig, LayoutEngine, PipelineError, StatementPipeline,
};
use replica_render_core::{FontSpec, StandardMetrics};
use std::fs;

fn capped(rows: usize) -> LayoutConfig {
    LayoutConfig { max_rows_per_page: Some(rows), ..LayoutConfig::default() }
}

#[test]
fn three_records_with_cap_two_make_two_pages() -> TestResult {
    init_logger();
    let pipeline = StatementPipeline::new(capped(2))?;
    let rendered = pipeline.render(&statement_records())?;
    assert_eq!(rendered.pages.len(), 2);
    assert_eq!(rendered.pages[0].rows.len(), 2);
    assert_eq!(rendered.pages[1].rows.len(), 1);

    let pdf = GeneratedPdf::from_bytes(rendered.pdf)?;
    assert_eq!(pdf.page_count(), 2);

    let first = pdf.page_strings(1);
    for expected in ["01 ENE", "PAGO A", "REF1", "$100.00", "$900.00", "$50.00", "Página 1"] {
        assert!(first.iter().any(|s| s == expected), "page 1 lacks {:?}", expected);
    }

    let second = pdf.page_strings(2);
    let description: Vec<&String> = second
        .iter()
        .filter(|s| ["TRANSF INTERBANCARIA SPEI", "19 NOV", "//REF3"].contains(&s.as_str()))
        .collect();
    assert_eq!(description, ["TRANSF INTERBANCARIA SPEI", "19 NOV", "//REF3"]);
    assert!(second.iter().any(|s| s == "$200.00"));
    assert!(second.iter().any(|s| s == "Página 2"));
    Ok(())
}

#[test]
fn amounts_are_right_aligned_in_their_columns() -> TestResult {
    let config = capped(2);
    let engine = LayoutEngine::new(config.clone())?;
    let columns = engine.columns();
    let body = FontSpec::regular(&config.font_family, config.body_font_size);

    let rendered = StatementPipeline::new(config.clone())?.render(&statement_records())?;
    let pdf = GeneratedPdf::from_bytes(rendered.pdf)?;

    for (page, amount, column) in [(1, "$100.00", 3), (1, "$50.00", 4), (2, "$200.00", 4), (2, "$650.00", 5)] {
        let (x, _) = pdf.find_text(page, amount).ok_or(format!("{} not drawn", amount))?;
        let right = x + StandardMetrics::text_width(amount, &body);
        let expected = columns.column_right(column) - config.cell_padding_x;
        assert!((right - expected).abs() < 0.01, "{} ends at {} not {}", amount, right, expected);
    }
    Ok(())
}

#[test]
fn header_repeats_on_every_page() -> TestResult {
    let rendered = StatementPipeline::new(LayoutConfig::default())?.render(&many_records(150))?;
    let pdf = GeneratedPdf::from_bytes(rendered.pdf)?;
    assert!(pdf.page_count() > 1);
    assert_eq!(pdf.page_count(), rendered.pages.len());

    for page in 1..=pdf.page_count() as u32 {
        let strings = pdf.page_strings(page);
        for label in ["Fecha", "Concepto", "Origen / Referencia", "Depósito", "Retiro", "Saldo"] {
            assert!(strings.iter().any(|s| s == label), "page {} lacks {}", page, label);
        }
        assert!(strings.iter().any(|s| *s == format!("Página {}", page)));
    }
    Ok(())
}

#[test]
fn every_record_is_placed_exactly_once() -> TestResult {
    let records = many_records(97);
    let rendered = StatementPipeline::new(capped(10))?.render(&records)?;
    let placed: Vec<usize> = rendered
        .pages
        .iter()
        .flat_map(|p| p.rows.iter().map(|r| r.record_index))
        .collect();
    assert_eq!(placed, (0..97).collect::<Vec<_>>());
    assert_eq!(rendered.pages.len(), 10);
    Ok(())
}

#[test]
fn empty_statement_still_has_a_page() -> TestResult {
    let rendered = StatementPipeline::new(LayoutConfig::default())?.render(&[])?;
    let pdf = GeneratedPdf::from_bytes(rendered.pdf)?;
    assert_eq!(pdf.page_count(), 1);
    assert!(pdf.page_strings(1).iter().any(|s| s == "Concepto"));
    Ok(())
}

#[test]
fn raster_backend_produces_image_pages() -> TestResult {
    init_logger();
    let pipeline = StatementPipeline::new(capped(2))?
        .with_backend(Backend::Raster)
        .with_dpi(36.0);
    let rendered = pipeline.render(&statement_records())?;
    let pdf = GeneratedPdf::from_bytes(rendered.pdf)?;
    assert_eq!(pdf.page_count(), 2);
    assert!(pdf.page_strings(1).is_empty());

    let pngs = pipeline.render_pngs(&statement_records())?;
    assert_eq!(pngs.len(), 2);
    assert!(pngs.iter().all(|p| p.starts_with(b"\x89PNG")));
    Ok(())
}

#[test]
fn csv_file_to_pdf_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("statement.csv");
    let config_path = dir.path().join("layout.json");
    let output = dir.path().join("statement.pdf");
    fs::write(&input, STATEMENT_CSV)?;
    fs::write(&config_path, r#"{ "maxRowsPerPage": 2, "footerLabel": "Hoja" }"#)?;

    let config = StatementPipeline::load_config(&config_path)?;
    assert_eq!(config.footer_label, "Hoja");
    let written = StatementPipeline::new(config)?.generate_to_file(&input, None, &output)?;
    assert_eq!(written, vec![output.clone()]);

    let pdf = GeneratedPdf::from_bytes(fs::read(&output)?)?;
    assert_eq!(pdf.page_count(), 2);
    assert!(pdf.page_strings(2).iter().any(|s| s == "Hoja 2"));
    assert!(pdf.page_strings(2).iter().any(|s| s == "19 NOV"));
    Ok(())
}

#[test]
fn png_output_writes_one_file_per_page() -> TestResult {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("statement.json");
    let records = r#"[
        {"Fecha": "2024-12-02", "Concepto": "PAGO A", "Referencia": "REF1", "Depósito": 100, "Retiro": null, "Saldo": 900},
        {"Fecha": "2024-12-03", "Concepto": "COBRO", "Referencia": "REF2", "Depósito": null, "Retiro": 50, "Saldo": 850},
        {"Fecha": "2024-12-04", "Concepto": "COBRO", "Referencia": "REF3", "Depósito": null, "Retiro": 50, "Saldo": 800}
    ]"#;
    fs::write(&input, records)?;

    let pipeline = StatementPipeline::new(capped(1))?.with_dpi(24.0);
    let written = pipeline.generate_to_file(&input, None, dir.path().join("out.png"))?;
    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(String::from))
        .collect();
    assert_eq!(names, ["out-1.png", "out-2.png", "out-3.png"]);
    assert!(written.iter().all(|p| p.exists()));
    Ok(())
}

#[test]
fn missing_column_surfaces_as_input_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("bad.csv");
    fs::write(&input, "Fecha,Concepto,Saldo\n01 ENE,X,1\n")?;

    let err = StatementPipeline::new(LayoutConfig::default())?
        .generate_to_file(&input, None, dir.path().join("out.pdf"))
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Input(InputError::MissingColumn("Origen / Referencia"))
    ));
    Ok(())
}

#[test]
fn invalid_configuration_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("layout.json");
    fs::write(&path, r#"{ "pageHeight": 80 }"#)?;
    let config = StatementPipeline::load_config(&path)?;
    assert!(matches!(
        StatementPipeline::new(config),
        Err(PipelineError::Layout(_))
    ));

    fs::write(&path, "{ not json")?;
    assert!(matches!(
        StatementPipeline::load_config(&path),
        Err(PipelineError::Config(_))
    ));
    Ok(())
}
