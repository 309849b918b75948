use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::engine::{LayoutEngine, PageState, Placement};
use crate::test_utils::{init_logger, paginate_recorded, simple_record, simple_records};
use replica_render_core::{RecordingSurface, RenderSurface, StandardMetrics};
use replica_types::{NormalizedRecord, TransactionRecord};

const EPS: f32 = 0.01;

fn with_max_rows(k: usize) -> LayoutConfig {
    LayoutConfig { max_rows_per_page: Some(k), ..LayoutConfig::default() }
}

fn statement_records() -> Vec<NormalizedRecord> {
    [
        TransactionRecord::new("01 ENE", "PAGO A", "REF1", 100.00, "", 900.00),
        TransactionRecord::new("02 ENE", "COBRO", "REF2", "", 50.00, 850.00),
        TransactionRecord::new(
            "03 ENE",
            "TRANSF INTERBANCARIA SPEI 19 NOV //REF3",
            "REF3",
            "",
            200.00,
            650.00,
        ),
    ]
    .iter()
    .map(replica_normalize::normalize_record)
    .collect()
}

fn oversized_record(lines: usize) -> NormalizedRecord {
    let words: Vec<String> = (0..lines).map(|i| format!("W{}", i)).collect();
    NormalizedRecord {
        date: "05 DIC".into(),
        description: words.join(" "),
        ..NormalizedRecord::default()
    }
}

#[test]
fn statement_example_splits_into_two_pages() {
    let config = with_max_rows(2);
    let engine = LayoutEngine::new(config.clone()).unwrap();
    let (summaries, pages) = paginate_recorded(config.clone(), &statement_records()).unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(pages.len(), 2);
    assert_eq!(summaries[0].rows.len(), 2);
    assert_eq!(summaries[1].rows.len(), 1);
    assert_eq!(summaries[1].rows[0].record_index, 2);
    assert_eq!(summaries[1].rows[0].line_count, 3);

    let body = config.body_font();
    let columns = engine.columns();
    for (page, amount, column) in [(0, "$100.00", 3), (0, "$50.00", 4), (1, "$200.00", 4)] {
        let (x, _) = pages[page].find_text(amount).unwrap();
        let right = x + StandardMetrics::text_width(amount, &body);
        assert!((right - (columns.column_right(column) - config.cell_padding_x)).abs() < EPS);
    }

    let label = pages[1].find_text("TRANSF INTERBANCARIA SPEI").unwrap();
    let date = pages[1].find_text("19 NOV").unwrap();
    let reference = pages[1].find_text("//REF3").unwrap();
    assert_eq!(label.0, date.0);
    assert!((date.1 - label.1 - config.line_spacing).abs() < EPS);
    assert!((reference.1 - date.1 - config.line_spacing).abs() < EPS);

    assert!(pages[0].contains_text("Página 1"));
    assert!(pages[1].contains_text("Página 2"));
}

#[test]
fn every_page_repeats_the_header() {
    let (_, pages) = paginate_recorded(with_max_rows(2), &statement_records()).unwrap();
    for page in &pages {
        for label in ["Fecha", "Concepto", "Origen / Referencia", "Depósito", "Retiro", "Saldo"] {
            assert!(page.contains_text(label), "missing header label {}", label);
        }
    }
}

#[test]
fn row_cap_gives_ceil_pages() {
    for (n, k) in [(10, 3), (9, 3), (1, 5), (25, 1)] {
        let (summaries, _) = paginate_recorded(with_max_rows(k), &simple_records(n)).unwrap();
        assert_eq!(summaries.len(), n.div_ceil(k), "n={} k={}", n, k);
        let (last, full) = summaries.split_last().unwrap();
        assert!(full.iter().all(|p| p.rows.len() == k));
        assert_eq!(last.rows.len(), n - k * full.len());
    }
}

#[test]
fn rows_stay_inside_the_content_area() {
    let config = LayoutConfig::default();
    let (summaries, _) = paginate_recorded(config.clone(), &simple_records(120)).unwrap();
    assert!(summaries.len() > 1);

    let mut next = 0;
    for page in &summaries {
        assert!(!page.rows.is_empty());
        let mut y = page.header_top + page.header_height;
        for row in &page.rows {
            assert_eq!(row.record_index, next);
            assert!((row.y - y).abs() < EPS);
            assert!(row.y + row.height <= config.usable_bottom() + EPS);
            y += row.height;
            next += 1;
        }
        assert!(page.rows_height() <= config.content_height() + EPS);
    }
    assert_eq!(next, 120);
}

#[test]
fn pages_are_filled_before_breaking() {
    let config = LayoutConfig::default();
    let per_page = (config.content_height() / config.base_row_height).floor() as usize;
    let (summaries, _) = paginate_recorded(config, &simple_records(per_page + 1)).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].rows.len(), per_page);
}

#[test]
fn oversized_row_is_forced_onto_its_own_page() {
    let config = LayoutConfig { max_line_chars: 1, ..LayoutConfig::default() };
    let records = vec![
        simple_record(1, "A", 1.0),
        oversized_record(100),
        simple_record(2, "B", 2.0),
    ];
    let (summaries, pages) = paginate_recorded(config.clone(), &records).unwrap();

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[1].rows.len(), 1);
    let forced = &summaries[1].rows[0];
    assert!(forced.forced);
    assert_eq!(forced.record_index, 1);
    assert!(forced.height > config.content_height());
    assert!(!summaries[0].has_forced_row());
    assert!(!summaries[2].has_forced_row());
    assert!(pages[1].contains_text("W99"));
}

#[test]
fn consecutive_oversized_rows_terminate() {
    let config = LayoutConfig { max_line_chars: 1, ..LayoutConfig::default() };
    let records: Vec<_> = (0..3).map(|_| oversized_record(90)).collect();
    let (summaries, _) = paginate_recorded(config, &records).unwrap();
    assert_eq!(summaries.len(), 3);
    assert!(summaries.iter().all(|p| p.rows.len() == 1 && p.rows[0].forced));
}

#[test]
fn alternation_follows_the_global_row_index() {
    let config = with_max_rows(3);
    let stripe = config.palette.alternate_row;
    let (summaries, pages) = paginate_recorded(config, &simple_records(7)).unwrap();

    let striped: Vec<Vec<f32>> = pages
        .iter()
        .map(|p| p.fills().filter(|(_, c)| **c == stripe).map(|(r, _)| r.y).collect())
        .collect();
    assert_eq!(striped[0].len(), 2);
    assert_eq!(striped[1].len(), 1);
    assert_eq!(striped[2].len(), 1);

    // Page 2 starts at global row 3, so its first row is unshaded.
    let second_row = &summaries[1].rows[1];
    assert_eq!(second_row.record_index, 4);
    assert!((striped[1][0] - second_row.y).abs() < EPS);
}

#[test]
fn empty_input_yields_a_header_only_page() {
    let (summaries, pages) = paginate_recorded(LayoutConfig::default(), &[]).unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].rows.is_empty());
    assert!(pages[0].contains_text("Concepto"));
    assert!(pages[0].contains_text("Página 1"));
}

#[test]
fn blank_cells_draw_no_text() {
    let record = NormalizedRecord {
        date: "01 ENE".into(),
        ..NormalizedRecord::default()
    };
    let (_, pages) = paginate_recorded(LayoutConfig::default(), &[record]).unwrap();
    let texts: Vec<&str> = pages[0].texts().map(|(_, _, t)| t).collect();
    // Six header labels, the date and the footer.
    assert_eq!(texts.len(), 8);
    assert!(texts.iter().all(|t| !t.is_empty()));
}

#[test]
fn does_not_fit_leaves_the_cursor_alone() {
    init_logger();
    let config = LayoutConfig { page_height: 150.0, ..LayoutConfig::default() };
    // 150 - 36 - 24 leaves 90pt; the header ends at 56, so only one 18pt row
    // plus part of another fits.
    let engine = LayoutEngine::new(config).unwrap();
    let mut surface = RecordingSurface::new();
    let records = simple_records(3);

    let mut composer = engine.composer(&mut surface);
    composer.begin_page().unwrap();
    assert_eq!(composer.try_place_row(&records[0]).unwrap(), Placement::Placed);
    let before = *composer.cursor();
    assert_eq!(composer.try_place_row(&records[1]).unwrap(), Placement::DoesNotFit);
    assert_eq!(*composer.cursor(), before);
    assert_eq!(composer.state(), PageState::RowsInProgress);

    let summary = composer.end_page().unwrap();
    assert_eq!(summary.rows.len(), 1);
    assert_eq!(composer.state(), PageState::PageSealed);
    assert_eq!(surface.pages_finished(), 1);
    assert!(!surface.pages()[0].contains_text("MOVIMIENTO 1"));
}

#[test]
fn rows_need_an_open_page() {
    let engine = LayoutEngine::new(LayoutConfig::default()).unwrap();
    let mut surface = RecordingSurface::new();
    let records = simple_records(1);
    let mut composer = engine.composer(&mut surface);
    assert_eq!(composer.state(), PageState::AwaitingHeader);
    assert!(matches!(
        composer.try_place_row(&records[0]),
        Err(LayoutError::PageNotOpen(PageState::AwaitingHeader))
    ));
    assert!(matches!(
        composer.end_page(),
        Err(LayoutError::PageNotOpen(PageState::AwaitingHeader))
    ));

    composer.begin_page().unwrap();
    assert!(matches!(composer.begin_page(), Err(LayoutError::PageStillOpen(1))));
    composer.end_page().unwrap();
    assert!(matches!(
        composer.try_place_row(&records[0]),
        Err(LayoutError::PageNotOpen(PageState::PageSealed))
    ));

    composer.begin_page().unwrap();
    assert_eq!(composer.state(), PageState::RowsInProgress);
    assert_eq!(composer.cursor().page_number, 2);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = LayoutConfig { max_line_chars: 0, ..LayoutConfig::default() };
    assert!(LayoutEngine::new(config).is_err());
}

#[test]
fn independent_builds_do_not_share_state() {
    let engine = LayoutEngine::new(with_max_rows(4)).unwrap();
    let records = simple_records(10);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut surface = RecordingSurface::new();
                    engine.paginate(&records, &mut surface).unwrap().len()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    });
}

#[test]
fn every_row_is_boxed_by_the_column_rules() {
    let config = with_max_rows(2);
    let engine = LayoutEngine::new(config.clone()).unwrap();
    let (pages, recorded) = paginate_recorded(config, &simple_records(2)).unwrap();
    let edges = engine.columns().edges();

    for row in &pages[0].rows {
        let bottom = row.y + row.height;
        for &x in edges {
            assert!(
                recorded[0].lines().any(|(from, to)| {
                    (from.x - x).abs() < EPS
                        && (to.x - x).abs() < EPS
                        && (from.y - row.y).abs() < EPS
                        && (to.y - bottom).abs() < EPS
                }),
                "no vertical rule at x={} for row {}",
                x,
                row.record_index
            );
        }
        assert!(recorded[0].lines().any(|(from, to)| {
            (from.y - bottom).abs() < EPS && (to.y - bottom).abs() < EPS
        }));
    }
}
