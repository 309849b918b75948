use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::engine::{LayoutEngine, PageSummary};
use replica_render_core::{RecordedPage, RecordingSurface};
use replica_types::{NormalizedRecord, TransactionRecord};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A record with a plain one-line description and a credit amount.
pub fn simple_record(day: u32, description: &str, credit: f64) -> NormalizedRecord {
    let raw = TransactionRecord::new(
        format!("2024-11-{:02}", day),
        description,
        "",
        "",
        credit,
        "",
    );
    replica_normalize::normalize_record(&raw)
}

/// `count` one-line records, each worth its index plus one.
pub fn simple_records(count: usize) -> Vec<NormalizedRecord> {
    (0..count)
        .map(|i| simple_record((i % 28) as u32 + 1, &format!("MOVIMIENTO {}", i), i as f64 + 1.0))
        .collect()
}

/// Lays out `records` with `config` onto a recording surface.
pub fn paginate_recorded(
    config: LayoutConfig,
    records: &[NormalizedRecord],
) -> Result<(Vec<PageSummary>, Vec<RecordedPage>), LayoutError> {
    init_logger();
    let engine = LayoutEngine::new(config)?;
    let mut surface = RecordingSurface::new();
    let summaries = engine.paginate(records, &mut surface)?;
    Ok((summaries, surface.into_pages()))
}
