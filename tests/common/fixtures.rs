use replica::TransactionRecord;

/// The three-record statement used across the integration tests.
pub fn statement_records() -> Vec<TransactionRecord> {
    vec![
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
}

pub const STATEMENT_CSV: &str = "\
Fecha,Concepto,Origen / Referencia,Depósito,Retiro,Saldo
01 ENE,PAGO A,REF1,100.00,,900.00
02 ENE,COBRO,REF2,,50.00,850.00
03 ENE,TRANSF INTERBANCARIA SPEI 19 NOV //REF3,REF3,,200.00,650.00
";

/// `count` generic records with ISO dates and growing balances.
pub fn many_records(count: usize) -> Vec<TransactionRecord> {
    (0..count)
        .map(|i| {
            TransactionRecord::new(
                format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1),
                format!("PAGO DE SERVICIO NUMERO {} CON DESCRIPCION LARGA", i),
                format!("R{:06}", i),
                if i % 2 == 0 { (i as f64) * 10.5 } else { 0.0 },
                if i % 2 == 1 { (i as f64) * 3.25 } else { 0.0 },
                1000.0 + i as f64,
            )
        })
        .collect()
}
