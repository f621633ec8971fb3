use ledgerline_core::{
    Extraction, HEADER_LINE, canonicalize, extract, normalize, read_canonical, scan,
};

const SCENARIO_A: &str =
    "15-Jan-2024 15-Jan-2024 'TRF0001 5,000.00 120,500.00 Lagos Branch TRANSFER to Jane Doe";

/// Shaped like a real pdf-to-text dump: padded columns, wrapped remarks,
/// a title block and page furniture.
const STATEMENT: &str = r#"
                         CUSTOMER STATEMENT
      ADAEZE   OKONKWO
      Statement Period :   01-Jan-2024 to 31-Jan-2024

Trans. Date   Value Date    Reference     Debits      Credits       Balance      Originating Branch    Remarks
02-Jan-2024   02-Jan-2024   'NIP00981                 250,000.00    250,000.00   Ikeja                 NIP TRANSFER FROM
                                                                                                       TUNDE BAKARE
05-Jan-2024   05-Jan-2024   'POS11         1,000.00                 249,000.00   Victoria Island       POS PURCHASE SHOPRITE
05-Jan-2024   05-Jan-2024   'FEE7          10.75                    248,989.25                         SMS ALERT CHARGES
31-Jan-2024   31-Jan-2024   'INT31                                  248,989.25   Head Office           INTEREST CREDIT
"#;

#[test]
fn test_scenario_a_happy_path() {
    let out = canonicalize(SCENARIO_A);
    assert_eq!(
        out,
        format!(
            "{HEADER_LINE}\n15-Jan-2024|15-Jan-2024|'TRF0001|5,000.00||120,500.00|Lagos Branch|TRANSFER to Jane Doe"
        )
    );
}

#[test]
fn test_scenario_b_no_match() {
    let input = "Hello, this is not a statement.";
    let out = canonicalize(input);
    assert_eq!(out, normalize(input).as_str());
    assert!(!out.contains(HEADER_LINE));
}

#[test]
fn test_scenario_c_metadata_without_rows_falls_back() {
    let input = "CUSTOMER STATEMENT\n  JOHN DOE\n Statement Period: 01-Jan-2024 to 31-Jan-2024\n\nNo transactions this period.";
    let e = extract(input);

    // The customer block is still reported on the tagged result...
    let h = e.header().expect("customer block");
    assert_eq!(h.name, "JOHN DOE");
    assert_eq!(h.period, "01-Jan-2024 to 31-Jan-2024");

    // ...but the rendered output is the normalized text, untouched.
    let out = e.render();
    assert_eq!(out, normalize(input).as_str());
    assert!(!out.contains(HEADER_LINE));
    assert!(!out.contains("Customer Name: "));
    assert!(out.contains("JOHN DOE"));
}

#[test]
fn test_realistic_statement() {
    let e = extract(STATEMENT);
    let h = e.header().unwrap();
    assert_eq!(h.name, "ADAEZE OKONKWO");
    assert_eq!(h.period, "01-Jan-2024 to 31-Jan-2024");

    let out = e.render();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Customer Name: ADAEZE OKONKWO",
            "Statement Period: 01-Jan-2024 to 31-Jan-2024",
            "",
            HEADER_LINE,
            "02-Jan-2024|02-Jan-2024|'NIP00981|250,000.00||250,000.00|Ikeja|NIP TRANSFER FROM TUNDE BAKARE",
            "05-Jan-2024|05-Jan-2024|'POS11|1,000.00||249,000.00|Victoria Island|POS PURCHASE SHOPRITE",
            "05-Jan-2024|05-Jan-2024|'FEE7|10.75||248,989.25||SMS ALERT CHARGES",
            "31-Jan-2024|31-Jan-2024|'INT31|||248,989.25|Head Office|INTEREST CREDIT",
        ]
    );
}

#[test]
fn test_conservation_rows_equal_matches() {
    let inputs = [SCENARIO_A, STATEMENT, "nothing", ""];
    for input in inputs {
        let matches = scan(&normalize(input)).len();
        let out = canonicalize(input);
        let rows = if out.contains(HEADER_LINE) {
            out.lines().skip_while(|l| *l != HEADER_LINE).skip(1).count()
        } else {
            0
        };
        assert_eq!(rows, matches, "row count mismatch for {input:?}");
    }
}

#[test]
fn test_column_count_invariant() {
    let out = canonicalize(STATEMENT);
    for row in out.lines().skip_while(|l| *l != HEADER_LINE).skip(1) {
        assert_eq!(row.matches('|').count(), 7, "bad row {row:?}");
    }
}

#[test]
fn test_literal_amounts_preserved() {
    let input = "01-Feb-2024 01-Feb-2024 'R1 1,000.00 1000.00 1,234,567.89 Yaba FEE";
    let e = extract(input);
    let r = &e.records()[0];
    assert_eq!(r.debit_amount.as_deref(), Some("1,000.00"));
    assert_eq!(r.credit_amount.as_deref(), Some("1000.00"));
    assert_eq!(r.balance, "1,234,567.89");
    assert!(e.render().contains("|1,000.00|1000.00|1,234,567.89|"));
}

#[test]
fn test_extraction_not_gated_on_title_block() {
    // No "customer statement" or column header anywhere.
    let e = extract(SCENARIO_A);
    assert!(e.is_structured());
    assert!(e.header().is_none());
}

#[test]
fn test_fallback_for_non_statement_text() {
    let inputs = [
        "",
        "   ",
        "Dear customer,\n\n  your card   has shipped.",
        "15-Jan-2024 15-Jan-2024 TRF0001 5,000.00 Lagos TRANSFER",
        "15-Jan-2024 'TRF0001 5,000.00 Lagos TRANSFER",
    ];
    for input in inputs {
        let e = extract(input);
        assert!(matches!(e, Extraction::Unrecognized { .. }), "{input:?}");
        assert_eq!(e.render(), normalize(input).as_str());
    }
}

#[test]
fn test_canonical_output_reads_back() {
    for input in [STATEMENT, SCENARIO_A, "Hello, this is not a statement."] {
        let e = extract(input);
        let back = read_canonical(&e.render()).unwrap();
        assert_eq!(back, e);
    }
}

#[test]
fn test_concurrent_calls_agree() {
    let expected = canonicalize(STATEMENT);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| canonicalize(STATEMENT))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_json_shape() {
    let json = serde_json::to_value(extract(SCENARIO_A)).unwrap();
    assert_eq!(json["kind"], "structured");
    assert_eq!(json["records"][0]["debit_amount"], "5,000.00");
    assert!(json["records"][0]["credit_amount"].is_null());
    assert!(json["header"].is_null());
}
