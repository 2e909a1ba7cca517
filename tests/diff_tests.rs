use scorefold::{ConditionalIgnore, DiffConfig, DiffEngine, Error, MultisetGroup};
use std::fs;
use tempfile::tempdir;

const HEADER: &str = "GAME_ID,INN_CT,BAT_ID,EVENT_TX,EVENT_CD,PR_RUN1_FL,BASE1_RUN_ID,RUN1_RESP_PIT_ID,PO1_FLD_CD,PO2_FLD_CD,ASS1_FLD_CD,ASS2_FLD_CD";

fn table(rows: &[&str]) -> String {
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

fn compare(left: &[&str], right: &[&str]) -> scorefold::Result<scorefold::DiffReport> {
    DiffEngine::default().compare_readers(table(left).as_bytes(), table(right).as_bytes())
}

#[test]
fn test_identical_tables_are_clean() {
    let rows = [
        "G1,1,smitj001,K,3,F,,,2,,,",
        "G1,1,jonea001,63,2,F,,,3,,6,",
    ];
    let report = compare(&rows, &rows).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.rows_compared, 2);
    assert_eq!(report.to_string(), "no differences in 2 rows\n");
}

#[test]
fn test_plain_column_difference() {
    let report = compare(
        &["G1,1,smitj001,S7,20,F,,,0,,,"],
        &["G1,1,smitj001,S7,21,F,,,0,,,"],
    )
    .unwrap();
    assert_eq!(report.differences(), 1);
    let block = report.block("EVENT_CD").unwrap();
    assert_eq!(block.rows[0].row, 0);
    assert_eq!(block.rows[0].context, "G1 1 smitj001 S7");
    assert_eq!((block.rows[0].left.as_str(), block.rows[0].right.as_str()), ("20", "21"));
    assert_eq!(
        report.to_string(),
        "EVENT_CD (1 rows)\n  G1 1 smitj001 S7: reference '20' / candidate '21'\n"
    );
}

#[test]
fn test_fielder_order_is_not_a_difference() {
    let report = compare(
        &["G1,3,smitj001,DP,2,F,,,3,6,6,4"],
        &["G1,3,smitj001,DP,2,F,,,6,3,4,6"],
    )
    .unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_different_fielders_are_flagged_as_a_group() {
    let report = compare(
        &["G1,3,smitj001,DP,2,F,,,3,6,,"],
        &["G1,3,smitj001,DP,2,F,,,3,4,,"],
    )
    .unwrap();
    let block = report.block("PO_FLD_CD").unwrap();
    assert_eq!(block.rows.len(), 1);
    assert_eq!((block.rows[0].left.as_str(), block.rows[0].right.as_str()), ("3,6", "3,4"));
    assert!(report.block("PO2_FLD_CD").is_none());
}

#[test]
fn test_zero_fielder_code_counts_as_blank() {
    let report = compare(
        &["G1,1,smitj001,K,3,F,,,2,0,0,"],
        &["G1,1,smitj001,K,3,F,,,2,,,"],
    )
    .unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_pinch_runner_flags_are_ignored() {
    let report = compare(
        &["G1,7,smitj001,S8,20,T,pinch001,pitcA001,,,,"],
        &["G1,7,smitj001,S8,20,F,pinch001,pitcA001,,,,"],
    )
    .unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_responsible_pitcher_ignored_only_with_empty_base() {
    // Nobody on first in either row: the pitcher column does not matter.
    let report = compare(
        &["G1,2,smitj001,K,3,F,,pitcA001,2,,,"],
        &["G1,2,smitj001,K,3,F,,,2,,,"],
    )
    .unwrap();
    assert!(report.is_clean());

    // A runner on first makes it count.
    let report = compare(
        &["G1,2,smitj001,K,3,F,runr001,pitcA001,2,,,"],
        &["G1,2,smitj001,K,3,F,runr001,pitcB001,2,,,"],
    )
    .unwrap();
    let block = report.block("RUN1_RESP_PIT_ID").unwrap();
    assert_eq!(block.rows[0].right, "pitcB001");
}

#[test]
fn test_whitespace_is_trimmed() {
    let report = compare(
        &["G1,1,smitj001,K,3 ,F,,,2,,,"],
        &["G1,1,smitj001,K, 3,F,,,2,,,"],
    )
    .unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_blocks_sorted_by_column() {
    let report = compare(
        &[
            "G1,1,smitj001,K,3,F,,,2,,,",
            "G1,1,jonea001,63,2,F,,,3,,6,",
        ],
        &[
            "G1,2,smitj001,K,3,F,,,2,,,",
            "G1,1,jonea001,53,2,F,,,3,,5,",
        ],
    )
    .unwrap();
    let columns: Vec<&str> = report.blocks.iter().map(|b| b.column.as_str()).collect();
    assert_eq!(columns, ["ASS_FLD_CD", "EVENT_TX", "INN_CT"]);
    assert_eq!(report.block("EVENT_TX").unwrap().rows[0].row, 1);
    assert_eq!(report.differences(), 3);
}

#[test]
fn test_header_mismatch_is_an_error() {
    let engine = DiffEngine::default();
    let result = engine.compare_readers(
        "GAME_ID,EVENT_CD\nG1,3\n".as_bytes(),
        "GAME_ID,EVENT_TX\nG1,K\n".as_bytes(),
    );
    assert!(matches!(result, Err(Error::ShapeMismatch(_))));
}

#[test]
fn test_row_count_mismatch_is_an_error() {
    let result = compare(
        &["G1,1,smitj001,K,3,F,,,2,,,"],
        &["G1,1,smitj001,K,3,F,,,2,,,", "G1,1,jonea001,K,3,F,,,2,,,"],
    );
    match result {
        Err(Error::ShapeMismatch(message)) => {
            assert_eq!(message, "reference has 1 rows, candidate has 2")
        }
        other => panic!("expected a shape mismatch, got {other:?}"),
    }
}

#[test]
fn test_compare_paths() {
    let dir = tempdir().unwrap();
    let left = dir.path().join("left.csv");
    let right = dir.path().join("right.csv");
    fs::write(&left, table(&["G1,1,smitj001,K,3,F,,,2,,,"])).unwrap();
    fs::write(&right, table(&["G1,1,smitj001,K,3,F,,,2,,,"])).unwrap();

    let report = DiffEngine::default().compare_paths(&left, &right).unwrap();
    assert!(report.is_clean());

    let missing = DiffEngine::default().compare_paths(&left, dir.path().join("none.csv"));
    assert!(missing.is_err());
}

#[test]
fn test_config_from_json() {
    let config: DiffConfig = serde_json::from_str(
        r#"{
            "left_label": "old",
            "right_label": "new",
            "ignore": ["EVENT_TX"],
            "ignore_unless": [{"column": "RUN1_RESP_PIT_ID", "unless": "BASE1_RUN_ID"}],
            "multisets": [{"name": "FIELDERS", "columns": ["PO1_FLD_CD", "PO2_FLD_CD", "ASS1_FLD_CD", "ASS2_FLD_CD"]}],
            "context": ["BAT_ID"]
        }"#,
    )
    .unwrap();
    assert_eq!(
        config.ignore_unless,
        [ConditionalIgnore {
            column: "RUN1_RESP_PIT_ID".to_string(),
            unless: "BASE1_RUN_ID".to_string(),
        }]
    );
    assert_eq!(config.multisets[0], MultisetGroup {
        name: "FIELDERS".to_string(),
        columns: vec![
            "PO1_FLD_CD".to_string(),
            "PO2_FLD_CD".to_string(),
            "ASS1_FLD_CD".to_string(),
            "ASS2_FLD_CD".to_string(),
        ],
    });

    let engine = DiffEngine::new(config);
    let left = table(&["G1,1,smitj001,63,2,T,,,3,,6,"]);
    let right = table(&["G1,1,smitj001,6-3,2,F,,,6,,3,"]);
    let report = engine.compare_readers(left.as_bytes(), right.as_bytes()).unwrap();
    // The pinch-runner flag is compared: this config does not ignore it.
    let columns: Vec<&str> = report.blocks.iter().map(|b| b.column.as_str()).collect();
    assert_eq!(columns, ["PR_RUN1_FL"]);
    assert_eq!(
        report.to_string(),
        "PR_RUN1_FL (1 rows)\n  smitj001: old 'T' / new 'F'\n"
    );
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: DiffConfig = serde_json::from_str(r#"{"right_label": "rewrite"}"#).unwrap();
    assert_eq!(config.left_label, "reference");
    assert_eq!(config.right_label, "rewrite");
    assert_eq!(config.multisets, DiffConfig::default().multisets);
}
