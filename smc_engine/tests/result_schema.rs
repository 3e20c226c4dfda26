mod common;
use common::ts;

use smc_engine::{
    AnalysisResult, BreakCategory, Direction, OrderBlock, RenderHints, StructureBreak,
    SwingKind, SwingLabel, SwingPoint, Timeframe,
};

fn sample() -> AnalysisResult {
    AnalysisResult {
        symbol: "EURUSD".to_string(),
        timeframe: Timeframe::H1,
        generated_at: ts(12),
        swings: vec![
            SwingPoint {
                kind: SwingKind::High,
                label: SwingLabel::Unclassified,
                price: 1.0875,
                time: ts(2),
                bar_index: 2,
            },
            SwingPoint {
                kind: SwingKind::Low,
                label: SwingLabel::HL,
                price: 1.0812,
                time: ts(5),
                bar_index: 5,
            },
        ],
        bos: vec![StructureBreak {
            category: BreakCategory::BOS,
            direction: Direction::Bull,
            level: 1.0875,
            start_time: ts(2),
            start_bar_index: 2,
            break_time: ts(7),
            break_bar_index: 7,
        }],
        choch: vec![StructureBreak {
            category: BreakCategory::CHoCH,
            direction: Direction::Bear,
            level: 1.0812,
            start_time: ts(5),
            start_bar_index: 5,
            break_time: ts(9),
            break_bar_index: 9,
        }],
        order_blocks: vec![OrderBlock {
            direction: Direction::Bear,
            open: 1.0841,
            high: 1.0856,
            low: 1.0833,
            close: 1.0849,
            time: ts(8),
            bar_index: 8,
            source_category: BreakCategory::CHoCH,
        }],
        config: RenderHints::default(),
    }
}

#[test]
fn analysis_result_schema() {
    let result = sample();
    insta::assert_json_snapshot!("analysis_result", result);
}

#[test]
fn enum_spellings_are_stable() {
    let value = serde_json::to_value(sample()).unwrap();

    assert_eq!(value["timeframe"], "H1");
    assert_eq!(value["generated_at"], "2024-01-01T12:00:00Z");
    assert_eq!(value["swings"][0]["kind"], "high");
    assert_eq!(value["swings"][0]["label"], "unclassified");
    assert_eq!(value["swings"][1]["label"], "HL");
    assert_eq!(value["bos"][0]["category"], "BOS");
    assert_eq!(value["bos"][0]["direction"], "bull");
    assert_eq!(value["choch"][0]["category"], "CHoCH");
    assert_eq!(value["order_blocks"][0]["source_category"], "CHoCH");
    assert_eq!(value["config"]["line_style"], "STYLE_SOLID");
}

#[test]
fn render_hints_fill_missing_fields_and_reject_unknown() {
    let hints: RenderHints = serde_json::from_str(r#"{"bos_color":"clrGold"}"#).unwrap();
    assert_eq!(hints.bos_color, "clrGold");
    assert_eq!(hints.choch_color, RenderHints::default().choch_color);

    assert!(serde_json::from_str::<RenderHints>(r#"{"colour":"red"}"#).is_err());
}

#[test]
fn result_reads_back_from_json() {
    let json = serde_json::to_string_pretty(&sample()).unwrap();
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn unknown_timeframe_is_rejected_on_read() {
    let mut value = serde_json::to_value(sample()).unwrap();
    value["timeframe"] = serde_json::Value::from("X7");
    assert!(serde_json::from_value::<AnalysisResult>(value).is_err());
}
