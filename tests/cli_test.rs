#![cfg(feature = "cli")]
//! Integration tests for the `pxdb` subcommands.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

use pxdb::cli::app::RowFormat;
use pxdb::paradox::constants::*;
use pxdb::paradox::table::DecodeOptions;
use pxdb::PxError;

const BS: usize = 0x800;

/// Two-field table (`ID` long, `NAME` alpha 6) with 10-byte records,
/// one block of two rows and one sentinel block.
fn build_people_table() -> Vec<u8> {
    let mut data = vec![0u8; 3 * BS];
    LittleEndian::write_u16(&mut data[PX_RECORD_SIZE..], 10);
    LittleEndian::write_u16(&mut data[PX_HEADER_SIZE..], BS as u16);
    LittleEndian::write_u16(&mut data[PX_NUM_FIELDS..], 2);
    data[PX_FIELD_INFO..PX_FIELD_INFO + 4].copy_from_slice(&[0x04, 4, 0x01, 6]);
    let names_at = PX_FIELD_INFO + 4 + SIZE_PX_TABLE_NAME_PTR + 2 * SIZE_PX_FIELD_NAME_PTR
        + SIZE_PX_TABLE_NAME;
    data[names_at..names_at + 8].copy_from_slice(b"ID\0NAME\0");

    // Block 1: two records
    LittleEndian::write_u16(&mut data[BS + PX_BLOCK_NEXT..], 2);
    LittleEndian::write_u16(&mut data[BS + PX_BLOCK_ADD_SIZE..], 10);
    let rec = BS + SIZE_PX_BLOCK_HEAD;
    BigEndian::write_u32(&mut data[rec..], 0x8000_0001);
    data[rec + 4..rec + 8].copy_from_slice(b"Anna");
    BigEndian::write_u32(&mut data[rec + 10..], 0x8000_0002);
    data[rec + 14..rec + 19].copy_from_slice(b"Bo,ya");

    // Block 2: sentinel
    LittleEndian::write_u16(&mut data[2 * BS + PX_BLOCK_ADD_SIZE..], 0xFFFF);
    data
}

fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("create temp file");
    tmp.write_all(data).expect("write temp file");
    tmp.flush().expect("flush");
    tmp
}

fn path_str(p: &Path) -> String {
    p.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// info
// ---------------------------------------------------------------------------

#[test]
fn test_info_text() {
    let tmp = write_temp(&build_people_table());
    let mut output = Vec::new();
    pxdb::cli::info::execute(
        &pxdb::cli::info::InfoOptions {
            file: path_str(tmp.path()),
            json: false,
        },
        &mut output,
    )
    .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Record size:   10"));
    assert!(text.contains("NAME"));
    assert!(text.contains("ALPHA"));
    assert!(text.contains("LONG"));
    assert!(text.contains("Fixed-width text"));
    assert!(text.contains("Rows:          2"));
}

#[test]
fn test_info_json() {
    let tmp = write_temp(&build_people_table());
    let mut output = Vec::new();
    pxdb::cli::info::execute(
        &pxdb::cli::info::InfoOptions {
            file: path_str(tmp.path()),
            json: true,
        },
        &mut output,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["header"]["record_size"], 10);
    assert_eq!(json["header"]["header_size"], BS);
    assert_eq!(json["fields"][1]["name"], "NAME");
    assert_eq!(json["fields"][1]["type_code"], 1);
    assert_eq!(json["summary"]["rows"], 2);
    assert_eq!(json["summary"]["skipped_blocks"], 1);
}

#[test]
fn test_info_truncated_file() {
    let tmp = write_temp(&[0u8; 16]);
    let mut output = Vec::new();
    let result = pxdb::cli::info::execute(
        &pxdb::cli::info::InfoOptions {
            file: path_str(tmp.path()),
            json: false,
        },
        &mut output,
    );
    assert!(matches!(result, Err(PxError::TruncatedHeader { .. })));
}

// ---------------------------------------------------------------------------
// rows
// ---------------------------------------------------------------------------

fn run_rows(format: RowFormat, limit: Option<u64>) -> String {
    let tmp = write_temp(&build_people_table());
    let mut output = Vec::new();
    pxdb::cli::rows::execute(
        &pxdb::cli::rows::RowsOptions {
            file: path_str(tmp.path()),
            decode: DecodeOptions::default(),
            format,
            limit,
        },
        &mut output,
    )
    .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_rows_csv() {
    let text = run_rows(RowFormat::Csv, None);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["ID,NAME", "1,Anna", "2,\"Bo,ya\""]);
}

#[test]
fn test_rows_text_with_limit() {
    let text = run_rows(RowFormat::Text, Some(1));
    assert!(text.contains("1 | Anna"));
    assert!(!text.contains("Bo,ya"));
    assert!(text.contains("1 of 2 rows from 2 blocks (1 skipped)"));
}

#[test]
fn test_rows_json() {
    let text = run_rows(RowFormat::Json, None);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["fields"], serde_json::json!(["ID", "NAME"]));
    assert_eq!(json["rows"], serde_json::json!([[1, "Anna"], [2, "Bo,ya"]]));
}

// ---------------------------------------------------------------------------
// blocks
// ---------------------------------------------------------------------------

#[test]
fn test_blocks_json() {
    let tmp = write_temp(&build_people_table());
    let mut output = Vec::new();
    pxdb::cli::blocks::execute(
        &pxdb::cli::blocks::BlocksOptions {
            file: path_str(tmp.path()),
            json: true,
        },
        &mut output,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["index"], 1);
    assert_eq!(blocks[0]["offset"], BS);
    assert_eq!(blocks[0]["next_block"], 2);
    assert_eq!(blocks[0]["num_recs"], 2);
    assert_eq!(blocks[0]["skipped"], false);
    assert_eq!(blocks[1]["skipped"], true);
    assert_eq!(blocks[1]["num_recs"], 0);
}

#[test]
fn test_blocks_text() {
    let tmp = write_temp(&build_people_table());
    let mut output = Vec::new();
    pxdb::cli::blocks::execute(
        &pxdb::cli::blocks::BlocksOptions {
            file: path_str(tmp.path()),
            json: false,
        },
        &mut output,
    )
    .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("2 blocks of 2048 bytes"));
    assert!(text.contains("0x800"));
    assert!(text.contains("skipped"));
    // Sentinel add_size shown in hex
    assert!(text.contains("0xffff"));
}

// ---------------------------------------------------------------------------
// dump
// ---------------------------------------------------------------------------

fn run_dump(
    block: Option<u64>,
    offset: Option<u64>,
    length: Option<usize>,
    raw: bool,
) -> Result<Vec<u8>, PxError> {
    let tmp = write_temp(&build_people_table());
    let mut output = Vec::new();
    pxdb::cli::dump::execute(
        &pxdb::cli::dump::DumpOptions {
            file: path_str(tmp.path()),
            block,
            offset,
            length,
            raw,
            encoding: None,
        },
        &mut output,
    )?;
    Ok(output)
}

#[test]
fn test_dump_block() {
    let text = String::from_utf8(run_dump(Some(1), None, Some(32), false).unwrap()).unwrap();
    assert!(text.contains("block 1 (32 bytes)"));
    assert!(text.contains("00000800  02 00 00 00 0a 00 80 00"));
    assert!(text.contains("Anna"));
}

#[test]
fn test_dump_raw_offset() {
    let raw = run_dump(None, Some((BS + SIZE_PX_BLOCK_HEAD + 4) as u64), Some(4), true).unwrap();
    assert_eq!(raw, b"Anna");
}

#[test]
fn test_dump_past_end() {
    let result = run_dump(Some(9), None, None, false);
    assert!(matches!(result, Err(PxError::Argument(_))));
}

#[test]
fn test_dump_block_offset_overflow() {
    match run_dump(Some(1 << 53), None, None, false) {
        Err(PxError::Argument(msg)) => {
            assert!(msg.contains("block 9007199254740992 starts beyond file size"))
        }
        other => panic!("Expected Argument error, got {:?}", other.map(|v| v.len())),
    }
    match run_dump(Some(u64::MAX), None, None, true) {
        Err(PxError::Argument(_)) => {}
        other => panic!("Expected Argument error, got {:?}", other.map(|v| v.len())),
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

#[test]
fn test_find_lists_tables() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("people.DB"), build_people_table()).unwrap();
    std::fs::write(dir.path().join("broken.db"), [0u8; 8]).unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"text").unwrap();

    let mut output = Vec::new();
    pxdb::cli::find::execute(
        &pxdb::cli::find::FindOptions {
            dir: dir.path().to_path_buf(),
            json: true,
        },
        &mut output,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["file"], "broken.db");
    assert!(tables[0]["error"].as_str().unwrap().contains("Truncated header"));
    assert_eq!(tables[1]["file"], "people.DB");
    assert_eq!(tables[1]["fields"], 2);
    assert_eq!(tables[1]["rows"], 2);
}

#[test]
fn test_find_missing_dir() {
    let mut output = Vec::new();
    let result = pxdb::cli::find::execute(
        &pxdb::cli::find::FindOptions {
            dir: Path::new("/nonexistent/orion").to_path_buf(),
            json: false,
        },
        &mut output,
    );
    assert!(matches!(result, Err(PxError::Argument(_))));
}

// ---------------------------------------------------------------------------
// last-seen
// ---------------------------------------------------------------------------

#[test]
fn test_last_seen_missing_tables() {
    let dir = TempDir::new().unwrap();
    let mut output = Vec::new();
    let result = pxdb::cli::last_seen::execute(
        &pxdb::cli::last_seen::LastSeenOptions {
            dir: dir.path().to_path_buf(),
            decode: DecodeOptions::default(),
            event_code: 28,
            pretty: false,
        },
        &mut output,
    );
    match result {
        Err(PxError::Io(msg)) => assert!(msg.contains("pList.DB")),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert!(output.is_empty());
}
