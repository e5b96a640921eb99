use std::io::Write;

use drill_core::model::Field;
use storage::{DatasetError, LoadOptions, load};
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

const WORDS: &str = "\
# greetings
你好,ni3 hao3,hello; hi
谢谢,xie4 xie4,thank you
# numbers
一,yi1,one
〇,ling2,zero
再见。,zai4 jian4 ::,goodbye
";

#[test]
fn csv_file_loads_every_non_comment_line() {
    let file = write_temp(".csv", WORDS);
    let records = load(file.path(), &LoadOptions::default()).expect("load");

    assert_eq!(records.len(), 5);
    let phrases: Vec<_> = records.iter().map(|r| r.phrase()).collect();
    assert_eq!(phrases, vec!["你好", "谢谢", "一", "〇", "再见。"]);

    let mut unique = phrases.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), phrases.len());
}

#[test]
fn json_file_is_dispatched_by_extension() {
    let file = write_temp(
        ".json",
        r#"[{"chinese": "你好", "pinyin": "ni3 hao3", "english": "hello"}]"#,
    );
    let records = load(file.path(), &LoadOptions::default()).expect("load");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].phonetic(), "ni3 hao3");
}

#[test]
fn missing_file_is_source_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = load(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DatasetError::SourceNotFound { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn latin_phrase_is_invalid_alphabet() {
    let file = write_temp(".csv", "你好,ni3 hao3,hello\nhi,hai1,hello\n");
    let err = load(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::InvalidAlphabet {
            line: 2,
            field: Field::Phrase,
            ch: 'h',
        }
    ));
}

#[test]
fn uppercase_phonetic_is_invalid_alphabet() {
    let file = write_temp(".csv", "你好,Ni3 hao3,hello\n");
    let err = load(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::InvalidAlphabet {
            field: Field::Phonetic,
            ch: 'N',
            ..
        }
    ));
}

#[test]
fn repeated_phrase_is_duplicate_key() {
    let file = write_temp(".csv", "你好,ni3 hao3,hello\n你好,ni3 hao3,hi\n");
    let err = load(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateKey { .. }));
}
