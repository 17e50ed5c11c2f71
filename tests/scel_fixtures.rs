use std::fs;
use std::path::Path;

use scel2pyim::builder::{BuilderConfig, PyimBuilder, PyimMerger, PYIM_BANNER};
use scel2pyim::readers::ScelReader;
use scel2pyim::readers::scel_reader::{PHONETIC_TABLE_OFFSET, RECORD_STREAM_OFFSET, SCEL_MAGIC, SUB_MAGIC, SUB_MAGIC_OFFSET};
use scel2pyim::storage::{PHONETIC_TABLE_SLOTS, WordOrder};
use scel2pyim::ScelError;

/// Minimal scel writer: header, phonetic table and record stream.
struct ScelFixture {
    data: Vec<u8>,
}

impl ScelFixture {
    fn new(syllables: &[(u16, &str)]) -> Self {
        let mut fixture = Self { data: vec![0u8; PHONETIC_TABLE_OFFSET as usize] };
        fixture.data[..SCEL_MAGIC.len()].copy_from_slice(&SCEL_MAGIC);
        fixture.data[SUB_MAGIC_OFFSET..SUB_MAGIC_OFFSET + SUB_MAGIC.len()].copy_from_slice(&SUB_MAGIC);

        let used: Vec<u16> = syllables.iter().map(|(index, _)| *index).collect();
        for &(index, syllable) in syllables {
            fixture.u16(index);
            fixture.text(syllable);
        }
        // Pad the table to its fixed entry count with empty, unused slots.
        let mut filler = (0..PHONETIC_TABLE_SLOTS as u16).filter(|i| !used.contains(i));
        for _ in syllables.len()..PHONETIC_TABLE_SLOTS {
            let index = filler.next().unwrap();
            fixture.u16(index);
            fixture.u16(0);
        }
        fixture.data.resize(RECORD_STREAM_OFFSET as usize, 0);
        fixture
    }

    fn u16(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    fn text(&mut self, text: &str) {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.u16((units.len() * 2) as u16);
        for unit in units {
            self.u16(unit);
        }
    }

    fn record(mut self, codes: &[u16], words: &[&str]) -> Self {
        self.u16(words.len() as u16);
        self.u16((codes.len() * 2) as u16);
        for &code in codes {
            self.u16(code);
        }
        for word in words {
            self.text(word);
            self.u16(4);
            self.data.extend_from_slice(&[1, 0, 0, 0]);
        }
        self
    }
}

fn decode(data: &[u8]) -> scel2pyim::Result<String> {
    let mut out = Vec::new();
    ScelReader::new(data)?.write_pyim(&mut out, WordOrder::Reversed)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn decodes_ni_hao() {
    let fixture = ScelFixture::new(&[(0, "ni"), (1, "hao")]).record(&[0, 1], &["你好"]);
    assert_eq!(decode(&fixture.data).unwrap(), "ni-hao 你好\n");
}

#[test]
fn rejects_any_wrong_magic_byte() {
    let fixture = ScelFixture::new(&[(0, "ni"), (1, "hao")]).record(&[0, 1], &["你好"]);
    for i in 0..SCEL_MAGIC.len() {
        let mut data = fixture.data.clone();
        data[i] ^= 0xff;
        assert!(matches!(decode(&data), Err(ScelError::InvalidFormat { .. })), "byte {}", i);
    }
    assert!(matches!(decode(&fixture.data[..100]), Err(ScelError::InvalidFormat { .. })));
}

#[test]
fn sparse_table_indices() {
    let fixture = ScelFixture::new(&[(300, "zhong"), (7, "guo")])
        .record(&[300, 7], &["中国"])
        .record(&[7], &["国"]);
    assert_eq!(decode(&fixture.data).unwrap(), "zhong-guo 中国\nguo 国\n");
}

#[test]
fn control_units_are_stripped_from_words() {
    let mut fixture = ScelFixture::new(&[(0, "a")]);
    fixture.u16(1);
    fixture.u16(2);
    fixture.u16(0);
    // Word: 啊, 0x0009, 啊
    fixture.u16(6);
    for unit in [0x554a, 0x0009, 0x554a] {
        fixture.u16(unit);
    }
    fixture.u16(0);
    assert_eq!(decode(&fixture.data).unwrap(), "a 啊啊\n");
}

#[test]
fn decode_then_merge() {
    let first = ScelFixture::new(&[(0, "ni"), (1, "hao"), (2, "a")])
        .record(&[0, 1], &["你好"])
        .record(&[2], &["啊"]);
    let second = ScelFixture::new(&[(0, "ni"), (1, "hao"), (2, "a")])
        .record(&[0, 1], &["你好"])
        .record(&[0], &["你", "尼"]);

    let mut text = format!("{}\n", PYIM_BANNER);
    text.push_str(&decode(&first.data).unwrap());
    text.push_str(&decode(&second.data).unwrap());

    let merged = PyimMerger::default().merge(&text);
    // "ni 尼 你" carries two words and is rejected as a whole.
    assert_eq!(merged.to_text(), format!("{}\na 啊\nni-hao 你好\n", PYIM_BANNER));
    assert_eq!(merged.report.rejected_targets, 1);
}

fn write(path: &Path, data: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, data).unwrap();
}

#[test]
fn builds_pyim_from_directory_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cells");
    write(
        &input.join("b.scel"),
        &ScelFixture::new(&[(0, "ab"), (1, "b")]).record(&[0, 1], &["甲"]).data,
    );
    write(
        &input.join("deep/a.scel"),
        &ScelFixture::new(&[(0, "a"), (1, "bb")]).record(&[0, 1], &["乙"]).record(&[0], &["丙"]).data,
    );
    // Corrupt after the first record.
    write(
        &input.join("c.scel"),
        &ScelFixture::new(&[(0, "a")]).record(&[0], &["丙"]).record(&[0, 999], &["丁"]).data,
    );

    let output = dir.path().join("out.pyim");
    let config = BuilderConfig {
        input_path: input.to_string_lossy().into_owned(),
        output_file: output.to_string_lossy().into_owned(),
        ..Default::default()
    };
    let report = PyimBuilder::build_with_config(&config, None).unwrap();
    assert_eq!(report.files_found, 3);
    assert_eq!(report.files_converted, 2);
    assert_eq!(report.files_truncated, 1);
    assert_eq!(report.decoded_lines, 4);

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, format!("{}\na 丙\na-bb 乙\nab-b 甲\n", PYIM_BANNER));
}
