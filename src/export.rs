//! Export helpers for writing job results to CSV and plain text files.
//!
//! - `save_cracked_csv` writes `Hash,Plain` rows for every cracked record.
//! - `save_left_txt` writes one uncracked entry per line.
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use csv::Writer;

use crate::pot::CrackedEntry;

pub fn save_cracked_csv<P: AsRef<Path>>(records: &[CrackedEntry], path: P) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    if records.is_empty() {
        wtr.write_record(["Hash", "Plain"])?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_left_txt<P: AsRef<Path>>(left: &[String], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    for entry in left {
        writeln!(f, "{}", entry)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pot::parse_records;
    use tempfile::tempdir;

    #[test]
    fn writes_csv_and_txt() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("cracked.csv");
        let txt_path = dir.path().join("left.txt");
        let records = parse_records(&["aaaa:pw", "bbbb:x,y"]);
        save_cracked_csv(&records, &csv_path).unwrap();
        save_left_txt(&["cccc".to_string()], &txt_path).unwrap();
        let csv_content = std::fs::read_to_string(csv_path).unwrap();
        let txt_content = std::fs::read_to_string(txt_path).unwrap();
        assert_eq!(csv_content, "Hash,Plain\naaaa,pw\nbbbb,\"x,y\"\n");
        assert_eq!(txt_content, "cccc\n");
    }

    #[test]
    fn empty_csv_still_has_header() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("cracked.csv");
        save_cracked_csv(&[], &csv_path).unwrap();
        assert_eq!(std::fs::read_to_string(csv_path).unwrap(), "Hash,Plain\n");
    }
}
