//! Roster loader.
//!
//! Reads the whole comma-separated roster into [`StudentRecord`]s. The first
//! row is the header and is dropped without being checked; every other row
//! must carry exactly [`COLUMN_COUNT`](crate::models::COLUMN_COUNT) cells,
//! mapped by position.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{LoadError, LoadResult};
use crate::models::StudentRecord;

/// Parse a roster from any reader.
///
/// # Example
/// ```ignore
/// use roster_split::parse_csv;
///
/// let csv = "MATRIC_NUM,JAMB_NUM,...\nM1,J1,...";
/// let records = parse_csv(csv.as_bytes()).unwrap();
/// ```
pub fn parse_csv<R: Read>(mut reader: R) -> LoadResult<Vec<StudentRecord>> {
    let mut raw = Vec::new();
    reader
        .read_to_end(&mut raw)
        .map_err(|e| LoadError::Decode(e.into()))?;
    let content = trim_leading_space(&raw);

    // Header is treated as a plain row so that "header only" and "empty"
    // both land on the same row-count check.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let rows = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

    if rows.len() < 2 {
        return Err(LoadError::EmptyInput);
    }

    rows.iter()
        .enumerate()
        .skip(1)
        .map(|(idx, row)| to_record(row, idx + 1))
        .collect()
}

/// Parse a roster held in memory.
pub fn parse_str(content: &str) -> LoadResult<Vec<StudentRecord>> {
    parse_csv(content.as_bytes())
}

/// Open and parse a roster file.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> LoadResult<Vec<StudentRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(file)
}

/// Drop blanks at the start of every unquoted field, so that a quote
/// following `, ` still opens a quoted field.
fn trim_leading_space(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut field_start = true;
    let mut in_quotes = false;
    let mut bytes = raw.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        if in_quotes {
            out.push(b);
            if b == b'"' {
                if bytes.peek() == Some(&b'"') {
                    out.push(b'"');
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match b {
            b' ' | b'\t' | b'\x0B' | b'\x0C' if field_start => {}
            b'"' if field_start => {
                in_quotes = true;
                field_start = false;
                out.push(b);
            }
            b',' | b'\n' | b'\r' => {
                field_start = true;
                out.push(b);
            }
            _ => {
                field_start = false;
                out.push(b);
            }
        }
    }

    out
}

fn to_record(row: &StringRecord, line: usize) -> LoadResult<StudentRecord> {
    let fields = row
        .iter()
        .map(|cell| cell.trim_start().to_string())
        .collect();
    StudentRecord::from_fields(fields, line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "MATRIC_NUM,JAMB_NUM,SURNAME,FIRST_NAME,MIDDLE_NAME,STATE,LGA,ENTRY_MODE,SEX,DOB,EMAIL,MARITAL_STATUS,NEXT_OF_KIN,NEXT_OF_KIN_ADDRESS";

    fn line(matric: &str, state: &str) -> String {
        format!(
            "{},J-{},Okafor,Ada,N,{},Ikeja,UTME,F,2002-03-04,ada@example.com,Single,Mr Okafor,\"12 Allen Ave, Ikeja\"",
            matric, matric, state
        )
    }

    #[test]
    fn test_simple_roster() {
        let csv = format!("{}\n{}\n{}\n", HEADER, line("M1", "LAGOS"), line("M2", "OGUN"));
        let records = parse_str(&csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].matric_num(), "M1");
        assert_eq!(records[0].state(), "LAGOS");
        assert_eq!(records[1].state(), "OGUN");
        assert_eq!(records[0].next_of_kin_address(), "12 Allen Ave, Ikeja");
    }

    #[test]
    fn test_header_is_not_checked() {
        let csv = format!("whatever,the,header,says\n{}\n", line("M1", "KANO"));
        let records = parse_str(&csv).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_leading_whitespace_trimmed_trailing_kept() {
        let csv = format!(
            "{}\n  M7,J7,Bello,Sani,,   KANO ,Fagge,DE,M,1999,s@x.y,Married,Kin,Addr\n",
            HEADER
        );
        let records = parse_str(&csv).unwrap();

        assert_eq!(records[0].matric_num(), "M7");
        assert_eq!(records[0].state(), "KANO ");
        assert_eq!(records[0].middle_name(), "");
    }

    #[test]
    fn test_space_before_quoted_cell() {
        let csv = format!(
            "{}\nM1, J1, Okafor, Ada, N, LAGOS, Ikeja, UTME, F, 2002-03-04, ada@example.com, Single, Kin, \"12 Allen Ave, Ikeja\"\n",
            HEADER
        );
        let records = parse_str(&csv).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state(), "LAGOS");
        assert_eq!(records[0].next_of_kin(), "Kin");
        assert_eq!(records[0].next_of_kin_address(), "12 Allen Ave, Ikeja");
    }

    #[test]
    fn test_quoted_cell_keeps_inner_spaces_and_escapes() {
        let csv = format!(
            "{}\nM1,J1,S,F,M,OYO,L,E,S,D,E,MS,\"  Mr \"\"Tunde\"\" \",\t\" 5 Ring Rd,\nIbadan\"\n",
            HEADER
        );
        let records = parse_str(&csv).unwrap();

        assert_eq!(records[0].next_of_kin(), "Mr \"Tunde\" ");
        assert_eq!(records[0].next_of_kin_address(), "5 Ring Rd,\nIbadan");
    }

    #[test]
    fn test_trim_leading_space_only_at_field_start() {
        assert_eq!(trim_leading_space(b"  a b , c\n d"), b"a b ,c\nd".to_vec());
        assert_eq!(trim_leading_space(b"x, \" y, z\""), b"x,\" y, z\"".to_vec());
    }

    #[test]
    fn test_header_only_is_empty_input() {
        let err = parse_str(&format!("{}\n", HEADER)).unwrap_err();
        assert!(matches!(err, LoadError::EmptyInput));
    }

    #[test]
    fn test_empty_file_is_empty_input() {
        assert!(matches!(parse_str("").unwrap_err(), LoadError::EmptyInput));
    }

    #[test]
    fn test_short_row_names_row() {
        let csv = format!("{}\n{}\nM2,J2,Short,Row\n", HEADER, line("M1", "LAGOS"));
        match parse_str(&csv).unwrap_err() {
            LoadError::RowShape { row, found, expected } => {
                assert_eq!(row, 3);
                assert_eq!(found, 4);
                assert_eq!(expected, 14);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_long_row_rejected() {
        let csv = format!("{}\n{},extra\n", HEADER, line("M1", "LAGOS"));
        assert!(matches!(
            parse_str(&csv).unwrap_err(),
            LoadError::RowShape { row: 2, found: 15, .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let mut bytes = format!("{}\n", HEADER).into_bytes();
        bytes.extend_from_slice(b"M1,\xff\xfe,a,b,c,d,e,f,g,h,i,j,k,l\n");
        let err = parse_csv(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        match parse_csv_file(&path).unwrap_err() {
            LoadError::Open { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "{}", line("M9", "OYO")).unwrap();

        let records = parse_csv_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].jamb_num(), "J-M9");
    }
}
