//! Pathway file records

use std::io::Read;

use csv::StringRecord;

use crate::error::IngestError;

/// One data row of a pathway file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathwayRecord {
    /// Name of entity A
    pub entity_a: String,
    /// Declared type of entity A
    pub type_a: String,
    /// Identifier of entity A
    pub id_a: String,
    /// Name of entity B
    pub entity_b: String,
    /// Declared type of entity B
    pub type_b: String,
    /// Identifier of entity B
    pub id_b: String,
    /// Effect label
    pub effect: String,
    /// Mechanism label
    pub mechanism: String,
    /// Directness flag
    pub direct: bool,
    /// Literature reference
    pub pmid: String,
    /// Curator name
    pub annotator: Option<String>,
    /// Free-text curation date
    pub date: Option<String>,
    /// 1-based data row number
    pub linenum: usize,
}

const TABLE: &str = "pathway file";

/// Column positions resolved from a header row
#[derive(Debug, Clone)]
struct Columns {
    entity_a: usize,
    type_a: usize,
    id_a: usize,
    entity_b: usize,
    type_b: usize,
    id_b: usize,
    effect: usize,
    mechanism: usize,
    direct: usize,
    pmid: usize,
    annotator: Option<usize>,
    date: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| IngestError::MissingColumn {
                table: TABLE.to_string(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            entity_a: require("ENTITYA")?,
            type_a: require("TYPEA")?,
            id_a: require("IDA")?,
            entity_b: require("ENTITYB")?,
            type_b: require("TYPEB")?,
            id_b: require("IDB")?,
            effect: require("EFFECT")?,
            mechanism: require("MECHANISM")?,
            direct: require("DIRECT")?,
            pmid: require("PMID")?,
            annotator: find("ANNOTATOR"),
            date: find("DATE"),
        })
    }
}

/// Trim, drop a byte-order mark and upper-case a header cell
pub fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_uppercase()
}

/// `YES`, `Y`, `TRUE` and `T` in any casing
pub fn parse_direct(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "YES" | "Y" | "TRUE" | "T"
    )
}

/// Streaming reader over the records of a pathway file
pub struct PathwayReader<R: Read> {
    reader: csv::Reader<R>,
    columns: Columns,
    row: StringRecord,
    linenum: usize,
}

impl<R: Read> PathwayReader<R> {
    /// Read the header row and resolve column positions
    pub fn new(input: R, delimiter: u8) -> Result<Self, IngestError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(input);
        let columns = Columns::from_headers(reader.headers()?)?;
        Ok(Self {
            reader,
            columns,
            row: StringRecord::new(),
            linenum: 0,
        })
    }

    fn build(&self) -> PathwayRecord {
        let field = |i: usize| self.row.get(i).unwrap_or("").trim().to_string();
        let optional = |i: Option<usize>| i.map(field).filter(|v| !v.is_empty());
        let c = &self.columns;

        PathwayRecord {
            entity_a: field(c.entity_a),
            type_a: field(c.type_a),
            id_a: field(c.id_a),
            entity_b: field(c.entity_b),
            type_b: field(c.type_b),
            id_b: field(c.id_b),
            effect: field(c.effect),
            mechanism: field(c.mechanism),
            direct: parse_direct(&field(c.direct)),
            pmid: field(c.pmid),
            annotator: optional(c.annotator),
            date: optional(c.date),
            linenum: self.linenum,
        }
    }
}

impl<R: Read> Iterator for PathwayReader<R> {
    type Item = Result<PathwayRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.row) {
            Ok(true) => {
                self.linenum += 1;
                Some(Ok(self.build()))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "entitya\ttypea\tida\tdatabasea\tentityb\ttypeb\tidb\tdatabaseb\teffect\tmechanism\tresidue\tsequence\ttax_id\tcell_data\ttissue_data\tmodulator_complex\ttarget_complex\tmodificationa\tmodaseq\tmodificationb\tmodbseq\tpmid\tdirect\tnotes\tannotator\tsentence\tsignor_id";

    fn row() -> String {
        [
            "GSK3B", "protein", "P49841", "UNIPROT", "CEBPB", "protein", "P17676", "UNIPROT",
            "up-regulates", "phosphorylation", "Thr235", "", "9606", "", "", "", "", "", "", "",
            "", "10635333", "YES", "", "Curator One", "", "SIGNOR-1",
        ]
        .join("\t")
    }

    #[test]
    fn test_lowercase_headers_are_normalized() {
        let input = format!("{}\n{}\n", HEADER, row());
        let records: Vec<_> = PathwayReader::new(input.as_bytes(), b'\t')
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id_a, "P49841");
        assert_eq!(r.id_b, "P17676");
        assert_eq!(r.mechanism, "phosphorylation");
        assert!(r.direct);
        assert_eq!(r.pmid, "10635333");
        assert_eq!(r.annotator.as_deref(), Some("Curator One"));
        assert_eq!(r.date, None);
        assert_eq!(r.linenum, 1);
    }

    #[test]
    fn test_missing_column() {
        let input = "ENTITYA\tTYPEA\tIDA\n";
        let err = PathwayReader::new(input.as_bytes(), b'\t').err().unwrap();
        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "ENTITYB"));
    }

    #[test]
    fn test_short_row_fills_empty_fields() {
        let input = "ENTITYA\tTYPEA\tIDA\tENTITYB\tTYPEB\tIDB\tEFFECT\tMECHANISM\tDIRECT\tPMID\nA\tprotein\tP1\n";
        let record = PathwayReader::new(input.as_bytes(), b'\t')
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(record.id_a, "P1");
        assert_eq!(record.effect, "");
        assert!(!record.direct);
    }

    #[test]
    fn test_parse_direct() {
        for yes in ["YES", "yes", "Y", "t", "True"] {
            assert!(parse_direct(yes), "{}", yes);
        }
        for no in ["NO", "", "n", "false", "maybe"] {
            assert!(!parse_direct(no), "{}", no);
        }
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}entitya "), "ENTITYA");
    }
}
