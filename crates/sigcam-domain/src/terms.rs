//! Ontology identifiers used by the statement engine
//!
//! Only the terms the decision logic branches on live here. Everything else
//! (mechanism terms, entity classes) arrives through the reference tables.

/// Root molecular function term, used when no mechanism is known
pub const MOLECULAR_FUNCTION: &str = "GO:0003674";

/// Protein-containing complex, the class of every grouping node
pub const PROTEIN_CONTAINING_COMPLEX: &str = "GO:0032991";

/// protein kinase activity
pub const PROTEIN_KINASE_ACTIVITY: &str = "GO:0004672";

/// protein binding
pub const PROTEIN_BINDING: &str = "GO:0005515";

/// catalytic activity
pub const CATALYTIC_ACTIVITY: &str = "GO:0003824";

/// ubiquitin protein ligase activity
pub const UBIQUITIN_PROTEIN_LIGASE_ACTIVITY: &str = "GO:0061630";

/// DNA-binding transcription factor activity
pub const DNA_BINDING_TRANSCRIPTION_FACTOR_ACTIVITY: &str = "GO:0003700";

/// transcription regulator activity
pub const TRANSCRIPTION_REGULATOR_ACTIVITY: &str = "GO:0140110";

/// mRNA 3'-UTR binding
pub const MRNA_3_UTR_BINDING: &str = "GO:0003730";

/// mRNA 3'-UTR AU-rich region binding
pub const MRNA_3_UTR_AU_RICH_REGION_BINDING: &str = "GO:0035925";

/// proteasome-mediated ubiquitin-dependent protein catabolic process
pub const PROTEASOME_MEDIATED_CATABOLIC_PROCESS: &str = "GO:0043161";

/// mRNA transcription
pub const MRNA_TRANSCRIPTION: &str = "GO:0009299";

/// miRNA-mediated gene silencing
pub const GENE_SILENCING_BY_MIRNA: &str = "GO:0035195";

/// mRNA catabolic process
pub const MRNA_CATABOLIC_PROCESS: &str = "GO:0006402";

/// enabled by
pub const ENABLED_BY: &str = "RO:0002333";

/// has input
pub const HAS_INPUT: &str = "RO:0002233";

/// has output
pub const HAS_OUTPUT: &str = "RO:0002234";

/// has part
pub const HAS_PART: &str = "BFO:0000051";

/// experimental evidence used in manual assertion
pub const EXPERIMENTAL_EVIDENCE: &str = "ECO:0000269";

/// Prefix applied to bare literature references
pub const PUBMED_PREFIX: &str = "PMID:";

/// Namespace for protein accessions
pub const UNIPROT_PREFIX: &str = "UniProtKB:";

/// Namespace for microRNA accessions
pub const MIRBASE_PREFIX: &str = "miRBase:";

/// Namespace for small molecules
pub const CHEBI_PREFIX: &str = "CHEBI:";

/// Naming pattern of complex identifiers in the source database
pub const COMPLEX_ID_PREFIX: &str = "SIGNOR-C";

/// Naming pattern of protein family identifiers in the source database
pub const FAMILY_ID_PREFIX: &str = "SIGNOR-PF";

/// True if `id` follows the complex naming pattern
pub fn is_complex_id(id: &str) -> bool {
    id.starts_with(COMPLEX_ID_PREFIX)
}

/// True if `id` follows the protein family naming pattern
pub fn is_family_id(id: &str) -> bool {
    id.starts_with(FAMILY_ID_PREFIX)
}

/// Prefix a bare reference with `prefix` (normally `PMID:`)
///
/// References that already carry a namespace are kept. Empty input stays empty.
pub fn normalize_reference(reference: &str, prefix: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty() || reference.contains(':') {
        reference.to_string()
    } else {
        format!("{}{}", prefix, reference)
    }
}
