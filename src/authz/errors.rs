use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("Failed to read catalog file `{path}`")]
    #[diagnostic(
        code(palisade::catalog::read),
        help("Check that the file exists and is readable by the service user")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog file `{path}` is not valid JSON")]
    #[diagnostic(
        code(palisade::catalog::parse),
        help("The catalog must be a JSON array of objects with `id`, `name`, and `securityLevel` (\"Public\" or \"Confidential\") fields")
    )]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate resource id `{id}` in catalog")]
    #[diagnostic(
        code(palisade::catalog::duplicate_id),
        help("Every catalog entry must have a unique `id`")
    )]
    DuplicateId { id: u64 },
}
