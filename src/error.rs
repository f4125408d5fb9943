/// Errors raised by the `reflag` front end
///
/// Translators themselves never fail; these cover resolving which
/// translator to run.
#[derive(Debug, thiserror::Error)]
pub enum ReflagError {
    #[error("no translator registered for {source_tool} to {target_tool}")]
    UnknownPair {
        source_tool: String,
        target_tool: String,
    },
    #[error("expected <source> <target> arguments")]
    MissingPair,
    #[error("binary name {0:?} is not of the form <source>2<target>")]
    InvalidBinaryName(String),
}
