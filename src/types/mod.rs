use serde::Deserialize;

/// One compile request as it arrives on the wire: the source text still in
/// its escaped transport form (see the `decoder` module).
#[derive(Deserialize, Debug)]
pub struct CompileQuery {
    pub data: String,
}

/// The authoritative result line extracted from the compiler's output,
/// double-quote characters already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub text: String,
}
