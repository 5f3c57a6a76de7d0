//! Registry file persistence abstract Trait

use crate::error::CoreResult;

/// Line-oriented storage holding the registry file.
///
/// Platform implementation:
/// - CLI: `FileLineStore` (atomic rewrite through a temporary file)
/// - Tests: in-memory stores
pub trait LineStore: Send + Sync {
    /// Read every line, without line terminators
    fn read_lines(&self) -> CoreResult<Vec<String>>;

    /// Replace the whole content with `lines`, each terminated by `\n`
    ///
    /// # Arguments
    /// * `lines` - Final line list, already sorted and deduplicated
    fn write_lines(&self, lines: &[String]) -> CoreResult<()>;
}
