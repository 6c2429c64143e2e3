/// Numeric conversion helpers.
///
/// This module centralizes the conversions between the language's numeric
/// kinds and the host's index/count types, with range checks where the
/// conversion can fail at runtime.
pub mod num;
