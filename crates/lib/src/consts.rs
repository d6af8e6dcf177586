//! Constants shared across the crate.

/// Prefix of every [`Style`](crate::entity::Style) identifier (and class name).
pub const STYLE_PREFIX: &str = "n";

/// Prefix of every [`Keyframes`](crate::entity::Keyframes) identifier (and animation name).
pub const KEYFRAMES_PREFIX: &str = "k";

/// Prefix of every [`Cache`](crate::cache::Cache) identifier.
pub const CACHE_PREFIX: &str = "f";

/// Initial accumulator of the content hash.
pub const HASH_SEED: u32 = 0x811c_9dc5;

/// Number of hex digits in a rendered content hash.
pub const HASH_HEX_LEN: usize = 8;

/// Vendor prefixes applied to the unit-less property set.
pub const VENDOR_PREFIXES: [&str; 4] = ["-webkit-", "-ms-", "-moz-", "-o-"];

/// At-rules a keyframes entity is rendered under, in output order.
pub const KEYFRAMES_RULES: [&str; 2] = ["@-webkit-keyframes", "@keyframes"];

/// The at-rule whose body is rendered without the enclosing selector.
pub const FONT_FACE_RULE: &str = "@font-face";
