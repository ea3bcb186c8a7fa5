// Strictness switches for HexReader. The default follows the published format exactly.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct ReaderConfig {
    // Accept a-f as well as A-F inside records.
    pub accept_lowercase_digits: bool,
}

impl ReaderConfig {
    pub fn strict() -> ReaderConfig {
        ReaderConfig::default()
    }

    pub fn lenient() -> ReaderConfig {
        ReaderConfig { accept_lowercase_digits: true }
    }
}
