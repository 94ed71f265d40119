// Decode configuration.
//
// The legacy editor tool logged missing essential items and carried on,
// which later surfaced as crashes on the absent data. `Strict` turns those
// into errors at decode time; `Lenient` keeps the old log-and-continue
// behaviour for salvaging damaged maps.

/// What to do when an object lacks one of its required items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Fail with `LcfError::MissingRequiredField`.
    #[default]
    Strict,
    /// Log each missing id and keep decoding. Trailing bytes after the map
    /// are logged and dropped.
    Lenient,
}

/// Options for decoding a map unit.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub policy: ValidationPolicy,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            policy: ValidationPolicy::Strict,
        }
    }

    pub fn lenient() -> Self {
        Self {
            policy: ValidationPolicy::Lenient,
        }
    }
}
