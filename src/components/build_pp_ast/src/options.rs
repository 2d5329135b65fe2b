#[derive(Clone, Debug)]
pub struct ParserOptions {
    /// Log entry into and exit from each sub-parser at trace level
    pub trace: bool,

    /// Skip `typedef` lines instead of parsing them as expressions
    pub skip_typedefs: bool,

    /// Bound of each channel between pipeline stages
    pub channel_capacity: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            trace: false,
            skip_typedefs: true,
            channel_capacity: 64,
        }
    }
}
