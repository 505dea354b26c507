//! Packing rendered tokens into `RPL_ISUPPORT` lines.
//!
//! Clients expect at most 13 tokens per 005 line, and the whole serialized
//! line (prefix, numeric, target, tokens, trailing text and CRLF) must fit in
//! the 512-byte RFC 1459 message limit. The part of the line that depends on
//! the recipient (server prefix, numeric, target) is accounted for by a
//! caller-supplied `prefix_reserve`.

/// Maximum length of a client-protocol line, CRLF included.
pub const MAX_LINE_LEN: usize = 512;

/// Conventional maximum number of tokens in one 005 line.
pub const DEFAULT_MAX_PARAMS: usize = 13;

/// Trailing text appended to every 005 line.
pub const DEFAULT_TRAILING: &str = "are supported by this server";

/// Longest server name the default reserve allows for (a full hostname).
const DEFAULT_SERVER_NAME_LEN: usize = 63;

/// Longest target identifier the default reserve allows for.
const DEFAULT_TARGET_LEN: usize = 30;

/// Limits applied while packing lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineLimits {
    /// Maximum token parameters per line.
    pub max_params: usize,
    /// Maximum serialized line length in bytes.
    pub max_line_bytes: usize,
    /// Bytes reserved for `:server 005 target ` and the CRLF.
    pub prefix_reserve: usize,
}

impl LineLimits {
    /// Bytes needed for `:<server> 005 <target> ` plus CRLF.
    pub fn prefix_reserve_for(server_name_len: usize, target_len: usize) -> usize {
        // ":" server " 005 " target " " "\r\n"
        1 + server_name_len + 5 + target_len + 1 + 2
    }

    /// Limits for a concrete server name and longest possible target.
    pub fn for_server(server_name: &str, max_target_len: usize) -> Self {
        Self {
            prefix_reserve: Self::prefix_reserve_for(server_name.len(), max_target_len),
            ..Self::default()
        }
    }

    /// Longest target the reserve leaves room for, given the server name
    /// length the reserve was computed with.
    pub fn max_target_len(&self, server_name_len: usize) -> usize {
        self.prefix_reserve
            .saturating_sub(Self::prefix_reserve_for(server_name_len, 0))
    }

    /// The most bytes a single rendered token may occupy on an otherwise
    /// empty line with the given trailing text.
    pub fn max_param_len(&self, trailing: &str) -> usize {
        // " " before the trailing ":" is charged to the token.
        self.max_line_bytes
            .saturating_sub(self.fixed_len(trailing))
            .saturating_sub(1)
    }

    fn fixed_len(&self, trailing: &str) -> usize {
        self.prefix_reserve + 1 + trailing.len()
    }
}

impl Default for LineLimits {
    fn default() -> Self {
        Self {
            max_params: DEFAULT_MAX_PARAMS,
            max_line_bytes: MAX_LINE_LEN,
            prefix_reserve: Self::prefix_reserve_for(DEFAULT_SERVER_NAME_LEN, DEFAULT_TARGET_LEN),
        }
    }
}

/// One 005 line: rendered token parameters plus trailing text.
///
/// Lines carry no recipient; the target is filled in at send time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumericLine {
    params: Vec<String>,
    trailing: String,
}

impl NumericLine {
    /// Create a line from already-rendered parameters.
    pub fn new(params: Vec<String>, trailing: impl Into<String>) -> Self {
        Self {
            params,
            trailing: trailing.into(),
        }
    }

    /// Rendered token parameters, in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Trailing human-readable text.
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// Length of `<params> :<trailing>` without any prefix.
    pub fn body_len(&self) -> usize {
        let params: usize = self.params.iter().map(|p| p.len() + 1).sum();
        params + 1 + self.trailing.len()
    }

    /// Serialized length once `prefix_reserve` bytes of framing are added.
    pub fn byte_len(&self, limits: &LineLimits) -> usize {
        limits.prefix_reserve + self.body_len()
    }
}

/// Result of [`pack_lines`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedLines {
    /// Packed lines; never empty.
    pub lines: Vec<NumericLine>,
    /// Parameters too long to fit on any line, in input order.
    pub oversized: Vec<String>,
}

/// Pack rendered parameters into lines.
///
/// Parameters keep their input order. A new line is started whenever the
/// current one already holds `max_params` parameters or the next parameter
/// would push it past `max_line_bytes`. A parameter that does not fit even
/// on an empty line is skipped and reported in [`PackedLines::oversized`].
///
/// The final line is always emitted, so an empty input produces exactly one
/// line holding only the trailing text.
pub fn pack_lines<I>(params: I, limits: &LineLimits, trailing: &str) -> PackedLines
where
    I: IntoIterator<Item = String>,
{
    let max_params = limits.max_params.max(1);
    let fixed = limits.fixed_len(trailing);

    let mut packed = PackedLines::default();
    let mut current: Vec<String> = Vec::with_capacity(max_params);
    let mut current_len = fixed;

    for param in params {
        let cost = param.len() + 1;
        if fixed + cost > limits.max_line_bytes {
            packed.oversized.push(param);
            continue;
        }

        if current.len() >= max_params || current_len + cost > limits.max_line_bytes {
            let full = std::mem::replace(&mut current, Vec::with_capacity(max_params));
            packed.lines.push(NumericLine::new(full, trailing));
            current_len = fixed;
        }

        current_len += cost;
        current.push(param);
    }

    packed.lines.push(NumericLine::new(current, trailing));
    packed
}
