/// Render the `--limit` flag as the string argument the operations accept.
///
/// Zero is passed through so the operation's own default applies.
#[must_use]
pub fn limit_arg(global: Option<u32>) -> Option<String> {
    global.map(|n| n.to_string())
}
