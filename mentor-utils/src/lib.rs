/// Generic embed builders shared across commands.
pub mod embed;
/// Shared text helpers (chunking, progress bars, mention escaping).
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Shared pagination helper utilities.
pub mod pagination;
