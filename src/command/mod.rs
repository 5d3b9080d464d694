//! Text command protocol.
//!
//! ```text
//! HOME
//! HOME_LOOP
//! MOVE_REL <A|B> <signed-integer>
//! MOVE_ABS <A|B> <integer>
//! GETPOS
//! ```
//!
//! Lines are trimmed; verb and axis selector are case-insensitive.

mod dispatcher;
mod parser;
mod response;

pub use dispatcher::{dispatch, dispatch_line};
pub use parser::{Command, Tokens};
pub use response::{CommandResult, ResultCode, Status, HELP_TEXT, MESSAGE_CAPACITY};
