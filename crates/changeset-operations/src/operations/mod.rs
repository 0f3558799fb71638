mod verify;

pub use verify::{SkipReason, VerifyInput, VerifyOperation, VerifyOutcome, parse_changed_files};
