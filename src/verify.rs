use crate::error::VerificationError;
use colored::Colorize;

/// Console line announcing the outcome of one verification.
pub fn verify_line(condition: bool, message: &str) -> String {
    if condition {
        format!("PASSED: {message}")
    } else {
        format!("FAILED: {message}")
    }
}

/// Print the outcome of `condition` and fail with `message` when it is false.
pub fn verify(condition: bool, message: impl Into<String>) -> Result<(), VerificationError> {
    let message = message.into();
    let line = verify_line(condition, &message);
    if condition {
        println!("{}", line.green());
        Ok(())
    } else {
        println!("{}", line.red());
        Err(VerificationError { message })
    }
}
