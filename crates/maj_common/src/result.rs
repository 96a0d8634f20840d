//! Internal-error type for synthesis passes.

/// Result of an operation that can only fail through a pass bug.
///
/// User mistakes such as an even width never surface here; they are typed
/// errors in the synthesis crate and are reported on a diagnostic sink.
pub type MajResult<T> = Result<T, InternalError>;

/// A broken invariant inside one stage of the synthesis flow.
///
/// `stage` names the pass or helper that detected the problem, e.g.
/// `const-fold` for an alias cycle or `emit` for a gate reading an undriven net.
#[derive(Debug, thiserror::Error)]
#[error("internal error in {stage}: {message}")]
pub struct InternalError {
    /// The stage that detected the broken invariant.
    pub stage: &'static str,
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error raised by `stage`.
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_stage() {
        let err = InternalError::new("const-fold", "alias cycle through s_c0_1");
        assert_eq!(
            err.to_string(),
            "internal error in const-fold: alias cycle through s_c0_1"
        );
    }

    #[test]
    fn question_mark_propagates() {
        fn check(depth: u32) -> MajResult<u32> {
            if depth > 64 {
                return Err(InternalError::new("depth", format!("depth {depth} out of range")));
            }
            Ok(depth)
        }
        fn outer() -> MajResult<u32> {
            Ok(check(3)? + check(65)?)
        }
        let err = outer().unwrap_err();
        assert_eq!(err.stage, "depth");
        assert_eq!(err.message, "depth 65 out of range");
    }
}
