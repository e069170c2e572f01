use std::time::Duration;

/// Maximum number of attempts for the fetch and send steps
pub const MAX_ATTEMPTS: usize = 15;

/// Fixed wait between attempts
pub const RETRY_WAIT: Duration = Duration::from_secs(15);

/// Runs the given fallible closure until it succeeds or the attempt cap is
/// reached, sleeping a fixed duration between attempts. Every failed attempt
/// is logged, the last error is returned.
///
/// The single argument form uses MAX_ATTEMPTS and RETRY_WAIT. The policy is
/// deliberately coarse in what it retries on, any error from the wrapped
/// step counts.
#[macro_export]
macro_rules! retry {
    ($op:expr) => {
        $crate::retry!($crate::retry::MAX_ATTEMPTS, $crate::retry::RETRY_WAIT, $op)
    };
    ($attempts:expr, $wait:expr, $op:expr) => {{
        let mut attempt: usize = 1;
        loop {
            match $op() {
                Ok(v) => break Ok(v),
                Err(e) => {
                    if attempt >= $attempts {
                        break Err(e);
                    }
                    log::warn!("Attempt {} of {} failed: {}", attempt, $attempts, e);
                    std::thread::sleep($wait);
                    attempt += 1;
                }
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    fn failing_until(success_at: usize) -> impl Fn() -> Result<usize, String> {
        let calls = Cell::new(0usize);
        move || {
            calls.set(calls.get() + 1);
            if calls.get() >= success_at {
                Ok(calls.get())
            } else {
                Err(format!("failure {}", calls.get()))
            }
        }
    }

    #[test]
    fn succeeds_on_last_allowed_attempt() {
        let op = failing_until(15);
        let result: Result<usize, String> = crate::retry!(15, Duration::ZERO, op);

        assert_eq!(result.unwrap(), 15);
    }

    #[test]
    fn gives_up_after_attempt_cap() {
        let op = failing_until(16);
        let result: Result<usize, String> = crate::retry!(15, Duration::ZERO, op);

        assert_eq!(result.unwrap_err(), "failure 15");
    }

    #[test]
    fn first_success_short_circuits() {
        let op = failing_until(1);
        let result: Result<usize, String> = crate::retry!(15, Duration::ZERO, op);

        assert_eq!(result.unwrap(), 1);
    }
}
