use crate::util::rw::WriteHandle;

/// writeln! to a WriteHandle (or anything io::Write), ignoring failures.
/// There is nowhere left to report a failure to write an error.
#[macro_export]
macro_rules! write_errln {
    ($w:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        let _ = writeln!($w, $($arg)*);
    }};
}

/// Recoverable conditions go to both tracing and the user, since the run
/// continues with defaulted values and the user should know.
pub fn report_warning(err_w: &mut WriteHandle, msg: &str) {
    tracing::warn!("{msg}");
    write_errln!(err_w, "Warning: {msg}");
}

#[cfg(test)]
mod tests {
    use crate::util::rw::WriteHandle;

    use super::report_warning;

    #[test]
    fn test_write_errln() {
        let (mut err_w, buff) = WriteHandle::string_buff_write_handle();
        write_errln!(err_w, "Error: {}", 5);
        report_warning(&mut err_w, "something was missing");
        assert_eq!(
            buff.borrow().as_str(),
            "Error: 5\nWarning: something was missing\n"
        );
    }
}
