use std::{cell::RefCell, fmt::Write, io, rc::Rc};

// Shared, single-threaded handle to a buffer or stream.
pub type RcRefCell<T> = Rc<RefCell<T>>;

pub struct StringBuffer {
    s: String,
}

impl StringBuffer {
    pub fn new() -> StringBuffer {
        StringBuffer { s: String::new() }
    }

    pub fn as_str(&self) -> &str {
        self.s.as_str()
    }

    /// Takes the contents, leaving the buffer empty.
    pub fn export_string(&mut self) -> String {
        std::mem::take(&mut self.s)
    }
}

impl Default for StringBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// String only implements fmt::Write
impl io::Write for StringBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let str_rep = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        match self.s.write_str(str_rep) {
            Ok(_) => Ok(buf.len()),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// For convenience, so we can pass around a shared stream writer.
//
// This is the reporter handed to the pipeline for user-facing warnings and
// errors. The binary points it at stderr, tests at a StringBuffer (or
// nowhere, to run silently).
#[derive(Clone)]
pub struct WriteHandle {
    w: RcRefCell<dyn io::Write>,
}

impl WriteHandle {
    pub fn stdout_write_handle() -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(io::stdout())) }
    }

    pub fn stderr_write_handle() -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(io::stderr())) }
    }

    pub fn string_buff_write_handle() -> (WriteHandle, RcRefCell<StringBuffer>) {
        let buffer = Rc::new(RefCell::new(StringBuffer::new()));
        let h = WriteHandle { w: buffer.clone() };
        (h, buffer)
    }

    pub fn empty_write_handle() -> WriteHandle {
        WriteHandle { w: Rc::new(RefCell::new(io::sink())) }
    }
}

impl io::Write for WriteHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The test framework cannot capture direct writes to stdout or stderr,
        // so leave a trace of everything.
        tracing::trace!("WriteHandle::write {}", String::from_utf8_lossy(buf));
        self.w.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.w.borrow_mut().flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{StringBuffer, WriteHandle};

    #[test]
    fn test_string_buffer() {
        let mut buff = StringBuffer::new();
        let _ = write!(buff, "Some {}", "text");
        let _ = writeln!(buff, " 1");
        assert_eq!(buff.as_str(), "Some text 1\n");
        assert_eq!(buff.export_string(), "Some text 1\n");
        assert_eq!(buff.as_str(), "");
    }

    #[test]
    fn test_write_handle() {
        let (mut handle, buff) = WriteHandle::string_buff_write_handle();
        let mut handle_clone = handle.clone();
        let _ = write!(handle, "Some {}", "text");
        let _ = writeln!(handle_clone, " 1");
        assert_eq!(buff.borrow().as_str(), "Some text 1\n");

        let mut empty = WriteHandle::empty_write_handle();
        assert!(writeln!(empty, "dropped").is_ok());
    }
}
