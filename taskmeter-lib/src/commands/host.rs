use std::io::Write;

/// The process environment a command runs in, abstracted so commands can be tested.
pub trait Host {
    /// Where summaries and other normal output go (stdout for the real binary).
    fn output(&mut self) -> impl Write;

    /// Where diagnostics go (stderr for the real binary).
    fn error(&mut self) -> impl Write;

    /// Terminate the process. Test hosts record the code instead.
    fn exit(&mut self, code: i32);
}

/// Host that appends everything to in-memory buffers
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
