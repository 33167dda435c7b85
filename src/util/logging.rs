pub trait Logger {
    fn log(&mut self, msg: &str);
}

macro_rules! log {
    ($logger:expr, $($arg:tt)*) => {
        $crate::util::logging::Logger::log(&mut $logger, &format!($($arg)*))
    };
}

pub struct PrintLogger {
    name: String,
}

impl PrintLogger {
    #[must_use]
    pub const fn new(name: String) -> PrintLogger {
        PrintLogger { name }
    }
}

impl Logger for PrintLogger {
    fn log(&mut self, msg: &str) {
        println!("[{}] {}", self.name, msg);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NothingLogger;

impl Logger for NothingLogger {
    fn log(&mut self, _msg: &str) {}
}

/// Forwards engine chatter to `tracing` at debug level, so it is filtered by
/// the subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&mut self, msg: &str) {
        tracing::debug!(target: "packetsim::engine", "{msg}");
    }
}

/// Keeps every line, for asserting on what the engine reported.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogger {
    pub lines: Vec<String>,
}

impl Logger for MemoryLogger {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_owned());
    }
}
