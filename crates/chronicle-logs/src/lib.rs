//! Chronicle Logs - Date-rotated log files, archiving and expiry

pub mod archive;
mod clock;
mod console;
mod logger;
mod reader;
pub mod rotation;
mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use console::{Console, MemoryConsole, StdConsole};
pub use logger::{ChronicleLogger, ChronicleLoggerBuilder};
pub use reader::LogReader;
pub use rotation::{RotationConfig, RotationOutcome};
pub use writer::{format_entry, LogWriter};

pub use chronicle_core::{ExecutionContext, LogLevel, LoggerConfig, RemovalScope};
