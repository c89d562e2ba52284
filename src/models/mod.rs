pub mod process;
pub mod record;
pub mod status;

pub use process::Process;
pub use record::Record;
pub use status::RecordStatus;
