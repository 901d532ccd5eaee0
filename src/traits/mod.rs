mod driver;
mod native;

pub use driver::DatabaseDriver;
pub use native::{
    CommitMode, NativeClient, NativeColumn, NativeConnection, NativeError, NativeResult,
    NativeStatement,
};
