mod in_memory_test;
#[cfg(feature = "oci")]
mod oci;
mod oracle;

pub use self::in_memory_test::{
    InMemoryClient, InMemoryConnection, InMemoryResponse, InMemoryResponseBuilder,
    InMemoryStatement, RecordedStatement,
};
#[cfg(feature = "oci")]
pub use self::oci::{OciClient, OciConnection, OciStatement};
pub use self::oracle::{ActiveStatement, OracleDriver};
