pub mod audit;
pub mod nop;

pub use audit::Audit;
pub use nop::Nop;
