use derive_more::Display;

/// State change of a device reported by the state check task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Status {
    #[display("device is in SAFE-OP + ERROR, attempting ack")]
    Error,
    #[display("device is in SAFE-OP, change to OP")]
    StateChanged,
    #[display("device is lost")]
    Lost,
    #[display("all devices are back in OP")]
    Resumed,
}
