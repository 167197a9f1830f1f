//! Messages understood by the disassembly viewport.

use bubbletea_rs::Msg;

/// The host's scrollbar moved to this position.
#[derive(Debug, Clone, Copy)]
pub struct ScrollbarMsg(pub usize);

/// The execution pointer moved (or was cleared).
#[derive(Debug, Clone, Copy)]
pub struct ActiveAddressMsg(pub Option<usize>);

/// Select an address and center it.
#[derive(Debug, Clone, Copy)]
pub struct GoToAddressMsg(pub usize);

/// The exported selection was placed on the clipboard.
#[derive(Debug, Clone)]
pub struct CopyMsg(pub String);

/// Writing to the clipboard failed.
#[derive(Debug, Clone)]
pub struct CopyErrMsg(pub String);

impl From<ScrollbarMsg> for Msg {
    fn from(msg: ScrollbarMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<ActiveAddressMsg> for Msg {
    fn from(msg: ActiveAddressMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<GoToAddressMsg> for Msg {
    fn from(msg: GoToAddressMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<CopyMsg> for Msg {
    fn from(msg: CopyMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<CopyErrMsg> for Msg {
    fn from(msg: CopyErrMsg) -> Self {
        Box::new(msg) as Msg
    }
}
