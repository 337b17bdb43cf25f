pub mod create_handover_command;
pub mod decide_handover_command;

pub use create_handover_command::{
    CreateHandoverCommand, CreateHandoverResult, HandoverAssetInput,
};
pub use decide_handover_command::{
    DecideHandoverCommand, DecideHandoverResult, HandoverDecision,
};
