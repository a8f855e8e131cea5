pub mod command;
pub mod generator;

pub use command::{
    Action, ActionOptions, Assertion, CommandError, MouseButton, build_action_command,
    build_assertion_command, goto_commands, quote,
};
pub use generator::LocatorGenerator;
