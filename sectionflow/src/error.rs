use alloc::string::String;

/// Errors produced by the registry, the choreography lookup and the transition state machine.
///
/// None of these are fatal: a rejected request leaves the engine exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A navigation link or programmatic request named a section that is not registered.
    #[error("unknown section `{0}`")]
    UnknownSection(String),

    /// Two sections were registered with the same id.
    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),

    /// No choreography override exists for a section; callers fall back to the default.
    #[error("no choreography registered for section `{0}`")]
    ConfigurationMissing(String),

    /// A transition is already in flight; the request was dropped.
    #[error("a transition is already in flight")]
    Busy,

    /// The requested section is already the current one.
    #[error("section {0} is already active")]
    AlreadyActive(usize),

    #[error("section index {index} is out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Navigation needs at least two sections.
    #[error("navigation needs at least two sections (have {0})")]
    NotEnoughSections(usize),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
